pub mod error;
pub mod id;
pub mod layout;
pub mod model;
pub mod props;
pub mod registry;

pub use error::{ConfigError, PropError, RegistryError};
pub use id::{ComponentId, NodeId};
pub use layout::{LayoutConfig, LayoutResult, compute_layout};
pub use model::*;
pub use props::{Color, PropDefinition, PropKind, PropValue, Props};
pub use registry::{ComponentDefinition, Registry};

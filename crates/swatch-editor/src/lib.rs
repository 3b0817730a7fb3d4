pub mod config;
pub mod gesture;
pub mod graph;
pub mod history;
pub mod input;
pub mod instances;
pub mod palette;
pub mod panel;
pub mod session;
pub mod shortcuts;
pub mod viewport;

pub use config::CanvasConfig;
pub use graph::{DeleteOutcome, GraphStore, NodeUpdate, VariantMode};
pub use instances::{ComponentInstance, InstanceStore};
pub use session::{EditorSession, Notification, NotificationLevel};
pub use viewport::{Camera, ViewportHandle, ViewportState};

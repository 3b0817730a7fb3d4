pub mod hit;
pub mod preview;

pub use hit::{hit_test, node_bounds};
pub use preview::{Preview, PreviewRegistry};

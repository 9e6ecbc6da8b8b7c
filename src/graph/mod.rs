pub mod traits;
pub mod transit;

pub use traits::{Graph, MutableGraph};
pub use transit::TransitGraph;

pub mod dijkstra;
pub mod path;
pub mod traits;

pub use path::{reconstruct_path, PathDetail};
pub use traits::{PerformanceCounters, ShortestPathAlgorithm, ShortestPathResult};

pub mod adjacency;
pub mod network;
pub mod report;

pub use network::LoadSummary;

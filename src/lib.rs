//! Transit Paths - Instrumented Single-Source Shortest Path Analysis
//!
//! This library computes single-source shortest paths over a static transit
//! network, breaking distance ties on cumulative travel time and recording
//! per-trial performance counters (comparisons, relaxations, parent changes).
//!
//! A network is loaded once into a [`TransitGraph`], the engine is run once per
//! trial against the same graph and start node, and paths are reconstructed
//! from the resulting parent table for reporting.

pub mod algorithm;
pub mod analysis;
pub mod graph;
pub mod io;

pub use algorithm::{
    dijkstra::InstrumentedDijkstra, PathDetail, PerformanceCounters, ShortestPathAlgorithm,
    ShortestPathResult,
};
/// Re-export main types for convenient use
pub use graph::transit::TransitGraph;

/// Identifier of a network stop. Arbitrary non-negative integers; the node set
/// is whatever identifiers appear in the input, with no density assumption.
pub type NodeId = usize;

/// Error types for the library
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("report error: {0}")]
    Report(#[from] csv::Error),

    #[error("start node {0} not found in the network")]
    SourceNotFound(NodeId),

    #[error("no nodes found in the adjacency list")]
    EmptyNetwork,
}

impl Error {
    /// True for failures the menu loop cannot recover from. A missing input
    /// file is recoverable (the user can build it and retry); any other I/O
    /// failure is not.
    pub fn is_fatal(&self) -> bool {
        match self {
            Error::Io(err) => err.kind() != std::io::ErrorKind::NotFound,
            Error::Report(err) => err.is_io_error(),
            _ => false,
        }
    }
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;

use std::collections::HashMap;
use std::fmt::Debug;
use std::time::Duration;

use num_traits::{Float, Zero};

use crate::algorithm::path;
use crate::graph::Graph;
use crate::{NodeId, Result};

/// Instrumentation of a single shortest-path trial
///
/// Counters are reset when a trial starts and finalized when it completes.
/// The comparison counter grows once per node examined during minimum
/// selection and twice per edge examined during relaxation, whether or not
/// the relaxation fires.
#[derive(Debug, Clone, Copy, Default)]
pub struct PerformanceCounters {
    /// Node and edge comparisons performed
    pub comparisons: u64,

    /// Successful relaxations (distance/time/parent updates)
    pub relaxations: u64,

    /// Relaxations that assigned a different predecessor than before
    pub parent_changes: u64,

    /// Size of the auxiliary selection structure (the node table)
    pub auxiliary_size: usize,

    /// Wall-clock time of the main loop
    pub elapsed: Duration,
}

impl PerformanceCounters {
    /// Parent changes per relaxation, 0 when nothing was relaxed
    pub fn avg_parent_changes(&self) -> f64 {
        if self.relaxations > 0 {
            self.parent_changes as f64 / self.relaxations as f64
        } else {
            0.0
        }
    }
}

/// Result of one shortest-path trial
///
/// Tables are keyed by node id; a node absent from `distances` is unreachable
/// from the source, and a node absent from `parents` has no predecessor.
#[derive(Debug, Clone)]
pub struct ShortestPathResult<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Source node the trial was run from
    pub source: NodeId,

    /// Cumulative distance from the source to each reachable node
    pub distances: HashMap<NodeId, u64>,

    /// Cumulative travel time from the source to each reachable node
    pub times: HashMap<NodeId, W>,

    /// Predecessor of each node in the shortest path tree
    pub parents: HashMap<NodeId, NodeId>,

    /// Counters collected while the trial ran
    pub counters: PerformanceCounters,
}

impl<W> ShortestPathResult<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Returns true if the node was reached from the source
    pub fn is_reachable(&self, node: NodeId) -> bool {
        self.distances.contains_key(&node)
    }

    /// Total distance from the source, if the node was reached
    pub fn distance(&self, node: NodeId) -> Option<u64> {
        self.distances.get(&node).copied()
    }

    /// Total travel time from the source, if the node was reached
    pub fn time(&self, node: NodeId) -> Option<W> {
        self.times.get(&node).copied()
    }
}

/// Trait for shortest path algorithms
pub trait ShortestPathAlgorithm<W, G>
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
{
    /// Compute shortest paths from a source node to all other nodes
    ///
    /// The engine does not fail for an unregistered source; callers validate
    /// existence up front and an unknown source yields a result where nothing
    /// beyond the source itself is reachable.
    fn compute_shortest_paths(&self, graph: &G, source: NodeId) -> Result<ShortestPathResult<W>>;

    /// Get the name of the algorithm
    fn name(&self) -> &'static str;

    /// Get the shortest path from source to target as a sequence of nodes
    fn get_path(&self, result: &ShortestPathResult<W>, target: NodeId) -> Option<Vec<NodeId>> {
        path::reconstruct_path(result, target).map(|detail| detail.nodes)
    }
}

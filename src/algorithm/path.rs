use std::fmt::Debug;

use num_traits::{Float, Zero};

use crate::algorithm::ShortestPathResult;
use crate::NodeId;

/// A reconstructed shortest path with the running totals at every hop
#[derive(Debug, Clone)]
pub struct PathDetail<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Nodes from the source to the target, in travel order
    pub nodes: Vec<NodeId>,

    /// Cumulative distance from the source at each node of the path
    pub distances: Vec<u64>,

    /// Cumulative travel time from the source at each node of the path
    pub times: Vec<W>,

    /// Predecessor of each node of the path; `None` for the source
    pub predecessors: Vec<Option<NodeId>>,
}

impl<W> PathDetail<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Total distance from source to target
    pub fn total_distance(&self) -> u64 {
        self.distances.last().copied().unwrap_or(0)
    }

    /// Total travel time from source to target
    pub fn total_time(&self) -> W {
        self.times.last().copied().unwrap_or_else(W::zero)
    }

    /// Number of edges travelled
    pub fn hops(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }
}

/// Walks the parent table backward from `target` and materializes the path in
/// forward order, together with the cumulative distance/time and predecessor
/// at every visited node.
///
/// Returns `None` when the target is unreachable, or when the walk hits a
/// node without a recorded parent before arriving at the source (a broken
/// chain is treated the same as unreachable). The walk is iterative and
/// gives up once it has visited more nodes than the distance table holds.
///
/// When `target` equals the source the path is the single-element sequence
/// holding only the source, with a predecessor chain of `[None]`.
pub fn reconstruct_path<W>(
    result: &ShortestPathResult<W>,
    target: NodeId,
) -> Option<PathDetail<W>>
where
    W: Float + Zero + Debug + Copy,
{
    if !result.is_reachable(target) {
        return None;
    }

    let mut nodes = vec![target];
    let mut current = target;
    while current != result.source {
        current = *result.parents.get(&current)?;
        nodes.push(current);
        if nodes.len() > result.distances.len() {
            return None;
        }
    }
    nodes.reverse();

    let mut distances = Vec::with_capacity(nodes.len());
    let mut times = Vec::with_capacity(nodes.len());
    let mut predecessors = Vec::with_capacity(nodes.len());
    for &node in &nodes {
        distances.push(result.distance(node)?);
        times.push(result.time(node)?);
        predecessors.push(result.parents.get(&node).copied());
    }

    Some(PathDetail {
        nodes,
        distances,
        times,
        predecessors,
    })
}

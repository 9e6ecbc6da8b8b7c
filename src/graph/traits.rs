use std::fmt::Debug;

use num_traits::{Float, Zero};

use crate::NodeId;

/// Trait representing a directed transit network with two-part edge weights:
/// an integer distance and a floating point travel time
pub trait Graph<W>: Debug
where
    W: Float + Zero + Debug + Copy,
{
    /// Returns the number of nodes known to the graph
    fn node_count(&self) -> usize;

    /// Returns the number of edges in the graph
    fn edge_count(&self) -> usize;

    /// Returns an iterator over all node ids in ascending order
    fn nodes(&self) -> Box<dyn Iterator<Item = NodeId> + '_>;

    /// Returns an iterator over the outgoing edges of a node as
    /// (target, distance, time) triples; empty if the node has no edges
    fn outgoing_edges(&self, node: NodeId) -> Box<dyn Iterator<Item = (NodeId, u32, W)> + '_>;

    /// Returns true if the node has appeared as a source or target
    fn has_node(&self, node: NodeId) -> bool;

    /// Returns true if there's an edge between the two nodes
    fn has_edge(&self, from: NodeId, to: NodeId) -> bool;

    /// Gets the (distance, time) weights of an edge if it exists
    fn edge_weights(&self, from: NodeId, to: NodeId) -> Option<(u32, W)>;
}

/// Trait for mutable graph operations
pub trait MutableGraph<W>: Graph<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Registers a node without adding any edges
    fn insert_node(&mut self, node: NodeId);

    /// Inserts a directed edge, registering both endpoints. If an edge between
    /// the two nodes already exists, the lexicographically smaller
    /// (distance, time) pair is kept; parallel edges are never created.
    fn insert_edge(&mut self, from: NodeId, to: NodeId, distance: u32, time: W);

    /// Removes all nodes and edges
    fn clear(&mut self);
}

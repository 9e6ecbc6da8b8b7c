use std::collections::{BTreeSet, HashMap};
use std::fmt::Debug;

use num_traits::{Float, Zero};

use crate::graph::traits::{Graph, MutableGraph};
use crate::NodeId;

/// A single outgoing connection of a stop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitEdge<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Target stop
    pub target: NodeId,

    /// Distance weight, e.g. meters along the route
    pub distance: u32,

    /// Travel time weight
    pub time: W,
}

/// A directed transit network implementation using adjacency lists
///
/// Node ids are arbitrary integers; the graph keeps a separate registry of
/// every id seen as a source or target so node iteration is deterministic
/// (ascending) regardless of adjacency map layout.
#[derive(Debug, Clone)]
pub struct TransitGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Outgoing edges for each node: node_id -> [TransitEdge]
    adjacency: HashMap<NodeId, Vec<TransitEdge<W>>>,

    /// Every node id seen so far, in ascending order
    registry: BTreeSet<NodeId>,
}

impl<W> TransitGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Creates a new empty transit graph
    pub fn new() -> Self {
        TransitGraph {
            adjacency: HashMap::new(),
            registry: BTreeSet::new(),
        }
    }

    /// Creates a new transit graph sized for the expected number of nodes
    pub fn with_capacity(nodes: usize) -> Self {
        TransitGraph {
            adjacency: HashMap::with_capacity(nodes),
            registry: BTreeSet::new(),
        }
    }

    /// Validate that no stored edge carries a negative weight
    pub fn validate_non_negative(&self) -> bool {
        self.adjacency
            .values()
            .flatten()
            .all(|edge| edge.time >= W::zero())
    }
}

impl<W> Graph<W> for TransitGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    fn node_count(&self) -> usize {
        self.registry.len()
    }

    fn edge_count(&self) -> usize {
        self.adjacency.values().map(|edges| edges.len()).sum()
    }

    fn nodes(&self) -> Box<dyn Iterator<Item = NodeId> + '_> {
        Box::new(self.registry.iter().copied())
    }

    fn outgoing_edges(&self, node: NodeId) -> Box<dyn Iterator<Item = (NodeId, u32, W)> + '_> {
        if let Some(edges) = self.adjacency.get(&node) {
            Box::new(edges.iter().map(|e| (e.target, e.distance, e.time)))
        } else {
            Box::new(std::iter::empty())
        }
    }

    fn has_node(&self, node: NodeId) -> bool {
        self.registry.contains(&node)
    }

    fn has_edge(&self, from: NodeId, to: NodeId) -> bool {
        if let Some(edges) = self.adjacency.get(&from) {
            edges.iter().any(|e| e.target == to)
        } else {
            false
        }
    }

    fn edge_weights(&self, from: NodeId, to: NodeId) -> Option<(u32, W)> {
        self.adjacency
            .get(&from)?
            .iter()
            .find(|e| e.target == to)
            .map(|e| (e.distance, e.time))
    }
}

impl<W> MutableGraph<W> for TransitGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    fn insert_node(&mut self, node: NodeId) {
        self.registry.insert(node);
    }

    fn insert_edge(&mut self, from: NodeId, to: NodeId, distance: u32, time: W) {
        self.registry.insert(from);
        self.registry.insert(to);

        let edges = self.adjacency.entry(from).or_default();
        if let Some(existing) = edges.iter_mut().find(|e| e.target == to) {
            // Duplicate connection: keep the lexicographically smaller
            // (distance, time) pair.
            if distance < existing.distance
                || (distance == existing.distance && time < existing.time)
            {
                existing.distance = distance;
                existing.time = time;
            }
            return;
        }
        edges.push(TransitEdge {
            target: to,
            distance,
            time,
        });
    }

    fn clear(&mut self) {
        self.adjacency.clear();
        self.registry.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordered_float::OrderedFloat;

    fn graph() -> TransitGraph<OrderedFloat<f64>> {
        TransitGraph::new()
    }

    #[test]
    fn duplicate_edge_keeps_smaller_distance() {
        let mut g = graph();
        g.insert_edge(1, 2, 10, OrderedFloat(5.0));
        g.insert_edge(1, 2, 7, OrderedFloat(9.0));

        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.edge_weights(1, 2), Some((7, OrderedFloat(9.0))));
    }

    #[test]
    fn duplicate_edge_breaks_distance_tie_on_time() {
        let mut g = graph();
        g.insert_edge(1, 2, 10, OrderedFloat(5.0));
        g.insert_edge(1, 2, 7, OrderedFloat(9.0));
        g.insert_edge(1, 2, 7, OrderedFloat(3.0));

        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.edge_weights(1, 2), Some((7, OrderedFloat(3.0))));
    }

    #[test]
    fn duplicate_edge_ignores_larger_pair() {
        let mut g = graph();
        g.insert_edge(1, 2, 7, OrderedFloat(3.0));
        g.insert_edge(1, 2, 7, OrderedFloat(4.0));
        g.insert_edge(1, 2, 8, OrderedFloat(1.0));

        assert_eq!(g.edge_weights(1, 2), Some((7, OrderedFloat(3.0))));
    }

    #[test]
    fn endpoints_are_registered() {
        let mut g = graph();
        g.insert_edge(10, 900, 1, OrderedFloat(1.0));

        assert!(g.has_node(10));
        assert!(g.has_node(900));
        assert!(!g.has_node(11));
        assert_eq!(g.node_count(), 2);
    }

    #[test]
    fn nodes_iterate_in_ascending_order() {
        let mut g = graph();
        g.insert_edge(42, 7, 1, OrderedFloat(1.0));
        g.insert_edge(7, 1000, 1, OrderedFloat(1.0));
        g.insert_node(3);

        let nodes: Vec<NodeId> = g.nodes().collect();
        assert_eq!(nodes, vec![3, 7, 42, 1000]);
    }

    #[test]
    fn unknown_node_has_no_neighbors() {
        let g = graph();
        assert_eq!(g.outgoing_edges(5).count(), 0);
        assert!(!g.has_edge(5, 6));
    }

    #[test]
    fn clear_releases_everything() {
        let mut g = graph();
        g.insert_edge(1, 2, 1, OrderedFloat(1.0));
        g.clear();

        assert_eq!(g.node_count(), 0);
        assert_eq!(g.edge_count(), 0);
    }
}

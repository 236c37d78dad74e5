use crate::automaton::{Edge, EdgeKind, Node, NodeId};
use crate::input::Instance;
use petgraph::Direction;
use petgraph::prelude::EdgeRef;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableGraph};
use std::collections::HashMap;

/// A directed graph of automaton states and their transitions.
///
/// Nodes and edges are only ever appended, so index order is the order in
/// which they were enumerated from the instance. Layout relies on that order
/// for tie-breaking.
pub struct AutomatonGraph {
    /// Nodes are automaton states, edges are Advance or Skip transitions.
    pub graph: StableGraph<Node, Edge>,

    /// Lookup from node id to graph index. Each id is represented by exactly
    /// one node.
    pub node_index: HashMap<NodeId, NodeIndex>,
}

impl Default for AutomatonGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl AutomatonGraph {
    pub fn new() -> Self {
        Self {
            graph: StableGraph::new(),
            node_index: HashMap::new(),
        }
    }

    /// Adds a node unless its id is already present.
    pub fn add_node(&mut self, node: Node) -> Option<NodeIndex> {
        if self.node_index.contains_key(&node.id) {
            tracing::warn!("Ignoring duplicate node id {}", node.id);
            return None;
        }
        let id = node.id.clone();
        let idx = self.graph.add_node(node);
        self.node_index.insert(id, idx);
        Some(idx)
    }

    /// Adds an edge between two existing nodes.
    pub fn add_edge(&mut self, edge: Edge) -> Option<EdgeIndex> {
        if let (Some(&from_idx), Some(&to_idx)) = (
            self.node_index.get(&edge.source),
            self.node_index.get(&edge.target),
        ) {
            Some(self.graph.add_edge(from_idx, to_idx, edge))
        } else {
            tracing::warn!(
                "Ignoring {} edge {} with unknown endpoint",
                edge.kind.name(),
                edge.key()
            );
            None
        }
    }

    /// Build the graph from an instance.
    ///
    /// Per-node relations come first (each node's Advance targets, then its
    /// Skip targets), followed by the flat edge list in input order.
    pub fn build(instance: &Instance) -> Self {
        let mut automaton = Self::new();

        // Relations of a dropped duplicate record are dropped with it
        let kept: Vec<_> = instance
            .nodes
            .iter()
            .filter(|record| automaton.add_node(Node::from_record(record)).is_some())
            .collect();

        for record in kept {
            for target in &record.advance {
                automaton.add_edge(Edge::new(record.id.clone(), target.clone(), EdgeKind::Advance));
            }
            for target in &record.skip {
                automaton.add_edge(Edge::new(record.id.clone(), target.clone(), EdgeKind::Skip));
            }
        }

        for record in &instance.edges {
            automaton.add_edge(Edge::new(
                record.source_id.clone(),
                record.target_id.clone(),
                record.kind,
            ));
        }

        tracing::debug!(
            "Built automaton with {} nodes and {} edges",
            automaton.node_count(),
            automaton.edge_count()
        );
        automaton
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Nodes in enumeration order
    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &Node)> + '_ {
        self.graph
            .node_indices()
            .filter_map(move |idx| self.graph.node_weight(idx).map(|n| (idx, n)))
    }

    /// Edges in enumeration order
    pub fn edges(&self) -> impl Iterator<Item = (EdgeIndex, &Edge)> + '_ {
        self.graph
            .edge_indices()
            .filter_map(move |idx| self.graph.edge_weight(idx).map(|e| (idx, e)))
    }

    /// Successors of a node, in edge enumeration order, one per edge
    pub fn successors(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut out: Vec<(EdgeIndex, NodeIndex)> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|edge| (edge.id(), edge.target()))
            .collect();
        out.sort_by_key(|(edge_idx, _)| *edge_idx);
        out.into_iter().map(|(_, target)| target).collect()
    }

    pub fn get_node(&self, id: &str) -> Option<&Node> {
        self.node_index
            .get(id)
            .and_then(|&idx| self.graph.node_weight(idx))
    }

    /// First start node in enumeration order
    pub fn start(&self) -> Option<NodeIndex> {
        self.nodes().find(|(_, n)| n.is_start()).map(|(idx, _)| idx)
    }

    /// First accepting node in enumeration order
    pub fn accepting(&self) -> Option<NodeIndex> {
        self.nodes()
            .find(|(_, n)| n.is_accepting())
            .map(|(idx, _)| idx)
    }
}

//! Column assignment
//!
//! Breadth-first traversal from the start node gives every node a column.
//! Unreached nodes sit in the middle column and the accepting node is pinned
//! to the last one.

use crate::automaton::AutomatonGraph;
use crate::layout::types::Layer;
use petgraph::stable_graph::NodeIndex;
use std::collections::{BTreeMap, HashMap, VecDeque};

/// Final column of every node
#[derive(Debug, Clone, Default)]
pub struct ColumnAssignment {
    pub columns: HashMap<NodeIndex, usize>,
    pub max_depth: usize,
    /// Nodes discovered by the traversal, the start node included
    pub reached: usize,
}

impl ColumnAssignment {
    pub fn column(&self, idx: NodeIndex) -> usize {
        self.columns.get(&idx).copied().unwrap_or(0)
    }

    pub fn column_count(&self) -> usize {
        self.max_depth + 1
    }

    /// Absolute column distance between two nodes
    pub fn span(&self, from: NodeIndex, to: NodeIndex) -> usize {
        self.column(from).abs_diff(self.column(to))
    }

    /// Group nodes by column, keeping enumeration order inside each layer
    pub fn layers(&self, automaton: &AutomatonGraph) -> Vec<Layer> {
        let mut grouped: BTreeMap<usize, Vec<String>> = BTreeMap::new();
        for (idx, node) in automaton.nodes() {
            grouped
                .entry(self.column(idx))
                .or_default()
                .push(node.id.clone());
        }
        grouped
            .into_iter()
            .map(|(column, nodes)| Layer { column, nodes })
            .collect()
    }
}

/// BFS depth of every node reachable from `start`. First discovery wins.
fn bfs_depths(automaton: &AutomatonGraph, start: NodeIndex) -> HashMap<NodeIndex, usize> {
    let mut depth = HashMap::new();
    depth.insert(start, 0);
    let mut queue = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        let next_depth = depth[&current] + 1;
        for neighbor in automaton.successors(current) {
            if let std::collections::hash_map::Entry::Vacant(slot) = depth.entry(neighbor) {
                slot.insert(next_depth);
                queue.push_back(neighbor);
            }
        }
    }
    depth
}

/// Assign every node of the automaton a column.
pub fn assign_columns(automaton: &AutomatonGraph) -> ColumnAssignment {
    let mut columns = match automaton.start() {
        Some(start) => bfs_depths(automaton, start),
        None => HashMap::new(),
    };
    let reached = columns.len();

    let max_depth = if columns.is_empty() {
        1
    } else {
        columns.values().copied().max().unwrap_or(0)
    };

    let fallback = max_depth / 2;
    for (idx, _) in automaton.nodes() {
        columns.entry(idx).or_insert(fallback);
    }

    // May land left of a deeper node that is not on any path to it
    if let Some(accepting) = automaton.accepting() {
        columns.insert(accepting, max_depth);
    }

    tracing::debug!(
        "Assigned {} nodes to {} columns ({} reached from start)",
        columns.len(),
        max_depth + 1,
        reached
    );

    ColumnAssignment {
        columns,
        max_depth,
        reached,
    }
}

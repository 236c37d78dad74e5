//! Automaton shape analyzer
//!
//! Summarizes the transition structure of an automaton: how many edges of
//! each family it has, whether it loops, and how much of it the start node
//! can reach.

use super::{AutomatonGraph, EdgeKind};
use petgraph::Direction;
use petgraph::visit::Bfs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutomatonShape {
    /// No states at all
    Empty,

    /// Start -> a -> b -> Accepting
    Linear,

    /// Some state has more than one successor, no cycles
    Branching,

    /// Contains a cycle (self-loops included)
    Cyclic,
}

impl AutomatonShape {
    pub fn display_name(&self) -> &'static str {
        match self {
            AutomatonShape::Empty => "Empty",
            AutomatonShape::Linear => "Linear",
            AutomatonShape::Branching => "Branching",
            AutomatonShape::Cyclic => "Cyclic",
        }
    }
}

/// Analysis report containing shape and edge metrics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisReport {
    pub shape: AutomatonShape,
    pub advance_edges: usize,
    pub skip_edges: usize,
    pub self_loops: usize,
    pub has_cycles: bool,
    /// States reachable from the start node, the start node included
    pub reachable: usize,
    pub unreachable: usize,
}

/// Analyze the structure of an automaton graph
pub fn analyze(automaton: &AutomatonGraph) -> AnalysisReport {
    let node_count = automaton.node_count();

    let mut advance_edges = 0;
    let mut skip_edges = 0;
    let mut self_loops = 0;
    for (_, edge) in automaton.edges() {
        if edge.is_self_loop() {
            self_loops += 1;
        } else {
            match edge.kind {
                EdgeKind::Advance => advance_edges += 1,
                EdgeKind::Skip => skip_edges += 1,
            }
        }
    }

    let mut reachable = 0;
    if let Some(start) = automaton.start() {
        let mut bfs = Bfs::new(&automaton.graph, start);
        while bfs.next(&automaton.graph).is_some() {
            reachable += 1;
        }
    }

    let has_cycles = petgraph::algo::is_cyclic_directed(&automaton.graph);

    let shape = if node_count == 0 {
        AutomatonShape::Empty
    } else if has_cycles {
        AutomatonShape::Cyclic
    } else {
        let max_out = automaton
            .graph
            .node_indices()
            .map(|idx| {
                automaton
                    .graph
                    .edges_directed(idx, Direction::Outgoing)
                    .count()
            })
            .max()
            .unwrap_or(0);
        if max_out <= 1 {
            AutomatonShape::Linear
        } else {
            AutomatonShape::Branching
        }
    };

    AnalysisReport {
        shape,
        advance_edges,
        skip_edges,
        self_loops,
        has_cycles,
        reachable,
        unreachable: node_count - reachable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Instance, NodeRecord};

    fn build(nodes: Vec<NodeRecord>) -> AutomatonGraph {
        AutomatonGraph::build(&Instance {
            nodes,
            ..Instance::default()
        })
    }

    #[test]
    fn test_empty() {
        let report = analyze(&AutomatonGraph::new());
        assert_eq!(report.shape, AutomatonShape::Empty);
        assert_eq!(report.reachable, 0);
        assert_eq!(report.unreachable, 0);
    }

    #[test]
    fn test_linear() {
        let graph = build(vec![
            NodeRecord::new("Start").start().advance_to("A"),
            NodeRecord::new("A").skip_to("Accepting"),
            NodeRecord::new("Accepting").accepting(),
        ]);
        let report = analyze(&graph);
        assert_eq!(report.shape, AutomatonShape::Linear);
        assert_eq!(report.advance_edges, 1);
        assert_eq!(report.skip_edges, 1);
        assert_eq!(report.reachable, 3);
        assert!(!report.has_cycles);
    }

    #[test]
    fn test_self_loop_is_cyclic() {
        let graph = build(vec![
            NodeRecord::new("Start").start().advance_to("A"),
            NodeRecord::new("A").advance_to("A").advance_to("Accepting"),
            NodeRecord::new("Accepting").accepting(),
            NodeRecord::new("Orphan"),
        ]);
        let report = analyze(&graph);
        assert_eq!(report.shape, AutomatonShape::Cyclic);
        assert_eq!(report.self_loops, 1);
        assert_eq!(report.advance_edges, 2);
        assert_eq!(report.unreachable, 1);
    }

    #[test]
    fn test_branching() {
        let graph = build(vec![
            NodeRecord::new("Start").start().advance_to("A").skip_to("B"),
            NodeRecord::new("A"),
            NodeRecord::new("B"),
        ]);
        assert_eq!(analyze(&graph).shape, AutomatonShape::Branching);
    }
}

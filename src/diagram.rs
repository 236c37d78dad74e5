//! Diagram assembly
//!
//! Runs the whole pipeline (build, layout, route) and annotates the input
//! tape with the positions the trace consumed.

use crate::automaton::{ActiveTrace, AutomatonGraph, build_model};
use crate::config::Config;
use crate::input::Instance;
use crate::layout::{Layout, compute_layout};
use serde::{Deserialize, Serialize};

/// One input tape cell, flagged when the trace read it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TapeCell {
    pub index: i64,
    pub symbol: String,
    pub consumed: bool,
}

/// Counts shown in the diagram header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub node_count: usize,
    pub edge_count: usize,
    pub tape_length: usize,
    pub transition_count: usize,
}

impl Summary {
    pub fn header_line(&self) -> String {
        format!(
            "{} nodes · {} edges · {} chars · {} transitions",
            self.node_count, self.edge_count, self.tape_length, self.transition_count
        )
    }
}

/// Everything a renderer needs, computed fresh from one instance
pub struct Diagram {
    pub automaton: AutomatonGraph,
    pub trace: ActiveTrace,
    pub layout: Layout,
    pub tape: Vec<TapeCell>,
    pub summary: Summary,
}

impl Diagram {
    /// Normalize the instance and run the layout pipeline.
    pub fn build(instance: Instance, config: &Config) -> Self {
        let instance = instance.normalized(&config.input);
        let (automaton, trace) = build_model(&instance);
        let layout = compute_layout(&automaton, &trace, &config.layout);

        let tape: Vec<TapeCell> = instance
            .tape
            .iter()
            .map(|cell| TapeCell {
                index: cell.index,
                symbol: cell.symbol.clone(),
                consumed: trace.is_index_consumed(cell.index),
            })
            .collect();

        let summary = Summary {
            node_count: automaton.node_count(),
            edge_count: automaton.edge_count(),
            tape_length: tape.len(),
            transition_count: trace.transitions,
        };

        tracing::info!("Built diagram: {}", summary.header_line());

        Self {
            automaton,
            trace,
            layout,
            tape,
            summary,
        }
    }
}

/// Regex `a.` style automaton with a partially accepted trace
#[cfg(test)]
pub(crate) fn sample_instance() -> Instance {
    use crate::input::{NodeRecord, StateRecord, StepRecord, TapeRecord, TraceRecord};

    Instance {
        nodes: vec![
            NodeRecord::new("Start0").start().advance_to("Node0"),
            NodeRecord::new("Node0")
                .with_character("a0")
                .advance_to("Node1")
                .skip_to("Node1"),
            NodeRecord::new("Node1").wildcard().advance_to("Accepting0"),
            NodeRecord::new("Accepting0").accepting(),
        ],
        trace: Some(TraceRecord {
            steps: vec![
                StepRecord::new("S0", "S1").with_accepted(true),
                StepRecord::new("S1", "S2").with_accepted(true),
                StepRecord::new("S2", "S3").with_accepted(false),
            ],
            states: vec![
                StateRecord::new("S0", "Start0", 0),
                StateRecord::new("S1", "Node0", 1),
                StateRecord::new("S2", "Node1", 2),
                StateRecord::new("S3", "Accepting0", 3),
            ],
        }),
        tape: vec![
            TapeRecord::new(2, "c2"),
            TapeRecord::new(0, "a0"),
            TapeRecord::new(1, "b1"),
        ],
        ..Instance::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_diagram() {
        let diagram = Diagram::build(sample_instance(), &Config::default());

        assert_eq!(
            diagram.summary,
            Summary {
                node_count: 4,
                edge_count: 4,
                tape_length: 3,
                transition_count: 2,
            }
        );
        assert_eq!(
            diagram.summary.header_line(),
            "4 nodes · 4 edges · 3 chars · 2 transitions"
        );

        let symbols: Vec<&str> = diagram.tape.iter().map(|c| c.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["a", "b", "c"]);
        let consumed: Vec<bool> = diagram.tape.iter().map(|c| c.consumed).collect();
        assert_eq!(consumed, vec![true, true, false]);

        assert_eq!(diagram.automaton.get_node("Node0").unwrap().label, "a");
        assert_eq!(diagram.automaton.get_node("Node1").unwrap().label, ".");
        assert_eq!(diagram.layout.column_of("Accepting0"), Some(3));
    }

    #[test]
    fn test_build_without_trace_or_tape() {
        let instance = Instance {
            trace: None,
            tape: vec![],
            ..sample_instance()
        };
        let diagram = Diagram::build(instance, &Config::default());
        assert_eq!(diagram.summary.transition_count, 0);
        assert!(diagram.tape.is_empty());
        assert!(diagram.layout.edges.iter().all(|e| !e.is_active));
    }
}

//! Trace reduction
//!
//! Collapses an execution trace into the sets the diagram highlights: the
//! nodes visited, the automaton edges taken and the input positions read.

use crate::automaton::{EdgeKey, NodeId};
use crate::input::TraceRecord;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Highlighted subset of the automaton
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveTrace {
    pub nodes: BTreeSet<NodeId>,
    pub edges: BTreeSet<EdgeKey>,
    /// Input positions of every reduced step's pre-state
    pub indices: BTreeSet<i64>,
    /// Reduced steps, counted before deduplication
    pub transitions: usize,
}

impl ActiveTrace {
    /// Reduce a trace to its active sets.
    ///
    /// Rejected steps are ignored. Steps whose states do not resolve to a
    /// node are dropped without aborting the rest of the reduction.
    pub fn reduce(trace: Option<&TraceRecord>) -> Self {
        let mut active = Self::default();
        let Some(trace) = trace else {
            return active;
        };

        let mut state_node: HashMap<&str, &str> = HashMap::new();
        let mut state_index: HashMap<&str, i64> = HashMap::new();
        for state in &trace.states {
            if let Some(node) = &state.node {
                state_node.insert(state.id.as_str(), node.as_str());
            }
            if let Some(index) = state.index {
                state_index.insert(state.id.as_str(), index);
            }
        }

        for step in &trace.steps {
            if step.accepted == Some(false) {
                continue;
            }
            let (Some(&before), Some(&after)) = (
                state_node.get(step.state_before.as_str()),
                state_node.get(step.state_after.as_str()),
            ) else {
                tracing::trace!(
                    "Dropping trace step {} -> {}: unresolved state",
                    step.state_before,
                    step.state_after
                );
                continue;
            };

            active.nodes.insert(before.to_string());
            active.nodes.insert(after.to_string());
            active.edges.insert(EdgeKey::new(before, after));
            if let Some(&index) = state_index.get(step.state_before.as_str()) {
                active.indices.insert(index);
            }
            active.transitions += 1;
        }

        tracing::debug!(
            "Reduced trace: {} transitions, {} active nodes, {} active edges",
            active.transitions,
            active.nodes.len(),
            active.edges.len()
        );
        active
    }

    pub fn is_empty(&self) -> bool {
        self.transitions == 0
    }

    pub fn is_node_active(&self, id: &str) -> bool {
        self.nodes.contains(id)
    }

    pub fn is_edge_active(&self, key: &EdgeKey) -> bool {
        self.edges.contains(key)
    }

    pub fn is_index_consumed(&self, index: i64) -> bool {
        self.indices.contains(&index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{StateRecord, StepRecord};

    fn trace(steps: Vec<StepRecord>) -> TraceRecord {
        TraceRecord {
            steps,
            states: vec![
                StateRecord::new("S0", "Start", 0),
                StateRecord::new("S1", "A", 1),
                StateRecord::new("S2", "A", 2),
                StateRecord::new("S3", "Accepting", 3),
            ],
        }
    }

    #[test]
    fn test_no_trace() {
        let active = ActiveTrace::reduce(None);
        assert!(active.is_empty());
        assert!(active.nodes.is_empty());
        assert!(active.edges.is_empty());
    }

    #[test]
    fn test_zero_steps() {
        let active = ActiveTrace::reduce(Some(&trace(vec![])));
        assert!(active.nodes.is_empty());
        assert!(active.edges.is_empty());
        assert!(active.indices.is_empty());
    }

    #[test]
    fn test_reduce_collects_sets() {
        let active = ActiveTrace::reduce(Some(&trace(vec![
            StepRecord::new("S0", "S1"),
            StepRecord::new("S1", "S2").with_accepted(true),
            StepRecord::new("S2", "S3"),
        ])));

        assert_eq!(active.transitions, 3);
        assert_eq!(active.nodes.len(), 3);
        assert!(active.is_edge_active(&EdgeKey::new("Start", "A")));
        assert!(active.is_edge_active(&EdgeKey::new("A", "A")));
        assert!(active.is_edge_active(&EdgeKey::new("A", "Accepting")));
        assert_eq!(active.indices, BTreeSet::from([0i64, 1, 2]));
    }

    #[test]
    fn test_repeated_edge_collapses() {
        let active = ActiveTrace::reduce(Some(&trace(vec![
            StepRecord::new("S1", "S2"),
            StepRecord::new("S2", "S1"),
        ])));
        assert_eq!(active.transitions, 2);
        assert_eq!(active.edges.len(), 1);
    }

    #[test]
    fn test_rejected_step_ignored() {
        let active = ActiveTrace::reduce(Some(&trace(vec![
            StepRecord::new("S0", "S1").with_accepted(false),
        ])));
        assert!(active.is_empty());
        assert!(!active.is_node_active("Start"));
    }

    #[test]
    fn test_unresolved_step_dropped() {
        let active = ActiveTrace::reduce(Some(&trace(vec![
            StepRecord::new("S0", "Missing"),
            StepRecord::new("S2", "S3"),
        ])));
        assert_eq!(active.transitions, 1);
        assert!(!active.is_node_active("Start"));
        assert!(active.is_node_active("Accepting"));
        assert!(active.is_index_consumed(2));
        assert!(!active.is_index_consumed(0));
    }

    #[test]
    fn test_state_without_index() {
        let record = TraceRecord {
            steps: vec![StepRecord::new("X", "Y")],
            states: vec![
                StateRecord {
                    id: "X".to_string(),
                    node: Some("Start".to_string()),
                    index: None,
                },
                StateRecord::new("Y", "A", 4),
            ],
        };
        let active = ActiveTrace::reduce(Some(&record));
        assert_eq!(active.transitions, 1);
        assert!(active.indices.is_empty());
    }
}

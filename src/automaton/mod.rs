//! Automaton module - Build the graph model from an instance

use crate::input::Instance;

pub mod analyzer;
pub mod edge;
pub mod graph;
pub mod node;
pub mod trace;

// Re-export key types
pub use edge::{Edge, EdgeKey, EdgeKind};
pub use graph::AutomatonGraph;
pub use node::{Node, NodeId, NodeRole, resolve_label};
pub use trace::ActiveTrace;

/// Build the automaton graph and its active trace subset from an instance
pub fn build_model(instance: &Instance) -> (AutomatonGraph, ActiveTrace) {
    let automaton = AutomatonGraph::build(instance);
    let trace = ActiveTrace::reduce(instance.trace.as_ref());
    (automaton, trace)
}

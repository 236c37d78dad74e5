//! Layout module - Layered placement and edge routing
//!
//! A single deterministic pass: columns from a breadth-first traversal,
//! rows centered on a shared centerline, then one slot per arc. Nothing is
//! retained between calls.

use crate::automaton::{ActiveTrace, AutomatonGraph, EdgeKind};
use crate::config::LayoutConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod columns;
pub mod positions;
pub mod routing;
pub mod types;

pub use columns::{ColumnAssignment, assign_columns};
pub use routing::{DrawPass, EdgeFamily, EdgeRoute, route_edges};
pub use types::{Canvas, CubicPath, Layer, Point};

/// Computed geometry for one automaton
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub canvas: Canvas,
    pub column_count: usize,
    pub layers: Vec<Layer>,
    /// Node centers in graph-band coordinates
    pub positions: BTreeMap<String, Point>,
    /// Edges in paint order
    pub edges: Vec<EdgeRoute>,
}

impl Layout {
    pub fn column_of(&self, id: &str) -> Option<usize> {
        self.layers
            .iter()
            .find(|layer| layer.nodes.iter().any(|n| n == id))
            .map(|layer| layer.column)
    }

    pub fn edges_in_pass(&self, pass: DrawPass) -> impl Iterator<Item = &EdgeRoute> {
        self.edges.iter().filter(move |e| e.pass == pass)
    }
}

/// Count of non-self arcs per family, used to size the canvas
fn arc_counts(automaton: &AutomatonGraph) -> (usize, usize) {
    automaton
        .edges()
        .filter(|(_, e)| !e.is_self_loop())
        .fold((0, 0), |(advance, skip), (_, e)| match e.kind {
            EdgeKind::Advance => (advance + 1, skip),
            EdgeKind::Skip => (advance, skip + 1),
        })
}

/// Lay out an automaton and route its edges.
pub fn compute_layout(
    automaton: &AutomatonGraph,
    trace: &ActiveTrace,
    config: &LayoutConfig,
) -> Layout {
    let columns = assign_columns(automaton);
    let layers = columns.layers(automaton);

    let (advance_arcs, skip_arcs) = arc_counts(automaton);
    let canvas = Canvas::measure(
        config,
        positions::max_layer_size(&layers),
        advance_arcs,
        skip_arcs,
    );

    let positions = positions::place_nodes(config, &canvas, &columns, &layers);
    let edges = route_edges(
        config,
        automaton,
        &columns,
        &positions,
        canvas.centerline,
        trace,
    );

    Layout {
        canvas,
        column_count: columns.column_count(),
        layers,
        positions,
        edges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::build_model;
    use crate::input::{Instance, NodeRecord, StateRecord, StepRecord, TraceRecord};

    fn layout_of(instance: &Instance) -> (Layout, ActiveTrace) {
        let (automaton, trace) = build_model(instance);
        let layout = compute_layout(&automaton, &trace, &LayoutConfig::default());
        (layout, trace)
    }

    #[test]
    fn test_empty_instance() {
        let (layout, trace) = layout_of(&Instance::default());
        assert!(layout.layers.is_empty());
        assert!(layout.positions.is_empty());
        assert!(layout.edges.is_empty());
        assert!(trace.is_empty());
    }

    #[test]
    fn test_scenario_single_node() {
        let instance = Instance {
            nodes: vec![NodeRecord::new("Only").start().accepting()],
            ..Instance::default()
        };
        let (layout, _) = layout_of(&instance);

        assert_eq!(layout.layers.len(), 1);
        assert_eq!(layout.layers[0].column, 0);
        assert_eq!(layout.column_count, 1);
        let p = layout.positions["Only"];
        assert_eq!(p.y, layout.canvas.centerline);
        assert_eq!(p.x, 65.0);
        assert!(layout.edges.is_empty());
    }

    #[test]
    fn test_scenario_start_to_accepting() {
        let instance = Instance {
            nodes: vec![
                NodeRecord::new("Start").start().advance_to("Accepting"),
                NodeRecord::new("Accepting").accepting(),
            ],
            trace: Some(TraceRecord {
                steps: vec![StepRecord::new("S0", "S1").with_accepted(true)],
                states: vec![
                    StateRecord::new("S0", "Start", 0),
                    StateRecord::new("S1", "Accepting", 1),
                ],
            }),
            ..Instance::default()
        };
        let (layout, trace) = layout_of(&instance);

        assert_eq!(layout.column_of("Start"), Some(0));
        assert_eq!(layout.column_of("Accepting"), Some(1));
        assert_eq!(layout.edges.len(), 1);
        assert!(layout.edges[0].is_active);
        assert_eq!(trace.edges.len(), 1);
        assert_eq!(
            trace.edges.iter().next().map(|k| k.as_str()),
            Some("Start->Accepting")
        );
        assert!(trace.is_node_active("Start"));
        assert!(trace.is_node_active("Accepting"));
        assert_eq!(layout.positions["Accepting"].x, 755.0);
    }

    #[test]
    fn test_scenario_skip_then_advance_with_loop() {
        let instance = Instance {
            nodes: vec![
                NodeRecord::new("Start").start().skip_to("A"),
                NodeRecord::new("A")
                    .with_character("a")
                    .advance_to("Accepting")
                    .advance_to("A"),
                NodeRecord::new("Accepting").accepting(),
            ],
            ..Instance::default()
        };
        let (layout, _) = layout_of(&instance);

        assert_eq!(layout.column_of("Start"), Some(0));
        assert_eq!(layout.column_of("A"), Some(1));
        assert_eq!(layout.column_of("Accepting"), Some(2));

        let families: Vec<EdgeFamily> = layout.edges.iter().map(|e| e.family).collect();
        assert_eq!(
            families,
            vec![EdgeFamily::Advance, EdgeFamily::Skip, EdgeFamily::SelfLoop]
        );
        let self_loop = &layout.edges[2];
        assert_eq!(self_loop.source_id, "A");
        assert_eq!(self_loop.kind, EdgeKind::Advance);
    }

    #[test]
    fn test_scenario_duplicate_advance_edges() {
        let instance = Instance {
            nodes: vec![
                NodeRecord::new("Start").start().advance_to("A").advance_to("A"),
                NodeRecord::new("A"),
            ],
            ..Instance::default()
        };
        let (layout, _) = layout_of(&instance);
        let slots: Vec<Option<usize>> = layout.edges.iter().map(|e| e.slot).collect();
        assert_eq!(slots, vec![Some(0), Some(1)]);
        assert_ne!(layout.edges[0].path.c1.y, layout.edges[1].path.c1.y);
    }

    #[test]
    fn test_layers_centered_on_shared_centerline() {
        let instance = Instance {
            nodes: vec![
                NodeRecord::new("Start")
                    .start()
                    .advance_to("A")
                    .advance_to("B")
                    .skip_to("C"),
                NodeRecord::new("A").advance_to("D"),
                NodeRecord::new("B").advance_to("D"),
                NodeRecord::new("C"),
                NodeRecord::new("D"),
            ],
            ..Instance::default()
        };
        let (layout, _) = layout_of(&instance);
        let center = layout.canvas.centerline;
        for layer in &layout.layers {
            let mean = layer
                .nodes
                .iter()
                .map(|id| layout.positions[id].y)
                .sum::<f64>()
                / layer.nodes.len() as f64;
            assert!((mean - center).abs() < 1e-9);
        }
        assert_eq!(layout.layers[1].nodes.len(), 3);
    }

    #[test]
    fn test_layout_is_idempotent() {
        let instance = Instance {
            nodes: vec![
                NodeRecord::new("Start").start().advance_to("A").skip_to("B"),
                NodeRecord::new("A").advance_to("B").advance_to("A"),
                NodeRecord::new("B").skip_to("Accepting"),
                NodeRecord::new("Accepting").accepting(),
                NodeRecord::new("Orphan"),
            ],
            ..Instance::default()
        };
        let (first, _) = layout_of(&instance);
        let (second, _) = layout_of(&instance);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}

//! Edge path computation.
//!
//! Routes every transition after node positions are final. Advance edges arc
//! above the shared centerline, Skip edges arc below it, and self-loops get a
//! small fixed loop over their node. Inside each arc family every edge owns a
//! distinct slot, so no two arcs of a family share a height.

use crate::automaton::{ActiveTrace, AutomatonGraph, EdgeKind};
use crate::config::LayoutConfig;
use crate::layout::columns::ColumnAssignment;
use crate::layout::types::{CubicPath, Point};
use petgraph::stable_graph::EdgeIndex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Rendering family of an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeFamily {
    /// Non-self Advance edge, arcs above
    Advance,
    /// Non-self Skip edge, arcs below
    Skip,
    /// Source equals target, either kind
    SelfLoop,
}

impl EdgeFamily {
    pub fn of(kind: EdgeKind, self_loop: bool) -> Self {
        match (self_loop, kind) {
            (true, _) => EdgeFamily::SelfLoop,
            (false, EdgeKind::Advance) => EdgeFamily::Advance,
            (false, EdgeKind::Skip) => EdgeFamily::Skip,
        }
    }

    /// Vertical direction of the arc: -1 above the centerline, +1 below
    pub fn sign(&self) -> f64 {
        match self {
            EdgeFamily::Advance | EdgeFamily::SelfLoop => -1.0,
            EdgeFamily::Skip => 1.0,
        }
    }
}

/// Paint pass. Trace edges paint after, and on top of, base edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawPass {
    Base,
    Trace,
}

/// Routed edge, ready for painting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeRoute {
    pub source_id: String,
    pub target_id: String,
    pub kind: EdgeKind,
    pub family: EdgeFamily,
    /// Rank inside the family; self-loops have none
    pub slot: Option<usize>,
    pub is_active: bool,
    pub pass: DrawPass,
    pub path: CubicPath,
    /// Where the epsilon label goes, Skip edges only
    pub label_anchor: Option<Point>,
}

/// Arc height of a slot, signed by family
pub fn arc_height(config: &LayoutConfig, family: EdgeFamily, slot: usize) -> f64 {
    (config.min_arc + slot as f64 * config.slot_height) * family.sign()
}

/// Stable sort by span and rank. Short hops get the tightest arcs; equal
/// spans keep enumeration order.
pub fn assign_slots(mut spans: Vec<(EdgeIndex, usize)>) -> Vec<(EdgeIndex, usize)> {
    spans.sort_by_key(|&(_, span)| span);
    spans
        .into_iter()
        .enumerate()
        .map(|(slot, (edge, _))| (edge, slot))
        .collect()
}

/// Flattened table-arc: vertical exit from the source, both control points at
/// the arc height, vertical arrival at the target.
fn arc_path(
    config: &LayoutConfig,
    source: Point,
    target: Point,
    control_y: f64,
    sign: f64,
) -> CubicPath {
    let r = config.node_radius;
    CubicPath::new(
        Point::new(source.x, source.y + sign * r),
        Point::new(source.x, control_y),
        Point::new(target.x, control_y),
        Point::new(target.x, target.y + sign * r),
    )
}

fn loop_path(config: &LayoutConfig, node: Point) -> CubicPath {
    let foot = config.self_loop_foot;
    let spread = config.self_loop_spread;
    let top = node.y - config.node_radius;
    let apex = node.y - config.self_loop_rise;
    CubicPath::new(
        Point::new(node.x - foot, top),
        Point::new(node.x - spread, apex),
        Point::new(node.x + spread, apex),
        Point::new(node.x + foot, top),
    )
}

/// Route every edge of the automaton.
///
/// Output order is Advance edges by slot, Skip edges by slot, then
/// self-loops, stably partitioned so every base-pass edge precedes every
/// trace-pass edge.
pub fn route_edges(
    config: &LayoutConfig,
    automaton: &AutomatonGraph,
    columns: &ColumnAssignment,
    positions: &BTreeMap<String, Point>,
    centerline: f64,
    trace: &ActiveTrace,
) -> Vec<EdgeRoute> {
    let mut advance = Vec::new();
    let mut skip = Vec::new();
    let mut self_loops = Vec::new();

    for (edge_idx, edge) in automaton.edges() {
        match EdgeFamily::of(edge.kind, edge.is_self_loop()) {
            EdgeFamily::SelfLoop => self_loops.push(edge_idx),
            family => {
                let (from, to) = (
                    automaton.node_index[&edge.source],
                    automaton.node_index[&edge.target],
                );
                let span = columns.span(from, to);
                if family == EdgeFamily::Advance {
                    advance.push((edge_idx, span));
                } else {
                    skip.push((edge_idx, span));
                }
            }
        }
    }

    let slotted: Vec<(EdgeIndex, Option<usize>)> = assign_slots(advance)
        .into_iter()
        .chain(assign_slots(skip))
        .map(|(edge, slot)| (edge, Some(slot)))
        .chain(self_loops.into_iter().map(|edge| (edge, None)))
        .collect();

    let mut routes: Vec<EdgeRoute> = slotted
        .into_iter()
        .filter_map(|(edge_idx, slot)| {
            let edge = automaton.graph.edge_weight(edge_idx)?;
            let source = *positions.get(&edge.source)?;
            let target = *positions.get(&edge.target)?;
            let family = EdgeFamily::of(edge.kind, edge.is_self_loop());

            let (path, label_anchor) = match slot {
                Some(slot) => {
                    let control_y = centerline + arc_height(config, family, slot);
                    let path = arc_path(config, source, target, control_y, family.sign());
                    let anchor = (edge.kind == EdgeKind::Skip)
                        .then(|| Point::new((source.x + target.x) / 2.0, control_y));
                    (path, anchor)
                }
                None => {
                    let anchor = (edge.kind == EdgeKind::Skip)
                        .then(|| Point::new(source.x, source.y - config.self_loop_rise));
                    (loop_path(config, source), anchor)
                }
            };

            let is_active = trace.is_edge_active(&edge.key());
            Some(EdgeRoute {
                source_id: edge.source.clone(),
                target_id: edge.target.clone(),
                kind: edge.kind,
                family,
                slot,
                is_active,
                pass: if is_active { DrawPass::Trace } else { DrawPass::Base },
                path,
                label_anchor,
            })
        })
        .collect();

    // Stable: keeps family and slot order within each pass
    routes.sort_by_key(|route| route.pass);

    tracing::debug!(
        "Routed {} edges ({} on the trace pass)",
        routes.len(),
        routes.iter().filter(|r| r.is_active).count()
    );
    routes
}

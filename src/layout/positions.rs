//! Pixel placement of nodes

use crate::config::LayoutConfig;
use crate::layout::columns::ColumnAssignment;
use crate::layout::types::{Canvas, Layer, Point};
use std::collections::BTreeMap;

/// Room the arcs need on each side of the centerline
fn arc_space(config: &LayoutConfig, advance_arcs: usize, skip_arcs: usize) -> f64 {
    advance_arcs.max(skip_arcs) as f64 * config.slot_height + 60.0
}

impl Canvas {
    /// Size the canvas so the tallest layer and the deepest arc stack fit.
    pub fn measure(
        config: &LayoutConfig,
        max_layer_size: usize,
        advance_arcs: usize,
        skip_arcs: usize,
    ) -> Self {
        let graph_height = (max_layer_size as f64 * config.row_spacing
            + arc_space(config, advance_arcs, skip_arcs) * 2.0
            + 80.0)
            .max(config.min_graph_height);
        Self {
            width: config.width,
            height: config.tape_area_height + graph_height + config.legend_height,
            graph_top: config.tape_area_height,
            graph_height,
            centerline: graph_height / 2.0,
        }
    }
}

/// Linear interpolation of a column across the drawing band, both ends
/// inclusive.
pub fn column_x(config: &LayoutConfig, column: usize, column_count: usize) -> f64 {
    let last = column_count.saturating_sub(1).max(1) as f64;
    config.padding + (column as f64 / last) * (config.width - 2.0 * config.padding)
}

/// Vertical position of the `row`-th of `layer_size` nodes, centered on the
/// centerline.
pub fn row_y(config: &LayoutConfig, centerline: f64, row: usize, layer_size: usize) -> f64 {
    let offset = row as f64 - (layer_size as f64 - 1.0) / 2.0;
    centerline + offset * config.row_spacing
}

/// Place every node of every layer.
pub fn place_nodes(
    config: &LayoutConfig,
    canvas: &Canvas,
    columns: &ColumnAssignment,
    layers: &[Layer],
) -> BTreeMap<String, Point> {
    let column_count = columns.column_count();
    let mut positions = BTreeMap::new();
    for layer in layers {
        let x = column_x(config, layer.column, column_count);
        for (row, id) in layer.nodes.iter().enumerate() {
            let y = row_y(config, canvas.centerline, row, layer.nodes.len());
            positions.insert(id.clone(), Point::new(x, y));
        }
    }
    positions
}

/// Largest layer size, zero for an empty automaton
pub fn max_layer_size(layers: &[Layer]) -> usize {
    layers.iter().map(|l| l.nodes.len()).max().unwrap_or(0)
}

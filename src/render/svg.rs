//! SVG renderer for a computed diagram.
//!
//! Pure consumer of the layout: every coordinate comes from the routed
//! geometry, this module only decides colors, strokes and paint order
//! (grid, base edges, trace edges, nodes).

use crate::Result;
use crate::automaton::{EdgeKind, Node};
use crate::config::LayoutConfig;
use crate::diagram::Diagram;
use crate::layout::{DrawPass, EdgeRoute, Point};
use std::fmt::Write;

// ── Palette ──────────────────────────────────────────────────────────────────

const BG: &str = "#0f1117";
const PANEL: &str = "#181b24";
const BORDER: &str = "#2a2e3a";
const TEXT: &str = "#e2e4ea";
const MUTED: &str = "#6b7080";
const ACCENT: &str = "#6c9cfc";
const START: &str = "#4ea8de";
const START_BG: &str = "rgba(78,168,222,0.12)";
const ACCEPT: &str = "#56d67b";
const ACCEPT_BG: &str = "rgba(86,214,123,0.12)";
const NODE_BG: &str = "#1a1d28";
const TRACE: &str = "#f0763a";
const TRACE_GLOW: &str = "rgba(240,118,58,0.35)";
const TRACE_CELL_BG: &str = "rgba(240,118,58,0.1)";
const SKIP: &str = "#a78bfa";
const NEXT: &str = "#5a6378";
const WILD: &str = "#facc15";

const FONT: &str = "'JetBrains Mono','Fira Code','SF Mono',monospace";

const HEADER_H: f64 = 36.0;
const TAPE_TOP: f64 = 50.0;
const CELL_W: f64 = 36.0;
const CELL_H: f64 = 36.0;
const GRID_STEP: usize = 40;
const EPSILON: &str = "ε";

// ── Helpers ──────────────────────────────────────────────────────────────────

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn edge_color(route: &EdgeRoute) -> &'static str {
    match (route.is_active, route.kind) {
        (true, _) => TRACE,
        (false, EdgeKind::Skip) => SKIP,
        (false, EdgeKind::Advance) => NEXT,
    }
}

fn edge_marker(route: &EdgeRoute) -> &'static str {
    match (route.is_active, route.kind) {
        (true, _) => "url(#arr-trace)",
        (false, EdgeKind::Skip) => "url(#arr-skip)",
        (false, EdgeKind::Advance) => "url(#arr-next)",
    }
}

fn node_stroke(node: &Node, active: bool) -> &'static str {
    if active {
        TRACE
    } else if node.is_start() {
        START
    } else if node.is_accepting() {
        ACCEPT
    } else if node.wildcard {
        WILD
    } else {
        BORDER
    }
}

fn node_fill(node: &Node) -> &'static str {
    if node.is_start() {
        START_BG
    } else if node.is_accepting() {
        ACCEPT_BG
    } else {
        NODE_BG
    }
}

fn label_color(node: &Node) -> &'static str {
    if node.is_start() {
        START
    } else if node.is_accepting() {
        ACCEPT
    } else if node.wildcard {
        WILD
    } else {
        TEXT
    }
}

// ── Sections ─────────────────────────────────────────────────────────────────

fn write_defs(out: &mut String) -> Result<()> {
    writeln!(out, "<defs>")?;
    writeln!(
        out,
        r#"<filter id="glow"><feGaussianBlur stdDeviation="3.5" result="b"/><feMerge><feMergeNode in="b"/><feMergeNode in="SourceGraphic"/></feMerge></filter>"#
    )?;
    for (id, color) in [("arr-next", NEXT), ("arr-skip", SKIP), ("arr-trace", TRACE)] {
        writeln!(
            out,
            r#"<marker id="{id}" viewBox="0 -5 10 10" refX="10" refY="0" markerWidth="7" markerHeight="7" orient="auto"><path d="M0,-4L10,0L0,4Z" fill="{color}"/></marker>"#
        )?;
    }
    writeln!(out, "</defs>")?;
    Ok(())
}

fn write_header(out: &mut String, diagram: &Diagram) -> Result<()> {
    let width = diagram.layout.canvas.width;
    writeln!(out, r#"<g class="header">"#)?;
    writeln!(
        out,
        r#"<rect width="{width}" height="{HEADER_H}" fill="{PANEL}"/>"#
    )?;
    writeln!(
        out,
        r#"<text x="16" y="23" fill="{ACCENT}" style="font-size:11px;letter-spacing:2px;font-weight:700">NFA REGEX MATCHER</text>"#
    )?;
    writeln!(
        out,
        r#"<text x="{}" y="23" text-anchor="end" fill="{MUTED}" style="font-size:10px">{}</text>"#,
        width - 16.0,
        escape(&diagram.summary.header_line())
    )?;
    writeln!(out, "</g>")?;
    Ok(())
}

fn write_tape(out: &mut String, diagram: &Diagram) -> Result<()> {
    let width = diagram.layout.canvas.width;
    let tape_x = (width - diagram.tape.len() as f64 * CELL_W) / 2.0;
    writeln!(
        out,
        r#"<g class="tape" transform="translate({tape_x},{TAPE_TOP})">"#
    )?;
    writeln!(
        out,
        r#"<text x="-8" y="{}" text-anchor="end" fill="{MUTED}" style="font-size:9px;letter-spacing:1.5px">INPUT</text>"#,
        CELL_H / 2.0 + 4.0
    )?;
    for (i, cell) in diagram.tape.iter().enumerate() {
        let on = cell.consumed;
        let (fill, stroke, stroke_width, text) = if on {
            (TRACE_CELL_BG, TRACE, 1.5, TRACE)
        } else {
            (NODE_BG, BORDER, 0.5, TEXT)
        };
        let mid = (CELL_W - 2.0) / 2.0;
        writeln!(
            out,
            r#"<g transform="translate({},0)"><rect width="{}" height="{CELL_H}" rx="4" fill="{fill}" stroke="{stroke}" stroke-width="{stroke_width}"/><text x="{mid}" y="{}" text-anchor="middle" fill="{text}" style="font-size:15px;font-weight:600">{}</text><text x="{mid}" y="{}" text-anchor="middle" fill="{MUTED}" style="font-size:8px">{}</text></g>"#,
            i as f64 * CELL_W,
            CELL_W - 2.0,
            CELL_H / 2.0 + 5.0,
            escape(&cell.symbol),
            CELL_H + 13.0,
            cell.index
        )?;
    }
    writeln!(out, "</g>")?;
    Ok(())
}

fn write_grid(out: &mut String, width: f64, height: f64) -> Result<()> {
    writeln!(out, r#"<g class="grid" opacity="0.04">"#)?;
    for x in (0..width as usize).step_by(GRID_STEP) {
        writeln!(
            out,
            r#"<line x1="{x}" y1="0" x2="{x}" y2="{height}" stroke="{TEXT}"/>"#
        )?;
    }
    for y in (0..height as usize).step_by(GRID_STEP) {
        writeln!(
            out,
            r#"<line x1="0" y1="{y}" x2="{width}" y2="{y}" stroke="{TEXT}"/>"#
        )?;
    }
    writeln!(out, "</g>")?;
    Ok(())
}

fn write_edge(out: &mut String, route: &EdgeRoute) -> Result<()> {
    let color = edge_color(route);
    let (stroke_width, opacity, filter) = if route.is_active {
        (3.0, 1.0, "url(#glow)")
    } else {
        (1.3, 0.4, "none")
    };
    let dash = match route.kind {
        EdgeKind::Skip => "6,4",
        EdgeKind::Advance => "0",
    };
    writeln!(
        out,
        r#"<path d="{}" fill="none" stroke="{color}" stroke-width="{stroke_width}" stroke-dasharray="{dash}" marker-end="{}" opacity="{opacity}" filter="{filter}"/>"#,
        route.path.to_svg_path(),
        edge_marker(route)
    )?;
    if let Some(Point { x, y }) = route.label_anchor {
        let label_color = if route.is_active { TRACE } else { SKIP };
        writeln!(
            out,
            r#"<text x="{x}" y="{}" text-anchor="middle" fill="{label_color}" style="font-size:11px;font-weight:700">{EPSILON}</text>"#,
            y + 16.0
        )?;
    }
    Ok(())
}

fn write_node(
    out: &mut String,
    config: &LayoutConfig,
    node: &Node,
    at: Point,
    active: bool,
) -> Result<()> {
    let r = config.node_radius;
    writeln!(out, r#"<g transform="translate({},{})">"#, at.x, at.y)?;
    if active {
        writeln!(
            out,
            r#"<circle r="{}" fill="none" stroke="{TRACE_GLOW}" stroke-width="5" filter="url(#glow)"/>"#,
            r + 9.0
        )?;
    }
    if node.is_accepting() {
        writeln!(
            out,
            r#"<circle r="{}" fill="none" stroke="{ACCEPT}" stroke-width="1.5" stroke-dasharray="3,3"/>"#,
            r + 5.0
        )?;
    }
    writeln!(
        out,
        r#"<circle r="{r}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
        node_fill(node),
        node_stroke(node, active),
        if active { 2.5 } else { 1.5 }
    )?;
    let font_size = if node.is_start() || node.is_accepting() {
        16
    } else {
        14
    };
    writeln!(
        out,
        r#"<text dy="5" text-anchor="middle" fill="{}" style="font-size:{font_size}px;font-weight:700;pointer-events:none">{}</text>"#,
        label_color(node),
        escape(&node.label)
    )?;
    writeln!(
        out,
        r#"<text dy="{}" text-anchor="middle" fill="{MUTED}" style="font-size:9px;pointer-events:none">{}</text>"#,
        r + 15.0,
        escape(node.sublabel())
    )?;
    writeln!(out, "</g>")?;
    Ok(())
}

fn write_legend(out: &mut String, config: &LayoutConfig, height: f64) -> Result<()> {
    enum Swatch {
        Circle,
        Line(Option<&'static str>),
    }
    let items = [
        ("Start", START, Swatch::Circle),
        ("Accept", ACCEPT, Swatch::Circle),
        ("Wildcard", WILD, Swatch::Circle),
        ("next →", NEXT, Swatch::Line(None)),
        ("skip (ε)", SKIP, Swatch::Line(Some("4,3"))),
        ("Trace", TRACE, Swatch::Line(None)),
    ];

    writeln!(
        out,
        r#"<g class="legend" transform="translate(16,{})">"#,
        height - config.legend_height + 10.0
    )?;
    let mut lx = 0usize;
    for (label, color, swatch) in items {
        writeln!(out, r#"<g transform="translate({lx},0)">"#)?;
        match swatch {
            Swatch::Circle => writeln!(
                out,
                r#"<circle cx="7" cy="6" r="6" fill="none" stroke="{color}" stroke-width="2"/>"#
            )?,
            Swatch::Line(dash) => writeln!(
                out,
                r#"<line x1="0" y1="6" x2="20" y2="6" stroke="{color}" stroke-width="2" stroke-dasharray="{}"/>"#,
                dash.unwrap_or("")
            )?,
        }
        writeln!(
            out,
            r#"<text x="26" y="10" fill="{MUTED}" style="font-size:9px;letter-spacing:0.5px">{}</text>"#,
            escape(label)
        )?;
        writeln!(out, "</g>")?;
        lx += label.chars().count() * 7 + 42;
    }
    writeln!(out, "</g>")?;
    Ok(())
}

/// Render a diagram to a standalone SVG document.
pub fn render_svg(diagram: &Diagram, config: &LayoutConfig) -> Result<String> {
    let canvas = diagram.layout.canvas;
    let mut out = String::new();

    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" style="background:{BG};font-family:{FONT}">"#,
        canvas.width, canvas.height
    )?;
    write_defs(&mut out)?;
    write_header(&mut out, diagram)?;
    write_tape(&mut out, diagram)?;

    writeln!(
        out,
        r#"<g class="graph" transform="translate(0,{})">"#,
        canvas.graph_top
    )?;
    write_grid(&mut out, canvas.width, canvas.graph_height)?;

    for pass in [DrawPass::Base, DrawPass::Trace] {
        let class = match pass {
            DrawPass::Base => "base",
            DrawPass::Trace => "trace",
        };
        writeln!(out, r#"<g class="edges-{class}">"#)?;
        for route in diagram.layout.edges_in_pass(pass) {
            write_edge(&mut out, route)?;
        }
        writeln!(out, "</g>")?;
    }

    writeln!(out, r#"<g class="nodes">"#)?;
    for (_, node) in diagram.automaton.nodes() {
        let Some(&at) = diagram.layout.positions.get(&node.id) else {
            continue;
        };
        write_node(
            &mut out,
            config,
            node,
            at,
            diagram.trace.is_node_active(&node.id),
        )?;
    }
    writeln!(out, "</g>")?;
    writeln!(out, "</g>")?;

    write_legend(&mut out, config, canvas.height)?;
    writeln!(out, "</svg>")?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::diagram::sample_instance;
    use crate::input::Instance;

    fn render(instance: Instance) -> String {
        let config = Config::default();
        let diagram = Diagram::build(instance, &config);
        render_svg(&diagram, &config.layout).unwrap()
    }

    #[test]
    fn test_render_document_shell() {
        let svg = render(sample_instance());
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains(r#"<marker id="arr-trace""#));
        assert!(svg.contains("4 nodes · 4 edges · 3 chars · 2 transitions"));
    }

    #[test]
    fn test_trace_edges_painted_after_base_edges() {
        let svg = render(sample_instance());
        let base = svg.find(r#"class="edges-base""#).unwrap();
        let trace = svg.find(r#"class="edges-trace""#).unwrap();
        let nodes = svg.find(r#"class="nodes""#).unwrap();
        assert!(base < trace && trace < nodes);

        // Both Node0->Node1 edges share the traced key
        let trace_section = &svg[trace..nodes];
        assert_eq!(trace_section.matches("url(#arr-trace)").count(), 3);
        assert!(!svg[base..trace].contains("url(#arr-trace)"));
    }

    #[test]
    fn test_skip_edges_dashed_with_epsilon() {
        let svg = render(sample_instance());
        assert_eq!(svg.matches(r#"stroke-dasharray="6,4""#).count(), 1);
        assert_eq!(svg.matches(EPSILON).count(), 2); // edge label + legend
    }

    #[test]
    fn test_consumed_tape_cells_highlighted() {
        let svg = render(sample_instance());
        assert_eq!(svg.matches(TRACE_CELL_BG).count(), 2);
    }

    #[test]
    fn test_empty_instance_renders() {
        let svg = render(Instance::default());
        assert!(svg.contains("0 nodes · 0 edges · 0 chars · 0 transitions"));
        assert!(!svg.contains("<circle r=\"22\""));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a<b&\"c\">"), "a&lt;b&amp;&quot;c&quot;&gt;");
    }
}

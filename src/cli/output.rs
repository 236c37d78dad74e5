//! Output formatting module
//!
//! This module handles formatting a computed diagram for the non-SVG output formats.

use crate::{Result, automaton::analyzer::AnalysisReport, diagram::Diagram};
use serde_json::json;

/// Output the computed layout as JSON
pub fn output_json(w: &mut impl std::io::Write, diagram: &Diagram) -> Result<()> {
    let output = json!({
        "summary": diagram.summary,
        "canvas": diagram.layout.canvas,
        "columns": diagram.layout.column_count,
        "layers": diagram.layout.layers,
        "nodes": diagram.automaton.nodes().map(|(_, node)| {
            json!({
                "id": node.id,
                "label": node.label,
                "sublabel": node.sublabel(),
                "role": node.role.name(),
                "accepting": node.accepting,
                "active": diagram.trace.is_node_active(&node.id),
                "position": diagram.layout.positions.get(&node.id),
            })
        }).collect::<Vec<_>>(),
        "edges": diagram.layout.edges,
        "tape": diagram.tape,
    });

    serde_json::to_writer_pretty(&mut *w, &output)?;
    writeln!(w)?; // Add trailing newline
    Ok(())
}

fn shorten(id: &str, width: usize) -> String {
    if id.chars().count() > width {
        let head: String = id.chars().take(width - 3).collect();
        format!("{}...", head)
    } else {
        id.to_string()
    }
}

/// Output the diagram and its analysis as a text table
pub fn output_table(
    w: &mut impl std::io::Write,
    diagram: &Diagram,
    report: &AnalysisReport,
) -> Result<()> {
    writeln!(w, "NFA Trace Visualization - Layout Results")?;
    writeln!(w, "{}", "=".repeat(80))?;
    writeln!(w)?;

    writeln!(w, "Summary:")?;
    writeln!(w, "  {}", diagram.summary.header_line())?;
    writeln!(w, "  Shape:        {}", report.shape.display_name())?;
    writeln!(
        w,
        "  Edges:        {} advance, {} skip, {} self-loops",
        report.advance_edges, report.skip_edges, report.self_loops
    )?;
    writeln!(
        w,
        "  Reachable:    {} ({} unreachable)",
        report.reachable, report.unreachable
    )?;
    writeln!(
        w,
        "  Canvas:       {} x {} ({} columns)",
        diagram.layout.canvas.width, diagram.layout.canvas.height, diagram.layout.column_count
    )?;
    writeln!(w)?;

    if diagram.automaton.node_count() > 0 {
        writeln!(w, "Nodes:")?;
        writeln!(w, "{:-<80}", "")?;
        writeln!(
            w,
            "{:<24} {:<6} {:<10} {:>4} {:>9} {:>9} {:>7}",
            "ID", "Label", "Role", "Col", "X", "Y", "Active"
        )?;
        writeln!(w, "{:-<80}", "")?;

        for (_, node) in diagram.automaton.nodes() {
            let column = diagram
                .layout
                .column_of(&node.id)
                .map(|c| c.to_string())
                .unwrap_or_else(|| "-".to_string());
            let (x, y) = diagram
                .layout
                .positions
                .get(&node.id)
                .map(|p| (format!("{:.1}", p.x), format!("{:.1}", p.y)))
                .unwrap_or_else(|| ("-".to_string(), "-".to_string()));
            let active = if diagram.trace.is_node_active(&node.id) {
                "yes"
            } else {
                ""
            };

            writeln!(
                w,
                "{:<24} {:<6} {:<10} {:>4} {:>9} {:>9} {:>7}",
                shorten(&node.id, 24),
                node.label,
                node.role.name(),
                column,
                x,
                y,
                active
            )?;
        }
        writeln!(w)?;
    }

    if !diagram.layout.edges.is_empty() {
        writeln!(w, "Edges (paint order):")?;
        writeln!(w, "{:-<80}", "")?;
        writeln!(
            w,
            "{:<24} {:<24} {:<8} {:>5} {:>7}",
            "Source", "Target", "Kind", "Slot", "Active"
        )?;
        writeln!(w, "{:-<80}", "")?;

        for route in &diagram.layout.edges {
            let slot = route
                .slot
                .map(|s| s.to_string())
                .unwrap_or_else(|| "loop".to_string());
            writeln!(
                w,
                "{:<24} {:<24} {:<8} {:>5} {:>7}",
                shorten(&route.source_id, 24),
                shorten(&route.target_id, 24),
                route.kind.name(),
                slot,
                if route.is_active { "yes" } else { "" }
            )?;
        }
        writeln!(w)?;
    }

    Ok(())
}

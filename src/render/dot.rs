//! Graphviz export
//!
//! Node positions are pinned (`pos="x,y!"`) so `neato -n` reproduces the
//! computed layout instead of running its own.

use crate::automaton::EdgeKind;
use crate::diagram::Diagram;

/// Escape text for a double-quoted DOT string
fn quoted(id: &str) -> String {
    id.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Export to DOT format for Graphviz
pub fn to_dot(diagram: &Diagram) -> String {
    let mut dot = "digraph Automaton {\n".to_string();
    dot.push_str("  rankdir=LR;\n");
    dot.push_str("  node [shape=circle, style=filled];\n\n");

    let height = diagram.layout.canvas.graph_height;
    for (_, node) in diagram.automaton.nodes() {
        let shape = if node.is_accepting() {
            "doublecircle"
        } else {
            "circle"
        };
        let color = if diagram.trace.is_node_active(&node.id) {
            "orange"
        } else if node.is_start() {
            "lightblue"
        } else if node.is_accepting() {
            "lightgreen"
        } else {
            "white"
        };
        let pos = diagram
            .layout
            .positions
            .get(&node.id)
            // Graphviz y grows upward
            .map(|p| format!(", pos=\"{},{}!\"", p.x, height - p.y))
            .unwrap_or_default();

        dot.push_str(&format!(
            "  \"{}\" [label=\"{}\", xlabel=\"{}\", shape={}, fillcolor=\"{}\"{}];\n",
            quoted(&node.id),
            quoted(&node.label),
            quoted(node.sublabel()),
            shape,
            color,
            pos
        ));
    }

    dot.push('\n');

    for route in &diagram.layout.edges {
        let mut attrs = Vec::new();
        if route.kind == EdgeKind::Skip {
            attrs.push("label=\"ε\"".to_string());
            attrs.push("style=dashed".to_string());
        }
        if route.is_active {
            attrs.push("color=orange".to_string());
            attrs.push("penwidth=3".to_string());
        }
        let attrs = if attrs.is_empty() {
            String::new()
        } else {
            format!(" [{}]", attrs.join(", "))
        };
        dot.push_str(&format!(
            "  \"{}\" -> \"{}\"{};\n",
            quoted(&route.source_id),
            quoted(&route.target_id),
            attrs
        ));
    }

    dot.push_str("}\n");
    dot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::diagram::sample_instance;

    #[test]
    fn test_to_dot_output() {
        let diagram = Diagram::build(sample_instance(), &Config::default());
        let dot = to_dot(&diagram);

        assert!(dot.starts_with("digraph Automaton {"));
        assert!(dot.contains("\"Accepting0\" [label=\"✓\""));
        assert!(dot.contains("shape=doublecircle"));
        assert!(dot.contains("\"Node0\" -> \"Node1\" [label=\"ε\", style=dashed, color=orange, penwidth=3];"));
        assert!(dot.contains("\"Node1\" -> \"Accepting0\";"));
        // graph_height = 90 + (3 * 28 + 60) * 2 + 80
        assert!(dot.contains("pos=\"65,229!\""));
    }

    #[test]
    fn test_quoted_escapes_only_quotes_and_backslashes() {
        assert_eq!(quoted("regex/Node-1#0"), "regex/Node-1#0");
        assert_eq!(quoted(r#"a"b\c"#), r#"a\"b\\c"#);
    }

    #[test]
    fn test_similar_ids_stay_distinct() {
        use crate::input::{Instance, NodeRecord};

        let instance = Instance {
            nodes: vec![
                NodeRecord::new("Start").start().advance_to("q-1").advance_to("q_1"),
                NodeRecord::new("q-1"),
                NodeRecord::new("q_1"),
            ],
            ..Instance::default()
        };
        let dot = to_dot(&Diagram::build(instance, &Config::default()));

        assert_eq!(dot.matches("  \"q-1\" [").count(), 1);
        assert_eq!(dot.matches("  \"q_1\" [").count(), 1);
        assert!(dot.contains("\"Start\" -> \"q-1\";"));
        assert!(dot.contains("\"Start\" -> \"q_1\";"));
    }
}

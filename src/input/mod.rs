//! Input module - Loading automaton instances
//!
//! Instances are JSON documents describing an automaton, an optional
//! execution trace and an optional input tape. Loading also normalizes the
//! solver's atom naming (`a0` -> `a`) and orders the tape by index.

use crate::config::InputConfig;
use crate::error::{Error, Result};
use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;

pub mod models;

pub use models::{
    EdgeRecord, Instance, NodeRecord, StateRecord, StepRecord, TapeRecord, TraceRecord,
};

static ATOM_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*\D)\d+$").expect("atom suffix pattern is valid"));

/// Strip the numeric suffix the solver appends to atom names.
///
/// Values that are entirely digits are returned unchanged, so a literal `7`
/// stays `7`.
pub fn strip_atom_suffix(value: &str) -> &str {
    ATOM_SUFFIX
        .captures(value)
        .and_then(|caps| caps.get(1))
        .map_or(value, |m| m.as_str())
}

impl Instance {
    /// Load an instance from a JSON file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let contents = std::fs::read_to_string(&path)?;
        serde_json::from_str(&contents).map_err(|e| Error::InputParse {
            file: path,
            message: e.to_string(),
        })
    }

    /// Parse an instance from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Apply input options and sort the tape by index
    pub fn normalized(mut self, config: &InputConfig) -> Self {
        if config.strip_atom_suffix {
            for node in &mut self.nodes {
                if let Some(character) = &mut node.character {
                    *character = strip_atom_suffix(character).to_string();
                }
            }
            for cell in &mut self.tape {
                cell.symbol = strip_atom_suffix(&cell.symbol).to_string();
            }
        }
        self.tape.sort_by_key(|cell| cell.index);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::EdgeKind;

    #[test]
    fn test_strip_atom_suffix() {
        assert_eq!(strip_atom_suffix("a0"), "a");
        assert_eq!(strip_atom_suffix("b12"), "b");
        assert_eq!(strip_atom_suffix("x"), "x");
        assert_eq!(strip_atom_suffix("7"), "7");
        assert_eq!(strip_atom_suffix("42"), "42");
        assert_eq!(strip_atom_suffix(""), "");
    }

    #[test]
    fn test_parse_instance_json() {
        let json = r#"{
            "nodes": [
                {"id": "Start0", "isStart": true, "advance": ["Node0"]},
                {"id": "Node0", "character": "a0", "skip": ["Accepting0"]},
                {"id": "Accepting0", "isAccepting": true}
            ],
            "edges": [
                {"sourceId": "Node0", "targetId": "Node0", "kind": "advance"}
            ],
            "trace": {
                "steps": [{"stateBefore": "S0", "stateAfter": "S1", "accepted": true}],
                "states": [
                    {"id": "S0", "node": "Start0", "index": 0},
                    {"id": "S1", "node": "Node0"}
                ]
            },
            "tape": [{"index": 1, "char": "b1"}, {"index": 0, "char": "a0"}]
        }"#;

        let instance = Instance::from_json_str(json).unwrap();
        assert_eq!(instance.nodes.len(), 3);
        assert!(instance.nodes[0].is_start);
        assert_eq!(instance.nodes[0].advance, vec!["Node0".to_string()]);
        assert_eq!(instance.edges[0].kind, EdgeKind::Advance);

        let trace = instance.trace.as_ref().unwrap();
        assert_eq!(trace.steps[0].accepted, Some(true));
        assert_eq!(trace.states[1].index, None);

        let instance = instance.normalized(&InputConfig::default());
        assert_eq!(instance.nodes[1].character.as_deref(), Some("a"));
        assert_eq!(instance.tape[0], TapeRecord::new(0, "a"));
        assert_eq!(instance.tape[1], TapeRecord::new(1, "b"));
    }

    #[test]
    fn test_normalize_can_be_disabled() {
        let instance = Instance {
            nodes: vec![NodeRecord::new("n").with_character("c3")],
            ..Instance::default()
        };
        let config = InputConfig {
            strip_atom_suffix: false,
        };
        let instance = instance.normalized(&config);
        assert_eq!(instance.nodes[0].character.as_deref(), Some("c3"));
    }

    #[test]
    fn test_empty_document() {
        let instance = Instance::from_json_str("{}").unwrap();
        assert!(instance.nodes.is_empty());
        assert!(instance.trace.is_none());
        assert!(instance.tape.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let err = Instance::from_file("/nonexistent/instance.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}

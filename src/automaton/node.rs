//! Node representation

use crate::input::NodeRecord;
use serde::{Deserialize, Serialize};

pub type NodeId = String;

pub const START_GLYPH: &str = "▶";
pub const ACCEPT_GLYPH: &str = "✓";
pub const WILDCARD_GLYPH: &str = ".";
pub const UNKNOWN_GLYPH: &str = "?";

/// Node role, decided once when the node is built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum NodeRole {
    Start,
    Accepting,
    #[default]
    Plain,
}

impl NodeRole {
    /// Start wins over accepting when a record carries both flags
    pub fn from_flags(is_start: bool, is_accepting: bool) -> Self {
        match (is_start, is_accepting) {
            (true, _) => NodeRole::Start,
            (false, true) => NodeRole::Accepting,
            (false, false) => NodeRole::Plain,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NodeRole::Start => "Start",
            NodeRole::Accepting => "Accepting",
            NodeRole::Plain => "Plain",
        }
    }
}

/// A state of the automaton
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub role: NodeRole,
    /// Also true for a start node that is accepting
    pub accepting: bool,
    pub wildcard: bool,
    pub character: Option<String>,
    pub label: String,
}

/// Pick the display glyph for a node.
///
/// Role glyphs always take precedence over character content.
pub fn resolve_label(role: NodeRole, wildcard: bool, character: Option<&str>) -> &str {
    match (role, wildcard, character) {
        (NodeRole::Start, _, _) => START_GLYPH,
        (NodeRole::Accepting, _, _) => ACCEPT_GLYPH,
        (NodeRole::Plain, true, _) => WILDCARD_GLYPH,
        (NodeRole::Plain, false, Some(c)) => c,
        (NodeRole::Plain, false, None) => UNKNOWN_GLYPH,
    }
}

impl Node {
    pub fn new(
        id: impl Into<NodeId>,
        role: NodeRole,
        accepting: bool,
        wildcard: bool,
        character: Option<String>,
    ) -> Self {
        let label = resolve_label(role, wildcard, character.as_deref()).to_string();
        Self {
            id: id.into(),
            role,
            accepting: accepting || role == NodeRole::Accepting,
            wildcard,
            character,
            label,
        }
    }

    pub fn from_record(record: &NodeRecord) -> Self {
        Self::new(
            record.id.clone(),
            NodeRole::from_flags(record.is_start, record.is_accepting),
            record.is_accepting,
            record.is_wildcard,
            record.character.clone(),
        )
    }

    pub fn is_start(&self) -> bool {
        self.role == NodeRole::Start
    }

    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    /// Caption drawn under the node circle
    pub fn sublabel(&self) -> &str {
        if self.is_start() {
            "Start"
        } else if self.accepting {
            "Accept"
        } else {
            self.id.rsplit('/').next().unwrap_or(&self.id)
        }
    }
}

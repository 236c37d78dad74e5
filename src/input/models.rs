//! Instance document models
//!
//! The serialized shape of an automaton instance: node records with their
//! transition relations, flat edge records, an optional execution trace and
//! an optional input tape.

use serde::{Deserialize, Serialize};

use crate::automaton::EdgeKind;

/// A complete automaton instance as produced by the extraction step
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instance {
    /// Automaton states, in enumeration order
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,

    /// Transitions not listed on their source node
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,

    /// Execution trace, if the instance has one
    #[serde(default)]
    pub trace: Option<TraceRecord>,

    /// Input tape
    #[serde(default)]
    pub tape: Vec<TapeRecord>,
}

/// Automaton state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    pub id: String,

    #[serde(default)]
    pub is_start: bool,

    #[serde(default)]
    pub is_accepting: bool,

    #[serde(default)]
    pub is_wildcard: bool,

    /// Literal character matched by this state
    #[serde(default)]
    pub character: Option<String>,

    /// Targets reached by consuming input
    #[serde(default)]
    pub advance: Vec<String>,

    /// Targets reached without consuming input
    #[serde(default)]
    pub skip: Vec<String>,
}

/// Directed transition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeRecord {
    pub source_id: String,
    pub target_id: String,
    pub kind: EdgeKind,
}

/// Execution trace: ordered steps plus the states they reference
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceRecord {
    #[serde(default)]
    pub steps: Vec<StepRecord>,

    #[serde(default)]
    pub states: Vec<StateRecord>,
}

/// One taken transition between two execution states
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepRecord {
    pub state_before: String,
    pub state_after: String,

    /// Absent means the step is taken unconditionally
    #[serde(default)]
    pub accepted: Option<bool>,
}

/// Execution state: the automaton node it sits on and its input position
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateRecord {
    pub id: String,

    #[serde(default)]
    pub node: Option<String>,

    #[serde(default)]
    pub index: Option<i64>,
}

/// Input tape cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TapeRecord {
    pub index: i64,

    #[serde(rename = "char")]
    pub symbol: String,
}

impl NodeRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn start(mut self) -> Self {
        self.is_start = true;
        self
    }

    pub fn accepting(mut self) -> Self {
        self.is_accepting = true;
        self
    }

    pub fn wildcard(mut self) -> Self {
        self.is_wildcard = true;
        self
    }

    pub fn with_character(mut self, character: impl Into<String>) -> Self {
        self.character = Some(character.into());
        self
    }

    pub fn advance_to(mut self, target: impl Into<String>) -> Self {
        self.advance.push(target.into());
        self
    }

    pub fn skip_to(mut self, target: impl Into<String>) -> Self {
        self.skip.push(target.into());
        self
    }
}

impl EdgeRecord {
    pub fn new(source_id: impl Into<String>, target_id: impl Into<String>, kind: EdgeKind) -> Self {
        Self {
            source_id: source_id.into(),
            target_id: target_id.into(),
            kind,
        }
    }
}

impl StepRecord {
    pub fn new(state_before: impl Into<String>, state_after: impl Into<String>) -> Self {
        Self {
            state_before: state_before.into(),
            state_after: state_after.into(),
            accepted: None,
        }
    }

    pub fn with_accepted(mut self, accepted: bool) -> Self {
        self.accepted = Some(accepted);
        self
    }
}

impl StateRecord {
    pub fn new(id: impl Into<String>, node: impl Into<String>, index: i64) -> Self {
        Self {
            id: id.into(),
            node: Some(node.into()),
            index: Some(index),
        }
    }
}

impl TapeRecord {
    pub fn new(index: i64, symbol: impl Into<String>) -> Self {
        Self {
            index,
            symbol: symbol.into(),
        }
    }
}

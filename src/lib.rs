//! NFA Trace Visualizer
//!
//! Lays out a nondeterministic finite automaton together with one of its
//! execution traces and renders the result as a diagram.
//!
//! This library provides functionality for:
//! - Loading automaton instances (states, transitions, trace, input tape) from JSON
//! - Assigning states to columns by breadth-first depth from the start state
//! - Placing nodes on a shared centerline and routing every edge as an arc
//! - Highlighting the transitions the trace actually took
//! - Rendering to SVG, Graphviz DOT, JSON or a text table

pub mod automaton;
pub mod cli;
pub mod config;
pub mod diagram;
pub mod error;
pub mod input;
pub mod layout;
pub mod render;

pub use config::Config;
pub use diagram::Diagram;
pub use error::{Error, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Initialize logging with the given log level
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert_eq!(NAME, "nfa-trace-viz");
    }
}

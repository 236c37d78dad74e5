//! Render module - Turn a computed diagram into text formats
//!
//! SVG is the primary target. DOT is offered for handing the automaton to
//! Graphviz with the computed positions pinned.

pub mod dot;
pub mod svg;

pub use dot::to_dot;
pub use svg::render_svg;

//! Configuration management
//!
//! This module handles loading and managing configuration from:
//! - Command-line arguments
//! - Configuration files (TOML)
//! - Defaults

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub input: InputConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Geometry constants for the diagram, all in pixels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Total canvas width
    #[serde(default = "default_width")]
    pub width: f64,

    /// Horizontal margin on each side of the node band
    #[serde(default = "default_padding")]
    pub padding: f64,

    /// Node circle radius
    #[serde(default = "default_node_radius")]
    pub node_radius: f64,

    /// Vertical distance between nodes sharing a column
    #[serde(default = "default_row_spacing")]
    pub row_spacing: f64,

    /// Arc height of the slot-0 edge in each family
    #[serde(default = "default_min_arc")]
    pub min_arc: f64,

    /// Extra arc height per slot
    #[serde(default = "default_slot_height")]
    pub slot_height: f64,

    /// Height of the self-loop control points above the node center
    #[serde(default = "default_self_loop_rise")]
    pub self_loop_rise: f64,

    /// Horizontal reach of the self-loop control points
    #[serde(default = "default_self_loop_spread")]
    pub self_loop_spread: f64,

    /// Horizontal offset of the self-loop endpoints
    #[serde(default = "default_self_loop_foot")]
    pub self_loop_foot: f64,

    /// Space reserved above the graph for the header and the input tape
    #[serde(default = "default_tape_area_height")]
    pub tape_area_height: f64,

    /// Space reserved below the graph for the legend
    #[serde(default = "default_legend_height")]
    pub legend_height: f64,

    #[serde(default = "default_min_graph_height")]
    pub min_graph_height: f64,
}

/// Instance loading options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Strip numeric atom suffixes (`a0` -> `a`) from characters
    #[serde(default = "default_strip_atom_suffix")]
    pub strip_atom_suffix: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions

fn default_width() -> f64 {
    820.0
}

fn default_padding() -> f64 {
    65.0
}

fn default_node_radius() -> f64 {
    22.0
}

fn default_row_spacing() -> f64 {
    90.0
}

fn default_min_arc() -> f64 {
    35.0
}

fn default_slot_height() -> f64 {
    28.0
}

fn default_self_loop_rise() -> f64 {
    75.0
}

fn default_self_loop_spread() -> f64 {
    45.0
}

fn default_self_loop_foot() -> f64 {
    10.0
}

fn default_tape_area_height() -> f64 {
    105.0
}

fn default_legend_height() -> f64 {
    44.0
}

fn default_min_graph_height() -> f64 {
    400.0
}

fn default_strip_atom_suffix() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

// Default implementations

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            padding: default_padding(),
            node_radius: default_node_radius(),
            row_spacing: default_row_spacing(),
            min_arc: default_min_arc(),
            slot_height: default_slot_height(),
            self_loop_rise: default_self_loop_rise(),
            self_loop_spread: default_self_loop_spread(),
            self_loop_foot: default_self_loop_foot(),
            tape_area_height: default_tape_area_height(),
            legend_height: default_legend_height(),
            min_graph_height: default_min_graph_height(),
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            strip_atom_suffix: default_strip_atom_suffix(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let contents = std::fs::read_to_string(&path)
            .map_err(|e| Error::Config(format!("Failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config file {:?}: {}", path, e)))?;

        config.layout.validate()?;
        Ok(config)
    }

    /// Find the first configuration file in the default locations
    ///
    /// Searches in order:
    /// 1. ./nfa-trace-viz.toml
    /// 2. ~/.nfa-trace-viz/config.toml
    /// 3. /etc/nfa-trace-viz/config.toml
    pub fn locate() -> Option<PathBuf> {
        let mut paths = vec![PathBuf::from("nfa-trace-viz.toml")];
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".nfa-trace-viz").join("config.toml"));
        }
        paths.push(PathBuf::from("/etc/nfa-trace-viz/config.toml"));
        first_existing(paths)
    }

    /// Load configuration from the first default location, or defaults
    pub fn load() -> Result<Self> {
        match Self::locate() {
            Some(path) => Self::from_file(path),
            None => Ok(Config::default()),
        }
    }
}

fn first_existing(paths: impl IntoIterator<Item = PathBuf>) -> Option<PathBuf> {
    paths.into_iter().find(|path| path.exists())
}

impl LayoutConfig {
    /// Reject geometry that would collapse the drawing band
    pub fn validate(&self) -> Result<()> {
        if self.width <= 2.0 * self.padding {
            return Err(Error::Config(format!(
                "layout.width ({}) must exceed twice layout.padding ({})",
                self.width, self.padding
            )));
        }
        if self.node_radius <= 0.0 || self.row_spacing <= 0.0 || self.slot_height <= 0.0 {
            return Err(Error::Config(
                "layout.node_radius, layout.row_spacing and layout.slot_height must be positive"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

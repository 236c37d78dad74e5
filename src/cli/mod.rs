//! CLI module
//!
//! This module defines the command-line interface using clap and implements
//! the command execution logic.

use crate::{Config, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod commands;
pub mod output;

/// NFA execution trace visualizer CLI
#[derive(Parser, Debug)]
#[command(name = "nfa-trace-viz")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Lay out an instance and render the diagram
    Render {
        /// Path to the instance JSON file
        instance: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "svg")]
        format: OutputFormat,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the structure and computed layout of an instance
    Inspect {
        /// Path to the instance JSON file
        instance: PathBuf,
    },

    /// Check an instance for structural problems
    Validate {
        /// Path to the instance JSON file
        instance: PathBuf,
    },
}

/// Output format types
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// SVG document
    Svg,
    /// JSON layout dump
    Json,
    /// DOT format (Graphviz)
    Dot,
    /// Plain text table
    Table,
}

/// Execute the CLI command
pub fn execute(args: Cli, config: Config) -> Result<()> {
    match args.command {
        Commands::Render {
            instance,
            format,
            output,
        } => commands::render::execute(&instance, format, output.as_deref(), &config),
        Commands::Inspect { instance } => commands::inspect::execute(&instance, &config),
        Commands::Validate { instance } => commands::validate::execute(&instance),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "nfa-trace-viz",
            "render",
            "instance.json",
            "--format",
            "dot",
            "-o",
            "out.dot",
        ])
        .unwrap();

        match cli.command {
            Commands::Render {
                instance,
                format,
                output,
            } => {
                assert_eq!(instance, PathBuf::from("instance.json"));
                assert_eq!(format, OutputFormat::Dot);
                assert_eq!(output, Some(PathBuf::from("out.dot")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_defaults_and_global_config() {
        let cli = Cli::try_parse_from([
            "nfa-trace-viz",
            "render",
            "instance.json",
            "--config",
            "viz.toml",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("viz.toml")));
        assert!(matches!(
            cli.command,
            Commands::Render {
                format: OutputFormat::Svg,
                output: None,
                ..
            }
        ));
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        let cli = Cli::try_parse_from(["nfa-trace-viz", "render", "x.json", "-f", "png"]);
        assert!(cli.is_err());
    }
}

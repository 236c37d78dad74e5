//! NFA Trace Visualizer

use clap::Parser;
use nfa_trace_viz::{Config, Result, VERSION, cli, init_logging};

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    let config_path = args.config.clone().or_else(Config::locate);
    let config = match &config_path {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    // RUST_LOG still takes precedence over the configured level
    init_logging(&config.logging.level);

    tracing::info!("NFA Trace Visualizer v{}", VERSION);
    match &config_path {
        Some(path) => tracing::info!("Loaded config from {:?}", path),
        None => tracing::info!("No config file found, using defaults"),
    }
    tracing::debug!("Parsed arguments: {:?}", args);
    tracing::debug!("Loaded configuration: {:?}", config);

    cli::execute(args, config)?;

    Ok(())
}

//! Inform CLI - rich-text toolkit.
//!
//! Provides commands for:
//! - `expand`: Render stored rich text through the front-end pipeline
//! - `filter`: Apply a content filter to an article export

mod commands;
mod error;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ExpandArgs, FilterArgs};
use output::Output;

/// Inform - rich-text rewriting toolkit.
#[derive(Parser)]
#[command(name = "inform", version, about)]
struct Cli {
    /// Path to configuration file (default: auto-discover inform.toml).
    #[arg(short, long, global = true, env = "INFORM_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render rich text through the front-end rewrite pipeline.
    Expand(ExpandArgs),
    /// Apply a content filter to a JSON article export.
    Filter(FilterArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();
    let result = match cli.command {
        Commands::Expand(args) => args.execute(config_path),
        Commands::Filter(args) => args.execute(config_path, &output),
    };

    if let Err(err) = result {
        output.error(err);
        std::process::exit(1);
    }
}

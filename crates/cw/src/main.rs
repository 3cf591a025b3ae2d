//! cw CLI - document tree to Confluence converter.
//!
//! Provides commands for:
//! - `storage`: Render a JSON document tree as Confluence storage format
//! - `wiki`: Render a JSON document tree as Confluence wiki text

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{Format, RenderArgs};
use output::Output;

/// cw - render document trees for Confluence.
#[derive(Parser)]
#[command(name = "cw", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render as Confluence storage format (XHTML).
    Storage(RenderArgs),
    /// Render as Confluence wiki text.
    Wiki(RenderArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let (format, args) = match cli.command {
        Commands::Storage(args) => (Format::Storage, args),
        Commands::Wiki(args) => (Format::Wiki, args),
    };

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if args.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = args.execute(format) {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

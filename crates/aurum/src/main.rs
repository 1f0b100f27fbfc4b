//! Aurum CLI - Blog post renderer.
//!
//! Provides commands for:
//! - `render`: Render a post body to HTML or a JSON node dump
//! - `outline`: Print the heading outline of a post body

mod commands;
mod error;
mod input;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{OutlineArgs, RenderArgs};
use output::Output;

/// Aurum - Blog post renderer.
#[derive(Parser)]
#[command(name = "aurum", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a post body.
    Render(RenderArgs),
    /// Print the heading outline of a post body.
    Outline(OutlineArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = matches!(&cli.command, Commands::Render(args) if args.verbose);

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Outline(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

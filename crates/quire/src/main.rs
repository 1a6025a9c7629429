//! Quire CLI - documentation tree builder.
//!
//! Provides commands for:
//! - `paths`: List output paths in traversal order
//! - `tree`: Show the page forest with header outlines
//! - `manifest`: Print a JSON manifest of every page
//! - `links`: Show the relative link mapping of one source page

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{LinksArgs, ManifestArgs, PathsArgs, TreeArgs};
use output::Output;

/// Quire - documentation tree builder.
#[derive(Parser)]
#[command(name = "quire", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List output paths in traversal order.
    Paths(PathsArgs),
    /// Show the page forest with header outlines.
    Tree(TreeArgs),
    /// Print a JSON manifest of every page.
    Manifest(ManifestArgs),
    /// Show how links written in one source page map to output links.
    Links(LinksArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Paths(args) => args.site.verbose,
            Self::Tree(args) => args.site.verbose,
            Self::Manifest(args) => args.site.verbose,
            Self::Links(args) => args.site.verbose,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Paths(args) => args.execute(),
        Commands::Tree(args) => args.execute(),
        Commands::Manifest(args) => args.execute(),
        Commands::Links(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

//! MDC CLI - directive document engine.
//!
//! Provides commands for:
//! - `check`: Parse and validate content files against directive schemas
//! - `tree`: Print the parsed directive tree of a content file

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, TreeArgs};
use output::Output;

/// MDC - directive document engine.
#[derive(Parser)]
#[command(name = "mdc", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and validate content files.
    Check(CheckArgs),
    /// Print the directive tree of a content file.
    Tree(TreeArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default.
    let verbose = match &cli.command {
        Commands::Check(args) => args.verbose,
        Commands::Tree(args) => args.verbose,
    };
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Check(args) => args.execute(&output),
        Commands::Tree(args) => args.execute(),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            output.error(&format!("Error: {err}"));
            std::process::exit(1);
        }
    }
}

//! `mdc tree` command implementation.

use std::path::PathBuf;

use clap::Args;
use console::Term;
use mdc_config::{CliSettings, Config};
use mdc_parser::{Parser, ParserLimits};
use mdc_render::{render, Outline};

use crate::error::CliError;

/// Arguments for the tree command.
#[derive(Args)]
pub(crate) struct TreeArgs {
    /// Content file to display.
    file: PathBuf,

    /// Path to configuration file (default: auto-discover mdc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl TreeArgs {
    /// Execute the tree command: parse the file and print its outline.
    pub(crate) fn execute(&self) -> Result<i32, CliError> {
        let config = Config::load(self.config.as_deref(), Some(&CliSettings::default()))?;

        let parser = Parser::new().with_limits(ParserLimits {
            max_input_bytes: config.limits.max_input_bytes,
            max_depth: config.limits.max_depth,
        });

        let source = std::fs::read_to_string(&self.file)?;
        let doc = parser.parse(&source)?;

        let mut outline = Outline::new();
        render(&doc, &mut outline);

        let term = Term::stdout();
        term.write_str(&outline.into_string())?;
        Ok(0)
    }
}

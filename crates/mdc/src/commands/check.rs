//! `mdc check` command implementation.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use console::Term;
use mdc_config::{CliSettings, Config};
use mdc_parser::{Parser, ParserLimits};
use mdc_schema::{validate, SchemaRegistry, Violation};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Content files to check.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Path to configuration file (default: auto-discover mdc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fail (exit 2) when schema violations are found.
    #[arg(long)]
    strict: bool,

    /// Let unknown directive kinds pass validation.
    #[arg(long)]
    allow_unknown: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    /// Human-readable colored output.
    Text,
    /// One JSON object per file on stdout.
    Json,
}

impl CheckArgs {
    /// Execute the check command. Returns the process exit code:
    /// 0 clean, 1 on parse or I/O errors, 2 on violations with `--strict`.
    pub(crate) fn execute(&self, output: &Output) -> Result<i32, CliError> {
        let settings = CliSettings {
            strict: self.strict.then_some(true),
            allow_unknown: self.allow_unknown.then_some(true),
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&settings))?;

        let parser = Parser::new().with_limits(ParserLimits {
            max_input_bytes: config.limits.max_input_bytes,
            max_depth: config.limits.max_depth,
        });
        let registry = SchemaRegistry::builtin().allow_unknown(config.check.allow_unknown);

        let mut failed = false;
        let mut violations_found = false;

        for file in &self.files {
            let display = file.display().to_string();
            let source = match std::fs::read_to_string(file) {
                Ok(source) => source,
                Err(err) => {
                    self.report_io_error(output, &display, &err)?;
                    failed = true;
                    continue;
                }
            };

            match parser.parse(&source) {
                Ok(doc) => {
                    let violations = validate(&doc, &registry);
                    violations_found |= !violations.is_empty();
                    self.report(output, &display, &violations)?;
                }
                Err(err) => {
                    self.report_parse_error(output, &display, &err)?;
                    failed = true;
                }
            }
        }

        if failed {
            Ok(1)
        } else if violations_found && config.check.strict {
            Ok(2)
        } else {
            Ok(0)
        }
    }

    fn report(
        &self,
        output: &Output,
        file: &str,
        violations: &[Violation],
    ) -> Result<(), CliError> {
        match self.format {
            Format::Text => {
                if violations.is_empty() {
                    output.success(&format!("{file}: ok"));
                } else {
                    for violation in violations {
                        output.warning(&format!("{file}: {violation}"));
                    }
                }
            }
            Format::Json => {
                let line = serde_json::json!({
                    "file": file,
                    "ok": violations.is_empty(),
                    "violations": violations
                        .iter()
                        .map(|v| serde_json::json!({
                            "path": v.path.to_string(),
                            "line": v.line,
                            "message": v.kind.to_string(),
                        }))
                        .collect::<Vec<_>>(),
                });
                Term::stdout().write_line(&serde_json::to_string(&line)?)?;
            }
        }
        Ok(())
    }

    fn report_parse_error(
        &self,
        output: &Output,
        file: &str,
        err: &mdc_parser::ParseError,
    ) -> Result<(), CliError> {
        tracing::debug!(file, line = err.line, "parse failed");
        match self.format {
            Format::Text => output.error(&format!("{file}: {err}")),
            Format::Json => {
                let line = serde_json::json!({
                    "file": file,
                    "ok": false,
                    "error": { "line": err.line, "message": err.kind.to_string() },
                });
                Term::stdout().write_line(&serde_json::to_string(&line)?)?;
            }
        }
        Ok(())
    }

    fn report_io_error(
        &self,
        output: &Output,
        file: &str,
        err: &std::io::Error,
    ) -> Result<(), CliError> {
        match self.format {
            Format::Text => output.error(&format!("{file}: {err}")),
            Format::Json => {
                let line = serde_json::json!({
                    "file": file,
                    "ok": false,
                    "error": { "message": err.to_string() },
                });
                Term::stdout().write_line(&serde_json::to_string(&line)?)?;
            }
        }
        Ok(())
    }
}

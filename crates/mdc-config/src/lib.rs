//! Configuration management for the MDC toolchain.
//!
//! Parses `mdc.toml` files with serde and provides auto-discovery of the
//! config file in parent directories. A missing config file is not an
//! error; every section has defaults. CLI settings can be applied after
//! loading and take precedence over file values.
//!
//! ```toml
//! [limits]
//! max_input_bytes = 1048576
//! max_depth = 64
//!
//! [check]
//! strict = false
//! allow_unknown = false
//!
//! [content]
//! source_dir = "~/docs/content"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdc.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded
/// config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the strict-check flag.
    pub strict: Option<bool>,
    /// Override whether unknown directive kinds are tolerated.
    pub allow_unknown: Option<bool>,
    /// Override the nesting-depth cap.
    pub max_depth: Option<usize>,
    /// Override the content source directory.
    pub source_dir: Option<PathBuf>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Parser input caps.
    pub limits: LimitsConfig,
    /// Validation behavior.
    pub check: CheckConfig,
    /// Content location (raw, as written in TOML).
    content: ContentConfigRaw,

    /// Resolved content configuration (set after loading).
    #[serde(skip)]
    pub content_resolved: ContentConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Parser input caps.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum accepted input length in bytes.
    pub max_input_bytes: usize,
    /// Maximum directive nesting depth.
    pub max_depth: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: 1024 * 1024,
            max_depth: 64,
        }
    }
}

/// Validation behavior.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// Treat violations as failures (nonzero exit).
    pub strict: bool,
    /// Let unknown directive kinds pass validation unchecked.
    pub allow_unknown: bool,
}

/// Raw content configuration as parsed from TOML (paths as strings).
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ContentConfigRaw {
    source_dir: Option<String>,
}

/// Resolved content configuration.
#[derive(Debug, Default)]
pub struct ContentConfig {
    /// Directory holding the content pages, if configured.
    pub source_dir: Option<PathBuf>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Explicitly named file not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

impl Config {
    /// Load configuration with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise
    /// searches for `mdc.toml` in the current directory and parents and
    /// falls back to defaults when nothing is found.
    ///
    /// CLI settings are applied after loading, so CLI arguments take
    /// precedence over config file values.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.resolve_paths();
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Search for the config file in the current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Expand `~` in path values and move them to the resolved section.
    fn resolve_paths(&mut self) {
        if let Some(raw) = &self.content.source_dir {
            let expanded = shellexpand::tilde(raw);
            self.content_resolved.source_dir = Some(PathBuf::from(expanded.as_ref()));
        }
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(strict) = settings.strict {
            self.check.strict = strict;
        }
        if let Some(allow_unknown) = settings.allow_unknown {
            self.check.allow_unknown = allow_unknown;
        }
        if let Some(max_depth) = settings.max_depth {
            self.limits.max_depth = max_depth;
        }
        if let Some(source_dir) = &settings.source_dir {
            self.content_resolved.source_dir = Some(source_dir.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.limits.max_input_bytes, 1024 * 1024);
        assert_eq!(config.limits.max_depth, 64);
        assert!(!config.check.strict);
        assert!(!config.check.allow_unknown);
        assert!(config.content_resolved.source_dir.is_none());
    }

    #[test]
    fn test_parse_full_file() {
        let mut config: Config = toml::from_str(
            "[limits]\nmax_input_bytes = 2048\nmax_depth = 8\n\n[check]\nstrict = true\n",
        )
        .unwrap();
        config.resolve_paths();
        assert_eq!(config.limits.max_input_bytes, 2048);
        assert_eq!(config.limits.max_depth, 8);
        assert!(config.check.strict);
        // Unspecified sections keep defaults.
        assert!(!config.check.allow_unknown);
    }

    #[test]
    fn test_partial_sections_use_defaults() {
        let config: Config = toml::from_str("[limits]\nmax_depth = 4\n").unwrap();
        assert_eq!(config.limits.max_depth, 4);
        assert_eq!(config.limits.max_input_bytes, 1024 * 1024);
    }

    #[test]
    fn test_source_dir_tilde_expansion() {
        let mut config: Config =
            toml::from_str("[content]\nsource_dir = \"~/content\"\n").unwrap();
        config.resolve_paths();
        let resolved = config.content_resolved.source_dir.unwrap();
        assert!(!resolved.to_string_lossy().starts_with('~'));
        assert!(resolved.to_string_lossy().ends_with("content"));
    }

    #[test]
    fn test_cli_settings_take_precedence() {
        let mut config: Config = toml::from_str("[check]\nstrict = false\n").unwrap();
        config.apply_cli_settings(&CliSettings {
            strict: Some(true),
            max_depth: Some(3),
            ..CliSettings::default()
        });
        assert!(config.check.strict);
        assert_eq!(config.limits.max_depth, 3);
    }

    #[test]
    fn test_explicit_missing_path_is_an_error() {
        let err = Config::load(Some(Path::new("/nonexistent/mdc.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}

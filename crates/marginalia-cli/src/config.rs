//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use marginalia_domain::{AliasOverride, AliasOverrides};
use marginalia_extractor::ExtractorConfig;
use marginalia_matcher::MatcherConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
///
/// ```toml
/// [settings]
/// color = true
/// format = "table"
///
/// [extractor]
/// max_brace_candidates = 64
///
/// [matcher]
/// min_term_length = 3
///
/// [aliases."Elizabeth Bennet"]
/// add = ["Miss Eliza"]
/// ignore = "Eliza"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Record extraction limits
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Mention matching options
    #[serde(default)]
    pub matcher: MatcherConfig,

    /// Per-entity alias corrections, keyed by entity name
    #[serde(default)]
    pub aliases: HashMap<String, AliasOverride>,
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".marginalia").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the default path is read if
    /// present and built-in defaults are used otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match Self::path() {
                Ok(path) if path.exists() => path,
                _ => {
                    tracing::debug!("No configuration file, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let contents = fs::read_to_string(&path).map_err(|e| {
            CliError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml(&contents)?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Validate the library sections.
    pub fn validate(&self) -> Result<()> {
        self.extractor.validate()?;
        self.matcher.validate()?;
        Ok(())
    }

    /// Alias overrides keyed for lookup.
    pub fn alias_overrides(&self) -> AliasOverrides {
        AliasOverrides::from_map(self.aliases.clone())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

//! Configuration for mention matching

use crate::error::MatcherError;
use serde::{Deserialize, Serialize};

/// Configuration for the [`Matcher`](crate::Matcher)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Minimum byte length of an alias or parenthetical alternate before it
    /// is searched for; shorter terms produce noise matches
    /// Default: 3
    #[serde(default = "default_min_term_length")]
    pub min_term_length: usize,

    /// Longest chapter text scanned, in bytes; longer texts are truncated
    /// Default: 2 MiB
    #[serde(default = "default_max_text_length")]
    pub max_text_length: Option<usize>,
}

fn default_min_term_length() -> usize {
    3
}

fn default_max_text_length() -> Option<usize> {
    Some(2 * 1024 * 1024)
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            min_term_length: default_min_term_length(),
            max_text_length: default_max_text_length(),
        }
    }
}

impl MatcherConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), MatcherError> {
        if self.min_term_length == 0 {
            return Err(MatcherError::Config(
                "min_term_length must be greater than 0".to_string(),
            ));
        }
        if self.max_text_length == Some(0) {
            return Err(MatcherError::Config(
                "max_text_length must be greater than 0 when set".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, MatcherError> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| MatcherError::Config(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, MatcherError> {
        toml::to_string_pretty(self)
            .map_err(|e| MatcherError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}

//! Configuration for the Extractor

use crate::error::ExtractionError;
use serde::{Deserialize, Serialize};

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Maximum input length (bytes)
    #[serde(default = "default_max_input_length")]
    pub max_input_length: usize,

    /// Maximum number of `{` positions tried when looking for an object
    /// embedded in prose
    #[serde(default = "default_max_brace_candidates")]
    pub max_brace_candidates: usize,

    /// Accept `{"error": ...}` payloads as valid records
    #[serde(default = "default_accept_error_payloads")]
    pub accept_error_payloads: bool,
}

fn default_max_input_length() -> usize {
    1024 * 1024
}

fn default_max_brace_candidates() -> usize {
    32
}

fn default_accept_error_payloads() -> bool {
    true
}

impl Default for ExtractorConfig {
    /// Default configuration with balanced settings
    fn default() -> Self {
        Self {
            max_input_length: default_max_input_length(),
            max_brace_candidates: default_max_brace_candidates(),
            accept_error_payloads: default_accept_error_payloads(),
        }
    }
}

impl ExtractorConfig {
    /// Strict preset: smaller inputs, only the first embedded object is
    /// tried, error payloads are rejected
    pub fn strict() -> Self {
        Self {
            max_input_length: 256 * 1024,
            max_brace_candidates: 1,
            accept_error_payloads: false,
        }
    }

    /// Lenient preset: large inputs and a deep search for embedded objects
    pub fn lenient() -> Self {
        Self {
            max_input_length: 8 * 1024 * 1024,
            max_brace_candidates: 256,
            accept_error_payloads: true,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ExtractionError> {
        if self.max_input_length == 0 {
            return Err(ExtractionError::Config(
                "max_input_length must be greater than 0".to_string(),
            ));
        }
        if self.max_brace_candidates == 0 {
            return Err(ExtractionError::Config(
                "max_brace_candidates must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ExtractionError> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| ExtractionError::Config(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ExtractionError> {
        toml::to_string_pretty(self)
            .map_err(|e| ExtractionError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}

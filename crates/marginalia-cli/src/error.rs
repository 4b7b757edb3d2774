//! Error types for the CLI application.

use marginalia_extractor::ExtractionError;
use marginalia_matcher::MatcherError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// Offending path (`-` for stdin)
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No knowledge record could be extracted
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Matcher setup error
    #[error("Matcher error: {0}")]
    Matcher(#[from] MatcherError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Nothing in the record matches
    #[error("Not found: {0}")]
    NotFound(String),
}

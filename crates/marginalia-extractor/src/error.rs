//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur during extraction
///
/// No variant carries a partial record: extraction either yields a
/// schema-valid record or nothing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// Input is empty or only whitespace
    #[error("Empty input")]
    EmptyInput,

    /// No strategy produced a schema-valid record
    #[error("No valid knowledge record found: {0}")]
    Unparseable(String),

    /// Input exceeds the configured maximum length
    #[error("Input too long: {0} bytes (max: {1})")]
    InputTooLong(usize, usize),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

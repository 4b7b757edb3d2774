//! Error types for the matcher

use thiserror::Error;

/// Errors that can occur while setting up a matcher
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatcherError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

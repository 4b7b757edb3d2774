//! Marginalia CLI library.
//!
//! This library provides the core functionality for the `marginalia`
//! command-line interface: configuration loading, command execution over
//! record files, and output formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod session;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
pub use session::Session;

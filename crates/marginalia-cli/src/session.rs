//! Shared state for one CLI invocation.

use crate::config::Config;
use crate::error::{CliError, Result};
use marginalia_domain::{AliasOverrides, KnowledgeRecord};
use marginalia_extractor::Extractor;
use marginalia_matcher::Matcher;
use std::io::Read;
use std::path::Path;

/// Library handles built from the configuration.
#[derive(Debug, Clone, Default)]
pub struct Session {
    extractor: Extractor,
    matcher: Matcher,
    overrides: AliasOverrides,
}

impl Session {
    /// Build a session from a loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            extractor: Extractor::new(config.extractor.clone())?,
            matcher: Matcher::new(config.matcher.clone())?,
            overrides: config.alias_overrides(),
        })
    }

    /// The mention matcher.
    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Read a record as a reader sees it, with alias overrides applied.
    pub fn load_record(&self, path: &Path) -> Result<KnowledgeRecord> {
        let record = self.load_stored_record(path)?;
        if self.overrides.is_empty() {
            return Ok(record);
        }
        tracing::debug!("Applying {} alias overrides", self.overrides.len());
        Ok(record.with_alias_overrides(&self.overrides))
    }

    /// Read a record exactly as stored, without alias overrides.
    pub fn load_stored_record(&self, path: &Path) -> Result<KnowledgeRecord> {
        let raw = read_input(path)?;
        let extraction = self.extractor.extract_with_strategy(&raw)?;
        tracing::debug!(
            "Loaded {} via {}",
            path.display(),
            extraction.strategy
        );
        Ok(extraction.record)
    }
}

/// Read a whole file, or stdin when the path is `-`.
pub fn read_input(path: &Path) -> Result<String> {
    let read = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer).map(|_| buffer)
    } else {
        std::fs::read_to_string(path)
    };
    read.map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

//! Core Extractor implementation

use crate::config::ExtractorConfig;
use crate::error::ExtractionError;
use crate::parser::{fenced_blocks, parse_whole, EmbeddedObjects};
use crate::schema::validate_schema;
use marginalia_domain::KnowledgeRecord;
use serde_json::Value;
use std::fmt;
use tracing::{debug, info, warn};

/// How a record was located in the raw text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// The whole text is the JSON document
    WholeText,
    /// A fenced code block holds the document
    FencedBlock,
    /// An object embedded in surrounding prose
    EmbeddedObject,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::WholeText => "whole text",
            Strategy::FencedBlock => "fenced block",
            Strategy::EmbeddedObject => "embedded object",
        };
        f.write_str(name)
    }
}

/// A successful extraction
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// The normalised record
    pub record: KnowledgeRecord,

    /// Strategy that produced it
    pub strategy: Strategy,
}

/// The Extractor turns raw model output into a knowledge record
///
/// Strategies run in order and the first schema-valid parse wins:
/// the whole text, then each fenced code block, then each object embedded
/// in prose. Nothing is returned unless some candidate validates.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractorConfig,
}

impl Extractor {
    /// Create a new Extractor
    pub fn new(config: ExtractorConfig) -> Result<Self, ExtractionError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get the configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract a knowledge record from raw text
    pub fn extract(&self, raw: &str) -> Result<KnowledgeRecord, ExtractionError> {
        self.extract_with_strategy(raw).map(|extraction| extraction.record)
    }

    /// Extract a knowledge record and report which strategy found it
    pub fn extract_with_strategy(&self, raw: &str) -> Result<Extraction, ExtractionError> {
        if raw.trim().is_empty() {
            return Err(ExtractionError::EmptyInput);
        }
        if raw.len() > self.config.max_input_length {
            return Err(ExtractionError::InputTooLong(
                raw.len(),
                self.config.max_input_length,
            ));
        }

        let mut last_reason = match self.attempt(Strategy::WholeText, parse_whole(raw)) {
            Ok(record) => return Ok(found(record, Strategy::WholeText, raw)),
            Err(reason) => reason,
        };

        for (index, block) in fenced_blocks(raw).enumerate() {
            match self.attempt(Strategy::FencedBlock, parse_whole(block)) {
                Ok(record) => return Ok(found(record, Strategy::FencedBlock, raw)),
                Err(reason) => last_reason = format!("fenced block {}: {}", index + 1, reason),
            }
        }

        for (start, parsed) in EmbeddedObjects::new(raw, self.config.max_brace_candidates) {
            match self.attempt(Strategy::EmbeddedObject, parsed) {
                Ok(record) => return Ok(found(record, Strategy::EmbeddedObject, raw)),
                Err(reason) => last_reason = format!("object at byte {}: {}", start, reason),
            }
        }

        warn!(
            "No knowledge record in {} bytes of input: {}",
            raw.len(),
            last_reason
        );
        Err(ExtractionError::Unparseable(last_reason))
    }

    /// Validate one parsed candidate and build the record
    fn attempt(
        &self,
        strategy: Strategy,
        parsed: Result<Value, String>,
    ) -> Result<KnowledgeRecord, String> {
        let value = parsed.inspect_err(|reason| {
            debug!("{} attempt failed to parse: {}", strategy, reason);
        })?;

        let Some(matched) = validate_schema(&value) else {
            debug!("{} attempt parsed but has no recognised keys", strategy);
            return Err("no recognised category keys".to_string());
        };
        if matched.error_only && !self.config.accept_error_payloads {
            debug!("{} attempt is an error payload, rejected by config", strategy);
            return Err("error payloads are not accepted".to_string());
        }

        KnowledgeRecord::from_json(value, matched.kind).map_err(|e| {
            debug!("{} attempt has a malformed record: {}", strategy, e);
            e.to_string()
        })
    }
}

fn found(record: KnowledgeRecord, strategy: Strategy, raw: &str) -> Extraction {
    info!(
        "Extracted {} record with {} entities via {} ({} bytes of input)",
        record.kind_or_default(),
        record.entity_count(),
        strategy,
        raw.len()
    );
    Extraction { record, strategy }
}

/// Extract a knowledge record using the default configuration
pub fn extract(raw: &str) -> Result<KnowledgeRecord, ExtractionError> {
    Extractor::default().extract(raw)
}

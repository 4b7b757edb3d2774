//! Marginalia Extractor
//!
//! Turns raw model output into a validated [`KnowledgeRecord`].
//!
//! # Overview
//!
//! Book analyses arrive as text from a language model. Usually that text is
//! a JSON document, but it may be wrapped in a fenced code block or buried
//! in prose. The Extractor tries, in order:
//!
//! 1. the whole text as JSON
//! 2. the interior of each fenced code block (```` ```json ```` or bare)
//! 3. each object embedded in the text, parsed with a streaming JSON reader
//!    so braces inside strings and trailing prose are harmless
//!
//! Every parse must pass schema validation: an object with at least one
//! known category key, or an explicit `error` key. A missing `kind` is
//! inferred from the keys.
//!
//! # Architecture
//!
//! ```text
//! raw text → candidates → schema check → KnowledgeRecord
//! ```
//!
//! # Example Usage
//!
//! ```
//! use marginalia_domain::{BookKind, Category};
//! use marginalia_extractor::extract;
//!
//! let raw = "Here is the analysis:\n```json\n{\"characters\":[{\"name\":\"Ana\",\"aliases\":\"Anna\"}]}\n```";
//! let record = extract(raw)?;
//!
//! assert_eq!(record.kind, Some(BookKind::Fiction));
//! assert_eq!(record.entities(Category::Figures)[0].aliases, vec!["Anna"]);
//! # Ok::<(), marginalia_extractor::ExtractionError>(())
//! ```
//!
//! [`KnowledgeRecord`]: marginalia_domain::KnowledgeRecord

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod parser;
mod schema;


pub use config::ExtractorConfig;
pub use error::ExtractionError;
pub use extractor::{extract, Extraction, Extractor, Strategy};
pub use schema::{validate_schema, SchemaMatch, FICTION_KEYS, NONFICTION_KEYS};

//! Marginalia Render
//!
//! Presentation over a [`KnowledgeRecord`]: markdown documents for readers
//! and free-text search for quick lookups.
//!
//! # Overview
//!
//! - [`render_markdown`] turns a record into a deterministic document with
//!   one section per category, in the fixed order of the book's kind
//! - [`render_entity`] shows a single entity in full, with its connections
//!   resolved to the entities they name
//! - [`render_chapter_mentions`] lists the result of a chapter scan
//! - [`search_all`] finds entities by name, alias or description
//!
//! # Example Usage
//!
//! ```
//! use marginalia_domain::{BookKind, Category, Entity, KnowledgeRecord};
//! use marginalia_render::{render_markdown, search_all, MatchField};
//!
//! let mut record = KnowledgeRecord::new(BookKind::Fiction);
//! record.upsert_entity(
//!     Category::Figures,
//!     Entity::new("Elizabeth Bennet").with_alias("Lizzy"),
//! );
//!
//! let md = render_markdown(&record, Some("Pride and Prejudice"), None);
//! assert!(md.starts_with("# Pride and Prejudice\n"));
//! assert!(md.contains("- Aliases: Lizzy"));
//!
//! let hits = search_all(&record, "lizzy");
//! assert_eq!(hits[0].match_field, MatchField::Alias);
//! ```
//!
//! [`KnowledgeRecord`]: marginalia_domain::KnowledgeRecord

#![warn(missing_docs)]

mod markdown;
mod search;

pub use markdown::{render_chapter_mentions, render_entity, render_markdown};
pub use search::{search_all, MatchField, SearchHit};

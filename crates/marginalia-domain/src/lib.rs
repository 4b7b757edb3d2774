//! Marginalia Domain Layer
//!
//! The knowledge model behind a reading companion: what a language model has
//! worked out about a book (its cast, places, themes, vocabulary, timeline)
//! in a form that can be merged forward as the reader progresses.
//!
//! ## Key Concepts
//!
//! - **KnowledgeRecord**: the parsed analysis of one book
//! - **Category**: one section of the analysis; fiction and non-fiction use
//!   different source keys for the same category
//! - **Entity**: a named item inside a list category, keyed by its
//!   case-insensitive primary name
//! - **Singleton**: a section that only ever holds one record
//! - **Merge**: folding an incremental update into an existing record
//!
//! ## Example
//!
//! ```
//! use marginalia_domain::{merge, BookKind, Category, Entity, KnowledgeRecord};
//!
//! let mut record = KnowledgeRecord::new(BookKind::Fiction);
//! record.upsert_entity(Category::Figures, Entity::new("Elizabeth Bennet"));
//!
//! let mut update = KnowledgeRecord::default();
//! update.upsert_entity(Category::Figures, Entity::new("Mr. Darcy"));
//!
//! let record = merge(record, update);
//! assert_eq!(record.entities(Category::Figures).len(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod aliases;
pub mod category;
pub mod connection;
pub mod entity;
pub mod error;
pub mod kind;
pub mod merge;
pub mod record;

// Re-exports for convenience
pub use aliases::{AliasOverride, AliasOverrides};
pub use category::Category;
pub use connection::{resolve_connection, split_parenthetical, ResolvedConnection};
pub use entity::{ensure_array, Entity, Singleton};
pub use error::ModelError;
pub use kind::BookKind;
pub use merge::{merge, MergeSummary};
pub use record::{CategoryData, KnowledgeRecord};

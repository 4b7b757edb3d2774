//! Marginalia Matcher
//!
//! Answers "which known entities does this chapter mention, and how often?"
//!
//! # Overview
//!
//! Matching is plain substring search over lowercased text, made precise by
//! two rules:
//!
//! - **Word boundaries**: in scripts that separate words ("Ali" must not hit
//!   "quality"), a hit needs non-word characters on both sides. Boundary
//!   classification works on raw UTF-8 bytes and knows which Unicode blocks
//!   are punctuation.
//! - **Union counting**: an entity is searched under its name, parenthetical
//!   alternates and aliases; overlapping hits are merged so one mention is
//!   counted once however many of its names match there.
//!
//! ```text
//! Entity → search terms → spans per term → merged spans → count
//! ```
//!
//! # Example Usage
//!
//! ```
//! use marginalia_domain::{BookKind, Category, Entity, KnowledgeRecord};
//! use marginalia_matcher::find_items_in_chapter;
//!
//! let mut record = KnowledgeRecord::new(BookKind::Fiction);
//! record.upsert_entity(Category::Figures, Entity::new("Ali"));
//!
//! assert!(find_items_in_chapter(&record, "The quality is good.").is_empty());
//! assert_eq!(find_items_in_chapter(&record, "Ali smiled.")[0].count, 1);
//! ```

#![warn(missing_docs)]

mod boundary;
mod config;
mod error;
mod mentions;
mod span;

pub use boundary::{is_word_char, skip_boundary_check};
pub use config::MatcherConfig;
pub use error::MatcherError;
pub use mentions::{count_item_occurrences, find_items_in_chapter, ChapterMention, Matcher};
pub use span::{collect_match_spans, merge_spans, MatchSpan};

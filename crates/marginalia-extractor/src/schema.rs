//! Schema validation for parsed candidates
//!
//! A parsed JSON value only counts as a knowledge record when it is an
//! object carrying at least one allow-listed category key, or an explicit
//! `error` key.

use marginalia_domain::{BookKind, Category};
use serde_json::Value;

/// Top-level keys of a fiction analysis
pub const FICTION_KEYS: &[&str] = &[
    "characters",
    "locations",
    "themes",
    "lexicon",
    "timeline",
    "reader_engagement",
    "current_state",
    "conclusion",
];

/// Top-level keys of a non-fiction analysis
pub const NONFICTION_KEYS: &[&str] = &[
    "key_figures",
    "locations",
    "core_concepts",
    "arguments",
    "terminology",
    "argument_development",
    "reader_engagement",
    "current_position",
    "conclusion",
];

/// Outcome of a successful schema check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaMatch {
    /// Kind implied by the matched keys; `None` for a bare error payload
    pub kind: Option<BookKind>,

    /// The value was accepted only because of its `error` key
    pub error_only: bool,
}

/// Check a parsed value against the category allow-lists
///
/// Kind inference takes the first kind-specific key present, walking the
/// fiction list before the non-fiction one. Failing that, a key found on
/// only one list (`arguments`) decides. Keys shared by both lists
/// (`locations`, `reader_engagement`, `conclusion`) imply fiction when they
/// are all there is.
pub fn validate_schema(value: &Value) -> Option<SchemaMatch> {
    let object = value.as_object()?;

    let allowed = |key: &&str| object.contains_key(*key);
    let has_category = FICTION_KEYS.iter().any(allowed) || NONFICTION_KEYS.iter().any(allowed);

    if !has_category {
        return object.contains_key("error").then_some(SchemaMatch {
            kind: None,
            error_only: true,
        });
    }

    let kind = FICTION_KEYS
        .iter()
        .chain(NONFICTION_KEYS)
        .filter(|key| object.contains_key(**key))
        .find_map(|key| Category::from_key(key).and_then(|(_, kind)| kind))
        .or_else(|| list_only_kind(object))
        .unwrap_or(BookKind::Fiction);

    Some(SchemaMatch {
        kind: Some(kind),
        error_only: false,
    })
}

fn list_only_kind(object: &serde_json::Map<String, Value>) -> Option<BookKind> {
    let present = |keys: &[&str], others: &[&str]| {
        keys.iter()
            .any(|key| object.contains_key(*key) && !others.contains(key))
    };
    if present(FICTION_KEYS, NONFICTION_KEYS) {
        Some(BookKind::Fiction)
    } else if present(NONFICTION_KEYS, FICTION_KEYS) {
        Some(BookKind::NonFiction)
    } else {
        None
    }
}

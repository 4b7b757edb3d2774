//! Connection references between entities
//!
//! Entities point at each other with free-text references such as
//! `"Jane Bennet (sister)"`. Resolution finds the referenced entity
//! so viewers can link to it.

use crate::{Category, Entity, KnowledgeRecord};

/// A connection reference resolved to an entity
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConnection<'a> {
    /// The referenced entity
    pub entity: &'a Entity,

    /// Category the entity was found in
    pub category: Category,

    /// Name part of the reference
    pub name_portion: String,

    /// Parenthetical relationship, if any
    pub relationship: Option<String>,
}

/// Split `"Name (note)"` into `("Name", Some("note"))`
///
/// Only a trailing parenthetical counts; anything else returns the trimmed
/// input unchanged with no note.
pub fn split_parenthetical(s: &str) -> (&str, Option<&str>) {
    let trimmed = s.trim();
    if let Some(without_close) = trimmed.strip_suffix(')') {
        if let Some(open) = without_close.rfind('(') {
            let name = without_close[..open].trim();
            let note = without_close[open + 1..].trim();
            if !name.is_empty() {
                return (name, Some(note).filter(|n| !n.is_empty()));
            }
        }
    }
    (trimmed, None)
}

/// Resolve a connection reference against a record
///
/// Three passes over every list category, first pass with a hit wins:
/// exact primary name, exact alias, then the name portion as a substring
/// of a primary name ("Elizabeth" finds "Elizabeth Bennet"). Matching
/// ignores case.
pub fn resolve_connection<'a>(
    record: &'a KnowledgeRecord,
    connection: &str,
) -> Option<ResolvedConnection<'a>> {
    let (name_portion, relationship) = split_parenthetical(connection);
    if name_portion.is_empty() {
        return None;
    }
    let needle = name_portion.to_lowercase();

    let found = record
        .iter_entities()
        .find(|(_, e)| e.merge_key() == needle)
        .or_else(|| record.iter_entities().find(|(_, e)| e.has_alias(&needle)))
        .or_else(|| {
            record
                .iter_entities()
                .find(|(_, e)| e.merge_key().contains(&needle))
        });

    found.map(|(category, entity)| ResolvedConnection {
        entity,
        category,
        name_portion: name_portion.to_string(),
        relationship: relationship.map(str::to_string),
    })
}

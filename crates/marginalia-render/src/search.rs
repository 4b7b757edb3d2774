//! Free-text search across a record

use marginalia_domain::{Category, Entity, KnowledgeRecord};
use serde::Serialize;

/// Descriptive fields searched after names and aliases
const DESCRIPTION_FIELDS: [&str; 3] = ["description", "definition", "significance"];

/// Which part of an entity matched a query, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchField {
    /// Primary name
    Name,
    /// One of the aliases
    Alias,
    /// Description, definition or significance text
    Description,
}

/// One search result
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit<'a> {
    /// The matching entity
    pub entity: &'a Entity,

    /// Category the entity belongs to
    pub category: Category,

    /// Best field that matched
    pub match_field: MatchField,
}

/// Case-insensitive substring search over every list category
///
/// Each entity appears at most once, at the best field it matched. Name
/// matches rank before alias matches, which rank before description
/// matches; within a rank, record order is kept. Singleton categories are
/// not searched. A blank query finds nothing.
pub fn search_all<'a>(record: &'a KnowledgeRecord, query: &str) -> Vec<SearchHit<'a>> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    let mut hits: Vec<SearchHit<'a>> = record
        .iter_entities()
        .filter_map(|(category, entity)| {
            best_field(entity, &query).map(|match_field| SearchHit {
                entity,
                category,
                match_field,
            })
        })
        .collect();

    hits.sort_by_key(|hit| hit.match_field);
    tracing::debug!("Search for '{}' found {} entities", query, hits.len());
    hits
}

fn best_field(entity: &Entity, query: &str) -> Option<MatchField> {
    let contains = |text: &str| text.to_lowercase().contains(query);

    if contains(&entity.name) {
        Some(MatchField::Name)
    } else if entity.aliases.iter().any(|alias| contains(alias)) {
        Some(MatchField::Alias)
    } else if DESCRIPTION_FIELDS
        .iter()
        .filter_map(|field| entity.text(field))
        .any(contains)
    {
        Some(MatchField::Description)
    } else {
        None
    }
}

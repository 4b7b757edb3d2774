//! User alias overrides
//!
//! Readers can teach the engine extra names for an entity ("Lizzy") or
//! suppress aliases the model got wrong. Overrides are applied on read and
//! produce a decorated copy; the stored record is never touched.

use crate::record::{CategoryData, KnowledgeRecord};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Alias changes for one entity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasOverride {
    /// Aliases to add
    #[serde(default, deserialize_with = "string_or_list")]
    pub add: Vec<String>,

    /// Aliases to drop
    #[serde(default, deserialize_with = "string_or_list")]
    pub ignore: Vec<String>,
}

/// Alias overrides keyed by lowercase entity name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasOverrides {
    entries: HashMap<String, AliasOverride>,
}

impl AliasOverrides {
    /// Create an empty override table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a settings table whose keys may use any case
    ///
    /// Keys that collide case-insensitively are combined.
    pub fn from_map(map: HashMap<String, AliasOverride>) -> Self {
        let mut overrides = Self::new();
        for (name, entry) in map {
            overrides.insert(&name, entry);
        }
        overrides
    }

    /// Add the override for an entity name
    pub fn insert(&mut self, name: &str, entry: AliasOverride) {
        let slot = self.entries.entry(name.trim().to_lowercase()).or_default();
        slot.add.extend(entry.add);
        slot.ignore.extend(entry.ignore);
    }

    /// Override for an entity name, ignoring case
    pub fn get(&self, name: &str) -> Option<&AliasOverride> {
        self.entries.get(&name.trim().to_lowercase())
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of overridden entities
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl KnowledgeRecord {
    /// Copy of this record with user alias overrides applied
    ///
    /// Ignored aliases are removed, added aliases appended unless already
    /// present (case-insensitively) or equal to the entity's name. Nothing
    /// else about an entity changes.
    pub fn with_alias_overrides(&self, overrides: &AliasOverrides) -> KnowledgeRecord {
        let mut decorated = self.clone();
        if overrides.is_empty() {
            return decorated;
        }

        for data in decorated.categories.values_mut() {
            let CategoryData::Entities(entities) = data else {
                continue;
            };
            for entity in entities.iter_mut() {
                let Some(entry) = overrides.get(&entity.name) else {
                    continue;
                };

                let ignored: Vec<String> = entry.ignore.iter().map(|a| a.to_lowercase()).collect();
                entity
                    .aliases
                    .retain(|alias| !ignored.contains(&alias.to_lowercase()));

                let name = entity.merge_key();
                for alias in &entry.add {
                    let alias = alias.trim();
                    if alias.is_empty() || alias.to_lowercase() == name || entity.has_alias(alias) {
                        continue;
                    }
                    entity.aliases.push(alias.to_string());
                }
            }
        }

        decorated
    }
}

fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(s) => vec![s],
        OneOrMany::Many(v) => v,
    })
}

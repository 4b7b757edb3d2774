//! Knowledge record - the parsed and merged analysis of one book

use crate::entity::{Entity, Singleton};
use crate::error::{json_type_name, ModelError};
use crate::{BookKind, Category};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Contents of one category
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryData {
    /// Entity-list categories (characters, themes, timeline, ...)
    Entities(Vec<Entity>),

    /// Singleton categories (current state, conclusion, ...)
    Singleton(Singleton),
}

/// The structured knowledge extracted from a book analysis
///
/// Created once per complete extraction, then folded forward with
/// [`KnowledgeRecord::merge`] as incremental updates arrive. Serializes to
/// and from the JSON shape the analysis arrived in.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct KnowledgeRecord {
    /// Fiction or non-fiction; `None` only for error payloads and records
    /// assembled by hand
    pub kind: Option<BookKind>,

    /// Category contents, in category order
    pub categories: BTreeMap<Category, CategoryData>,

    /// Explicit error reported by the model instead of an analysis
    pub error: Option<String>,

    /// Top-level keys that are not categories, preserved as is
    pub extras: Map<String, Value>,
}

impl KnowledgeRecord {
    /// Create an empty record of the given kind
    pub fn new(kind: BookKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    /// Kind used for vocabulary and render order (fiction when unset)
    pub fn kind_or_default(&self) -> BookKind {
        self.kind.unwrap_or_default()
    }

    /// Whether this record is an explicit error payload
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Entities of a list category (empty for absent or singleton categories)
    pub fn entities(&self, category: Category) -> &[Entity] {
        match self.categories.get(&category) {
            Some(CategoryData::Entities(entities)) => entities,
            _ => &[],
        }
    }

    /// The record of a singleton category, if present
    pub fn singleton(&self, category: Category) -> Option<&Singleton> {
        match self.categories.get(&category) {
            Some(CategoryData::Singleton(singleton)) => Some(singleton),
            _ => None,
        }
    }

    /// Iterate over every entity of every list category, in category order
    pub fn iter_entities(&self) -> impl Iterator<Item = (Category, &Entity)> {
        self.categories.iter().flat_map(|(category, data)| {
            let entities: &[Entity] = match data {
                CategoryData::Entities(entities) => entities,
                CategoryData::Singleton(_) => &[],
            };
            entities.iter().map(move |e| (*category, e))
        })
    }

    /// Total number of entities across list categories
    pub fn entity_count(&self) -> usize {
        self.iter_entities().count()
    }

    /// Find an entity by primary name or alias, ignoring case
    pub fn find_entity(&self, name: &str) -> Option<(Category, &Entity)> {
        let lowered = name.trim().to_lowercase();
        self.iter_entities()
            .find(|(_, e)| e.merge_key() == lowered)
            .or_else(|| self.iter_entities().find(|(_, e)| e.has_alias(&lowered)))
    }

    /// Add an entity to a list category, coalescing with an existing entity
    /// of the same name unless the category is append-only or the name is
    /// blank
    ///
    /// Returns `true` when an existing entity was replaced.
    ///
    /// # Panics
    ///
    /// Panics when `category` is a singleton category.
    pub fn upsert_entity(&mut self, category: Category, entity: Entity) -> bool {
        assert!(
            !category.is_singleton(),
            "{:?} holds a singleton, not entities",
            category
        );
        let slot = self
            .categories
            .entry(category)
            .or_insert_with(|| CategoryData::Entities(Vec::new()));
        let entities = match slot {
            CategoryData::Entities(entities) => entities,
            CategoryData::Singleton(_) => unreachable!("singleton stored under list category"),
        };

        if category.is_append_only() || entity.name.trim().is_empty() {
            entities.push(entity);
            return false;
        }

        let key = entity.merge_key();
        match entities.iter_mut().find(|e| e.merge_key() == key) {
            Some(existing) => {
                *existing = entity;
                true
            }
            None => {
                entities.push(entity);
                false
            }
        }
    }

    /// Replace the record of a singleton category
    ///
    /// # Panics
    ///
    /// Panics when `category` is a list category.
    pub fn set_singleton(&mut self, category: Category, singleton: Singleton) {
        assert!(
            category.is_singleton(),
            "{:?} holds entities, not a singleton",
            category
        );
        self.categories
            .insert(category, CategoryData::Singleton(singleton));
    }

    /// Build a record from a parsed JSON object
    ///
    /// An explicit `kind` (or `type`) field wins over `inferred_kind`. A
    /// `null` category is treated as absent. Slots of the wrong shape fail
    /// instead of being skipped.
    ///
    /// # Errors
    ///
    /// Returns `NotAnObject` for non-object input and `TypeMismatch` for any
    /// category slot, entity or list field of the wrong type.
    pub fn from_json(value: Value, inferred_kind: Option<BookKind>) -> Result<Self, ModelError> {
        let object = match value {
            Value::Object(object) => object,
            other => return Err(ModelError::NotAnObject(json_type_name(&other))),
        };

        let mut record = KnowledgeRecord::default();
        let mut explicit_kind = None;

        for (key, value) in object {
            if key == "kind" || key == "type" {
                match value.as_str().and_then(BookKind::parse) {
                    Some(kind) => explicit_kind = Some(kind),
                    None => {
                        tracing::debug!("Ignoring unrecognized {} value {}", key, value);
                        record.extras.insert(key, value);
                    }
                }
                continue;
            }

            if key == "error" {
                let message = match value {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                record.error = Some(message);
                continue;
            }

            let Some((category, _)) = Category::from_key(&key) else {
                record.extras.insert(key, value);
                continue;
            };

            if value.is_null() {
                continue;
            }

            if category.is_singleton() {
                let singleton = Singleton::from_json(value, &key)?;
                record.set_singleton(category, singleton);
                continue;
            }

            let items = match value {
                Value::Array(items) => items,
                // A lone object is a one-element list
                Value::Object(object) => vec![Value::Object(object)],
                other => {
                    tracing::debug!("Category {} holds {}", key, json_type_name(&other));
                    return Err(ModelError::TypeMismatch {
                        key,
                        expected: "array of objects",
                    });
                }
            };
            // Keep an explicitly empty list visible as a present category
            if items.is_empty() {
                record
                    .categories
                    .entry(category)
                    .or_insert_with(|| CategoryData::Entities(Vec::new()));
            }
            for item in items {
                let entity = Entity::from_json(item, category, &key)?;
                record.upsert_entity(category, entity);
            }
        }

        record.kind = explicit_kind.or(inferred_kind);
        Ok(record)
    }

    /// Persisted JSON form, using the record kind's vocabulary
    pub fn to_json(&self) -> Value {
        let kind = self.kind_or_default();
        let mut object = Map::new();

        if let Some(kind) = self.kind {
            object.insert("kind".to_string(), Value::String(kind.as_str().to_string()));
        }
        if let Some(error) = &self.error {
            object.insert("error".to_string(), Value::String(error.clone()));
        }
        for (category, data) in &self.categories {
            let value = match data {
                CategoryData::Entities(entities) => {
                    Value::Array(entities.iter().map(|e| e.to_json(*category)).collect())
                }
                CategoryData::Singleton(singleton) => singleton.to_json(),
            };
            object.insert(category.key(kind).to_string(), value);
        }
        for (key, value) in &self.extras {
            object.insert(key.clone(), value.clone());
        }
        Value::Object(object)
    }
}

impl TryFrom<Value> for KnowledgeRecord {
    type Error = ModelError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_json(value, None)
    }
}

impl From<KnowledgeRecord> for Value {
    fn from(record: KnowledgeRecord) -> Self {
        record.to_json()
    }
}

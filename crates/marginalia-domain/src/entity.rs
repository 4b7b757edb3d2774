//! Entity and singleton entries of a knowledge record

use crate::error::{json_type_name, ModelError};
use crate::Category;
use serde_json::{Map, Value};

/// Name fields an entity may carry, in fallback order
const NAME_FIELDS: [&str; 3] = ["name", "term", "event"];

/// Payload fields that are lists of strings but may arrive as one string
const LIST_FIELDS: [&str; 2] = ["connections", "references"];

/// One item of an entity-list category (a character, a place, a term, ...)
///
/// `name` is the merge key: two entities of one category whose names match
/// case-insensitively are the same logical entity. Every other source field
/// is kept in `fields`, in source order, and copied through untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Entity {
    /// Primary name (`name`, `term` or `event` depending on category)
    pub name: String,

    /// Alternate surface forms
    pub aliases: Vec<String>,

    /// Category-specific payload (role, description, significance, ...)
    pub fields: Map<String, Value>,
}

impl Entity {
    /// Create an entity with just a primary name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add an alias
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Set a payload field
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Case-insensitive identity used for merging
    pub fn merge_key(&self) -> String {
        self.name.to_lowercase()
    }

    /// Non-empty string payload field
    pub fn text(&self, field: &str) -> Option<&str> {
        non_empty_str(self.fields.get(field)?)
    }

    /// String list payload field; a bare string counts as a one-element list
    pub fn list(&self, field: &str) -> Vec<&str> {
        match self.fields.get(field) {
            Some(Value::Array(items)) => items.iter().filter_map(non_empty_str).collect(),
            Some(other) => non_empty_str(other).into_iter().collect(),
            None => Vec::new(),
        }
    }

    /// Descriptive text: `description`, or `definition` for lexicon terms
    pub fn description(&self) -> Option<&str> {
        self.text("description").or_else(|| self.text("definition"))
    }

    /// Connection references (`connections`, or `references` in non-fiction)
    pub fn connections(&self) -> Vec<&str> {
        let connections = self.list("connections");
        if connections.is_empty() {
            self.list("references")
        } else {
            connections
        }
    }

    /// Whether `alias` is one of this entity's aliases, ignoring case
    pub fn has_alias(&self, alias: &str) -> bool {
        let alias = alias.to_lowercase();
        self.aliases.iter().any(|a| a.to_lowercase() == alias)
    }

    /// Build an entity from one source list item
    ///
    /// Items of coalescing categories must carry a non-blank name; only the
    /// append-only timeline accepts nameless events.
    pub(crate) fn from_json(
        value: Value,
        category: Category,
        key: &str,
    ) -> Result<Self, ModelError> {
        let mut object = match value {
            Value::Object(object) => object,
            _ => {
                return Err(ModelError::TypeMismatch {
                    key: format!("{}[]", key),
                    expected: "object",
                })
            }
        };

        let authoritative = category.name_field();
        let name_field = if object.contains_key(authoritative) {
            Some(authoritative)
        } else {
            NAME_FIELDS.into_iter().find(|f| object.contains_key(*f))
        };
        let name = match name_field.and_then(|f| object.shift_remove(f)) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            Some(_) => {
                return Err(ModelError::TypeMismatch {
                    key: format!("{}[].{}", key, name_field.unwrap_or(authoritative)),
                    expected: "string",
                })
            }
        };
        // Nameless items would all share the empty merge key
        if name.is_empty() && !category.is_append_only() {
            return Err(ModelError::TypeMismatch {
                key: format!("{}[].{}", key, name_field.unwrap_or(authoritative)),
                expected: "non-empty string",
            });
        }

        let aliases = match object.shift_remove("aliases") {
            Some(value) => ensure_array(value, &format!("{}[].aliases", key))?,
            None => Vec::new(),
        };

        for field in LIST_FIELDS {
            if let Some(value) = object.shift_remove(field) {
                let items = ensure_array(value, &format!("{}[].{}", key, field))?;
                object.insert(
                    field.to_string(),
                    Value::Array(items.into_iter().map(Value::String).collect()),
                );
            }
        }

        Ok(Self {
            name,
            aliases,
            fields: object,
        })
    }

    /// Persisted form, with the name under the category's name field
    pub fn to_json(&self, category: Category) -> Value {
        let mut object = Map::new();
        object.insert(
            category.name_field().to_string(),
            Value::String(self.name.clone()),
        );
        if !self.aliases.is_empty() {
            object.insert(
                "aliases".to_string(),
                Value::Array(self.aliases.iter().cloned().map(Value::String).collect()),
            );
        }
        for (k, v) in &self.fields {
            object.insert(k.clone(), v.clone());
        }
        Value::Object(object)
    }
}

/// The record of a singleton category (current state, conclusion, ...)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Singleton {
    /// Payload fields in source order
    pub fields: Map<String, Value>,
}

impl Singleton {
    /// Create an empty singleton
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a payload field
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Non-empty string payload field
    pub fn text(&self, field: &str) -> Option<&str> {
        non_empty_str(self.fields.get(field)?)
    }

    pub(crate) fn from_json(value: Value, key: &str) -> Result<Self, ModelError> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            Value::String(summary) => Ok(Self::new().with_field("summary", summary)),
            Value::Array(mut items) if items.len() == 1 && items[0].is_object() => {
                Self::from_json(items.remove(0), key)
            }
            _ => Err(ModelError::TypeMismatch {
                key: key.to_string(),
                expected: "object",
            }),
        }
    }

    pub(crate) fn to_json(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}

/// Coerce a list-of-strings slot: a single string becomes a one-element
/// list, `null` becomes empty, blank entries are dropped
///
/// # Errors
///
/// Returns `TypeMismatch` when the slot or one of its elements is neither a
/// string nor (for the slot) an array.
pub fn ensure_array(value: Value, key: &str) -> Result<Vec<String>, ModelError> {
    let items = match value {
        Value::Null => return Ok(Vec::new()),
        Value::String(s) => vec![Value::String(s)],
        Value::Array(items) => items,
        other => {
            tracing::debug!("{} holds {} instead of a list", key, json_type_name(&other));
            return Err(ModelError::TypeMismatch {
                key: key.to_string(),
                expected: "string or array of strings",
            });
        }
    };

    let mut out = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::String(s) => {
                let trimmed = s.trim();
                if !trimmed.is_empty() {
                    out.push(trimmed.to_string());
                }
            }
            Value::Null => {}
            _ => {
                return Err(ModelError::TypeMismatch {
                    key: key.to_string(),
                    expected: "array of strings",
                })
            }
        }
    }
    Ok(out)
}

fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ensure_array_coerces_single_string() {
        assert_eq!(ensure_array(json!("Anna"), "a").unwrap(), vec!["Anna"]);
        assert_eq!(ensure_array(json!(["A", " ", "B"]), "a").unwrap(), vec!["A", "B"]);
        assert!(ensure_array(json!(null), "a").unwrap().is_empty());
    }

    #[test]
    fn test_ensure_array_rejects_wrong_types() {
        assert!(ensure_array(json!(3), "a").is_err());
        assert!(ensure_array(json!(["ok", 3]), "a").is_err());
        assert!(ensure_array(json!({"x": 1}), "a").is_err());
    }

    #[test]
    fn test_entity_uses_category_name_field() {
        let entity = Entity::from_json(
            json!({"term": "Theosis", "definition": "Union with God"}),
            Category::Lexicon,
            "lexicon",
        )
        .unwrap();
        assert_eq!(entity.name, "Theosis");
        assert_eq!(entity.description(), Some("Union with God"));
        assert!(!entity.fields.contains_key("term"));
    }

    #[test]
    fn test_entity_name_falls_back_to_other_fields() {
        let entity =
            Entity::from_json(json!({"name": "Logos"}), Category::Lexicon, "lexicon").unwrap();
        assert_eq!(entity.name, "Logos");
    }

    #[test]
    fn test_entity_rejects_non_object_item() {
        let err = Entity::from_json(json!("Bob"), Category::Figures, "characters").unwrap_err();
        assert!(matches!(err, ModelError::TypeMismatch { .. }));
    }

    #[test]
    fn test_entity_requires_name_in_coalescing_categories() {
        let err = Entity::from_json(json!({"role": "narrator"}), Category::Figures, "characters")
            .unwrap_err();
        assert_eq!(
            err,
            ModelError::TypeMismatch {
                key: "characters[].name".to_string(),
                expected: "non-empty string",
            }
        );
        assert!(
            Entity::from_json(json!({"name": "  "}), Category::Themes, "themes").is_err()
        );
        assert!(Entity::from_json(json!({"name": null}), Category::Lexicon, "lexicon").is_err());
    }

    #[test]
    fn test_timeline_accepts_nameless_event() {
        let entity =
            Entity::from_json(json!({"chapter": 4}), Category::Timeline, "timeline").unwrap();
        assert!(entity.name.is_empty());
        assert_eq!(entity.fields["chapter"], json!(4));
    }

    #[test]
    fn test_entity_coerces_connections() {
        let entity = Entity::from_json(
            json!({"name": "Jane", "connections": "Elizabeth (sister)"}),
            Category::Figures,
            "characters",
        )
        .unwrap();
        assert_eq!(entity.connections(), vec!["Elizabeth (sister)"]);
        assert_eq!(entity.fields["connections"], json!(["Elizabeth (sister)"]));
    }

    #[test]
    fn test_entity_to_json_restores_name_field() {
        let entity = Entity::new("Chapter 3: the ball").with_field("chapter", "3");
        let value = entity.to_json(Category::Timeline);
        assert_eq!(value["event"], json!("Chapter 3: the ball"));
        assert!(value.get("aliases").is_none());
    }

    #[test]
    fn test_singleton_coercions() {
        let from_string = Singleton::from_json(json!("Tense"), "current_state").unwrap();
        assert_eq!(from_string.text("summary"), Some("Tense"));

        let from_array =
            Singleton::from_json(json!([{"summary": "Calm"}]), "current_state").unwrap();
        assert_eq!(from_array.text("summary"), Some("Calm"));

        assert!(Singleton::from_json(json!(42), "conclusion").is_err());
    }

    #[test]
    fn test_has_alias_ignores_case() {
        let entity = Entity::new("Elizabeth Bennet").with_alias("Lizzy");
        assert!(entity.has_alias("LIZZY"));
        assert!(!entity.has_alias("Eliza"));
    }
}

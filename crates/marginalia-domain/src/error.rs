//! Error types for the knowledge model

use thiserror::Error;

/// Errors raised when a JSON value does not have the shape of a record
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// The top-level value is not a JSON object
    #[error("Knowledge record must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    /// A slot holds a value of the wrong type
    #[error("Field '{key}' has the wrong type: expected {expected}")]
    TypeMismatch {
        /// Source key (or `category.field` path) of the offending slot
        key: String,
        /// What the slot should have held
        expected: &'static str,
    },
}

/// Short name of a JSON value's type, for error messages
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

use serde_json::Value;
use thiserror::Error;

/// Main error type for jsonapi-normalizer
///
/// No documented document shape produces an error; every variant marks input
/// outside the shapes the normalizer accepts, such as a resource with no
/// usable identity.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    /// A resource or resource-identifier position held a non-object value
    #[error("expected a resource object, found {found}")]
    NotAnObject { found: &'static str },

    /// Resource has no `type` field
    #[error("resource is missing its `type` field")]
    MissingType,

    /// Resource `type` is present but not a string
    #[error("resource `type` must be a string, found {found}")]
    InvalidType { found: &'static str },

    /// Resource or resource identifier has no `id` field
    #[error("resource is missing its `id` field")]
    MissingId,

    /// Resource `id` is neither a string nor a number
    #[error("resource `id` must be a string or a number, found {found}")]
    InvalidId { found: &'static str },
}

/// Convenient Result type using NormalizeError
pub type Result<T> = std::result::Result<T, NormalizeError>;

/// JSON type name used in error messages
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

use thiserror::Error;

/// Errors raised while loading records or collecting columns
#[derive(Debug, Error)]
pub enum FlattenError {
    #[error("expected a JSON array at the top level, found {found}")]
    NotAnArray { found: &'static str },

    #[error("element {index} of the input array is {found}, expected an object")]
    NotAnObject { index: usize, found: &'static str },

    #[error("input nests arrays or objects deeper than {limit} levels")]
    TooDeep { limit: usize },

    #[error("name {name:?} contains the separator {separator:?}")]
    SeparatorCollision { name: String, separator: char },
}

/// Human readable JSON type name used in error messages
pub(crate) fn kind_of(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;

    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

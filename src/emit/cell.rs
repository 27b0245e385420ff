use crate::schema::ColumnName;
use crate::types::{FlattenConfig, Record, MISSING_MARKER};
use serde_json::Value;

/// Find the value a column refers to inside a record
///
/// Returns `None` when the field is absent, when a composite column's parent
/// is not an object or lacks the nested key, and when the value is a
/// non-empty object that flattening has already spread over deeper composite
/// columns. An empty object has no composite columns and is written as `{}`.
pub fn lookup<'r>(record: &'r Record, column: &str, config: &FlattenConfig) -> Option<&'r Value> {
    let name = ColumnName::parse(column, config);
    let value = match &name {
        ColumnName::Simple(field) => record.get(*field)?,
        ColumnName::Composite { field, path } => {
            let mut current = record.get(*field)?;
            for key in path {
                current = current.as_object()?.get(*key)?;
            }
            current
        }
    };

    let flattened = value.as_object().is_some_and(|nested| !nested.is_empty());
    if flattened && name.depth() < config.max_depth {
        return None;
    }
    Some(value)
}

/// Text of a value before escaping
///
/// Strings are written raw, everything else as compact JSON.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Apply the fixed quoting rules to a cell
///
/// A value containing a comma that does not already start with a quote is
/// wrapped in quotes, with inner quotes escaped as `\"`. Newlines always
/// become spaces.
pub fn escape_cell(text: String) -> String {
    let text = if !text.starts_with('"') && text.contains(',') {
        format!("\"{}\"", text.replace('"', "\\\""))
    } else {
        text
    };

    if text.contains('\n') {
        text.replace('\n', " ")
    } else {
        text
    }
}

/// Final cell text for a column of a record
pub fn resolve_cell(record: &Record, column: &str, config: &FlattenConfig) -> String {
    match lookup(record, column, config) {
        Some(value) => escape_cell(format_value(value)),
        None => MISSING_MARKER.to_string(),
    }
}

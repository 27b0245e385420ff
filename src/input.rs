//! Loading the input document into an in-memory list of records
//!
//! The whole document is read at once. SIMD parsing is tried first; when it
//! rejects the input, the text is parsed again with serde_json so the error
//! carries a line and column. Nesting is bounded before either parser runs.

use crate::error::{kind_of, FlattenError};
use crate::types::Record;
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Deepest array/object nesting accepted, matching serde_json's recursion limit
pub const MAX_NESTING: usize = 128;

/// Read and parse a JSON array of objects from a file
pub fn read_records<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let content = std::fs::read(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;
    let content = String::from_utf8(content)
        .with_context(|| format!("Input file is not valid UTF-8: {}", path.display()))?;

    parse_records(&content)
        .with_context(|| format!("Failed to parse JSON from {}", path.display()))
}

/// Parse a JSON array of objects from text
pub fn parse_records(text: &str) -> Result<Vec<Record>> {
    let value = parse_document(text)?;
    let records = into_records(value)?;
    debug!(records = records.len(), "parsed input records");
    Ok(records)
}

fn parse_document(text: &str) -> Result<Value> {
    check_nesting(text)?;

    let mut scratch = text.as_bytes().to_vec();
    match simd_json::serde::from_slice::<Value>(&mut scratch) {
        Ok(value) => Ok(value),
        Err(simd_err) => {
            debug!(error = %simd_err, "SIMD parse failed, retrying with serde_json");
            let value = serde_json::from_str(text).context("Failed to parse JSON")?;
            Ok(value)
        }
    }
}

/// Reject documents nested deeper than [`MAX_NESTING`]
///
/// Brackets inside string literals are not counted.
pub fn check_nesting(text: &str) -> Result<(), FlattenError> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for byte in text.bytes() {
        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'[' | b'{' => {
                depth += 1;
                if depth > MAX_NESTING {
                    return Err(FlattenError::TooDeep { limit: MAX_NESTING });
                }
            }
            b']' | b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    Ok(())
}

/// Check the document shape: an array whose every element is an object
pub fn into_records(value: Value) -> Result<Vec<Record>, FlattenError> {
    let elements = match value {
        Value::Array(elements) => elements,
        other => {
            return Err(FlattenError::NotAnArray {
                found: kind_of(&other),
            })
        }
    };

    elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| match element {
            Value::Object(record) => Ok(record),
            other => Err(FlattenError::NotAnObject {
                index,
                found: kind_of(&other),
            }),
        })
        .collect()
}

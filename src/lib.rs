//! # json2csv - JSON array to CSV converter
//!
//! Converts a JSON array of objects into a CSV table. Records may have
//! different fields; the header is the union of all of them, and nested
//! objects are flattened one level into composite columns named
//! `field¤key`.
//!
//! ## Modules
//!
//! - **input**: Load the JSON array into memory as a list of records
//! - **schema**: Discover the ordered set of output columns
//! - **emit**: Resolve, escape and write one CSV line per record
//!
//! ## Quick Start
//!
//! ```rust
//! use json2csv::{convert, FlattenConfig};
//!
//! # fn main() -> anyhow::Result<()> {
//! let records = json2csv::input::parse_records(
//!     r#"[{"a": 1, "b": {"x": 10, "y": 20}}, {"a": 2, "c": "hi,there"}]"#,
//! )?;
//!
//! let mut out = Vec::new();
//! convert(&records, &FlattenConfig::default(), &mut out)?;
//!
//! assert_eq!(
//!     String::from_utf8(out)?,
//!     "a,b¤x,b¤y,b,c\n1,10,20,NA,NA\n2,NA,NA,NA,\"hi,there\"\n"
//! );
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

pub mod emit;
pub mod error;
pub mod input;
pub mod schema;
pub mod types;

pub use emit::CsvRowWriter;
pub use error::FlattenError;
pub use schema::{collect_columns, ColumnName, ColumnSet};
pub use types::{ConvertSummary, FlattenConfig, Record, DEFAULT_SEPARATOR, MISSING_MARKER};

/// Write the header and all rows for records whose columns are already known
pub fn write_csv<W: Write>(
    records: &[Record],
    columns: &ColumnSet,
    config: &FlattenConfig,
    writer: W,
) -> Result<ConvertSummary> {
    let mut writer = CsvRowWriter::new(writer);
    writer.write_header(columns)?;
    writer.write_records(records, columns, config)?;
    writer.flush()?;

    Ok(ConvertSummary {
        records: writer.rows_written(),
        columns: columns.len(),
    })
}

/// Convert in-memory records: collect the columns, then write every row
pub fn convert<W: Write>(
    records: &[Record],
    config: &FlattenConfig,
    writer: W,
) -> Result<ConvertSummary> {
    let columns = collect_columns(records, config)?;
    write_csv(records, &columns, config, writer)
}

/// Main entry point: convert a JSON array file into a CSV file
///
/// The output file is created (or truncated) only once the input has been
/// parsed and the columns collected, so a bad input leaves it untouched.
pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    config: &FlattenConfig,
) -> Result<ConvertSummary> {
    let (input, output) = (input.as_ref(), output.as_ref());

    debug!(input = %input.display(), "reading records");
    let records = crate::input::read_records(input)?;

    let columns = collect_columns(&records, config)
        .with_context(|| format!("Failed to collect columns from {}", input.display()))?;

    let file = File::create(output)
        .with_context(|| format!("Failed to create output file: {}", output.display()))?;
    let summary = write_csv(&records, &columns, config, BufWriter::new(file))
        .with_context(|| format!("Failed to write CSV to {}", output.display()))?;

    info!(
        records = summary.records,
        columns = summary.columns,
        output = %output.display(),
        "wrote CSV"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn convert_str(json: &str, config: &FlattenConfig) -> String {
        let records = input::parse_records(json).unwrap();
        let mut out = Vec::new();
        convert(&records, config, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_mixed_records() {
        let output = convert_str(
            r#"[{"a":1,"b":{"x":10,"y":20}},{"a":2,"c":"hi,there"}]"#,
            &FlattenConfig::default(),
        );

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines, ["a,b¤x,b¤y,b,c", "1,10,20,NA,NA", "2,NA,NA,NA,\"hi,there\""]);
    }

    #[test]
    fn test_empty_array_writes_empty_header_only() {
        let output = convert_str("[]", &FlattenConfig::default());
        assert_eq!(output, "\n");
    }

    #[test]
    fn test_custom_separator() {
        let config = FlattenConfig::default().with_separator('.');
        let output = convert_str(r#"[{"user":{"id":7,"name":"Ann"}}]"#, &config);

        assert_eq!(output, "user.id,user.name,user\n7,Ann,NA\n");
    }

    #[test]
    fn test_newlines_in_values_become_spaces() {
        let output = convert_str(
            r#"[{"note":"first\nsecond"},{"note":"a,\nb"}]"#,
            &FlattenConfig::default(),
        );

        assert_eq!(output, "note\nfirst second\n\"a, b\"\n");
    }

    #[test]
    fn test_strict_separator_aborts_conversion() {
        let records = input::parse_records(r#"[{"a¤b":1}]"#).unwrap();
        let config = FlattenConfig::default().strict(true);

        let err = convert(&records, &config, Vec::new()).unwrap_err();
        assert!(err.downcast_ref::<FlattenError>().is_some());
    }

    #[test]
    fn test_convert_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.json");
        let output = dir.path().join("out.csv");
        fs::write(&input, r#"[{"id":1,"tags":["x","y"]},{"id":2,"flag":false}]"#).unwrap();

        let summary = convert_file(&input, &output, &FlattenConfig::default()).unwrap();

        assert_eq!(summary, ConvertSummary { records: 2, columns: 3 });
        let csv = fs::read_to_string(&output).unwrap();
        assert_eq!(csv, "id,tags,flag\n1,\"[\\\"x\\\",\\\"y\\\"]\",NA\n2,NA,false\n");
    }

    #[test]
    fn test_convert_file_truncates_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.json");
        let output = dir.path().join("out.csv");
        fs::write(&input, r#"[{"a":1}]"#).unwrap();
        fs::write(&output, "stale content\nmore stale content\n").unwrap();

        convert_file(&input, &output, &FlattenConfig::default()).unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap(), "a\n1\n");
    }

    #[test]
    fn test_parse_failure_leaves_output_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.json");
        let output = dir.path().join("out.csv");
        fs::write(&input, r#"[{"a":1}"#).unwrap();

        assert!(convert_file(&input, &output, &FlattenConfig::default()).is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_non_object_element_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.json");
        let output = dir.path().join("out.csv");
        fs::write(&input, r#"[{"a":1}, "loose"]"#).unwrap();

        let err = convert_file(&input, &output, &FlattenConfig::default()).unwrap_err();

        let root = err.root_cause().to_string();
        assert!(root.contains("element 1"), "unexpected error: {}", root);
        assert!(!output.exists());
    }

    #[test]
    fn test_missing_input_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.csv");

        let result = convert_file(dir.path().join("nope.json"), &output, &FlattenConfig::default());

        assert!(result.is_err());
        assert!(!output.exists());
    }
}

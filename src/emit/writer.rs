use crate::emit::cell::resolve_cell;
use crate::schema::ColumnSet;
use crate::types::{FlattenConfig, Record};
use anyhow::{Context, Result};
use std::io::Write;

/// Writes a header line and one CSV line per record
pub struct CsvRowWriter<W: Write> {
    writer: W,
    rows: usize,
}

impl<W: Write> CsvRowWriter<W> {
    pub fn new(writer: W) -> Self {
        CsvRowWriter { writer, rows: 0 }
    }

    /// Write the column names joined with commas
    pub fn write_header(&mut self, columns: &ColumnSet) -> Result<()> {
        writeln!(self.writer, "{}", columns.header()).context("Failed to write header")
    }

    /// Write one record, one cell per column in column order
    pub fn write_record(
        &mut self,
        record: &Record,
        columns: &ColumnSet,
        config: &FlattenConfig,
    ) -> Result<()> {
        let line = columns
            .iter()
            .map(|column| resolve_cell(record, column, config))
            .collect::<Vec<_>>()
            .join(",");

        writeln!(self.writer, "{}", line)
            .with_context(|| format!("Failed to write row {}", self.rows + 1))?;
        self.rows += 1;
        Ok(())
    }

    pub fn write_records(
        &mut self,
        records: &[Record],
        columns: &ColumnSet,
        config: &FlattenConfig,
    ) -> Result<()> {
        for record in records {
            self.write_record(record, columns, config)?;
        }
        Ok(())
    }

    /// Number of data rows written so far
    pub fn rows_written(&self) -> usize {
        self.rows
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().context("Failed to flush writer")
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

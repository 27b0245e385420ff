//! Row emission: cell resolution, escaping and CSV line output

pub mod cell;
pub mod writer;

pub use cell::{escape_cell, format_value, lookup, resolve_cell};
pub use writer::CsvRowWriter;

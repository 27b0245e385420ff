//! Column schema discovery
//!
//! Scans every record once and produces the ordered, duplicate-free list of
//! output columns, flattening nested objects into composite names.

pub mod column_set;
pub mod collector;

pub use column_set::{ColumnName, ColumnSet};
pub use collector::collect_columns;

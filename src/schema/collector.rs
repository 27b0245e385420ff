use crate::error::FlattenError;
use crate::schema::column_set::ColumnSet;
use crate::types::{FlattenConfig, Record};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Collect the output columns of every record, in first-seen order
///
/// For each field of each record: an object value contributes one composite
/// column per nested key (`field` + separator + `key`), any other value
/// contributes the field name. Afterwards every top-level field name of the
/// record is added as well, so an object-valued field also gets a bare
/// column, placed after its composite columns the first time it is seen.
pub fn collect_columns(
    records: &[Record],
    config: &FlattenConfig,
) -> Result<ColumnSet, FlattenError> {
    let mut collector = Collector::new(config);
    for record in records {
        collector.add_record(record)?;
    }
    collector.finish()
}

struct Collector<'c> {
    config: &'c FlattenConfig,
    columns: ColumnSet,
    collisions: usize,
}

impl<'c> Collector<'c> {
    fn new(config: &'c FlattenConfig) -> Self {
        Collector {
            config,
            columns: ColumnSet::new(),
            collisions: 0,
        }
    }

    fn add_record(&mut self, record: &Record) -> Result<(), FlattenError> {
        for (field, value) in record.iter() {
            self.check_name(field)?;
            match value {
                Value::Object(nested) if self.config.flattens() => {
                    self.add_nested(field, nested, 1)?;
                }
                _ => {
                    self.columns.insert(field.as_str());
                }
            }
        }

        for field in record.keys() {
            self.columns.insert(field.as_str());
        }

        Ok(())
    }

    fn add_nested(
        &mut self,
        prefix: &str,
        nested: &Map<String, Value>,
        depth: usize,
    ) -> Result<(), FlattenError> {
        for (key, value) in nested.iter() {
            self.check_name(key)?;
            let name = format!("{}{}{}", prefix, self.config.separator, key);
            match value {
                Value::Object(inner) if depth < self.config.max_depth => {
                    self.add_nested(&name, inner, depth + 1)?;
                }
                _ => {
                    self.columns.insert(name);
                }
            }
        }
        Ok(())
    }

    fn check_name(&mut self, name: &str) -> Result<(), FlattenError> {
        if !name.contains(self.config.separator) {
            return Ok(());
        }
        if self.config.strict_separator {
            return Err(FlattenError::SeparatorCollision {
                name: name.to_string(),
                separator: self.config.separator,
            });
        }
        self.collisions += 1;
        Ok(())
    }

    fn finish(self) -> Result<ColumnSet, FlattenError> {
        if self.collisions > 0 {
            warn!(
                names = self.collisions,
                separator = %self.config.separator,
                "field names contain the separator, their composite columns may resolve to NA"
            );
        }
        debug!(columns = self.columns.len(), "collected columns");
        Ok(self.columns)
    }
}

use crate::types::FlattenConfig;
use std::collections::HashMap;

/// Insertion-ordered set of column names
///
/// Re-inserting a name already present is a no-op and keeps its original
/// position, so the header order is the first-seen order of the scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSet {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl ColumnSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a name, returning true if it was not present yet
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.index.contains_key(&name) {
            return false;
        }
        self.index.insert(name.clone(), self.names.len());
        self.names.push(name);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.names.iter()
    }

    /// Header line content: the column names joined with commas
    pub fn header(&self) -> String {
        self.names.join(",")
    }
}

impl<S: Into<String>> FromIterator<S> for ColumnSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = ColumnSet::new();
        for name in iter {
            set.insert(name);
        }
        set
    }
}

/// A column name split into the field it reads from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnName<'a> {
    /// A top-level field, read as-is
    Simple(&'a str),
    /// A flattened nested field: top-level field plus the keys below it
    Composite { field: &'a str, path: Vec<&'a str> },
}

impl<'a> ColumnName<'a> {
    /// Split a column name at its separators
    ///
    /// At most `max_depth` splits are made, so with the default depth of one
    /// the name is cut at the first separator only. A name containing no
    /// separator, or any name when flattening is disabled, is simple.
    pub fn parse(name: &'a str, config: &FlattenConfig) -> Self {
        if !config.flattens() || !name.contains(config.separator) {
            return ColumnName::Simple(name);
        }

        let mut parts = name.splitn(config.max_depth.saturating_add(1), config.separator);
        // splitn always yields at least one part
        let field = parts.next().unwrap_or(name);
        ColumnName::Composite {
            field,
            path: parts.collect(),
        }
    }

    /// Nesting level the column addresses (0 for simple columns)
    pub fn depth(&self) -> usize {
        match self {
            ColumnName::Simple(_) => 0,
            ColumnName::Composite { path, .. } => path.len(),
        }
    }
}

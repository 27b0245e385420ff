use serde_json::{Map, Value};

/// One input record: an object whose keys keep their document order
pub type Record = Map<String, Value>;

/// Separator used to build composite column names
pub const DEFAULT_SEPARATOR: char = '¤';

/// Cell text written when a record has no value for a column
pub const MISSING_MARKER: &str = "NA";

/// Configuration shared by schema collection and row emission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenConfig {
    /// Joins a field name and a nested key into a composite column name
    pub separator: char,

    /// How many levels of nested objects are flattened (0 = none)
    pub max_depth: usize,

    /// Reject field or nested key names that contain the separator
    pub strict_separator: bool,
}

impl FlattenConfig {
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn strict(mut self, strict_separator: bool) -> Self {
        self.strict_separator = strict_separator;
        self
    }

    /// Whether object values are split into composite columns at all
    pub fn flattens(&self) -> bool {
        self.max_depth > 0
    }
}

impl Default for FlattenConfig {
    fn default() -> Self {
        FlattenConfig {
            separator: DEFAULT_SEPARATOR,
            max_depth: 1,
            strict_separator: false,
        }
    }
}

/// Counts reported after a conversion run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertSummary {
    pub records: usize,
    pub columns: usize,
}

use std::collections::HashMap;

use crate::errors::RollupError;

/// Columns every input table must carry besides the metric keys.
pub const KEY_COLUMNS: [&str; 4] = ["date", "geo", "channel", "os"];

/// One data row of the input table, zipped against the header.
#[derive(Debug, Clone, Default)]
pub struct InputRecord {
    /// 1-based line of the source file where the row starts.
    pub line: u64,
    fields: HashMap<String, String>,
}

impl InputRecord {
    /// Zip a header with row values. Extra values are dropped and missing
    /// ones simply stay absent.
    pub fn from_row<'a, H, V>(line: u64, headers: H, values: V) -> Self
    where
        H: IntoIterator<Item = &'a str>,
        V: IntoIterator<Item = &'a str>,
    {
        let fields = headers
            .into_iter()
            .zip(values)
            .map(|(h, v)| (h.to_string(), v.to_string()))
            .collect();
        Self { line, fields }
    }

    pub fn get(&self, field: &str) -> Result<&str, RollupError> {
        self.fields.get(field).map(String::as_str).ok_or_else(|| {
            RollupError::MissingColumn(format!("line {}: no value for '{}'", self.line, field))
        })
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

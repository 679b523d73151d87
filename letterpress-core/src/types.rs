//! Domain types for the letterpress pipeline.
//!
//! A [`Record`] is one row of the tabular data source: an ordered mapping
//! from column name to field value. Column order follows the header row so
//! listings and JSON output stay aligned with the source file.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

/// Column holding a record's display name. Rows with an empty or missing
/// value in this column are treated as blank and filtered before processing.
pub const NAME_FIELD: &str = "Name";

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// One row of the data source, keyed by column name, order preserved.
///
/// Serializes as a flat JSON object (`{"Name": "Alice", "City": "NYC"}`),
/// which is also the shape the template engine consumes as context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, String>,
}

impl Record {
    /// An empty record with no columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field value. A repeated column name overwrites the earlier
    /// value but keeps its original position.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(column.into(), value.into());
    }

    /// Field value for `column`, if present.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// The record's display name — the [`NAME_FIELD`] value, or `""` when
    /// the column is absent.
    pub fn name(&self) -> &str {
        self.get(NAME_FIELD).unwrap_or("")
    }

    /// Whether this record is a blank row (empty or missing name).
    pub fn is_blank(&self) -> bool {
        self.name().is_empty()
    }

    /// Column names in header order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// `(column, value)` pairs in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// `true` when the record has no columns at all.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, String)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Record {
            fields: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for Record {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect()
    }
}

impl fmt::Display for Record {
    /// Compact `column=value` listing, used in log lines.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (column, value) in self.iter() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{column}={value}")?;
            first = false;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

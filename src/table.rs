//! Table builder
//!
//! Rows keep their own key sets. The table's column list is the union of all
//! row keys in first-seen order, so rows are never padded in memory; missing
//! cells are resolved at export time.

use rustc_hash::FxHashSet;
use serde_json::Value;

use crate::row::Row;

/// All report rows plus their column union.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunTable {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl RunTable {
    /// Build a table from rows, in the given order.
    #[must_use]
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let columns = {
            let mut seen = FxHashSet::default();
            let mut columns = Vec::new();
            for key in rows.iter().flat_map(Row::keys) {
                if seen.insert(key.as_str()) {
                    columns.push(key.clone());
                }
            }
            columns
        };
        Self { columns, rows }
    }

    /// Column names, first-seen order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows, in insertion order.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at `row` / `column`. `None` if the row lacks that column or is out
    /// of range.
    #[must_use]
    pub fn cell(&self, row: usize, column: &str) -> Option<&Value> {
        self.rows.get(row)?.get(column)
    }

    /// Index of the first row whose `key` cell equals the string `value`.
    #[must_use]
    pub fn find_row(&self, key: &str, value: &str) -> Option<usize> {
        self.rows
            .iter()
            .position(|row| row.get(key).and_then(Value::as_str) == Some(value))
    }

    /// All cells of one column, `None` where a row lacks it.
    pub fn column<'a>(&'a self, name: &'a str) -> impl Iterator<Item = Option<&'a Value>> + 'a {
        self.rows.iter().map(move |row| row.get(name))
    }
}

impl FromIterator<Row> for RunTable {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        Self::from_rows(iter.into_iter().collect())
    }
}

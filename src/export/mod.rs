//! Table exporters
//!
//! Every exporter writes the same shape: one header row with the table's
//! columns, one row per run, no index column. Cells are rendered through
//! [`Cell`] so all formats agree on what a JSON value looks like.

mod csv;
mod parquet;
mod xlsx;

pub use self::csv::CsvExporter;
pub use self::parquet::{table_to_record_batch, ParquetExporter};
pub use self::xlsx::XlsxExporter;

use std::borrow::Cow;
use std::path::Path;

use serde_json::Value;
use tracing::info;

use crate::config::{OutputFormat, ReportConfig};
use crate::table::RunTable;
use crate::Result;

/// Writes a [`RunTable`] to a file.
pub trait Exporter {
    /// Write `table` to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be encoded or the file cannot be
    /// written.
    fn export(&self, table: &RunTable, path: &Path) -> Result<()>;
}

/// A single rendered cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell<'a> {
    /// Absent key or JSON null
    Blank,
    /// JSON number
    Number(f64),
    /// JSON boolean
    Bool(bool),
    /// JSON string, or compact JSON text for arrays and objects
    Text(Cow<'a, str>),
}

impl<'a> Cell<'a> {
    /// Render an optional JSON value.
    #[must_use]
    pub fn from_value(value: Option<&'a Value>) -> Self {
        match value {
            None | Some(Value::Null) => Self::Blank,
            Some(Value::Bool(b)) => Self::Bool(*b),
            Some(Value::Number(n)) => n.as_f64().map_or_else(
                || Self::Text(Cow::Owned(n.to_string())),
                Self::Number,
            ),
            Some(Value::String(s)) => Self::Text(Cow::Borrowed(s.as_str())),
            Some(nested @ (Value::Array(_) | Value::Object(_))) => {
                Self::Text(Cow::Owned(nested.to_string()))
            }
        }
    }
}

/// Exporter for `format`.
#[must_use]
pub fn exporter_for(format: OutputFormat, sheet_name: &str) -> Box<dyn Exporter> {
    match format {
        OutputFormat::Xlsx => Box::new(XlsxExporter::new(sheet_name)),
        OutputFormat::Csv => Box::new(CsvExporter),
        OutputFormat::Parquet => Box::new(ParquetExporter),
    }
}

/// Write `table` to the configured output.
///
/// # Errors
///
/// Propagates exporter errors.
pub fn export_table(table: &RunTable, config: &ReportConfig) -> Result<()> {
    let format = config.format();
    exporter_for(format, config.sheet_name()).export(table, config.output())?;
    info!(
        path = %config.output().display(),
        format = format.name(),
        rows = table.len(),
        columns = table.columns().len(),
        "report written"
    );
    Ok(())
}

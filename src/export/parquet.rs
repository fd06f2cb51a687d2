//! Parquet exporter (Arrow columnar)
//!
//! Column types are inferred from the cells that are present:
//! all numbers -> `Float64`, all booleans -> `Boolean`, anything else (or an
//! all-blank column) -> `Utf8` holding the rendered text. Every column is
//! nullable since rows may lack any key.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanArray, Float64Array, RecordBatch, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatchOptions;
use ::parquet::arrow::ArrowWriter;
use serde_json::Value;

use super::{Cell, Exporter};
use crate::table::RunTable;
use crate::{Error, Result};

/// Writes the table as a single-batch Parquet file.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParquetExporter;

fn infer_type(table: &RunTable, column: &str) -> DataType {
    let mut present = table.column(column).flatten().filter(|v| !v.is_null()).peekable();
    if present.peek().is_none() {
        return DataType::Utf8;
    }

    let mut numbers = true;
    let mut bools = true;
    for value in present {
        numbers &= value.as_f64().is_some();
        bools &= value.is_boolean();
    }
    if numbers {
        DataType::Float64
    } else if bools {
        DataType::Boolean
    } else {
        DataType::Utf8
    }
}

fn build_column(table: &RunTable, column: &str, data_type: &DataType) -> ArrayRef {
    let cells = table.column(column);
    match data_type {
        DataType::Float64 => Arc::new(
            cells
                .map(|v| v.and_then(Value::as_f64))
                .collect::<Float64Array>(),
        ),
        DataType::Boolean => Arc::new(
            cells
                .map(|v| v.and_then(Value::as_bool))
                .collect::<BooleanArray>(),
        ),
        _ => Arc::new(
            cells
                .map(|v| match Cell::from_value(v) {
                    Cell::Blank => None,
                    Cell::Number(n) => Some(n.to_string()),
                    Cell::Bool(b) => Some(b.to_string()),
                    Cell::Text(text) => Some(text.into_owned()),
                })
                .collect::<StringArray>(),
        ),
    }
}

/// Convert the table into one Arrow record batch.
///
/// # Errors
///
/// Returns an error if Arrow rejects the batch.
pub fn table_to_record_batch(table: &RunTable) -> Result<RecordBatch> {
    let mut fields = Vec::with_capacity(table.columns().len());
    let mut arrays = Vec::with_capacity(table.columns().len());

    for name in table.columns() {
        let data_type = infer_type(table, name);
        arrays.push(build_column(table, name, &data_type));
        fields.push(Field::new(name, data_type, true));
    }

    let options = RecordBatchOptions::new().with_row_count(Some(table.len()));
    let batch = RecordBatch::try_new_with_options(Arc::new(Schema::new(fields)), arrays, &options)?;
    Ok(batch)
}

impl Exporter for ParquetExporter {
    fn export(&self, table: &RunTable, path: &Path) -> Result<()> {
        if table.columns().is_empty() {
            return Err(Error::Other(
                "cannot write a Parquet file without columns (no runs found)".to_string(),
            ));
        }

        let batch = table_to_record_batch(table)?;
        let file = File::create(path)?;
        let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
        writer.write(&batch)?;
        writer.close()?;
        Ok(())
    }
}

//! Excel workbook exporter (single sheet, bold header, no index column)

use std::path::Path;

use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook};

use super::{Cell, Exporter};
use crate::table::RunTable;
use crate::{Error, Result};

/// Worksheet row limit, header included.
pub const MAX_ROWS: usize = 1_048_576;

/// Worksheet column limit.
pub const MAX_COLUMNS: usize = 16_384;

/// Writes the table to an `.xlsx` workbook with one named sheet.
#[derive(Debug, Clone)]
pub struct XlsxExporter {
    sheet_name: String,
}

impl XlsxExporter {
    /// Create an exporter writing to sheet `sheet_name`.
    #[must_use]
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
        }
    }

    /// Build the workbook in memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the sheet name is invalid, the table exceeds the
    /// worksheet limits, or a cell cannot be written.
    #[allow(clippy::cast_possible_truncation)]
    pub fn build_workbook(&self, table: &RunTable) -> Result<Workbook> {
        if table.len() + 1 > MAX_ROWS {
            return Err(Error::TableTooLarge {
                format: "xlsx",
                message: format!("{} rows (max {})", table.len(), MAX_ROWS - 1),
            });
        }
        if table.columns().len() > MAX_COLUMNS {
            return Err(Error::TableTooLarge {
                format: "xlsx",
                message: format!("{} columns (max {MAX_COLUMNS})", table.columns().len()),
            });
        }

        let mut workbook = Workbook::new();
        let header = Format::new().set_bold();
        let sheet = workbook.add_worksheet();
        sheet.set_name(&self.sheet_name)?;

        for (col, name) in table.columns().iter().enumerate() {
            sheet.write_string_with_format(0, col as ColNum, name, &header)?;
        }

        for (idx, row) in table.rows().iter().enumerate() {
            let row_num = (idx + 1) as RowNum;
            for (col, name) in table.columns().iter().enumerate() {
                let col = col as ColNum;
                match Cell::from_value(row.get(name)) {
                    Cell::Blank => {}
                    Cell::Number(n) => {
                        sheet.write_number(row_num, col, n)?;
                    }
                    Cell::Bool(b) => {
                        sheet.write_boolean(row_num, col, b)?;
                    }
                    Cell::Text(text) => {
                        sheet.write_string(row_num, col, text.as_ref())?;
                    }
                }
            }
        }

        Ok(workbook)
    }
}

impl Exporter for XlsxExporter {
    fn export(&self, table: &RunTable, path: &Path) -> Result<()> {
        let mut workbook = self.build_workbook(table)?;
        workbook.save(path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table() -> RunTable {
        let row = json!({"folder": "00000-run", "fid_values": [1.0], "min_fid": null});
        let serde_json::Value::Object(row) = row else {
            unreachable!()
        };
        RunTable::from_rows(vec![row])
    }

    #[test]
    fn test_workbook_builds() {
        let mut workbook = XlsxExporter::new("fid_metrics").build_workbook(&table()).unwrap();
        let bytes = workbook.save_to_buffer().unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_invalid_sheet_name() {
        let err = XlsxExporter::new("bad/name").build_workbook(&table()).err().expect("expected an error");
        assert!(matches!(err, Error::Xlsx(_)));
    }
}

//! CSV exporter

use std::path::Path;

use super::{Cell, Exporter};
use crate::table::RunTable;
use crate::Result;

/// Writes the table as CSV with a header row. Blank cells are empty fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvExporter;

impl CsvExporter {
    /// Encode the table into any writer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_to<W: std::io::Write>(&self, table: &RunTable, out: W) -> Result<()> {
        let mut writer = csv::WriterBuilder::new().from_writer(out);

        if !table.columns().is_empty() {
            writer.write_record(table.columns())?;
        }
        for row in table.rows() {
            let record = table
                .columns()
                .iter()
                .map(|name| match Cell::from_value(row.get(name)) {
                    Cell::Blank => String::new(),
                    Cell::Number(n) => n.to_string(),
                    Cell::Bool(b) => b.to_string(),
                    Cell::Text(text) => text.into_owned(),
                });
            writer.write_record(record)?;
        }

        writer.flush()?;
        Ok(())
    }
}

impl Exporter for CsvExporter {
    fn export(&self, table: &RunTable, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)?;
        self.write_to(table, std::io::BufWriter::new(file))
    }
}

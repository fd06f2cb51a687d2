//! Row assembler
//!
//! Flattens a loaded run into one ordered `column -> value` map. Insert order:
//! summary columns, every training option, then the prefixed entries of
//! `training_set_kwargs` and `data_loader_kwargs`. A later insert with an
//! existing name replaces the value but keeps the original column position.

use serde_json::{Map, Value};

use crate::config::RunLayout;
use crate::run::LoadedRun;
use crate::{Error, Result};

/// One report row.
pub type Row = Map<String, Value>;

/// Build the row for one run.
///
/// # Errors
///
/// Returns an error if the summary cannot be converted to JSON.
pub fn assemble_row(run: &LoadedRun, layout: &RunLayout) -> Result<Row> {
    let summary = serde_json::to_value(&run.summary)
        .map_err(|e| Error::Other(format!("run summary for {}: {e}", run.summary.run_id())))?;
    let Value::Object(mut row) = summary else {
        return Err(Error::Other("run summary is not a JSON object".to_string()));
    };

    for (key, value) in run.options.entries() {
        row.insert(key.clone(), value.clone());
    }
    if let Some(section) = run.options.training_set_kwargs() {
        overlay_prefixed(&mut row, &layout.training_set_prefix, section);
    }
    if let Some(section) = run.options.data_loader_kwargs() {
        overlay_prefixed(&mut row, &layout.data_loader_prefix, section);
    }

    Ok(row)
}

fn overlay_prefixed(row: &mut Row, prefix: &str, section: &Map<String, Value>) {
    for (key, value) in section {
        row.insert(format!("{prefix}{key}"), value.clone());
    }
}

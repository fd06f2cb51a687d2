//! Report driver: scan -> load -> assemble -> table
//!
//! The whole pass is sequential. The first fatal error aborts the report;
//! nothing is written until every run has loaded.

use tracing::info;

use crate::config::ReportConfig;
use crate::export::export_table;
use crate::row::assemble_row;
use crate::run::load_run;
use crate::scan::scan_runs;
use crate::table::RunTable;
use crate::Result;

/// Collect every qualifying run under the configured root into a table.
///
/// # Errors
///
/// Returns the first fatal error: unreadable root, or a run whose training
/// options or metric log cannot be read or parsed.
pub fn build_report(config: &ReportConfig) -> Result<RunTable> {
    let layout = config.layout();
    let mut runs = scan_runs(config.root(), layout)?;
    if config.sort_runs() {
        runs.sort_by(|a, b| a.name().cmp(b.name()));
    }

    let rows = runs
        .iter()
        .map(|dir| {
            let run = load_run(dir, config)?;
            assemble_row(&run, layout)
        })
        .collect::<Result<Vec<_>>>()?;

    let table = RunTable::from_rows(rows);
    info!(
        root = %config.root().display(),
        runs = table.len(),
        columns = table.columns().len(),
        "collected runs"
    );
    Ok(table)
}

/// Build the report and write it to the configured output.
///
/// # Errors
///
/// See [`build_report`] and [`export_table`].
pub fn run_report(config: &ReportConfig) -> Result<RunTable> {
    let table = build_report(config)?;
    export_table(&table, config)?;
    Ok(table)
}

//! Run loader
//!
//! Reads the artifacts of one run directory and derives its summary.
//!
//! ```text
//! RunDir ──> TrainingOptions   (training_options.json, fatal on error)
//!        ──> fid values        (metric-fid50k_full.jsonl, fatal on error)
//!        ──> TimingSummary     (stats.jsonl, best effort)
//!                 │
//!                 └──> RunSummary
//! ```

mod metric_log;
mod non_finite;
mod stats_log;
mod training_options;

pub use metric_log::{parse_metric_log, read_metric_log};
pub use stats_log::{parse_stats, read_stats_log, StatsLine, TimingSummary};
pub use training_options::{TrainingOptions, DATA_LOADER_KWARGS, TRAINING_SET_KWARGS};

use serde::Serialize;
use tracing::debug;

use crate::config::ReportConfig;
use crate::scan::RunDir;
use crate::Result;

/// Derived summary of one run.
///
/// Serializes to the leading report columns, in this field order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    #[serde(rename = "folder")]
    run_id: String,
    fid_values: Vec<f64>,
    actual_kimg: i64,
    min_fid: Option<f64>,
    avg_sec_kimg: Option<f64>,
    run_duration: Option<f64>,
}

impl RunSummary {
    /// Derive a summary from the parsed artifacts.
    ///
    /// `actual_kimg` counts completed snapshot intervals, so a run with no
    /// metric values reports `-kimg_per_checkpoint`.
    #[must_use]
    pub fn new(
        run_id: impl Into<String>,
        fid_values: Vec<f64>,
        timing: TimingSummary,
        kimg_per_checkpoint: i64,
    ) -> Self {
        let snapshots = i64::try_from(fid_values.len()).unwrap_or(i64::MAX);
        let actual_kimg = kimg_per_checkpoint.saturating_mul(snapshots - 1);
        let min_fid = fid_values.iter().copied().reduce(f64::min);

        Self {
            run_id: run_id.into(),
            fid_values,
            actual_kimg,
            min_fid,
            avg_sec_kimg: timing.avg_sec_kimg,
            run_duration: timing.run_duration,
        }
    }

    /// Run identifier (directory name).
    #[must_use]
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Metric values in snapshot order.
    #[must_use]
    pub fn fid_values(&self) -> &[f64] {
        &self.fid_values
    }

    /// kimg actually trained, estimated from the snapshot count.
    #[must_use]
    pub const fn actual_kimg(&self) -> i64 {
        self.actual_kimg
    }

    /// Best (lowest) metric value.
    #[must_use]
    pub const fn min_fid(&self) -> Option<f64> {
        self.min_fid
    }

    /// Mean seconds per kimg.
    #[must_use]
    pub const fn avg_sec_kimg(&self) -> Option<f64> {
        self.avg_sec_kimg
    }

    /// Longest reported wall-clock duration, in hours.
    #[must_use]
    pub const fn run_duration(&self) -> Option<f64> {
        self.run_duration
    }
}

/// A run with its summary and raw configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedRun {
    /// Derived summary
    pub summary: RunSummary,
    /// Raw `training_options.json`
    pub options: TrainingOptions,
}

/// Load one qualifying run directory.
///
/// # Errors
///
/// Returns an error if the training options or the metric log cannot be read
/// or parsed. Statistics log problems are never errors.
pub fn load_run(dir: &RunDir, config: &ReportConfig) -> Result<LoadedRun> {
    let layout = config.layout();

    let options = TrainingOptions::load(dir.training_options())?;
    let fid_values = read_metric_log(dir.metric_log(), &layout.metric_key)?;
    let timing = read_stats_log(dir.stats_log());

    let summary = RunSummary::new(
        dir.name(),
        fid_values,
        timing,
        config.kimg_per_checkpoint(),
    );
    debug!(
        run = summary.run_id(),
        snapshots = summary.fid_values().len(),
        min_fid = ?summary.min_fid(),
        "loaded run"
    );

    Ok(LoadedRun { summary, options })
}

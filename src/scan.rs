//! Directory scanner
//!
//! Lists the immediate children of the runs root and keeps the ones that look
//! like finished-or-crashed training runs: a directory holding both the metric
//! log and `training_options.json`. Anything else is skipped without error.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::config::RunLayout;
use crate::{Error, Result};

/// One qualifying run directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunDir {
    name: String,
    path: PathBuf,
    metric_log: PathBuf,
    training_options: PathBuf,
    stats_log: PathBuf,
}

impl RunDir {
    /// Run identifier (the directory name).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full path of the run directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Metric log path. Always exists at scan time.
    #[must_use]
    pub fn metric_log(&self) -> &Path {
        &self.metric_log
    }

    /// Training options path. Always exists at scan time.
    #[must_use]
    pub fn training_options(&self) -> &Path {
        &self.training_options
    }

    /// Statistics log path. May not exist.
    #[must_use]
    pub fn stats_log(&self) -> &Path {
        &self.stats_log
    }
}

/// Qualify a single entry of the runs root.
///
/// Returns `None` unless `path` is a directory containing both required files.
#[must_use]
pub fn qualify(path: &Path, layout: &RunLayout) -> Option<RunDir> {
    let metric_log = path.join(&layout.metric_log);
    let training_options = path.join(&layout.training_options);
    let stats_log = path.join(&layout.stats_log);

    if !(path.is_dir() && metric_log.is_file() && training_options.is_file()) {
        return None;
    }

    let name = path.file_name()?.to_string_lossy().into_owned();
    Some(RunDir {
        name,
        path: path.to_path_buf(),
        metric_log,
        training_options,
        stats_log,
    })
}

/// List qualifying run directories under `root`, in listing order.
///
/// # Errors
///
/// Returns `Error::ScanFailed` if `root` (or one of its entries) cannot be read.
pub fn scan_runs(root: &Path, layout: &RunLayout) -> Result<Vec<RunDir>> {
    let scan_err = |source| Error::ScanFailed {
        path: root.to_path_buf(),
        source,
    };

    let mut runs = Vec::new();
    for entry in fs::read_dir(root).map_err(scan_err)? {
        let entry = entry.map_err(scan_err)?;
        let path = entry.path();
        match qualify(&path, layout) {
            Some(run) => runs.push(run),
            None => trace!(path = %path.display(), "skipping non-run entry"),
        }
    }
    Ok(runs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_qualify_requires_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let layout = RunLayout::default();
        let run = dir.path().join("00000-run");
        fs::create_dir(&run).unwrap();

        assert!(qualify(&run, &layout).is_none());

        touch(&run.join("metric-fid50k_full.jsonl"));
        assert!(qualify(&run, &layout).is_none());

        touch(&run.join("training_options.json"));
        let found = qualify(&run, &layout).unwrap();
        assert_eq!(found.name(), "00000-run");
        assert!(!found.stats_log().exists());
    }

    #[test]
    fn test_scan_skips_files_and_empty_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let layout = RunLayout::default();

        touch(&dir.path().join("notes.txt"));
        fs::create_dir(dir.path().join("empty")).unwrap();

        let run = dir.path().join("00001-run");
        fs::create_dir(&run).unwrap();
        touch(&run.join("metric-fid50k_full.jsonl"));
        touch(&run.join("training_options.json"));

        let runs = scan_runs(dir.path(), &layout).unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].name(), "00001-run");
    }

    #[test]
    fn test_scan_missing_root_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = scan_runs(&dir.path().join("nope"), &RunLayout::default()).unwrap_err();
        assert!(matches!(err, Error::ScanFailed { .. }));
    }
}

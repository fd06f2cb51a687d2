//! Report configuration
//!
//! Defaults reproduce the layout written by StyleGAN-style training scripts:
//! one directory per run under `training-runs/`, each holding
//! `metric-fid50k_full.jsonl`, `training_options.json` and `stats.jsonl`.

use std::path::{Path, PathBuf};

/// Default runs root.
pub const DEFAULT_ROOT: &str = "./Training_ANDA/training-runs";

/// Default output spreadsheet.
pub const DEFAULT_OUTPUT: &str = "output_results.xlsx";

/// Default sheet name.
pub const DEFAULT_SHEET: &str = "fid_metrics";

/// kimg trained between two metric snapshots.
pub const DEFAULT_KIMG_PER_CHECKPOINT: i64 = 40;

/// File names and column prefixes inside one run directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunLayout {
    /// Per-checkpoint metric log (JSON lines)
    pub metric_log: String,
    /// Training configuration (one JSON object)
    pub training_options: String,
    /// Per-tick statistics log (JSON lines, optional)
    pub stats_log: String,
    /// Metric key under `results` in each metric log line
    pub metric_key: String,
    /// Prefix for flattened `training_set_kwargs` entries
    pub training_set_prefix: String,
    /// Prefix for flattened `data_loader_kwargs` entries
    pub data_loader_prefix: String,
}

impl Default for RunLayout {
    fn default() -> Self {
        Self {
            metric_log: "metric-fid50k_full.jsonl".to_string(),
            training_options: "training_options.json".to_string(),
            stats_log: "stats.jsonl".to_string(),
            metric_key: "fid50k_full".to_string(),
            training_set_prefix: "ts_".to_string(),
            data_loader_prefix: "dl_".to_string(),
        }
    }
}

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Excel workbook with a single sheet
    #[default]
    Xlsx,
    /// Comma-separated values with a header row
    Csv,
    /// Parquet file holding one record batch
    Parquet,
}

impl OutputFormat {
    /// Guess the format from a file extension (case-insensitive).
    ///
    /// Returns `None` for unknown or missing extensions.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "xlsx" => Some(Self::Xlsx),
            "csv" => Some(Self::Csv),
            "parquet" | "pq" => Some(Self::Parquet),
            _ => None,
        }
    }

    /// Short lowercase name, used in logs and error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
            Self::Parquet => "parquet",
        }
    }
}

/// Everything needed to produce one report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    root: PathBuf,
    output: PathBuf,
    sheet_name: String,
    format: OutputFormat,
    kimg_per_checkpoint: i64,
    sort_runs: bool,
    layout: RunLayout,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfigBuilder::new(DEFAULT_ROOT).build()
    }
}

impl ReportConfig {
    /// Create a builder rooted at `root`.
    #[must_use]
    pub fn builder(root: impl Into<PathBuf>) -> ReportConfigBuilder {
        ReportConfigBuilder::new(root)
    }

    /// Directory whose immediate children are run directories.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Output file path.
    #[must_use]
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Worksheet name (xlsx only).
    #[must_use]
    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    /// Output format.
    #[must_use]
    pub const fn format(&self) -> OutputFormat {
        self.format
    }

    /// kimg between metric snapshots.
    #[must_use]
    pub const fn kimg_per_checkpoint(&self) -> i64 {
        self.kimg_per_checkpoint
    }

    /// Whether runs are sorted by name instead of listing order.
    #[must_use]
    pub const fn sort_runs(&self) -> bool {
        self.sort_runs
    }

    /// Run directory layout.
    #[must_use]
    pub const fn layout(&self) -> &RunLayout {
        &self.layout
    }
}

/// Builder for `ReportConfig`.
#[derive(Debug)]
pub struct ReportConfigBuilder {
    root: PathBuf,
    output: PathBuf,
    sheet_name: String,
    format: Option<OutputFormat>,
    kimg_per_checkpoint: i64,
    sort_runs: bool,
    layout: RunLayout,
}

impl ReportConfigBuilder {
    /// Create a builder with default output settings.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            sheet_name: DEFAULT_SHEET.to_string(),
            format: None,
            kimg_per_checkpoint: DEFAULT_KIMG_PER_CHECKPOINT,
            sort_runs: false,
            layout: RunLayout::default(),
        }
    }

    /// Set the output file path.
    #[must_use]
    pub fn output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// Set the worksheet name.
    #[must_use]
    pub fn sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = name.into();
        self
    }

    /// Force an output format. Without this the output extension decides.
    #[must_use]
    pub const fn format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Set kimg between metric snapshots.
    #[must_use]
    pub const fn kimg_per_checkpoint(mut self, kimg: i64) -> Self {
        self.kimg_per_checkpoint = kimg;
        self
    }

    /// Sort runs by directory name.
    #[must_use]
    pub const fn sort_runs(mut self, sort: bool) -> Self {
        self.sort_runs = sort;
        self
    }

    /// Override the run directory layout.
    #[must_use]
    pub fn layout(mut self, layout: RunLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Build the `ReportConfig`.
    #[must_use]
    pub fn build(self) -> ReportConfig {
        let format = self
            .format
            .or_else(|| OutputFormat::from_path(&self.output))
            .unwrap_or_default();
        ReportConfig {
            root: self.root,
            output: self.output,
            sheet_name: self.sheet_name,
            format,
            kimg_per_checkpoint: self.kimg_per_checkpoint,
            sort_runs: self.sort_runs,
            layout: self.layout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ReportConfig::default();
        assert_eq!(config.root(), Path::new(DEFAULT_ROOT));
        assert_eq!(config.output(), Path::new("output_results.xlsx"));
        assert_eq!(config.sheet_name(), "fid_metrics");
        assert_eq!(config.format(), OutputFormat::Xlsx);
        assert_eq!(config.kimg_per_checkpoint(), 40);
        assert!(!config.sort_runs());
    }

    #[test]
    fn test_format_from_extension() {
        let config = ReportConfig::builder("runs").output("out.CSV").build();
        assert_eq!(config.format(), OutputFormat::Csv);

        let config = ReportConfig::builder("runs").output("out.parquet").build();
        assert_eq!(config.format(), OutputFormat::Parquet);

        let config = ReportConfig::builder("runs").output("out.bin").build();
        assert_eq!(config.format(), OutputFormat::Xlsx);
    }

    #[test]
    fn test_explicit_format_wins() {
        let config = ReportConfig::builder("runs")
            .output("out.xlsx")
            .format(OutputFormat::Csv)
            .build();
        assert_eq!(config.format(), OutputFormat::Csv);
    }
}

//! Error types for fid-report
//!
//! Every variant here is fatal for the whole report. Problems in `stats.jsonl`
//! never reach this type; they degrade to null timing columns instead.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// fid-report error types
#[derive(Error, Debug)]
pub enum Error {
    /// The runs root directory could not be listed
    #[error("Cannot list runs directory {path}: {source}")]
    ScanFailed {
        /// Root that was scanned
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// A required run file could not be read
    #[error("Cannot read {path}: {source}")]
    ReadFailed {
        /// File that failed
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// `training_options.json` is not valid JSON
    #[error("Invalid training options in {path}: {source}")]
    TrainingOptions {
        /// File that failed
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// `training_options.json` parsed, but is not a JSON object
    #[error("Training options in {0} must be a JSON object")]
    TrainingOptionsNotObject(PathBuf),

    /// A metric log line is not valid JSON
    #[error("Invalid JSON in {path} line {line}: {source}")]
    MetricLog {
        /// Metric log path
        path: PathBuf,
        /// 1-based line number
        line: usize,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// A metric log line has an unexpected shape or value
    #[error("Invalid metric in {path} line {line}: {message}")]
    InvalidMetric {
        /// Metric log path
        path: PathBuf,
        /// 1-based line number
        line: usize,
        /// What was wrong
        message: String,
    },

    /// The table does not fit the output format
    #[error("Table too large for {format}: {message}")]
    TableTooLarge {
        /// Output format name
        format: &'static str,
        /// Which limit was exceeded
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Spreadsheet writer error
    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// CSV writer error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Arrow error
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Parquet error
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

//! # fid-report: FID metric report for GAN training runs
//!
//! Walks a `training-runs/` directory written by StyleGAN-style training
//! scripts and produces one spreadsheet row per run:
//!
//! - `folder`, `fid_values`, `actual_kimg`, `min_fid` from `metric-fid50k_full.jsonl`
//! - `avg_sec_kimg`, `run_duration` from `stats.jsonl` (best effort)
//! - every key of `training_options.json`, plus `ts_*` / `dl_*` columns for
//!   `training_set_kwargs` and `data_loader_kwargs`
//!
//! ## Pipeline
//!
//! ```text
//! scan::scan_runs ──> run::load_run ──> row::assemble_row ──> RunTable ──> export
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use fid_report::config::ReportConfig;
//! use fid_report::report::run_report;
//!
//! let config = ReportConfig::builder("training-runs")
//!     .output("output_results.xlsx")
//!     .build();
//! let table = run_report(&config)?;
//! println!("{} runs, {} columns", table.len(), table.columns().len());
//! # Ok::<(), fid_report::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod config;
pub mod error;
pub mod export;
pub mod report;
pub mod row;
pub mod run;
pub mod scan;
pub mod table;

pub use error::{Error, Result};

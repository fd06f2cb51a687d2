//! Statistics log - best-effort timing extraction
//!
//! `stats.jsonl` is written once per training tick. Only two entries matter
//! here:
//!
//! ```text
//! {"Timing/sec_per_kimg": {"num": 1, "mean": 12.5, "std": 0.0}, ...}
//! {"Timing/total_hours":  {"num": 1, "mean": 3.25, "std": 0.0}, ...}
//! ```
//!
//! Runs crash mid-write, so every problem in this file is absorbed. Entries
//! are read in the order above: a line that does not parse, or whose
//! `sec_per_kimg` entry lacks a numeric `mean`, becomes [`StatsLine::Skipped`];
//! a malformed `total_hours` entry only drops that entry. Bare `NaN` /
//! `Infinity` means are accepted.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;

use super::non_finite::{lenient_f64, normalize_non_finite};

const SEC_PER_KIMG: &str = "Timing/sec_per_kimg";
const TOTAL_HOURS: &str = "Timing/total_hours";

enum TimingEntry {
    Absent,
    Mean(f64),
    Malformed,
}

fn timing_entry(record: &Map<String, Value>, key: &str) -> TimingEntry {
    match record.get(key) {
        None => TimingEntry::Absent,
        Some(Value::Object(entry)) => entry
            .get("mean")
            .and_then(lenient_f64)
            .map_or(TimingEntry::Malformed, TimingEntry::Mean),
        Some(_) => TimingEntry::Malformed,
    }
}

/// Outcome of parsing one statistics line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatsLine {
    /// Valid tick; either entry may be missing.
    Parsed {
        /// `Timing/sec_per_kimg.mean`
        sec_per_kimg: Option<f64>,
        /// `Timing/total_hours.mean`
        total_hours: Option<f64>,
    },
    /// Malformed line.
    Skipped,
}

impl StatsLine {
    /// Parse one line of `stats.jsonl`.
    #[must_use]
    pub fn parse(line: &[u8]) -> Self {
        let Ok(text) = std::str::from_utf8(line) else {
            return Self::Skipped;
        };
        let Ok(Value::Object(record)) = serde_json::from_str(&normalize_non_finite(text)) else {
            return Self::Skipped;
        };

        let sec_per_kimg = match timing_entry(&record, SEC_PER_KIMG) {
            TimingEntry::Absent => None,
            TimingEntry::Mean(mean) => Some(mean),
            TimingEntry::Malformed => return Self::Skipped,
        };
        let total_hours = match timing_entry(&record, TOTAL_HOURS) {
            TimingEntry::Mean(mean) => Some(mean),
            TimingEntry::Absent | TimingEntry::Malformed => None,
        };

        Self::Parsed {
            sec_per_kimg,
            total_hours,
        }
    }
}

/// Timing summary of one run. Both fields are `None` when nothing was found.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimingSummary {
    /// Mean of all `Timing/sec_per_kimg` means
    pub avg_sec_kimg: Option<f64>,
    /// Max of all `Timing/total_hours` means
    pub run_duration: Option<f64>,
}

impl TimingSummary {
    /// Fold parsed lines into a summary, ignoring skipped ones.
    pub fn from_lines(lines: impl IntoIterator<Item = StatsLine>) -> Self {
        let mut sec_sum = 0.0;
        let mut sec_count = 0_usize;
        let mut run_duration: Option<f64> = None;

        for line in lines {
            let StatsLine::Parsed {
                sec_per_kimg,
                total_hours,
            } = line
            else {
                continue;
            };
            if let Some(sec) = sec_per_kimg {
                sec_sum += sec;
                sec_count += 1;
            }
            if let Some(hours) = total_hours {
                run_duration = Some(run_duration.map_or(hours, |max| max.max(hours)));
            }
        }

        #[allow(clippy::cast_precision_loss)]
        let avg_sec_kimg = (sec_count > 0).then(|| sec_sum / sec_count as f64);

        Self {
            avg_sec_kimg,
            run_duration,
        }
    }
}

/// Split raw bytes into lines and parse each one.
pub fn parse_stats(bytes: &[u8]) -> impl Iterator<Item = StatsLine> + '_ {
    bytes
        .split(|&b| b == b'\n')
        .filter(|line| !line.iter().all(u8::is_ascii_whitespace))
        .map(StatsLine::parse)
}

/// Summarize the statistics log at `path`.
///
/// A missing or unreadable file yields an empty summary.
#[must_use]
pub fn read_stats_log(path: &Path) -> TimingSummary {
    if !path.is_file() {
        return TimingSummary::default();
    }
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "stats log unreadable");
            return TimingSummary::default();
        }
    };

    let mut skipped = 0_usize;
    let summary = TimingSummary::from_lines(parse_stats(&bytes).inspect(|line| {
        if *line == StatsLine::Skipped {
            skipped += 1;
        }
    }));
    if skipped > 0 {
        debug!(path = %path.display(), skipped, "skipped malformed stats lines");
    }
    summary
}

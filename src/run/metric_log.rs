//! Metric log - one JSON object per metric snapshot
//!
//! A line looks like `{"results": {"fid50k_full": 23.4}, "snapshot_pkl": ...}`.
//! Lines without the metric are skipped; anything unparsable is fatal.
//! Blank lines and `"results": null` also count as "without the metric".
//! Bare `NaN` / `Infinity` values are kept (see [`super::non_finite`]).

use std::fs;
use std::path::Path;

use serde_json::Value;

use super::non_finite::{lenient_f64, normalize_non_finite};
use crate::{Error, Result};

/// Read every present metric value from a metric log, in file order.
///
/// # Errors
///
/// Returns an error if the file cannot be read, a line is not valid JSON, or
/// the metric value is present but not a number.
pub fn read_metric_log(path: &Path, metric_key: &str) -> Result<Vec<f64>> {
    let text = fs::read_to_string(path).map_err(|source| Error::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;
    parse_metric_log(&text, metric_key, path)
}

/// Parse metric log contents. `path` is only used in error messages.
///
/// # Errors
///
/// See [`read_metric_log`].
pub fn parse_metric_log(text: &str, metric_key: &str, path: &Path) -> Result<Vec<f64>> {
    let mut values = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let line_no = idx + 1;
        let invalid = |message: String| Error::InvalidMetric {
            path: path.to_path_buf(),
            line: line_no,
            message,
        };

        let record: Value =
            serde_json::from_str(&normalize_non_finite(line)).map_err(|source| {
                Error::MetricLog {
                    path: path.to_path_buf(),
                    line: line_no,
                    source,
                }
            })?;
        let Value::Object(record) = record else {
            return Err(invalid("line is not a JSON object".to_string()));
        };

        let results = match record.get("results") {
            None | Some(Value::Null) => continue,
            Some(Value::Object(results)) => results,
            Some(other) => return Err(invalid(format!("`results` is not an object: {other}"))),
        };

        match results.get(metric_key) {
            None | Some(Value::Null) => {}
            Some(value) => {
                let value = lenient_f64(value)
                    .ok_or_else(|| invalid(format!("`{metric_key}` is not a number: {value}")))?;
                values.push(value);
            }
        }
    }

    Ok(values)
}

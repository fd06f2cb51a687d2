//! Training options - the run's `training_options.json`

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::{Error, Result};

/// Key of the dataset section.
pub const TRAINING_SET_KWARGS: &str = "training_set_kwargs";

/// Key of the data loader section.
pub const DATA_LOADER_KWARGS: &str = "data_loader_kwargs";

/// Parsed training configuration, keys kept in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingOptions {
    entries: Map<String, Value>,
}

impl TrainingOptions {
    /// Load and parse `training_options.json`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or is
    /// not a JSON object.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let value: Value =
            serde_json::from_str(&text).map_err(|source| Error::TrainingOptions {
                path: path.to_path_buf(),
                source,
            })?;
        match value {
            Value::Object(entries) => Ok(Self { entries }),
            _ => Err(Error::TrainingOptionsNotObject(path.to_path_buf())),
        }
    }

    /// All top-level entries.
    #[must_use]
    pub const fn entries(&self) -> &Map<String, Value> {
        &self.entries
    }

    /// Look up a top-level entry.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// A nested object section. `None` if missing or not an object.
    #[must_use]
    pub fn section(&self, key: &str) -> Option<&Map<String, Value>> {
        self.entries.get(key).and_then(Value::as_object)
    }

    /// `training_set_kwargs`, if present.
    #[must_use]
    pub fn training_set_kwargs(&self) -> Option<&Map<String, Value>> {
        self.section(TRAINING_SET_KWARGS)
    }

    /// `data_loader_kwargs`, if present.
    #[must_use]
    pub fn data_loader_kwargs(&self) -> Option<&Map<String, Value>> {
        self.section(DATA_LOADER_KWARGS)
    }
}

impl From<Map<String, Value>> for TrainingOptions {
    fn from(entries: Map<String, Value>) -> Self {
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_keeps_file_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("training_options.json");
        fs::write(
            &path,
            r#"{"z_last": 1, "a_first": 2, "training_set_kwargs": {"path": "/data", "xflip": false}}"#,
        )
        .unwrap();

        let options = TrainingOptions::load(&path).unwrap();
        let keys: Vec<&str> = options.entries().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z_last", "a_first", "training_set_kwargs"]);

        let ts = options.training_set_kwargs().unwrap();
        assert_eq!(ts.get("path"), Some(&Value::from("/data")));
        assert!(options.data_loader_kwargs().is_none());
    }

    #[test]
    fn test_load_rejects_non_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("training_options.json");
        fs::write(&path, "[1, 2, 3]").unwrap();
        assert!(matches!(
            TrainingOptions::load(&path),
            Err(Error::TrainingOptionsNotObject(_))
        ));
    }

    #[test]
    fn test_load_rejects_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("training_options.json");
        fs::write(&path, "{\"batch\": ").unwrap();
        assert!(matches!(
            TrainingOptions::load(&path),
            Err(Error::TrainingOptions { .. })
        ));
    }

    #[test]
    fn test_section_ignores_scalars() {
        let mut map = Map::new();
        map.insert(DATA_LOADER_KWARGS.to_string(), Value::from(3));
        let options = TrainingOptions::from(map);
        assert!(options.data_loader_kwargs().is_none());
    }
}

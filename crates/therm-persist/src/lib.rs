//! JSON file-backed persistence for thermwatch.
//!
//! Provides [`JsonStore`], a small snapshot store that serializes a single
//! value to `<dir>/<name>.json` and reads it back on startup. A missing or
//! corrupt snapshot is treated as "no prior state" rather than an error, so
//! a damaged file can never keep the monitor from starting.

#![forbid(unsafe_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur while writing a snapshot.
///
/// Reads never error: load failures degrade to the default value.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Snapshot could not be written to disk.
    #[error("failed to write snapshot: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot value could not be serialized.
    #[error("failed to serialize snapshot: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A JSON snapshot store for a single value.
///
/// The snapshot lives at `<dir>/<name>.json`. Writes go through a temporary
/// file in the same directory followed by a rename, so a crash mid-write
/// leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// Creates a store for `<dir>/<name>.json`.
    #[must_use]
    pub fn new(dir: &Path, name: &str) -> Self {
        Self {
            path: dir.join(format!("{name}.json")),
        }
    }

    /// Returns the path of the snapshot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the snapshot, falling back to `T::default()` when the file is
    /// missing or unreadable.
    pub fn load<T: DeserializeOwned + Default>(&self) -> T {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no snapshot on disk, starting fresh");
                return T::default();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "could not read snapshot");
                return T::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "corrupt snapshot, starting fresh");
                T::default()
            }
        }
    }

    /// Writes the snapshot to disk.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] if serialization or any filesystem operation
    /// fails.
    pub fn save<T: Serialize>(&self, value: &T) -> Result<(), PersistError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(value)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        debug!(path = %self.path.display(), "snapshot written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::HashMap;

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    struct Snapshot {
        counter: u64,
        labels: HashMap<String, String>,
    }

    #[test]
    fn missing_file_loads_default() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonStore::new(dir.path(), "state");

        let snapshot: Snapshot = store.load();
        assert_eq!(snapshot, Snapshot::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonStore::new(dir.path(), "state");

        let mut labels = HashMap::new();
        labels.insert("sensor".to_string(), "sht40".to_string());
        let snapshot = Snapshot { counter: 7, labels };

        store.save(&snapshot).expect("save");
        let loaded: Snapshot = store.load();
        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn corrupt_file_loads_default() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonStore::new(dir.path(), "state");

        fs::write(store.path(), "{not valid json").expect("write");
        let snapshot: Snapshot = store.load();
        assert_eq!(snapshot, Snapshot::default());
    }

    #[test]
    fn save_creates_missing_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let nested = dir.path().join("var").join("lib");
        let store = JsonStore::new(&nested, "state");

        store.save(&Snapshot::default()).expect("save");
        assert!(store.path().exists());
    }

    #[test]
    fn save_overwrites_previous_snapshot() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonStore::new(dir.path(), "state");

        store
            .save(&Snapshot {
                counter: 1,
                labels: HashMap::new(),
            })
            .expect("first save");
        store
            .save(&Snapshot {
                counter: 2,
                labels: HashMap::new(),
            })
            .expect("second save");

        let loaded: Snapshot = store.load();
        assert_eq!(loaded.counter, 2);
    }

    #[test]
    fn no_temp_file_left_behind() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonStore::new(dir.path(), "state");

        store.save(&Snapshot::default()).expect("save");

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .expect("read_dir")
            .filter_map(Result::ok)
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }
}

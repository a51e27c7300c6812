//! Persisted monitor state.
//!
//! [`MonitorState`] is the one snapshot the daemon carries across restarts:
//! the previous reading (for rate-of-change detection) and the per-severity
//! cooldown clocks. It is owned by the cycle driver, passed explicitly
//! through each cycle, and flushed to disk before the driver sleeps or
//! exits. There is no other process-wide state.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use therm_alerts::{CooldownState, Reading};
use therm_persist::{JsonStore, PersistError};

/// Snapshot file name, without the `.json` extension.
pub const STATE_FILE_NAME: &str = "temperature_alert_state";

/// The full persisted monitor snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "StateSnapshot", into = "StateSnapshot")]
pub struct MonitorState {
    /// The most recent reading, if any cycle has completed.
    pub last_reading: Option<Reading>,
    /// Per-severity last-dispatch timestamps.
    pub cooldowns: CooldownState,
}

impl MonitorState {
    /// Records the reading taken this cycle, superseding the previous one.
    pub fn record_reading(&mut self, reading: Reading) {
        self.last_reading = Some(reading);
    }
}

/// On-disk layout of the snapshot.
///
/// Field names match the original state file so an operator can read the
/// JSON directly: `last_temp`, `last_temp_time`, `last_alert_time`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StateSnapshot {
    #[serde(default)]
    last_temp: Option<f64>,
    #[serde(default)]
    last_temp_time: Option<DateTime<Utc>>,
    #[serde(default)]
    last_alert_time: CooldownState,
}

impl From<StateSnapshot> for MonitorState {
    fn from(snapshot: StateSnapshot) -> Self {
        let last_reading = match (snapshot.last_temp, snapshot.last_temp_time) {
            (Some(value), Some(timestamp)) => Some(Reading::new(value, timestamp)),
            _ => None,
        };

        Self {
            last_reading,
            cooldowns: snapshot.last_alert_time,
        }
    }
}

impl From<MonitorState> for StateSnapshot {
    fn from(state: MonitorState) -> Self {
        Self {
            last_temp: state.last_reading.map(|r| r.value),
            last_temp_time: state.last_reading.map(|r| r.timestamp),
            last_alert_time: state.cooldowns,
        }
    }
}

/// Loads and saves the monitor snapshot.
#[derive(Debug, Clone)]
pub struct StateStore {
    store: JsonStore,
}

impl StateStore {
    /// Creates a store writing to `<dir>/temperature_alert_state.json`.
    #[must_use]
    pub fn new(dir: &Path) -> Self {
        Self {
            store: JsonStore::new(dir, STATE_FILE_NAME),
        }
    }

    /// Returns the snapshot file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.store.path()
    }

    /// Loads the snapshot; a missing or corrupt file yields an empty state.
    #[must_use]
    pub fn load(&self) -> MonitorState {
        self.store.load()
    }

    /// Writes the snapshot to disk.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] if the write fails; the caller logs this as
    /// a warning and continues.
    pub fn save(&self, state: &MonitorState) -> Result<(), PersistError> {
        self.store.save(state)
    }
}

//! Per-severity alert cooldown tracking.
//!
//! Each severity keeps its own cooldown clock: a `high_warning` dispatch
//! never suppresses a simultaneous `rapid_change` alert. The map is part of
//! the persisted monitor snapshot, so cooldowns survive restarts.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::Severity;

/// Default cooldown between two dispatched alerts of the same severity.
pub const DEFAULT_COOLDOWN_SECS: u64 = 300;

/// Last-dispatch timestamps, keyed by severity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CooldownState {
    entries: HashMap<Severity, DateTime<Utc>>,
}

impl CooldownState {
    /// Creates an empty cooldown state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if a dispatch for `severity` is currently allowed.
    ///
    /// A severity with no recorded dispatch is always allowed; otherwise at
    /// least `cooldown_secs` must have elapsed since the last one.
    #[must_use]
    pub fn allows(&self, severity: Severity, now: DateTime<Utc>, cooldown_secs: u64) -> bool {
        match self.entries.get(&severity) {
            None => true,
            Some(last) => {
                let elapsed = now.signed_duration_since(*last).num_seconds();
                elapsed >= cooldown_secs as i64
            }
        }
    }

    /// Records a dispatch for `severity` at `now`.
    pub fn record(&mut self, severity: Severity, now: DateTime<Utc>) {
        self.entries.insert(severity, now);
    }

    /// Returns the last dispatch time for `severity`, if any.
    #[must_use]
    pub fn last_dispatch(&self, severity: Severity) -> Option<DateTime<Utc>> {
        self.entries.get(&severity).copied()
    }

    /// Returns true if no dispatch has ever been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

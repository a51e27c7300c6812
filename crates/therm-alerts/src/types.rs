//! Core types for the alerting system.
//!
//! This module provides the fundamental types used throughout the
//! therm-alerts crate:
//! - [`Severity`]: the classification of a temperature reading
//! - [`Reading`]: a single timestamped temperature sample
//! - [`ThresholdConfig`]: the configured classification thresholds
//! - [`AlertEvent`]: one classified reading headed for the channels

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The severity of a classified temperature reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Reading is inside the configured band, no action required.
    #[default]
    Normal,
    /// Reading is at or above the high warning threshold.
    HighWarning,
    /// Reading is at or above the high critical threshold.
    HighCritical,
    /// Reading is at or below the low warning threshold.
    LowWarning,
    /// Reading is at or below the low critical threshold.
    LowCritical,
    /// Reading changed faster than the configured rate limit.
    RapidChange,
}

impl Severity {
    /// Returns the severity as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::HighWarning => "high_warning",
            Self::HighCritical => "high_critical",
            Self::LowWarning => "low_warning",
            Self::LowCritical => "low_critical",
            Self::RapidChange => "rapid_change",
        }
    }

    /// Returns true if this severity never triggers a dispatch.
    #[must_use]
    pub const fn is_normal(&self) -> bool {
        matches!(self, Self::Normal)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single temperature sample.
///
/// Produced once per cycle and immutable after creation; the next cycle's
/// sample supersedes it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Temperature in degrees Celsius.
    pub value: f64,
    /// When the sample was taken.
    pub timestamp: DateTime<Utc>,
}

impl Reading {
    /// Creates a new reading.
    #[must_use]
    pub const fn new(value: f64, timestamp: DateTime<Utc>) -> Self {
        Self { value, timestamp }
    }
}

/// Configured classification thresholds, all in degrees Celsius (the rate
/// limit in degrees Celsius per minute).
///
/// `low_critical <= low_warning < high_warning <= high_critical` is the
/// expected shape but is deliberately not enforced; contradictory values
/// fall out of the fixed check order in [`crate::evaluator::classify`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// High-side warning threshold.
    #[serde(default = "default_high_warning")]
    pub high_warning: f64,
    /// High-side critical threshold.
    #[serde(default = "default_high_critical")]
    pub high_critical: f64,
    /// Low-side warning threshold.
    #[serde(default = "default_low_warning")]
    pub low_warning: f64,
    /// Low-side critical threshold.
    #[serde(default = "default_low_critical")]
    pub low_critical: f64,
    /// Maximum tolerated rate of change, °C per minute.
    #[serde(default = "default_max_rate", rename = "rate_of_change")]
    pub max_rate_of_change: f64,
}

const fn default_high_warning() -> f64 {
    35.0
}

const fn default_high_critical() -> f64 {
    45.0
}

const fn default_low_warning() -> f64 {
    5.0
}

const fn default_low_critical() -> f64 {
    0.0
}

const fn default_max_rate() -> f64 {
    5.0
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            high_warning: default_high_warning(),
            high_critical: default_high_critical(),
            low_warning: default_low_warning(),
            low_critical: default_low_critical(),
            max_rate_of_change: default_max_rate(),
        }
    }
}

impl ThresholdConfig {
    /// Returns the configured threshold that applies to a severity.
    ///
    /// `RapidChange` maps to the rate-of-change limit rather than a
    /// temperature threshold; `Normal` has no associated threshold. Adding
    /// a severity requires a deliberate decision here rather than an
    /// assumed symmetric lookup.
    #[must_use]
    pub const fn value_for(&self, severity: Severity) -> Option<f64> {
        match severity {
            Severity::Normal => None,
            Severity::HighWarning => Some(self.high_warning),
            Severity::HighCritical => Some(self.high_critical),
            Severity::LowWarning => Some(self.low_warning),
            Severity::LowCritical => Some(self.low_critical),
            Severity::RapidChange => Some(self.max_rate_of_change),
        }
    }
}

/// One classified reading on its way to the notification channels.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertEvent {
    /// The classified severity.
    pub severity: Severity,
    /// The temperature that triggered the alert, °C.
    pub temperature: f64,
    /// The threshold the reading was measured against, if any.
    pub threshold: Option<f64>,
    /// The configured sensor name.
    pub sensor: String,
    /// When the reading was taken.
    pub timestamp: DateTime<Utc>,
    /// Human-readable alert text.
    pub message: String,
}

impl AlertEvent {
    /// Creates an alert event, resolving the threshold from the config.
    #[must_use]
    pub fn new(
        severity: Severity,
        temperature: f64,
        thresholds: &ThresholdConfig,
        sensor: impl Into<String>,
        timestamp: DateTime<Utc>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            temperature,
            threshold: thresholds.value_for(severity),
            sensor: sensor.into(),
            timestamp,
            message: message.into(),
        }
    }
}

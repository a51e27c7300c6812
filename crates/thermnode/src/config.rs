//! Monitor configuration.
//!
//! Configuration for the thermwatch daemon, including:
//! - Sensor selection and pin
//! - Classification thresholds
//! - Notification channels and cooldown
//!
//! Loaded once at startup from a YAML file; a missing or malformed file is
//! fatal before any cycle runs.

use std::path::Path;

use serde::{Deserialize, Serialize};
use therm_alerts::{DEFAULT_COOLDOWN_SECS, DiscordConfig, TelegramConfig, ThresholdConfig, WebhookConfig};

use crate::error::NodeError;
use crate::sensor::SensorKind;

/// Notification settings: the shared cooldown plus one section per channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// Minimum seconds between two dispatched alerts of the same severity.
    #[serde(default = "default_cooldown")]
    pub cooldown: u64,
    /// Telegram channel settings.
    #[serde(default)]
    pub telegram: TelegramConfig,
    /// Discord channel settings.
    #[serde(default)]
    pub discord: DiscordConfig,
    /// Generic webhook channel settings.
    #[serde(default)]
    pub webhook: WebhookConfig,
}

const fn default_cooldown() -> u64 {
    DEFAULT_COOLDOWN_SECS
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            cooldown: DEFAULT_COOLDOWN_SECS,
            telegram: TelegramConfig::default(),
            discord: DiscordConfig::default(),
            webhook: WebhookConfig::default(),
        }
    }
}

/// Main monitor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Which sensor to read.
    pub sensor: SensorKind,
    /// Sensor pin or bus address.
    #[serde(default = "default_sensor_pin")]
    pub sensor_pin: String,
    /// Classification thresholds.
    #[serde(default)]
    pub thresholds: ThresholdConfig,
    /// Notification settings.
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

fn default_sensor_pin() -> String {
    "auto".to_string()
}

impl MonitorConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::Config`] if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, NodeError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            NodeError::Config(format!(
                "failed to read config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::Config`] if the YAML is invalid.
    pub fn from_yaml(content: &str) -> Result<Self, NodeError> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| NodeError::Config(format!("invalid YAML: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Contradictory threshold orderings are deliberately accepted; only
    /// values the evaluators cannot work with are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::Config`] if any value is unusable.
    pub fn validate(&self) -> Result<(), NodeError> {
        let t = &self.thresholds;
        for (name, value) in [
            ("high_warning", t.high_warning),
            ("high_critical", t.high_critical),
            ("low_warning", t.low_warning),
            ("low_critical", t.low_critical),
        ] {
            if !value.is_finite() {
                return Err(NodeError::Config(format!(
                    "thresholds.{name} must be a finite number"
                )));
            }
        }

        if !t.max_rate_of_change.is_finite() || t.max_rate_of_change <= 0.0 {
            return Err(NodeError::Config(
                "thresholds.rate_of_change must be a positive number".to_string(),
            ));
        }

        if self.sensor_pin.is_empty() {
            return Err(NodeError::Config("sensor_pin cannot be empty".to_string()));
        }

        Ok(())
    }
}

//! thermnode - the thermwatch monitor daemon.
//!
//! Reads a temperature sensor on a fixed interval, classifies each reading
//! with [`therm_alerts`], dispatches alerts through the configured channels,
//! and persists a small state snapshot across restarts.

#![forbid(unsafe_code)]

pub mod config;
pub mod cycle;
pub mod error;
pub mod sensor;
pub mod state;

pub use config::{MonitorConfig, NotificationsConfig};
pub use cycle::{Clock, Cycle, Sleeper, SystemClock, SystemSleeper};
pub use error::NodeError;
pub use sensor::{Sensor, SensorKind};
pub use state::{MonitorState, StateStore};

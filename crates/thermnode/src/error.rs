//! Error types for thermnode.

use thiserror::Error;

/// Errors that can occur in the monitor daemon.
#[derive(Debug, Error)]
pub enum NodeError {
    /// Configuration error. Always fatal: the monitor never starts with a
    /// missing or malformed config file.
    #[error("configuration error: {0}")]
    Config(String),

    /// Sensor read failed. Recoverable: the cycle is skipped.
    #[error("sensor read failed: {0}")]
    SensorRead(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

//! Error types for the therm-alerts crate.

use thiserror::Error;

/// Errors that can occur in the alerting system.
#[derive(Debug, Error)]
pub enum AlertError {
    /// A channel is enabled but not usable as configured.
    #[error("channel '{channel}' misconfigured: {reason}")]
    ChannelConfig {
        /// The channel that is misconfigured.
        channel: String,
        /// Why the configuration is unusable.
        reason: String,
    },

    /// Notification delivery failed.
    #[error("notification failed on '{channel}': {reason}")]
    NotificationFailed {
        /// The channel that failed.
        channel: String,
        /// The reason the delivery failed.
        reason: String,
    },

    /// The remote endpoint answered with a non-success status.
    #[error("channel '{channel}' returned status {status}")]
    UnexpectedStatus {
        /// The channel that received the response.
        channel: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The HTTP client could not be constructed.
    #[error("http client error: {0}")]
    HttpClient(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for AlertError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type for alert operations.
pub type Result<T> = std::result::Result<T, AlertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_channel_config() {
        let err = AlertError::ChannelConfig {
            channel: "telegram".to_string(),
            reason: "bot token missing".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "channel 'telegram' misconfigured: bot token missing"
        );
    }

    #[test]
    fn error_display_notification_failed() {
        let err = AlertError::NotificationFailed {
            channel: "discord".to_string(),
            reason: "connection refused".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "notification failed on 'discord': connection refused"
        );
    }

    #[test]
    fn error_display_unexpected_status() {
        let err = AlertError::UnexpectedStatus {
            channel: "webhook".to_string(),
            status: 503,
        };
        assert_eq!(err.to_string(), "channel 'webhook' returned status 503");
    }

    #[test]
    fn error_from_serde_json() {
        let json_err = serde_json::from_str::<String>("not json");
        assert!(json_err.is_err());
        let alert_err: AlertError = json_err.unwrap_err().into();
        assert!(matches!(alert_err, AlertError::Serialization(_)));
    }
}

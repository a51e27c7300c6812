//! Temperature alerting for thermwatch.
//!
//! `therm-alerts` classifies temperature readings against configured
//! thresholds and delivers alerts through multiple notification channels.
//!
//! # Features
//!
//! - **Threshold classification**: high/low warning and critical bands with
//!   a fixed first-match check order
//! - **Rate-of-change detection**: alerts when the temperature moves faster
//!   than a configured °C/min limit between consecutive readings
//! - **Cooldown gating**: per-severity suppression windows to prevent alert
//!   storms
//! - **Notification channels**: Telegram, Discord, and generic JSON webhooks,
//!   each attempted independently
//!
//! # Example
//!
//! ```rust
//! use therm_alerts::{classify, CooldownState, Severity, ThresholdConfig};
//! use chrono::Utc;
//!
//! let thresholds = ThresholdConfig::default();
//!
//! let (severity, message) = classify(46.0, &thresholds);
//! assert_eq!(severity, Severity::HighCritical);
//! assert!(message.contains("46°C"));
//!
//! // The first alert of a severity is always allowed; repeats wait out
//! // the cooldown window.
//! let mut cooldowns = CooldownState::new();
//! let now = Utc::now();
//! assert!(cooldowns.allows(severity, now, 300));
//! cooldowns.record(severity, now);
//! assert!(!cooldowns.allows(severity, now, 300));
//! ```

#![forbid(unsafe_code)]

pub mod channels;
pub mod cooldown;
pub mod dispatch;
pub mod error;
pub mod evaluator;
pub mod types;

// Re-export main types at crate root
pub use channels::{
    ChannelResult, DiscordChannel, DiscordConfig, NotificationChannel, TelegramChannel,
    TelegramConfig, WebhookChannel, WebhookConfig, WebhookPayload, build_http_client,
};
pub use cooldown::{CooldownState, DEFAULT_COOLDOWN_SECS};
pub use dispatch::{DispatchOutcome, Dispatcher};
pub use error::{AlertError, Result};
pub use evaluator::{check_rate, classify};
pub use types::{AlertEvent, Reading, Severity, ThresholdConfig};

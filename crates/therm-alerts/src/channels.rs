//! Notification channels for alert delivery.
//!
//! This module provides the [`NotificationChannel`] trait and the three
//! built-in channels: Telegram, Discord, and a generic JSON webhook. Every
//! channel posts over the shared blocking HTTP client with a fixed timeout;
//! a failure is returned to the dispatcher and goes no further.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{AlertError, Result};
use crate::types::AlertEvent;

/// Fixed per-request timeout for all channels.
pub const HTTP_TIMEOUT_SECS: u64 = 10;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Builds the shared blocking HTTP client used by all channels.
///
/// # Errors
///
/// Returns [`AlertError::HttpClient`] if the underlying TLS backend cannot
/// be initialised.
pub fn build_http_client() -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .build()
        .map_err(|e| AlertError::HttpClient(e.to_string()))
}

/// Result of one delivery attempt on one channel.
#[derive(Debug, Clone)]
pub struct ChannelResult {
    /// Whether the delivery succeeded.
    pub success: bool,
    /// The channel that processed the attempt.
    pub channel: String,
    /// Optional message or error description.
    pub message: Option<String>,
    /// Response status code, if a response was received.
    pub status_code: Option<u16>,
}

impl ChannelResult {
    /// Creates a successful result.
    #[must_use]
    pub fn success(channel: impl Into<String>) -> Self {
        Self {
            success: true,
            channel: channel.into(),
            message: None,
            status_code: None,
        }
    }

    /// Creates a failed result.
    #[must_use]
    pub fn failure(channel: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            channel: channel.into(),
            message: Some(message.into()),
            status_code: None,
        }
    }

    /// Sets the status code.
    #[must_use]
    pub const fn with_status_code(mut self, code: u16) -> Self {
        self.status_code = Some(code);
        self
    }

    /// Sets the message.
    #[must_use]
    pub fn with_message(mut self, msg: impl Into<String>) -> Self {
        self.message = Some(msg.into());
        self
    }
}

/// Trait for notification channels.
///
/// Implement this trait to deliver alerts through additional services. A
/// channel reports its own failures through the returned result or error;
/// it must never panic or retry.
pub trait NotificationChannel: Send + Sync + fmt::Debug {
    /// Returns the name of this channel.
    fn name(&self) -> &str;

    /// Delivers one alert event through this channel.
    ///
    /// # Errors
    ///
    /// Returns an [`AlertError`] when the channel is misconfigured or the
    /// delivery fails; the dispatcher logs it and moves on.
    fn send(&self, event: &AlertEvent) -> Result<ChannelResult>;

    /// Returns true if this channel is enabled.
    fn is_enabled(&self) -> bool {
        true
    }
}

// ---------------------------------------------------------------------------
// Telegram
// ---------------------------------------------------------------------------

/// Configuration for the Telegram channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Whether the channel is enabled.
    #[serde(default)]
    pub enabled: bool,
    /// Bot API token.
    #[serde(default)]
    pub bot_token: String,
    /// Target chat identifier.
    #[serde(default)]
    pub chat_id: String,
}

/// Message body for the Telegram `sendMessage` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramPayload {
    /// Target chat identifier.
    pub chat_id: String,
    /// Message text.
    pub text: String,
    /// Telegram parse mode; alerts are sent as HTML.
    pub parse_mode: String,
}

/// Sends alerts as HTML-formatted Telegram messages.
#[derive(Debug, Clone)]
pub struct TelegramChannel {
    config: TelegramConfig,
    client: Client,
}

impl TelegramChannel {
    /// Channel name used in logs and results.
    pub const NAME: &'static str = "telegram";

    /// Creates a new Telegram channel.
    #[must_use]
    pub const fn new(config: TelegramConfig, client: Client) -> Self {
        Self { config, client }
    }

    /// Formats the message body for an event.
    #[must_use]
    pub fn format_payload(&self, event: &AlertEvent) -> TelegramPayload {
        TelegramPayload {
            chat_id: self.config.chat_id.clone(),
            text: event.message.clone(),
            parse_mode: "HTML".to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{TELEGRAM_API_BASE}/bot{}/sendMessage",
            self.config.bot_token
        )
    }
}

impl NotificationChannel for TelegramChannel {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn send(&self, event: &AlertEvent) -> Result<ChannelResult> {
        if !self.is_enabled() {
            debug!(channel = Self::NAME, "channel is disabled, skipping");
            return Ok(ChannelResult::success(Self::NAME)
                .with_message("channel disabled, notification skipped"));
        }

        if self.config.bot_token.is_empty() || self.config.chat_id.is_empty() {
            return Err(AlertError::ChannelConfig {
                channel: Self::NAME.to_string(),
                reason: "enabled but bot_token or chat_id missing".to_string(),
            });
        }

        let payload = self.format_payload(event);
        let response = self
            .client
            .post(self.endpoint())
            .json(&payload)
            .send()
            .map_err(|e| AlertError::NotificationFailed {
                channel: Self::NAME.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AlertError::UnexpectedStatus {
                channel: Self::NAME.to_string(),
                status: status.as_u16(),
            });
        }

        info!(channel = Self::NAME, "alert sent");
        Ok(ChannelResult::success(Self::NAME).with_status_code(status.as_u16()))
    }

    fn is_enabled(&self) -> bool {
        self.config.enabled
    }
}

// ---------------------------------------------------------------------------
// Discord
// ---------------------------------------------------------------------------

/// Configuration for the Discord webhook channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscordConfig {
    /// Whether the channel is enabled.
    #[serde(default)]
    pub enabled: bool,
    /// Discord webhook URL.
    #[serde(default)]
    pub webhook_url: String,
}

/// Message body for a Discord webhook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordPayload {
    /// Message text.
    pub content: String,
    /// Display name the webhook posts under.
    pub username: String,
}

/// Sends alerts to a Discord webhook.
#[derive(Debug, Clone)]
pub struct DiscordChannel {
    config: DiscordConfig,
    client: Client,
}

impl DiscordChannel {
    /// Channel name used in logs and results.
    pub const NAME: &'static str = "discord";

    /// Display name attached to every webhook message.
    pub const USERNAME: &'static str = "Temperature Alert Bot";

    /// Creates a new Discord channel.
    #[must_use]
    pub const fn new(config: DiscordConfig, client: Client) -> Self {
        Self { config, client }
    }

    /// Formats the message body for an event.
    #[must_use]
    pub fn format_payload(event: &AlertEvent) -> DiscordPayload {
        DiscordPayload {
            content: event.message.clone(),
            username: Self::USERNAME.to_string(),
        }
    }
}

impl NotificationChannel for DiscordChannel {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn send(&self, event: &AlertEvent) -> Result<ChannelResult> {
        if !self.is_enabled() {
            debug!(channel = Self::NAME, "channel is disabled, skipping");
            return Ok(ChannelResult::success(Self::NAME)
                .with_message("channel disabled, notification skipped"));
        }

        if self.config.webhook_url.is_empty() {
            return Err(AlertError::ChannelConfig {
                channel: Self::NAME.to_string(),
                reason: "enabled but webhook_url missing".to_string(),
            });
        }

        let payload = Self::format_payload(event);
        let response = self
            .client
            .post(&self.config.webhook_url)
            .json(&payload)
            .send()
            .map_err(|e| AlertError::NotificationFailed {
                channel: Self::NAME.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AlertError::UnexpectedStatus {
                channel: Self::NAME.to_string(),
                status: status.as_u16(),
            });
        }

        info!(channel = Self::NAME, "alert sent");
        Ok(ChannelResult::success(Self::NAME).with_status_code(status.as_u16()))
    }

    fn is_enabled(&self) -> bool {
        self.config.enabled
    }
}

// ---------------------------------------------------------------------------
// Generic webhook
// ---------------------------------------------------------------------------

/// Configuration for the generic webhook channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Whether the channel is enabled.
    #[serde(default)]
    pub enabled: bool,
    /// Target URL.
    #[serde(default)]
    pub url: String,
    /// Extra HTTP headers to send with every request.
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

/// Structured body for the generic webhook channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookPayload {
    /// Event discriminator, always `temperature_alert`.
    pub event: String,
    /// The classified severity name.
    pub severity: crate::types::Severity,
    /// The temperature that triggered the alert, °C.
    pub temperature: f64,
    /// The threshold that applies to the severity (`rapid_change` resolves
    /// to the rate-of-change limit), or null.
    pub threshold: Option<f64>,
    /// Configured sensor name.
    pub sensor: String,
    /// When the reading was taken, RFC 3339.
    pub timestamp: String,
    /// Human-readable alert text.
    pub message: String,
}

impl WebhookPayload {
    /// Builds the payload for an event.
    #[must_use]
    pub fn from_event(event: &AlertEvent) -> Self {
        Self {
            event: "temperature_alert".to_string(),
            severity: event.severity,
            temperature: event.temperature,
            threshold: event.threshold,
            sensor: event.sensor.clone(),
            timestamp: event.timestamp.to_rfc3339(),
            message: event.message.clone(),
        }
    }
}

/// Sends a structured JSON payload to a configured URL.
#[derive(Debug, Clone)]
pub struct WebhookChannel {
    config: WebhookConfig,
    client: Client,
}

impl WebhookChannel {
    /// Channel name used in logs and results.
    pub const NAME: &'static str = "webhook";

    /// Creates a new webhook channel.
    #[must_use]
    pub const fn new(config: WebhookConfig, client: Client) -> Self {
        Self { config, client }
    }

    /// Returns the configured URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.config.url
    }
}

impl NotificationChannel for WebhookChannel {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn send(&self, event: &AlertEvent) -> Result<ChannelResult> {
        if !self.is_enabled() {
            debug!(channel = Self::NAME, "channel is disabled, skipping");
            return Ok(ChannelResult::success(Self::NAME)
                .with_message("channel disabled, notification skipped"));
        }

        if self.config.url.is_empty() {
            return Err(AlertError::ChannelConfig {
                channel: Self::NAME.to_string(),
                reason: "enabled but url missing".to_string(),
            });
        }

        let payload = WebhookPayload::from_event(event);
        let mut request = self.client.post(&self.config.url).json(&payload);
        for (key, value) in &self.config.headers {
            request = request.header(key.as_str(), value.as_str());
        }

        let response = request.send().map_err(|e| AlertError::NotificationFailed {
            channel: Self::NAME.to_string(),
            reason: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AlertError::UnexpectedStatus {
                channel: Self::NAME.to_string(),
                status: status.as_u16(),
            });
        }

        info!(channel = Self::NAME, "alert sent");
        Ok(ChannelResult::success(Self::NAME).with_status_code(status.as_u16()))
    }

    fn is_enabled(&self) -> bool {
        self.config.enabled
    }
}

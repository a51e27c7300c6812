//! Alert dispatch with cooldown gating.
//!
//! The [`Dispatcher`] fans one [`AlertEvent`] out to every enabled channel.
//! The cooldown gate is checked exactly once, before any channel is
//! attempted: a suppressed event touches neither the channels nor the
//! cooldown state. Once the gate passes, the severity's cooldown timestamp
//! is updated whether or not any individual channel succeeded.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::channels::NotificationChannel;
use crate::cooldown::CooldownState;
use crate::types::AlertEvent;

/// The outcome of one dispatch attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Whether the cooldown gate suppressed the event.
    pub suppressed: bool,
    /// Channels attempted.
    pub attempted: usize,
    /// Channels that reported success.
    pub delivered: usize,
    /// Channels that failed or were misconfigured.
    pub failed: usize,
}

impl DispatchOutcome {
    fn suppressed() -> Self {
        Self {
            suppressed: true,
            ..Self::default()
        }
    }
}

/// Fans alert events out to the configured channels.
pub struct Dispatcher {
    channels: Vec<Box<dyn NotificationChannel>>,
    cooldown_secs: u64,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("channels", &self.channels.len())
            .field("cooldown_secs", &self.cooldown_secs)
            .finish()
    }
}

impl Dispatcher {
    /// Creates a dispatcher with no channels.
    #[must_use]
    pub const fn new(cooldown_secs: u64) -> Self {
        Self {
            channels: Vec::new(),
            cooldown_secs,
        }
    }

    /// Adds a notification channel.
    pub fn add_channel(&mut self, channel: Box<dyn NotificationChannel>) {
        info!(channel = %channel.name(), "added notification channel");
        self.channels.push(channel);
    }

    /// Returns the number of registered channels.
    #[must_use]
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Returns the configured cooldown in seconds.
    #[must_use]
    pub const fn cooldown_secs(&self) -> u64 {
        self.cooldown_secs
    }

    /// Dispatches one event through every enabled channel, subject to the
    /// per-severity cooldown.
    pub fn dispatch(
        &self,
        event: &AlertEvent,
        cooldowns: &mut CooldownState,
        now: DateTime<Utc>,
    ) -> DispatchOutcome {
        if !cooldowns.allows(event.severity, now, self.cooldown_secs) {
            info!(severity = %event.severity, "alert suppressed by cooldown");
            return DispatchOutcome::suppressed();
        }

        info!(severity = %event.severity, message = %event.message, "sending alert");

        let mut outcome = DispatchOutcome::default();
        for channel in &self.channels {
            if !channel.is_enabled() {
                continue;
            }

            outcome.attempted += 1;
            match channel.send(event) {
                Ok(result) if result.success => outcome.delivered += 1,
                Ok(result) => {
                    warn!(
                        channel = %result.channel,
                        message = ?result.message,
                        "notification failed"
                    );
                    outcome.failed += 1;
                }
                Err(e) => {
                    warn!(channel = %channel.name(), error = %e, "notification error");
                    outcome.failed += 1;
                }
            }
        }

        cooldowns.record(event.severity, now);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channels::ChannelResult;
    use crate::error::AlertError;
    use crate::types::{Severity, ThresholdConfig};
    use chrono::Duration;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct CountingChannel {
        calls: Arc<AtomicUsize>,
        enabled: bool,
        fail: bool,
    }

    impl CountingChannel {
        fn new(calls: Arc<AtomicUsize>) -> Self {
            Self {
                calls,
                enabled: true,
                fail: false,
            }
        }

        fn failing(calls: Arc<AtomicUsize>) -> Self {
            Self {
                calls,
                enabled: true,
                fail: true,
            }
        }

        fn disabled(calls: Arc<AtomicUsize>) -> Self {
            Self {
                calls,
                enabled: false,
                fail: false,
            }
        }
    }

    impl NotificationChannel for CountingChannel {
        fn name(&self) -> &str {
            "counting"
        }

        fn send(&self, _event: &AlertEvent) -> crate::error::Result<ChannelResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(AlertError::NotificationFailed {
                    channel: "counting".to_string(),
                    reason: "simulated".to_string(),
                })
            } else {
                Ok(ChannelResult::success("counting"))
            }
        }

        fn is_enabled(&self) -> bool {
            self.enabled
        }
    }

    fn event(severity: Severity) -> AlertEvent {
        AlertEvent::new(
            severity,
            36.0,
            &ThresholdConfig::default(),
            "sht40",
            Utc::now(),
            "test alert",
        )
    }

    #[test]
    fn first_dispatch_reaches_channels_and_records_cooldown() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut dispatcher = Dispatcher::new(300);
        dispatcher.add_channel(Box::new(CountingChannel::new(Arc::clone(&calls))));

        let mut cooldowns = CooldownState::new();
        let now = Utc::now();
        let outcome = dispatcher.dispatch(&event(Severity::HighWarning), &mut cooldowns, now);

        assert!(!outcome.suppressed);
        assert_eq!(outcome.attempted, 1);
        assert_eq!(outcome.delivered, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cooldowns.last_dispatch(Severity::HighWarning), Some(now));
    }

    #[test]
    fn suppressed_dispatch_makes_zero_channel_calls() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut dispatcher = Dispatcher::new(300);
        dispatcher.add_channel(Box::new(CountingChannel::new(Arc::clone(&calls))));

        let mut cooldowns = CooldownState::new();
        let now = Utc::now();
        dispatcher.dispatch(&event(Severity::HighWarning), &mut cooldowns, now);
        let recorded = cooldowns.last_dispatch(Severity::HighWarning);

        // Same instant: the gate must hold and the timestamp must not move.
        let outcome = dispatcher.dispatch(&event(Severity::HighWarning), &mut cooldowns, now);

        assert!(outcome.suppressed);
        assert_eq!(outcome.attempted, 0);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cooldowns.last_dispatch(Severity::HighWarning), recorded);
    }

    #[test]
    fn dispatch_allowed_again_after_window() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut dispatcher = Dispatcher::new(300);
        dispatcher.add_channel(Box::new(CountingChannel::new(Arc::clone(&calls))));

        let mut cooldowns = CooldownState::new();
        let first = Utc::now();
        dispatcher.dispatch(&event(Severity::HighWarning), &mut cooldowns, first);

        let later = first + Duration::seconds(301);
        let outcome = dispatcher.dispatch(&event(Severity::HighWarning), &mut cooldowns, later);

        assert!(!outcome.suppressed);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cooldowns.last_dispatch(Severity::HighWarning), Some(later));
    }

    #[test]
    fn different_severities_do_not_suppress_each_other() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut dispatcher = Dispatcher::new(300);
        dispatcher.add_channel(Box::new(CountingChannel::new(Arc::clone(&calls))));

        let mut cooldowns = CooldownState::new();
        let now = Utc::now();
        dispatcher.dispatch(&event(Severity::HighWarning), &mut cooldowns, now);
        let outcome = dispatcher.dispatch(&event(Severity::RapidChange), &mut cooldowns, now);

        assert!(!outcome.suppressed);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn one_failing_channel_does_not_block_another() {
        let failing_calls = Arc::new(AtomicUsize::new(0));
        let ok_calls = Arc::new(AtomicUsize::new(0));
        let mut dispatcher = Dispatcher::new(300);
        dispatcher.add_channel(Box::new(CountingChannel::failing(Arc::clone(&failing_calls))));
        dispatcher.add_channel(Box::new(CountingChannel::new(Arc::clone(&ok_calls))));

        let mut cooldowns = CooldownState::new();
        let outcome = dispatcher.dispatch(
            &event(Severity::HighCritical),
            &mut cooldowns,
            Utc::now(),
        );

        assert_eq!(outcome.attempted, 2);
        assert_eq!(outcome.delivered, 1);
        assert_eq!(outcome.failed, 1);
        assert_eq!(failing_calls.load(Ordering::SeqCst), 1);
        assert_eq!(ok_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn cooldown_recorded_even_when_every_channel_fails() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut dispatcher = Dispatcher::new(300);
        dispatcher.add_channel(Box::new(CountingChannel::failing(Arc::clone(&calls))));

        let mut cooldowns = CooldownState::new();
        let now = Utc::now();
        let outcome = dispatcher.dispatch(&event(Severity::LowCritical), &mut cooldowns, now);

        assert_eq!(outcome.delivered, 0);
        assert_eq!(outcome.failed, 1);
        assert_eq!(cooldowns.last_dispatch(Severity::LowCritical), Some(now));
    }

    #[test]
    fn disabled_channels_are_not_attempted() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut dispatcher = Dispatcher::new(300);
        dispatcher.add_channel(Box::new(CountingChannel::disabled(Arc::clone(&calls))));

        let mut cooldowns = CooldownState::new();
        let outcome = dispatcher.dispatch(
            &event(Severity::HighWarning),
            &mut cooldowns,
            Utc::now(),
        );

        assert!(!outcome.suppressed);
        assert_eq!(outcome.attempted, 0);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn no_channels_still_records_cooldown() {
        let dispatcher = Dispatcher::new(300);
        let mut cooldowns = CooldownState::new();
        let now = Utc::now();

        let outcome = dispatcher.dispatch(&event(Severity::HighWarning), &mut cooldowns, now);

        assert!(!outcome.suppressed);
        assert_eq!(outcome.attempted, 0);
        assert_eq!(cooldowns.last_dispatch(Severity::HighWarning), Some(now));
    }
}

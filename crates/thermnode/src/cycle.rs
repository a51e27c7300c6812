//! The evaluation cycle driver.
//!
//! One cycle: read the sensor, classify the reading, run the rate-of-change
//! check, dispatch whatever alerts came out of it, then persist the state
//! snapshot. Continuous mode repeats the cycle on a fixed interval until
//! the stop flag is raised.
//!
//! Wall-clock access and sleeping go through the [`Clock`] and [`Sleeper`]
//! seams so the loop is testable without real waiting.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use therm_alerts::{AlertEvent, Dispatcher, Reading, ThresholdConfig, check_rate, classify};
use tracing::{error, info, warn};

use crate::sensor::Sensor;
use crate::state::{MonitorState, StateStore};

/// Source of the current time.
pub trait Clock: fmt::Debug {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// The real wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Blocking sleep between cycles.
pub trait Sleeper {
    /// Sleeps for `duration`.
    fn sleep(&self, duration: Duration);
}

/// Real thread sleep.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemSleeper;

impl Sleeper for SystemSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Drives evaluation cycles over one sensor.
#[derive(Debug)]
pub struct Cycle {
    sensor: Box<dyn Sensor>,
    thresholds: ThresholdConfig,
    dispatcher: Dispatcher,
    store: StateStore,
    clock: Box<dyn Clock>,
}

impl Cycle {
    /// Creates a cycle driver.
    #[must_use]
    pub fn new(
        sensor: Box<dyn Sensor>,
        thresholds: ThresholdConfig,
        dispatcher: Dispatcher,
        store: StateStore,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            sensor,
            thresholds,
            dispatcher,
            store,
            clock,
        }
    }

    /// Runs a single evaluation cycle.
    ///
    /// A failed sensor read ends the cycle early: nothing is classified,
    /// nothing is dispatched, and the state is left untouched.
    pub fn run_once(&self, state: &mut MonitorState) {
        let temp = match self.sensor.read() {
            Ok(temp) => temp,
            Err(e) => {
                error!(error = %e, "failed to read temperature");
                return;
            }
        };

        let now = self.clock.now();
        info!(temp = %temp, sensor = %self.sensor.kind(), "current temperature");

        let (severity, message) = classify(temp, &self.thresholds);
        if severity.is_normal() {
            info!("{message}");
        } else {
            let event = AlertEvent::new(
                severity,
                temp,
                &self.thresholds,
                self.sensor.kind().as_str(),
                now,
                message,
            );
            self.dispatcher.dispatch(&event, &mut state.cooldowns, now);
        }

        if let Some((severity, message)) = check_rate(
            temp,
            state.last_reading.as_ref(),
            now,
            self.thresholds.max_rate_of_change,
        ) {
            let event = AlertEvent::new(
                severity,
                temp,
                &self.thresholds,
                self.sensor.kind().as_str(),
                now,
                message,
            );
            self.dispatcher.dispatch(&event, &mut state.cooldowns, now);
        }

        state.record_reading(Reading::new(temp, now));
        if let Err(e) = self.store.save(state) {
            warn!(error = %e, "could not save state");
        }
    }

    /// Repeats [`Self::run_once`] every `interval` until `stop` is raised.
    ///
    /// The stop flag is the only interruption point; a cycle in flight
    /// always runs to completion, and stopping is not an error.
    pub fn run_continuous(
        &self,
        state: &mut MonitorState,
        interval: Duration,
        stop: &AtomicBool,
        sleeper: &dyn Sleeper,
    ) {
        info!(
            interval_secs = interval.as_secs(),
            "starting continuous monitoring"
        );

        while !stop.load(Ordering::Relaxed) {
            self.run_once(state);
            Self::wait(interval, stop, sleeper);
        }

        info!("monitoring stopped");
    }

    /// Sleeps out the inter-cycle interval in one-second slices so a stop
    /// request takes effect promptly.
    fn wait(interval: Duration, stop: &AtomicBool, sleeper: &dyn Sleeper) {
        let slice = Duration::from_secs(1);
        let mut remaining = interval;

        while !stop.load(Ordering::Relaxed) && !remaining.is_zero() {
            let step = remaining.min(slice);
            sleeper.sleep(step);
            remaining -= step;
        }
    }
}

//! Threshold and rate-of-change evaluation.
//!
//! Pure functions that classify a temperature reading against a
//! [`ThresholdConfig`]. The check order is fixed: high-critical, high-warning,
//! low-critical, low-warning, normal — first match wins, and equality always
//! favours the more severe side. Contradictory or inverted thresholds are not
//! rejected; they simply fall out of this order.

use chrono::{DateTime, Utc};

use crate::types::{Reading, Severity, ThresholdConfig};

/// Classifies a temperature against the configured thresholds.
///
/// Returns the severity together with the human-readable alert text.
#[must_use]
pub fn classify(temp: f64, cfg: &ThresholdConfig) -> (Severity, String) {
    if temp >= cfg.high_critical {
        (
            Severity::HighCritical,
            format!(
                "CRITICAL: temperature {temp}°C exceeds critical threshold {}°C",
                cfg.high_critical
            ),
        )
    } else if temp >= cfg.high_warning {
        (
            Severity::HighWarning,
            format!(
                "WARNING: temperature {temp}°C exceeds warning threshold {}°C",
                cfg.high_warning
            ),
        )
    } else if temp <= cfg.low_critical {
        (
            Severity::LowCritical,
            format!(
                "CRITICAL: temperature {temp}°C below critical threshold {}°C",
                cfg.low_critical
            ),
        )
    } else if temp <= cfg.low_warning {
        (
            Severity::LowWarning,
            format!(
                "WARNING: temperature {temp}°C below warning threshold {}°C",
                cfg.low_warning
            ),
        )
    } else {
        (Severity::Normal, format!("temperature normal: {temp}°C"))
    }
}

/// Checks whether the temperature changed faster than `max_rate` °C/min
/// since the prior reading.
///
/// Returns `None` when there is no prior reading, or when no time has
/// elapsed since it (a same-instant pair is not an error, just nothing to
/// measure). The rate in the message is reported to one decimal place.
#[must_use]
pub fn check_rate(
    temp: f64,
    prior: Option<&Reading>,
    now: DateTime<Utc>,
    max_rate: f64,
) -> Option<(Severity, String)> {
    let prior = prior?;

    let elapsed_minutes =
        now.signed_duration_since(prior.timestamp).num_milliseconds() as f64 / 60_000.0;
    if elapsed_minutes <= 0.0 {
        return None;
    }

    let rate = (temp - prior.value).abs() / elapsed_minutes;
    if rate > max_rate {
        return Some((
            Severity::RapidChange,
            format!(
                "ALERT: rapid temperature change detected: {rate:.1}°C/min \
                 (threshold: {max_rate}°C/min)"
            ),
        ));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use test_case::test_case;

    fn cfg() -> ThresholdConfig {
        ThresholdConfig {
            high_warning: 30.0,
            high_critical: 40.0,
            low_warning: 10.0,
            low_critical: 0.0,
            max_rate_of_change: 5.0,
        }
    }

    mod classify_tests {
        use super::*;
        use test_case::test_case;

        #[test_case(45.0 => Severity::HighCritical ; "above critical")]
        #[test_case(40.0 => Severity::HighCritical ; "exactly critical")]
        #[test_case(35.0 => Severity::HighWarning ; "above warning")]
        #[test_case(30.0 => Severity::HighWarning ; "exactly warning")]
        #[test_case(20.0 => Severity::Normal ; "inside band")]
        #[test_case(10.0 => Severity::LowWarning ; "exactly low warning")]
        #[test_case(5.0 => Severity::LowWarning ; "below low warning")]
        #[test_case(0.0 => Severity::LowCritical ; "exactly low critical")]
        #[test_case(-3.0 => Severity::LowCritical ; "below low critical")]
        fn classification(temp: f64) -> Severity {
            classify(temp, &cfg()).0
        }

        #[test]
        fn just_inside_band_is_normal() {
            assert_eq!(classify(10.1, &cfg()).0, Severity::Normal);
            assert_eq!(classify(29.9, &cfg()).0, Severity::Normal);
        }

        #[test]
        fn high_critical_message_names_threshold() {
            let (_, message) = classify(46.0, &cfg());
            assert_eq!(
                message,
                "CRITICAL: temperature 46°C exceeds critical threshold 40°C"
            );
        }

        #[test]
        fn low_warning_message_names_threshold() {
            let (_, message) = classify(7.5, &cfg());
            assert_eq!(
                message,
                "WARNING: temperature 7.5°C below warning threshold 10°C"
            );
        }

        #[test]
        fn normal_message_reports_value() {
            let (_, message) = classify(22.5, &cfg());
            assert_eq!(message, "temperature normal: 22.5°C");
        }

        #[test]
        fn inverted_thresholds_follow_check_order() {
            // high_warning above high_critical: the critical check still
            // runs first, so anything at or above it is critical.
            let inverted = ThresholdConfig {
                high_warning: 50.0,
                high_critical: 40.0,
                ..cfg()
            };
            assert_eq!(classify(45.0, &inverted).0, Severity::HighCritical);
        }

        #[test]
        fn overlapping_low_and_high_favours_high_side() {
            // A low_warning above high_warning would trap every value; the
            // high-side checks win because they are evaluated first.
            let overlapping = ThresholdConfig {
                high_warning: 20.0,
                high_critical: 40.0,
                low_warning: 25.0,
                low_critical: 0.0,
                max_rate_of_change: 5.0,
            };
            assert_eq!(classify(22.0, &overlapping).0, Severity::HighWarning);
        }
    }

    mod check_rate_tests {
        use super::*;

        #[test]
        fn no_prior_reading_returns_none() {
            let now = Utc::now();
            assert!(check_rate(30.0, None, now, 5.0).is_none());
            assert!(check_rate(-50.0, None, now, 5.0).is_none());
        }

        #[test]
        fn zero_elapsed_returns_none() {
            let now = Utc::now();
            let prior = Reading::new(20.0, now);
            assert!(check_rate(30.0, Some(&prior), now, 5.0).is_none());
        }

        #[test]
        fn ten_degrees_in_one_minute_trips_default_limit() {
            let now = Utc::now();
            let prior = Reading::new(20.0, now - Duration::minutes(1));
            let result = check_rate(30.0, Some(&prior), now, 5.0);
            let (severity, message) = result.expect("rate alert");
            assert_eq!(severity, Severity::RapidChange);
            assert_eq!(
                message,
                "ALERT: rapid temperature change detected: 10.0°C/min (threshold: 5°C/min)"
            );
        }

        #[test]
        fn slow_drift_is_quiet() {
            // 3°C over five minutes is 0.6°C/min, well under the limit.
            let now = Utc::now();
            let prior = Reading::new(20.0, now - Duration::minutes(5));
            assert!(check_rate(23.0, Some(&prior), now, 5.0).is_none());
        }

        #[test]
        fn falling_temperature_counts_too() {
            let now = Utc::now();
            let prior = Reading::new(30.0, now - Duration::minutes(1));
            let result = check_rate(20.0, Some(&prior), now, 5.0);
            assert!(result.is_some());
        }

        #[test]
        fn rate_exactly_at_limit_is_quiet() {
            // 5°C in one minute equals the limit; only strictly faster trips.
            let now = Utc::now();
            let prior = Reading::new(20.0, now - Duration::minutes(1));
            assert!(check_rate(25.0, Some(&prior), now, 5.0).is_none());
        }

        #[test]
        fn prior_in_the_future_returns_none() {
            let now = Utc::now();
            let prior = Reading::new(20.0, now + Duration::minutes(1));
            assert!(check_rate(30.0, Some(&prior), now, 5.0).is_none());
        }
    }
}

use std::cmp::Ordering;
use log::warn;
use crate::formatting::{clock_time, describe_time};
use crate::models::snapshot::WeatherSnapshot;
use crate::rules::AlertRule;

/// The alert selected by an evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct TriggeredAlert {
    pub rule: AlertRule,
    pub pressure_drop: f64,
    pub current_pressure: f64,
    pub min_pressure: f64,
    pub time_of_minimum: i64,
    pub message: String,
    pub dedup_key: String,
}

/// Lowest pressure found within a horizon and when it occurs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizonMinimum {
    pub pressure: f64,
    pub timestamp: i64,
}

/// A rule that crossed its threshold, before any message is built
#[derive(Debug, Clone, Copy)]
struct Candidate {
    rule: AlertRule,
    pressure_drop: f64,
    minimum: HorizonMinimum,
}

/// Finds the lowest pressure from now until `horizon_hours` ahead
///
/// The current reading is the baseline. At most the first `horizon_hours + 1` hourly
/// entries are visited and of those only entries at most `horizon_hours` after the current
/// timestamp count (the horizon edge itself is included). Entries too far from the current
/// timestamp to subtract are skipped. Only strictly lower values replace the minimum, so
/// the earliest of equal minimums wins.
///
/// # Arguments
///
/// * 'snapshot' - current reading and hourly forecast
/// * 'horizon_hours' - how far ahead to look
pub fn min_in_horizon(snapshot: &WeatherSnapshot, horizon_hours: u32) -> HorizonMinimum {
    let mut minimum = HorizonMinimum {
        pressure: snapshot.current_pressure,
        timestamp: snapshot.current_timestamp,
    };

    for entry in snapshot.hourly_forecasts.iter().take(horizon_hours as usize + 1) {
        let Some(elapsed_seconds) = entry.timestamp.checked_sub(snapshot.current_timestamp) else {
            continue;
        };
        let elapsed_hours = elapsed_seconds as f64 / 3600.0;
        if elapsed_hours <= horizon_hours as f64 && entry.pressure < minimum.pressure {
            minimum = HorizonMinimum { pressure: entry.pressure, timestamp: entry.timestamp };
        }
    }

    minimum
}

/// Evaluates all rules against a snapshot and returns the single most important alert, if any
///
/// Among firing rules the winner is picked by lowest severity, then largest drop,
/// then shortest horizon. Full ties keep rule order.
///
/// # Arguments
///
/// * 'snapshot' - current reading and hourly forecast
/// * 'rules' - the rules to evaluate
pub fn evaluate(snapshot: &WeatherSnapshot, rules: &[AlertRule]) -> Option<TriggeredAlert> {
    if !snapshot.current_pressure.is_finite() {
        return None;
    }

    let mut candidates = rules
        .iter()
        .filter_map(|rule| {
            let minimum = min_in_horizon(snapshot, rule.horizon_hours);
            let pressure_drop = snapshot.current_pressure - minimum.pressure;

            if pressure_drop >= rule.drop_threshold_hpa {
                Some(Candidate { rule: *rule, pressure_drop, minimum })
            } else {
                None
            }
        })
        .collect::<Vec<Candidate>>();

    candidates.sort_by(priority);

    candidates
        .first()
        .map(|c| build_alert(snapshot, c))
}

/// Priority ordering: severity ascending, drop descending, horizon ascending
fn priority(a: &Candidate, b: &Candidate) -> Ordering {
    a.rule.severity.cmp(&b.rule.severity)
        .then_with(|| b.pressure_drop.total_cmp(&a.pressure_drop))
        .then_with(|| a.rule.horizon_hours.cmp(&b.rule.horizon_hours))
}

/// Dedup key for an alert condition, equal for the same label and drop rounded to 0.1 hPa
///
/// # Arguments
///
/// * 'label' - the rule label
/// * 'pressure_drop' - drop in hPa
pub fn dedup_key(label: &str, pressure_drop: f64) -> String {
    format!("{}_drop_{:.1}hPa", label, pressure_drop)
}

/// Builds the alert, including its human-readable message
///
/// A minimum whose time can't be displayed still yields an alert, with a generic
/// time description.
///
/// # Arguments
///
/// * 'snapshot' - the evaluated snapshot
/// * 'candidate' - the selected rule and its minimum
fn build_alert(snapshot: &WeatherSnapshot, candidate: &Candidate) -> TriggeredAlert {
    let when = describe_time(candidate.minimum.timestamp, snapshot.current_timestamp);
    let clock = clock_time(candidate.minimum.timestamp);

    let (when, clock) = match (when, clock) {
        (Some(when), Some(clock)) => (when, clock),
        _ => {
            warn!("Time of minimum {} can't be displayed", candidate.minimum.timestamp);
            ("the coming hours".to_string(), "an unknown time".to_string())
        }
    };

    let message = format!(
        "[Pressure drop warning] ({})\n\
         Between now and {}, pressure is expected to drop by about {:.1}hPa.\n\
         (now: {:.1}hPa -> forecast minimum around {}: {:.1}hPa)\n\
         Take care of headaches and feeling unwell.",
        candidate.rule.label,
        when,
        candidate.pressure_drop,
        snapshot.current_pressure,
        clock,
        candidate.minimum.pressure,
    );

    TriggeredAlert {
        rule: candidate.rule,
        pressure_drop: candidate.pressure_drop,
        current_pressure: snapshot.current_pressure,
        min_pressure: candidate.minimum.pressure,
        time_of_minimum: candidate.minimum.timestamp,
        message,
        dedup_key: dedup_key(candidate.rule.label, candidate.pressure_drop),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::snapshot::HourlyPressure;
    use crate::rules::ALERT_RULES;

    const T0: i64 = 1749034217;

    fn snapshot(current: f64, series: &[(i64, f64)]) -> WeatherSnapshot {
        WeatherSnapshot {
            current_pressure: current,
            current_timestamp: T0,
            hourly_forecasts: series
                .iter()
                .map(|(offset, p)| HourlyPressure { timestamp: T0 + offset, pressure: *p })
                .collect(),
        }
    }

    fn hourly(pressures: &[f64]) -> WeatherSnapshot {
        let series = pressures
            .iter()
            .enumerate()
            .map(|(i, p)| (i as i64 * 3600, *p))
            .collect::<Vec<(i64, f64)>>();
        snapshot(pressures[0], &series)
    }

    fn rule(horizon_hours: u32, drop_threshold_hpa: f64, label: &'static str, severity: u8) -> AlertRule {
        AlertRule { horizon_hours, drop_threshold_hpa, label, severity }
    }

    #[test]
    fn test_no_alert() {
        let s = hourly(&[1013.0, 1012.0, 1011.0]);
        assert!(evaluate(&s, &ALERT_RULES).is_none());
    }

    #[test]
    fn test_no_alert_when_rising() {
        let s = hourly(&[1013.0, 1013.0, 1014.0, 1016.0, 1020.0]);
        assert!(evaluate(&s, &ALERT_RULES).is_none());
    }

    #[test]
    fn test_alert_3hours() {
        let s = hourly(&[1013.0, 1010.0, 1009.0]);
        let alert = evaluate(&s, &ALERT_RULES).unwrap();

        assert_eq!(alert.rule, ALERT_RULES[0]);
        assert!(alert.message.contains("Rapid drop (3h forecast)"));
        assert_eq!(alert.pressure_drop, 4.0);
        assert_eq!(alert.time_of_minimum, T0 + 7200);
        assert_eq!(alert.dedup_key, "Rapid drop (3h forecast)_drop_4.0hPa");
    }

    #[test]
    fn test_alert_12hours_minimum_before_recovery() {
        let s = hourly(&[
            1013.0, 1008.0, 1003.0, 1002.0, 1001.0, 1000.0,
            999.0, 998.0, 997.0, 996.0, 995.0, 1013.0,
        ]);
        let alert = evaluate(&s, &ALERT_RULES).unwrap();

        assert_eq!(alert.rule, ALERT_RULES[1]);
        assert!(alert.message.contains("Significant drop (12h forecast)"));
        assert_eq!(alert.min_pressure, 995.0);
        assert_eq!(alert.time_of_minimum, T0 + 10 * 3600);
    }

    #[test]
    fn test_alert_24hours() {
        let s = snapshot(1013.0, &[(0, 1013.0), (12 * 3600, 1008.0), (24 * 3600, 1007.0)]);
        let alert = evaluate(&s, &ALERT_RULES).unwrap();

        assert_eq!(alert.rule, ALERT_RULES[4]);
        assert!(alert.message.contains("Daily change, take care (24h forecast)"));
    }

    #[test]
    fn test_threshold_boundary_fires() {
        let rules = [rule(3, 3.0, "three", 1)];

        let exact = hourly(&[1013.0, 1011.0, 1010.0]);
        assert!(evaluate(&exact, &rules).is_some());

        let short = hourly(&[1013.0, 1011.0, 1010.5]);
        assert!(evaluate(&short, &rules).is_none());
    }

    #[test]
    fn test_horizon_edge_is_inclusive() {
        let rules = [rule(3, 3.0, "three", 1)];

        let at_edge = snapshot(1013.0, &[(0, 1013.0), (3 * 3600, 1010.0)]);
        assert!(evaluate(&at_edge, &rules).is_some());

        let past_edge = snapshot(1013.0, &[(0, 1013.0), (3 * 3600 + 1, 1010.0)]);
        assert!(evaluate(&past_edge, &rules).is_none());
    }

    #[test]
    fn test_short_series_is_scanned_as_is() {
        let rules = [rule(24, 5.0, "day", 1)];
        let s = hourly(&[1013.0, 1007.0]);
        let alert = evaluate(&s, &rules).unwrap();
        assert_eq!(alert.pressure_drop, 6.0);

        let empty = snapshot(1013.0, &[]);
        assert!(evaluate(&empty, &rules).is_none());
    }

    #[test]
    fn test_first_minimum_wins_on_tie() {
        let s = hourly(&[1013.0, 1009.0, 1009.0, 1010.0]);
        let minimum = min_in_horizon(&s, 3);
        assert_eq!(minimum, HorizonMinimum { pressure: 1009.0, timestamp: T0 + 3600 });
    }

    #[test]
    fn test_current_reading_is_baseline() {
        let s = snapshot(1005.0, &[(0, 1013.0), (3600, 1010.0)]);
        let minimum = min_in_horizon(&s, 3);
        assert_eq!(minimum, HorizonMinimum { pressure: 1005.0, timestamp: T0 });
    }

    #[test]
    fn test_severity_wins_over_drop_and_horizon() {
        let rules = [
            rule(3, 1.0, "short big", 2),
            rule(12, 1.0, "long small", 1),
        ];
        let s = hourly(&[1013.0, 1005.0, 1005.0, 1005.0, 1012.0, 1012.0]);
        let alert = evaluate(&s, &rules).unwrap();
        assert_eq!(alert.rule.label, "long small");
    }

    #[test]
    fn test_larger_drop_wins_on_equal_severity() {
        let rules = [
            rule(2, 1.0, "two", 1),
            rule(5, 1.0, "five", 1),
        ];
        let s = hourly(&[1013.0, 1011.0, 1011.0, 1009.0, 1009.0, 1009.0]);
        let alert = evaluate(&s, &rules).unwrap();
        assert_eq!(alert.rule.label, "five");
        assert_eq!(alert.pressure_drop, 4.0);
    }

    #[test]
    fn test_shorter_horizon_wins_on_equal_drop() {
        let rules = [
            rule(6, 1.0, "six", 1),
            rule(3, 1.0, "three", 1),
        ];
        let s = hourly(&[1013.0, 1010.0, 1011.0, 1012.0, 1012.0]);
        let alert = evaluate(&s, &rules).unwrap();
        assert_eq!(alert.rule.label, "three");
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let s = hourly(&[1013.0, 1010.0, 1007.0, 1005.0]);
        assert_eq!(evaluate(&s, &ALERT_RULES), evaluate(&s, &ALERT_RULES));
    }

    #[test]
    fn test_non_finite_current_pressure() {
        let s = snapshot(f64::NAN, &[(0, 1000.0)]);
        assert!(evaluate(&s, &ALERT_RULES).is_none());
    }

    #[test]
    fn test_message_contents() {
        let s = hourly(&[1013.0, 1010.0, 1009.0]);
        let alert = evaluate(&s, &ALERT_RULES).unwrap();

        assert!(alert.message.contains("Between now and today at 21:50,"));
        assert!(alert.message.contains("about 4.0hPa"));
        assert!(alert.message.contains("now: 1013.0hPa"));
        assert!(alert.message.contains("around 21:50: 1009.0hPa"));
    }

    #[test]
    fn test_message_for_other_day() {
        let rules = [rule(6, 3.0, "six", 1)];
        let s = hourly(&[1013.0, 1012.0, 1011.0, 1010.0, 1009.0, 1008.0]);
        let alert = evaluate(&s, &rules).unwrap();
        assert!(alert.message.contains("Between now and 06/05 00:50"));
    }

    #[test]
    fn test_scan_stops_after_horizon_plus_one_entries() {
        // Half-hourly series: index 6 is exactly 3h ahead but beyond the first four entries
        let rules = [rule(3, 3.0, "three", 1)];
        let s = snapshot(1013.0, &[
            (0, 1013.0), (1800, 1013.0), (3600, 1012.0), (5400, 1012.0),
            (7200, 1011.0), (9000, 1011.0), (10800, 1009.0),
        ]);

        assert!(evaluate(&s, &rules).is_none());
        assert_eq!(min_in_horizon(&s, 3), HorizonMinimum { pressure: 1012.0, timestamp: T0 + 3600 });
    }

    #[test]
    fn test_extreme_timestamps_are_skipped() {
        let rules = [rule(3, 3.0, "three", 1)];
        let s = WeatherSnapshot {
            current_pressure: 1013.0,
            current_timestamp: i64::MIN,
            hourly_forecasts: vec![HourlyPressure { timestamp: 1, pressure: 1000.0 }],
        };

        assert_eq!(min_in_horizon(&s, 3), HorizonMinimum { pressure: 1013.0, timestamp: i64::MIN });
        assert!(evaluate(&s, &rules).is_none());
    }

    #[test]
    fn test_alert_kept_when_time_cannot_be_displayed() {
        let rules = [rule(3, 3.0, "three", 1)];
        let current = i64::MAX - 7200;
        let s = WeatherSnapshot {
            current_pressure: 1013.0,
            current_timestamp: current,
            hourly_forecasts: vec![
                HourlyPressure { timestamp: current, pressure: 1013.0 },
                HourlyPressure { timestamp: current + 3600, pressure: 1009.0 },
            ],
        };

        let alert = evaluate(&s, &rules).unwrap();
        assert_eq!(alert.dedup_key, "three_drop_4.0hPa");
        assert!(alert.message.contains("Between now and the coming hours,"));
    }

    #[test]
    fn test_dedup_key_rounding() {
        assert_eq!(dedup_key("x", 3.04), "x_drop_3.0hPa");
        assert_eq!(dedup_key("x", 3.06), "x_drop_3.1hPa");
        assert_eq!(dedup_key("x", 3.04), dedup_key("x", 2.96));
        assert_ne!(dedup_key("x", 3.0), dedup_key("y", 3.0));
    }
}

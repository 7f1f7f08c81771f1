use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize};
use crate::evaluator::TriggeredAlert;

/// What was last notified, persisted between runs
///
/// The serialized field names are kept compatible with state files written by earlier
/// versions.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationState {
    #[serde(rename = "timestamp", default, deserialize_with = "epoch_seconds")]
    pub last_sent_timestamp: i64,
    #[serde(rename = "message_summary", default)]
    pub last_dedup_key: String,
}

/// Latest epoch second accepted from a state file, 9999-12-31T23:59:59Z
const MAX_EPOCH_SECONDS: f64 = 253_402_300_799.0;

/// Older state files carry fractional epoch seconds. Anything that isn't a plausible
/// non-negative epoch second is rejected.
fn epoch_seconds<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let seconds = f64::deserialize(deserializer)?;
    if !(0.0..=MAX_EPOCH_SECONDS).contains(&seconds) {
        return Err(D::Error::custom(format!("timestamp out of range: {}", seconds)));
    }

    Ok(seconds as i64)
}

/// Decides whether an alert should be dispatched and what the next state is
///
/// An alert is sent when the cooldown has passed since the last notification or when
/// its dedup key differs from the last one sent. With no alert, a remembered dedup key
/// is cleared (keeping the timestamp) so the same condition can notify again right away
/// when it reappears.
///
/// The caller dispatches when the returned flag is true and persists the returned state
/// after a successful dispatch, or whenever it differs from the given state without a send.
///
/// # Arguments
///
/// * 'alert' - the evaluated alert, if any
/// * 'state' - the last persisted state
/// * 'now' - current time, epoch seconds
/// * 'cooldown_seconds' - minimum time between notifications of the same condition
pub fn decide(
    alert: Option<&TriggeredAlert>,
    state: &NotificationState,
    now: i64,
    cooldown_seconds: i64) -> (bool, NotificationState) {

    match alert {
        Some(alert) => {
            if now.saturating_sub(state.last_sent_timestamp) > cooldown_seconds || state.last_dedup_key != alert.dedup_key {
                (true, NotificationState { last_sent_timestamp: now, last_dedup_key: alert.dedup_key.clone() })
            } else {
                (false, state.clone())
            }
        },
        None => {
            if state.last_dedup_key.is_empty() {
                (false, state.clone())
            } else {
                (false, NotificationState { last_sent_timestamp: state.last_sent_timestamp, last_dedup_key: String::new() })
            }
        },
    }
}

use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use crate::backup::{load_state, save_onecall_dump, save_state};
use crate::evaluator::evaluate;
use crate::gate::{decide, NotificationState};
use crate::manager_discord::errors::DiscordError;
use crate::manager_owm::errors::OwmError;
use crate::manager_owm::parse_onecall;
use crate::rules::ALERT_RULES;

/// Anything that can hand over a raw One Call forecast document
pub trait ForecastSource {
    fn fetch_forecast(&self) -> Result<String, OwmError>;
}

/// Anything that can deliver a rendered alert message
pub trait NotificationSink {
    fn send(&self, message: &str) -> Result<(), DiscordError>;
}

/// Settings for a single run
pub struct RunSettings<'a> {
    pub state_file: &'a str,
    pub debug_dir: Option<&'a str>,
    pub cooldown_seconds: i64,
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Forecast could not be fetched or parsed, nothing evaluated
    NoData,
    /// No alert and nothing to clear
    Quiet,
    /// No alert, the remembered alert condition was cleared
    Cleared,
    /// Alert found but within cooldown for the same condition
    Suppressed,
    /// Alert delivered and state saved
    Sent,
    /// Alert delivery failed, state left as is
    SendFailed,
}

/// Runs one fetch, evaluate and notify cycle
///
/// State is only written after a successful send or when a remembered alert condition
/// was cleared. Failures are logged and end the run without touching the state.
///
/// # Arguments
///
/// * 'source' - forecast provider
/// * 'sink' - where alerts are delivered
/// * 'settings' - file locations and cooldown
/// * 'now' - the time of the run
pub fn run_once(
    source: &impl ForecastSource,
    sink: &impl NotificationSink,
    settings: &RunSettings,
    now: DateTime<Utc>) -> RunOutcome {

    let state = load_state(settings.state_file);

    let json = match source.fetch_forecast() {
        Ok(json) => json,
        Err(e) => {
            error!("Could not retrieve weather data: {}", e);
            return RunOutcome::NoData;
        }
    };

    if let Some(debug_dir) = settings.debug_dir {
        if let Err(e) = save_onecall_dump(debug_dir, &json, now) {
            warn!("Could not save forecast dump: {}", e);
        }
    }

    let onecall = match parse_onecall(&json) {
        Ok(onecall) => onecall,
        Err(e) => {
            error!("Could not parse weather data: {}", e);
            return RunOutcome::NoData;
        }
    };

    debug!("Forecast received for lat {:?}, lon {:?}, timezone {:?}", onecall.lat, onecall.lon, onecall.timezone);

    let alert = match onecall.to_snapshot() {
        Some(snapshot) => evaluate(&snapshot, &ALERT_RULES),
        None => {
            warn!("Invalid weather data format");
            None
        }
    };

    let (should_send, new_state) = decide(alert.as_ref(), &state, now.timestamp(), settings.cooldown_seconds);

    match alert {
        Some(alert) => {
            info!("Alert detected: {} (severity {}, now {:.1}hPa, minimum {:.1}hPa at {})",
                  alert.dedup_key, alert.rule.severity, alert.current_pressure, alert.min_pressure, alert.time_of_minimum);

            if !should_send {
                info!("Notification '{}' is within cooldown period ({}s) of the last one. Skipping.",
                      alert.dedup_key, settings.cooldown_seconds);
                return RunOutcome::Suppressed;
            }

            if let Err(e) = sink.send(&alert.message) {
                error!("Error sending notification: {}", e);
                return RunOutcome::SendFailed;
            }
            info!("Notification sent: {}", alert.dedup_key);

            persist(settings.state_file, &new_state);
            RunOutcome::Sent
        },
        None => {
            info!("No significant pressure drop detected");

            if new_state != state {
                info!("Conditions have stabilized, clearing last alert: {}", state.last_dedup_key);
                persist(settings.state_file, &new_state);
                RunOutcome::Cleared
            } else {
                RunOutcome::Quiet
            }
        },
    }
}

fn persist(state_file: &str, state: &NotificationState) {
    if let Err(e) = save_state(state_file, state) {
        error!("Error saving last notification status: {}", e);
    }
}

use std::fs;
use std::path::Path;
use anyhow::Result;
use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use glob::glob;
use log::warn;
use crate::errors::{DumpError, StateError};
use crate::gate::NotificationState;

/// Loads the last notification state
///
/// A missing file gives the default state. An unreadable or corrupt file is logged
/// and also gives the default state.
///
/// # Arguments
///
/// * 'state_file' - path to the state file
pub fn load_state(state_file: &str) -> NotificationState {
    if !Path::new(state_file).exists() {
        return NotificationState::default();
    }

    match read_state(state_file) {
        Ok(state) => state,
        Err(e) => {
            warn!("Error loading last notification status from {}: {}", state_file, e);
            NotificationState::default()
        }
    }
}

fn read_state(state_file: &str) -> Result<NotificationState> {
    let json = fs::read_to_string(state_file)?;
    let state: NotificationState = serde_json::from_str(&json)?;

    Ok(state)
}

/// Saves the last notification state
///
/// # Arguments
///
/// * 'state_file' - path to the state file
/// * 'state' - the state to save
pub fn save_state(state_file: &str, state: &NotificationState) -> Result<(), StateError> {
    let json = serde_json::to_string(state)?;
    fs::write(state_file, json)?;

    Ok(())
}

/// Saves a raw forecast document pretty printed, and removes dumps older than 48 hours
///
/// # Arguments
///
/// * 'debug_dir' - the directory to save the file to, including trailing separator
/// * 'json' - the raw document
/// * 'now' - time used for the file name and for aging out old dumps
pub fn save_onecall_dump(debug_dir: &str, json: &str, now: DateTime<Utc>) -> Result<(), DumpError> {
    let file_path = format!("{}{}_onecall.json", debug_dir, now.format("%Y%m%d%H%M%S"));

    let value: serde_json::Value = serde_json::from_str(json)?;
    fs::write(file_path, serde_json::to_string_pretty(&value)?)?;

    let pattern = format!("{}*_onecall.json", debug_dir);
    for entry in glob(&pattern)? {
        if let Ok(path) = entry {
            let stamp = path.file_name()
                .and_then(|n| n.to_str())
                .and_then(|n| n.get(0..14))
                .and_then(|s| NaiveDateTime::parse_from_str(s, "%Y%m%d%H%M%S").ok());

            if let Some(stamp) = stamp {
                if now - stamp.and_utc() > Duration::hours(48) {
                    fs::remove_file(path)?;
                }
            }
        }
    }

    Ok(())
}

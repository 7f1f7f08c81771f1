use std::env;
use anyhow::{Context, Result};
use chrono::Utc;
use log::info;
use crate::formatting::to_display_time;
use crate::initialization::init;
use crate::worker::{run_once, RunSettings};

mod backup;
mod config;
mod errors;
mod evaluator;
mod formatting;
mod gate;
mod initialization;
mod manager_discord;
mod manager_owm;
mod models;
mod rules;
mod worker;

/// Runs a single check. Meant to be started periodically by an external scheduler
/// such as cron or a systemd timer.
fn main() -> Result<()> {
    let config_path = env::args().nth(1)
        .or_else(|| env::var("CONFIG_PATH").ok())
        .unwrap_or("config.toml".to_string());

    let (config, mgr) = init(&config_path)
        .with_context(|| format!("initialization from {} failed", config_path))?;

    let started = Utc::now();
    info!("Run started at {}", jst_stamp(started.timestamp()));

    let settings = RunSettings {
        state_file: &config.files.state_file,
        debug_dir: config.files.debug_dir.as_deref(),
        cooldown_seconds: config.notification.cooldown_seconds,
    };
    let outcome = run_once(&mgr.owm, &mgr.discord, &settings, started);

    let finished = Utc::now();
    let duration = (finished - started).num_milliseconds() as f64 / 1000.0;
    info!("Run finished at {} with outcome {:?}. Duration: {:.2}s", jst_stamp(finished.timestamp()), outcome, duration);

    Ok(())
}

fn jst_stamp(timestamp: i64) -> String {
    to_display_time(timestamp)
        .map(|t| format!("{} JST", t.format("%Y-%m-%d %H:%M:%S")))
        .unwrap_or_default()
}

use std::env;
use std::fs;
use log::LevelFilter;
use serde::Deserialize;
use crate::errors::ConfigError;

#[derive(Deserialize)]
pub struct GeoRef {
    pub lat: f64,
    pub long: f64,
}

#[derive(Deserialize)]
pub struct OpenWeatherMapParameters {
    #[serde(default)]
    pub api_key: String,
}

#[derive(Deserialize)]
pub struct DiscordParameters {
    #[serde(default)]
    pub webhook_url: String,
    pub username: Option<String>,
}

#[derive(Deserialize)]
pub struct NotificationParameters {
    #[serde(default = "default_cooldown_seconds")]
    pub cooldown_seconds: i64,
}

impl Default for NotificationParameters {
    fn default() -> Self {
        Self { cooldown_seconds: default_cooldown_seconds() }
    }
}

#[derive(Deserialize)]
pub struct Files {
    #[serde(default = "default_state_file")]
    pub state_file: String,
    pub debug_dir: Option<String>,
}

impl Default for Files {
    fn default() -> Self {
        Self { state_file: default_state_file(), debug_dir: None }
    }
}

#[derive(Deserialize)]
pub struct General {
    pub log_path: String,
    pub log_level: LevelFilter,
    pub log_to_stdout: bool,
}

#[derive(Deserialize)]
pub struct Config {
    pub geo_ref: GeoRef,
    pub open_weather_map: OpenWeatherMapParameters,
    pub discord: DiscordParameters,
    #[serde(default)]
    pub notification: NotificationParameters,
    #[serde(default)]
    pub files: Files,
    pub general: General,
}

fn default_cooldown_seconds() -> i64 { 3 * 60 * 60 }

fn default_state_file() -> String { "last_notification_status.json".to_string() }

/// Loads the configuration file and returns a struct with all configuration items
///
/// Credentials and coordinates can be overridden by the environment variables
/// OPENWEATHERMAP_API_KEY, DISCORD_WEBHOOK_URL, LATITUDE and LONGITUDE.
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
pub fn load_config(config_path: &str) -> Result<Config, ConfigError> {

    let toml = fs::read_to_string(config_path)?;
    let mut config: Config = toml::from_str(&toml)?;

    apply_env_overrides(&mut config)?;
    validate(&config)?;

    Ok(config)
}

/// Replaces configured values with any values given in the environment
///
/// # Arguments
///
/// * 'config' - configuration to update
fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
    if let Ok(v) = env::var("OPENWEATHERMAP_API_KEY") {
        config.open_weather_map.api_key = v;
    }
    if let Ok(v) = env::var("DISCORD_WEBHOOK_URL") {
        config.discord.webhook_url = v;
    }
    if let Ok(v) = env::var("LATITUDE") {
        config.geo_ref.lat = v.parse::<f64>().map_err(|_| ConfigError::from("LATITUDE is not a number"))?;
    }
    if let Ok(v) = env::var("LONGITUDE") {
        config.geo_ref.long = v.parse::<f64>().map_err(|_| ConfigError::from("LONGITUDE is not a number"))?;
    }

    Ok(())
}

/// Rejects configurations that can't produce a meaningful run
///
/// # Arguments
///
/// * 'config' - configuration to check
fn validate(config: &Config) -> Result<(), ConfigError> {
    if is_unset(&config.open_weather_map.api_key) {
        return Err(ConfigError::from("OpenWeatherMap API key is not configured"));
    }
    if is_unset(&config.discord.webhook_url) {
        return Err(ConfigError::from("Discord webhook URL is not configured"));
    }
    if !(-90.0..=90.0).contains(&config.geo_ref.lat) || !(-180.0..=180.0).contains(&config.geo_ref.long) {
        return Err(ConfigError::from("geo_ref is out of range"));
    }
    if config.notification.cooldown_seconds < 0 {
        return Err(ConfigError::from("cooldown_seconds must not be negative"));
    }

    Ok(())
}

fn is_unset(value: &str) -> bool {
    value.trim().is_empty() || value.starts_with("YOUR_")
}

use thiserror::Error;
use crate::manager_discord::errors::DiscordError;

#[derive(Error, Debug)]
#[error("ConfigError: {0}")]
pub struct ConfigError(pub String);

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self { ConfigError(e.to_string()) }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self { ConfigError(e.to_string()) }
}
impl From<&str> for ConfigError {
    fn from(e: &str) -> Self { ConfigError(e.to_string()) }
}

#[derive(Error, Debug)]
#[error("StateError: {0}")]
pub struct StateError(pub String);

impl From<std::io::Error> for StateError {
    fn from(e: std::io::Error) -> Self { StateError(e.to_string()) }
}
impl From<serde_json::Error> for StateError {
    fn from(e: serde_json::Error) -> Self { StateError(e.to_string()) }
}

#[derive(Error, Debug)]
#[error("DumpError: {0}")]
pub struct DumpError(pub String);

impl From<std::io::Error> for DumpError {
    fn from(e: std::io::Error) -> Self { DumpError(e.to_string()) }
}
impl From<serde_json::Error> for DumpError {
    fn from(e: serde_json::Error) -> Self { DumpError(e.to_string()) }
}
impl From<glob::PatternError> for DumpError {
    fn from(e: glob::PatternError) -> Self { DumpError(e.to_string()) }
}

#[derive(Error, Debug)]
pub enum PressureWatchInitError {
    #[error("PressureWatchInitError::Config: {0}")]
    Config(#[from] ConfigError),
    #[error("PressureWatchInitError::Logging: {0}")]
    Logging(String),
    #[error("PressureWatchInitError::Discord: {0}")]
    Discord(#[from] DiscordError),
}

impl From<std::io::Error> for PressureWatchInitError {
    fn from(e: std::io::Error) -> Self { PressureWatchInitError::Logging(e.to_string()) }
}
impl From<log4rs::config::runtime::ConfigErrors> for PressureWatchInitError {
    fn from(e: log4rs::config::runtime::ConfigErrors) -> Self { PressureWatchInitError::Logging(e.to_string()) }
}
impl From<log::SetLoggerError> for PressureWatchInitError {
    fn from(e: log::SetLoggerError) -> Self { PressureWatchInitError::Logging(e.to_string()) }
}

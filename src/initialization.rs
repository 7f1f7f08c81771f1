use log::info;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config as LogConfig, Root};
use log4rs::encode::pattern::PatternEncoder;
use crate::config::{load_config, Config, General};
use crate::errors::PressureWatchInitError;
use crate::manager_discord::Discord;
use crate::manager_owm::OpenWeatherMap;

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} {h({l}):<5} {t} - {m}{n}";

/// Managers for the external collaborators
pub struct Mgr {
    pub owm: OpenWeatherMap,
    pub discord: Discord,
}

/// Loads configuration, sets up logging and returns config and managers
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
pub fn init(config_path: &str) -> Result<(Config, Mgr), PressureWatchInitError> {
    let config = load_config(config_path)?;

    setup_logging(&config.general)?;

    info!("pressurewatch version: {}", env!("CARGO_PKG_VERSION"));

    let owm = OpenWeatherMap::new(
        config.open_weather_map.api_key.clone(),
        config.geo_ref.lat,
        config.geo_ref.long,
    );
    let discord = Discord::new(config.discord.webhook_url.clone(), config.discord.username.clone())?;

    Ok((config, Mgr { owm, discord }))
}

/// Sets up log4rs with a file appender and, if configured, a stdout appender
///
/// # Arguments
///
/// * 'general' - general configuration holding log path and level
fn setup_logging(general: &General) -> Result<(), PressureWatchInitError> {
    let file = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build(&general.log_path)?;

    let mut builder = LogConfig::builder()
        .appender(Appender::builder().build("file", Box::new(file)));
    let mut root = Root::builder().appender("file");

    if general.log_to_stdout {
        let stdout = ConsoleAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build();
        builder = builder.appender(Appender::builder().build("stdout", Box::new(stdout)));
        root = root.appender("stdout");
    }

    let log_config = builder.build(root.build(general.log_level))?;
    log4rs::init_config(log_config)?;

    Ok(())
}

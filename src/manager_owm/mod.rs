pub mod errors;

use std::time::Duration;
use ureq::Agent;
use crate::manager_owm::errors::OwmError;
use crate::models::owm_onecall::OneCall;
use crate::worker::ForecastSource;

const ONECALL_URL: &str = "https://api.openweathermap.org/data/3.0/onecall";

/// Struct for fetching hourly forecasts from OpenWeatherMap One Call 3.0
pub struct OpenWeatherMap {
    agent: Agent,
    api_key: String,
    lat: f64,
    long: f64,
}

impl OpenWeatherMap {
    /// Returns an OpenWeatherMap struct ready for fetching forecasts for the given point
    ///
    /// # Arguments
    ///
    /// * 'api_key' - OpenWeatherMap api key
    /// * 'lat' - latitude for the point to get forecasts for
    /// * 'long' - longitude for the point to get forecasts for
    pub fn new(api_key: String, lat: f64, long: f64) -> OpenWeatherMap {
        let config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(15)))
            .build();

        let agent = config.into();

        Self { agent, api_key, lat, long }
    }

    /// Retrieves the raw One Call document, current weather and hourly forecast only
    ///
    pub fn get_onecall_json(&self) -> Result<String, OwmError> {
        let json = self.agent
            .get(ONECALL_URL)
            .query("lat", self.lat.to_string())
            .query("lon", self.long.to_string())
            .query("exclude", "minutely,daily,alerts")
            .query("appid", &self.api_key)
            .query("units", "metric")
            .query("lang", "ja")
            .call()?
            .body_mut()
            .read_to_string()?;

        Ok(json)
    }
}

impl ForecastSource for OpenWeatherMap {
    fn fetch_forecast(&self) -> Result<String, OwmError> {
        self.get_onecall_json()
    }
}

/// Parses a raw One Call document
///
/// # Arguments
///
/// * 'json' - the document as returned from OpenWeatherMap
pub fn parse_onecall(json: &str) -> Result<OneCall, OwmError> {
    Ok(serde_json::from_str(json)?)
}

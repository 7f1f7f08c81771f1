use serde::Deserialize;
use crate::models::snapshot::{HourlyPressure, WeatherSnapshot};

#[derive(Deserialize, Default)]
pub struct CurrentWeather {
    #[serde(default)]
    pub dt: Option<i64>,
    #[serde(default)]
    pub pressure: Option<f64>,
}

#[derive(Deserialize, Default)]
pub struct HourlyWeather {
    #[serde(default)]
    pub dt: Option<i64>,
    #[serde(default)]
    pub pressure: Option<f64>,
}

/// The parts of an OpenWeatherMap One Call 3.0 response we care about.
/// Everything is optional so that a response with missing fields still parses
/// and can be rejected as a malformed snapshot rather than a broken document.
#[derive(Deserialize, Default)]
pub struct OneCall {
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub current: Option<CurrentWeather>,
    #[serde(default)]
    pub hourly: Option<Vec<HourlyWeather>>,
}

impl OneCall {
    /// Converts the response into a weather snapshot
    ///
    /// Returns None if the current reading, its timestamp, the hourly series or
    /// any field of an hourly entry is missing.
    pub fn to_snapshot(&self) -> Option<WeatherSnapshot> {
        let current = self.current.as_ref()?;
        let hourly = self.hourly.as_ref()?;

        let hourly_forecasts = hourly
            .iter()
            .map(|h| Some(HourlyPressure { timestamp: h.dt?, pressure: h.pressure? }))
            .collect::<Option<Vec<HourlyPressure>>>()?;

        Some(WeatherSnapshot {
            current_pressure: current.pressure?,
            current_timestamp: current.dt?,
            hourly_forecasts,
        })
    }
}

/// One hourly forecast point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourlyPressure {
    pub timestamp: i64,
    pub pressure: f64,
}

/// Current reading plus the hourly pressure forecast, ordered by increasing time.
/// Index 0 of the forecast is conventionally the current hour.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub current_pressure: f64,
    pub current_timestamp: i64,
    pub hourly_forecasts: Vec<HourlyPressure>,
}

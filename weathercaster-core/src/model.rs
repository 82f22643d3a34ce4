use chrono::{DateTime, Utc};

/// Weather conditions for a single forecast timestamp, in the API's base
/// units: Kelvin for temperatures, meters/second for wind speed.
///
/// Every measurement is optional because the upstream API may leave any of
/// them out. An absent value is never replaced by zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Conditions {
    pub description: String,
    pub temperature: Option<f64>,
    pub feels_like: Option<f64>,
    /// Relative humidity, percent.
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    /// Time the forecast applies to, when the API reports one.
    pub forecast_time: Option<DateTime<Utc>>,
}

impl Conditions {
    /// Conditions with a description and no measurements.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            temperature: None,
            feels_like: None,
            humidity: None,
            wind_speed: None,
            forecast_time: None,
        }
    }
}

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::WeatherError;

/// Offset used by the Fahrenheit conversion. Kept at 273 rather than 273.15
/// so output stays compatible with earlier releases.
const FAHRENHEIT_KELVIN_OFFSET: f64 = 273.0;
const CELSIUS_KELVIN_OFFSET: f64 = 273.15;
const MPH_PER_METER_PER_SECOND: f64 = 2.236936;

/// Unit system used for display. The upstream API always reports Kelvin and
/// meters/second; conversion happens locally.
///
/// Settings files accept the same spellings as the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum UnitSystem {
    /// Kelvin, meters/second.
    Standard,
    /// Celsius, meters/second.
    Metric,
    /// Fahrenheit, miles/hour.
    #[default]
    Imperial,
}

impl UnitSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Standard => "standard",
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }

    pub const fn all() -> &'static [UnitSystem] {
        &[UnitSystem::Standard, UnitSystem::Metric, UnitSystem::Imperial]
    }

    /// Value of the `units` query parameter. `Standard` is the upstream
    /// default and has no parameter.
    pub fn query_value(&self) -> Option<&'static str> {
        match self {
            UnitSystem::Standard => None,
            UnitSystem::Metric => Some("metric"),
            UnitSystem::Imperial => Some("imperial"),
        }
    }

    pub fn temperature_label(&self) -> &'static str {
        match self {
            UnitSystem::Standard => "ºK",
            UnitSystem::Metric => "ºC",
            UnitSystem::Imperial => "ºF",
        }
    }

    pub fn speed_label(&self) -> &'static str {
        match self {
            UnitSystem::Standard | UnitSystem::Metric => "m/s",
            UnitSystem::Imperial => "MPH",
        }
    }

    /// Convert a temperature from Kelvin.
    pub fn convert_temperature(&self, kelvin: f64) -> f64 {
        match self {
            UnitSystem::Standard => kelvin,
            UnitSystem::Metric => kelvin - CELSIUS_KELVIN_OFFSET,
            UnitSystem::Imperial => 1.8 * (kelvin - FAHRENHEIT_KELVIN_OFFSET) + 32.0,
        }
    }

    /// Convert a speed from meters/second.
    pub fn convert_speed(&self, meters_per_second: f64) -> f64 {
        match self {
            UnitSystem::Standard | UnitSystem::Metric => meters_per_second,
            UnitSystem::Imperial => meters_per_second * MPH_PER_METER_PER_SECOND,
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for UnitSystem {
    type Error = WeatherError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.trim().to_lowercase();

        match lower.as_str() {
            "standard" | "kelvin" | "k" => Ok(UnitSystem::Standard),
            "metric" | "celsius" | "c" => Ok(UnitSystem::Metric),
            "imperial" | "fahrenheit" | "f" => Ok(UnitSystem::Imperial),
            _ => Err(WeatherError::InvalidUnitSystem(value.to_string())),
        }
    }
}

impl TryFrom<String> for UnitSystem {
    type Error = WeatherError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        UnitSystem::try_from(value.as_str())
    }
}

impl FromStr for UnitSystem {
    type Err = WeatherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UnitSystem::try_from(s)
    }
}

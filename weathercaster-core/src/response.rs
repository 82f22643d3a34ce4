//! Normalization of `/data/2.5/forecast` responses into [`Conditions`].
//!
//! Only the fields we display are mapped; anything else in the payload is
//! ignored. Only the first forecast entry is ever looked at.

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use crate::{error::WeatherError, model::Conditions};

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    #[serde(default)]
    list: Vec<OwForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: Option<i64>,
    #[serde(default)]
    weather: Vec<OwWeather>,
    main: Option<OwMain>,
    wind: Option<OwWind>,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct OwMain {
    temp: Option<f64>,
    feels_like: Option<f64>,
    humidity: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct OwWind {
    speed: Option<f64>,
}

/// Check the HTTP status, then parse the body.
///
/// Any non-2xx status is reported as [`WeatherError::UpstreamStatus`]
/// without attempting to decode the body.
pub fn normalize_response(status: StatusCode, body: &[u8]) -> Result<Conditions, WeatherError> {
    if !status.is_success() {
        return Err(WeatherError::upstream_status(status, body));
    }

    parse_forecast_response(body)
}

/// Parse a forecast payload into [`Conditions`].
pub fn parse_forecast_response(body: &[u8]) -> Result<Conditions, WeatherError> {
    let parsed: OwForecastResponse = serde_json::from_slice(body)?;

    let entry = parsed
        .list
        .into_iter()
        .next()
        .ok_or_else(|| WeatherError::MalformedResponse("empty `list` in forecast".to_string()))?;

    let weather = entry.weather.into_iter().next().ok_or_else(|| {
        WeatherError::MalformedResponse("empty `list[0].weather` in forecast".to_string())
    })?;

    let description = weather.description.ok_or_else(|| {
        WeatherError::MalformedResponse(
            "missing `list[0].weather[0].description` in forecast".to_string(),
        )
    })?;

    let main = entry.main.unwrap_or_default();
    let wind = entry.wind.unwrap_or_default();
    let forecast_time = entry.dt.and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0));

    debug!(
        %description,
        temperature = ?main.temp,
        feels_like = ?main.feels_like,
        humidity = ?main.humidity,
        wind_speed = ?wind.speed,
        forecast_time = ?forecast_time,
        "parsed forecast entry"
    );

    Ok(Conditions {
        description,
        temperature: main.temp,
        feels_like: main.feels_like,
        humidity: main.humidity,
        wind_speed: wind.speed,
        forecast_time,
    })
}

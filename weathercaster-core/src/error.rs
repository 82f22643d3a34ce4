use reqwest::StatusCode;
use thiserror::Error;

/// Maximum number of upstream body bytes carried into an error message.
const MAX_ERROR_BODY_LENGTH: usize = 200;

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("could not reach weather API: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status} returned from weather API: {body}")]
    UpstreamStatus { status: StatusCode, body: String },

    #[error("failed to decode weather API response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("unexpected response from weather API: {0}")]
    MalformedResponse(String),

    #[error("unit system {0:?} is invalid, use standard (k), metric (c) or imperial (f)")]
    InvalidUnitSystem(String),

    #[error("location must not be empty")]
    InvalidLocation,

    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl WeatherError {
    /// Build an `UpstreamStatus` error, keeping only the head of a long body.
    pub fn upstream_status(status: StatusCode, body: &[u8]) -> Self {
        let body = String::from_utf8_lossy(body);
        WeatherError::UpstreamStatus {
            status,
            body: truncate_body(body.trim_end()),
        }
    }
}

/// A failed forecast, tagged with the location it was requested for.
#[derive(Error, Debug)]
#[error("error querying weather API for location {location:?}: {source}")]
pub struct ForecastError {
    pub location: String,
    #[source]
    pub source: WeatherError,
}

impl ForecastError {
    pub fn new(location: impl Into<String>, source: WeatherError) -> Self {
        Self {
            location: location.into(),
            source,
        }
    }
}

fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY_LENGTH {
        return body.to_string();
    }

    let mut end = MAX_ERROR_BODY_LENGTH;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

//! Core library for the `weathercaster` CLI.
//!
//! This crate defines:
//! - Forecast request URLs for the OpenWeatherMap `/forecast` API
//! - Normalization of the API's JSON into [`Conditions`]
//! - Unit conversion and the one-line forecast text
//! - Client configuration and the on-disk settings file
//!
//! The URL builder, normalizer and formatter are pure functions; only
//! [`WeatherClient`] touches the network.

pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod model;
pub mod request;
pub mod response;
pub mod transport;
pub mod units;

pub use client::WeatherClient;
pub use config::{ClientConfig, Settings};
pub use error::{ForecastError, WeatherError};
pub use format::format_forecast;
pub use model::Conditions;
pub use request::{LocationQuery, RequestSpec, build_forecast_url};
pub use response::{normalize_response, parse_forecast_response};
pub use transport::{HttpTransport, RawResponse, Transport};
pub use units::UnitSystem;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::{fmt::Debug, time::Duration};

use crate::error::WeatherError;

/// Status and body of an HTTP response, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

/// Performs the single GET request for a forecast.
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    async fn get(&self, url: &str) -> Result<RawResponse, WeatherError>;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, WeatherError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("weathercaster/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, WeatherError> {
        // The URL carries the API key, so it is stripped from transport errors.
        let res = self.http.get(url).send().await.map_err(|e| e.without_url())?;

        let status = res.status();
        let body = res.bytes().await.map_err(|e| e.without_url())?.to_vec();

        Ok(RawResponse { status, body })
    }
}

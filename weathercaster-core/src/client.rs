//! One-shot forecast client: build the URL, fetch once, normalize, format.

use tracing::debug;

use crate::{
    config::ClientConfig,
    error::{ForecastError, WeatherError},
    format::format_forecast,
    model::Conditions,
    request::{LocationQuery, RequestSpec},
    response::normalize_response,
    transport::{HttpTransport, Transport},
};

#[derive(Debug)]
pub struct WeatherClient<T = HttpTransport> {
    config: ClientConfig,
    transport: T,
}

impl WeatherClient<HttpTransport> {
    /// Validate `config` and build a client backed by `reqwest`.
    pub fn new(config: ClientConfig) -> Result<Self, WeatherError> {
        config.validate()?;
        let transport = HttpTransport::new(config.timeout)?;
        Ok(Self { config, transport })
    }
}

impl<T: Transport> WeatherClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self, WeatherError> {
        config.validate()?;
        Ok(Self { config, transport })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn request_spec(&self, location: LocationQuery) -> RequestSpec {
        RequestSpec::new(
            self.config.api_host.as_str(),
            self.config.api_path.as_str(),
            self.config.api_key.as_str(),
            location,
            self.config.units,
        )
    }

    /// Fetch and normalize the conditions for `location`.
    pub async fn conditions(&self, location: &str) -> Result<Conditions, ForecastError> {
        self.fetch_conditions(location)
            .await
            .map_err(|source| ForecastError::new(location, source))
    }

    /// Fetch the conditions for `location` and render them in the configured units.
    pub async fn forecast(&self, location: &str) -> Result<String, ForecastError> {
        let conditions = self.conditions(location).await?;
        Ok(format_forecast(&conditions, self.config.units))
    }

    async fn fetch_conditions(&self, location: &str) -> Result<Conditions, WeatherError> {
        let spec = self.request_spec(LocationQuery::new(location)?);

        debug!(
            host = %spec.api_host,
            path = %spec.api_path,
            location = %spec.location,
            units = %spec.units,
            "requesting forecast"
        );

        let res = self.transport.get(&spec.into_url()).await?;
        debug!(status = %res.status, bytes = res.body.len(), "weather API responded");

        normalize_response(res.status, &res.body)
    }
}

use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fmt, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{error::WeatherError, units::UnitSystem};

pub const DEFAULT_API_HOST: &str = "https://api.openweathermap.org";
pub const DEFAULT_API_PATH: &str = "/data/2.5/forecast";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Settings for one [`WeatherClient`](crate::WeatherClient).
///
/// Built once with [`ClientConfig::new`], adjusted through the `with_*`
/// methods, and checked by [`ClientConfig::validate`] when the client is
/// constructed.
#[derive(Clone, PartialEq)]
pub struct ClientConfig {
    pub api_key: String,
    pub api_host: String,
    pub api_path: String,
    pub units: UnitSystem,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_host: DEFAULT_API_HOST.to_string(),
            api_path: DEFAULT_API_PATH.to_string(),
            units: UnitSystem::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_api_host(self, api_host: impl Into<String>) -> Self {
        Self {
            api_host: api_host.into(),
            ..self
        }
    }

    pub fn with_api_path(self, api_path: impl Into<String>) -> Self {
        Self {
            api_path: api_path.into(),
            ..self
        }
    }

    pub fn with_units(self, units: UnitSystem) -> Self {
        Self { units, ..self }
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self { timeout, ..self }
    }

    pub fn validate(&self) -> Result<(), WeatherError> {
        if self.api_key.trim().is_empty() {
            return Err(WeatherError::InvalidConfig(
                "API key must not be empty".to_string(),
            ));
        }

        if !(self.api_host.starts_with("http://") || self.api_host.starts_with("https://")) {
            return Err(WeatherError::InvalidConfig(format!(
                "API host {:?} must start with http:// or https://",
                self.api_host
            )));
        }

        if !self.api_path.is_empty() && !self.api_path.starts_with('/') {
            return Err(WeatherError::InvalidConfig(format!(
                "API path {:?} must start with '/'",
                self.api_path
            )));
        }

        if self.timeout.is_zero() {
            return Err(WeatherError::InvalidConfig(
                "timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"****")
            .field("api_host", &self.api_host)
            .field("api_path", &self.api_path)
            .field("units", &self.units)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// User preferences stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// location = "Great Neck Plaza,NY,US"
/// units = "imperial"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Settings {
    pub api_key: Option<String>,
    /// Location used when none is given on the command line.
    pub location: Option<String>,
    pub units: Option<UnitSystem>,
}

impl Settings {
    /// Load settings from disk, or return empty settings if the file doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: nothing configured yet.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(settings)
    }

    /// Save settings to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize settings to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weathercaster", "weathercaster")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// API key from the settings file, ignoring blank values.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.trim().is_empty())
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref().filter(|location| !location.trim().is_empty())
    }
}

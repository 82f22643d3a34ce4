use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Select, Text};
use std::time::Duration;

use weathercaster_core::{
    ClientConfig, Settings, UnitSystem, WeatherClient,
    config::{DEFAULT_API_HOST, DEFAULT_TIMEOUT},
};

const API_KEYS_URL: &str = "https://home.openweathermap.org/api_keys";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weathercaster", version, about = "Brief weather forecasts from OpenWeatherMap")]
pub struct Cli {
    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the forecast for a location.
    Show(ShowArgs),

    /// Store an API key, default location and units in the settings file.
    Configure,

    /// Print the path of the settings file.
    ConfigPath,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Location, e.g. "London" or "Great Neck Plaza,NY,US".
    #[arg(env = "WEATHERCASTER_LOCATION")]
    pub location: Option<String>,

    /// Units: standard (k), metric (c) or imperial (f). Defaults to imperial.
    #[arg(short, long, env = "WEATHERCASTER_UNITS")]
    pub units: Option<UnitSystem>,

    /// OpenWeatherMap API key.
    #[arg(long, env = "OPENWEATHERMAP_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, env = "WEATHERCASTER_API_HOST", default_value = DEFAULT_API_HOST)]
    pub api_host: String,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout_secs: u64,
}

impl ShowArgs {
    /// Location from the command line or environment, falling back to the settings file.
    pub fn location(&self, settings: &Settings) -> Result<String> {
        self.location
            .as_deref()
            .filter(|location| !location.trim().is_empty())
            .or_else(|| settings.location())
            .map(str::to_owned)
            .ok_or_else(|| {
                anyhow!(
                    "No location given.\n\
                     Hint: pass one, e.g. `weathercaster show \"Great Neck Plaza,NY,US\"`, \
                     set WEATHERCASTER_LOCATION, or run `weathercaster configure`."
                )
            })
    }

    pub fn client_config(&self, settings: &Settings) -> Result<ClientConfig> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| settings.api_key())
            .ok_or_else(|| {
                anyhow!(
                    "No OpenWeatherMap API key configured.\n\
                     Hint: set OPENWEATHERMAP_API_KEY, pass --api-key, \
                     or run `weathercaster configure`.\n\
                     To obtain an API key, see {API_KEYS_URL}"
                )
            })?;

        let units = self.units.or(settings.units).unwrap_or_default();

        let config = ClientConfig::new(api_key)
            .with_api_host(self.api_host.as_str())
            .with_units(units)
            .with_timeout(Duration::from_secs(self.timeout_secs));

        config.validate()?;
        Ok(config)
    }
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Show(args) => show(args).await,
            Command::Configure => configure(),
            Command::ConfigPath => {
                println!("{}", Settings::config_file_path()?.display());
                Ok(())
            }
        }
    }
}

async fn show(args: ShowArgs) -> Result<()> {
    let settings = Settings::load()?;
    let location = args.location(&settings)?;
    let config = args.client_config(&settings)?;

    tracing::debug!(?config, "client configuration resolved");

    let client = WeatherClient::new(config).context("Error creating weather client")?;
    let forecast = client.forecast(&location).await?;

    println!("{forecast}");
    Ok(())
}

fn configure() -> Result<()> {
    let mut settings = Settings::load()?;

    let api_key = Password::new("OpenWeatherMap API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .with_help_message(&format!("Leave blank to keep the current key. Keys: {API_KEYS_URL}"))
        .prompt()?;
    if !api_key.trim().is_empty() {
        settings.api_key = Some(api_key.trim().to_string());
    }

    let location = Text::new("Default location:")
        .with_default(settings.location().unwrap_or(""))
        .with_help_message("e.g. London or Great Neck Plaza,NY,US; blank for none")
        .prompt()?;
    settings.location = Some(location.trim().to_string()).filter(|l| !l.is_empty());

    let current = settings.units.unwrap_or_default();
    let choices = UnitSystem::all().to_vec();
    let cursor = choices.iter().position(|u| *u == current).unwrap_or_default();
    let units = Select::new("Default units:", choices)
        .with_starting_cursor(cursor)
        .prompt()?;
    settings.units = Some(units);

    let path = settings.save()?;
    println!("Settings saved to {}", path.display());

    if settings.api_key().is_none() {
        println!(
            "No API key stored yet; set OPENWEATHERMAP_API_KEY \
             or re-run `weathercaster configure`."
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn show_args(args: &[&str]) -> ShowArgs {
        let mut argv = vec!["weathercaster", "show"];
        argv.extend_from_slice(args);

        let cli = Cli::try_parse_from(argv).expect("arguments should parse");
        match cli.command {
            Command::Show(args) => args,
            other => panic!("expected show, got {other:?}"),
        }
    }

    #[test]
    fn parses_show_with_flags() {
        let args = show_args(&[
            "Paris,FR",
            "-u",
            "c",
            "--api-key",
            "KEY",
            "--timeout-secs",
            "7",
        ]);

        assert_eq!(args.location.as_deref(), Some("Paris,FR"));
        assert_eq!(args.units, Some(UnitSystem::Metric));
        assert_eq!(args.api_key.as_deref(), Some("KEY"));
        assert_eq!(args.timeout_secs, 7);
    }

    #[test]
    fn rejects_unknown_units() {
        let argv = ["weathercaster", "show", "Paris", "--units", "rankine"];
        let err = Cli::try_parse_from(argv).unwrap_err();
        assert!(err.to_string().contains("rankine"));
    }

    #[test]
    fn flags_take_precedence_over_settings() {
        let args = show_args(&["Paris", "--units", "standard", "--api-key", "FLAG_KEY"]);
        let settings = Settings {
            api_key: Some("FILE_KEY".into()),
            location: Some("London".into()),
            units: Some(UnitSystem::Metric),
        };

        assert_eq!(args.location(&settings).unwrap(), "Paris");

        let config = args.client_config(&settings).unwrap();
        assert_eq!(config.api_key, "FLAG_KEY");
        assert_eq!(config.units, UnitSystem::Standard);
    }

    #[test]
    fn settings_fill_in_missing_values() {
        let args = ShowArgs {
            location: None,
            units: None,
            api_key: None,
            api_host: DEFAULT_API_HOST.to_string(),
            timeout_secs: 3,
        };
        let settings = Settings {
            api_key: Some("FILE_KEY".into()),
            location: Some("London".into()),
            units: Some(UnitSystem::Metric),
        };

        assert_eq!(args.location(&settings).unwrap(), "London");

        let config = args.client_config(&settings).unwrap();
        assert_eq!(config.api_key, "FILE_KEY");
        assert_eq!(config.units, UnitSystem::Metric);
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn units_default_to_imperial() {
        let args = ShowArgs {
            location: Some("Paris".into()),
            units: None,
            api_key: Some("KEY".into()),
            api_host: DEFAULT_API_HOST.to_string(),
            timeout_secs: 3,
        };

        let config = args.client_config(&Settings::default()).unwrap();
        assert_eq!(config.units, UnitSystem::Imperial);
    }

    #[test]
    fn missing_api_key_has_hint() {
        let args = ShowArgs {
            location: Some("Paris".into()),
            units: None,
            api_key: None,
            api_host: DEFAULT_API_HOST.to_string(),
            timeout_secs: 3,
        };

        let msg = args.client_config(&Settings::default())
            .unwrap_err()
            .to_string();
        assert!(msg.contains("No OpenWeatherMap API key configured"));
        assert!(msg.contains(API_KEYS_URL));
    }

    #[test]
    fn missing_location_has_hint() {
        let args = ShowArgs {
            location: Some("   ".into()),
            units: None,
            api_key: Some("KEY".into()),
            api_host: DEFAULT_API_HOST.to_string(),
            timeout_secs: 3,
        };

        let msg = args.location(&Settings::default())
            .unwrap_err()
            .to_string();
        assert!(msg.contains("No location given"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let args = ShowArgs {
            location: Some("Paris".into()),
            units: None,
            api_key: Some("KEY".into()),
            api_host: DEFAULT_API_HOST.to_string(),
            timeout_secs: 0,
        };

        let msg = args.client_config(&Settings::default())
            .unwrap_err()
            .to_string();
        assert!(msg.contains("timeout"));
    }
}

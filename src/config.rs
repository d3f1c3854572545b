//! Configuration management
//!
//! Handles loading configuration from files and environment variables,
//! and provides validation for all configuration settings. Provider
//! credentials are additionally read from the `WEATHERAPI_KEY` and
//! `OPENWEATHER_API_KEY` environment variables the dashboard has always
//! used.

use crate::MezegError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `mezeg` application
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MezegConfig {
    /// Weather provider configuration
    pub weather: WeatherConfig,
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Session store configuration
    pub session: SessionConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Default application settings
    pub defaults: DefaultsConfig,
}

/// Weather provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// WeatherAPI.com key (preferred provider when set)
    pub weatherapi_key: Option<String>,
    /// OpenWeatherMap key (second choice)
    pub openweather_key: Option<String>,
    /// Base URL for WeatherAPI.com
    pub weatherapi_base_url: String,
    /// Base URL for OpenWeatherMap
    pub openweather_base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
    /// Forecast horizon in days
    pub forecast_days: u8,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Port to bind on
    pub port: u16,
}

/// Session store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Session TTL in minutes
    pub ttl_minutes: u32,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

/// Default application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// City selected when none is given
    pub default_city: String,
    /// Default display language ("en" or "he")
    pub language: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            weatherapi_key: None,
            openweather_key: None,
            weatherapi_base_url: "https://api.weatherapi.com/v1".to_string(),
            openweather_base_url: "https://api.openweathermap.org/data/2.5".to_string(),
            timeout_seconds: 30,
            forecast_days: 5,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 8080 }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { ttl_minutes: 120 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            default_city: "Jerusalem".to_string(),
            language: "en".to_string(),
        }
    }
}

impl MezegConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment variable overrides with MEZEG_ prefix
        builder = builder.add_source(
            Environment::with_prefix("MEZEG")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: MezegConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_env_credentials();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("mezeg").join("config.toml"))
    }

    /// Pick up the provider credentials from the environment variables the
    /// original dashboard used, unless the config file already set them.
    pub fn apply_env_credentials(&mut self) {
        if self.weather.weatherapi_key.is_none() {
            self.weather.weatherapi_key = std::env::var("WEATHERAPI_KEY").ok().filter(|k| !k.is_empty());
        }
        if self.weather.openweather_key.is_none() {
            self.weather.openweather_key =
                std::env::var("OPENWEATHER_API_KEY").ok().filter(|k| !k.is_empty());
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate API keys when provided (they are optional; the mock
    /// generator serves data without one)
    pub fn validate_api_keys(&self) -> Result<()> {
        for (name, key) in [
            ("WeatherAPI", &self.weather.weatherapi_key),
            ("OpenWeatherMap", &self.weather.openweather_key),
        ] {
            if let Some(key) = key {
                if key.len() < 8 {
                    return Err(MezegError::config(format!(
                        "{name} API key appears to be invalid (too short). Please check your API key."
                    ))
                    .into());
                }
                if key.len() > 100 {
                    return Err(MezegError::config(format!(
                        "{name} API key appears to be invalid (too long). Please check your API key."
                    ))
                    .into());
                }
            }
        }
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.weather.timeout_seconds == 0 || self.weather.timeout_seconds > 300 {
            return Err(
                MezegError::config("Weather API timeout must be between 1 and 300 seconds").into(),
            );
        }

        if self.weather.forecast_days == 0 || self.weather.forecast_days > 10 {
            return Err(
                MezegError::config("Forecast horizon must be between 1 and 10 days").into(),
            );
        }

        if self.session.ttl_minutes == 0 || self.session.ttl_minutes > 1440 {
            return Err(
                MezegError::config("Session TTL must be between 1 and 1440 minutes").into(),
            );
        }

        if self.server.port == 0 {
            return Err(MezegError::config("Server port cannot be 0").into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(MezegError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(MezegError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for url in [
            &self.weather.weatherapi_base_url,
            &self.weather.openweather_base_url,
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(MezegError::config(
                    "Weather API base URLs must be valid HTTP or HTTPS URLs",
                )
                .into());
            }
        }

        if crate::cities::find(&self.defaults.default_city).is_none() {
            return Err(MezegError::config(format!(
                "Default city '{}' is not in the city table",
                self.defaults.default_city
            ))
            .into());
        }

        Ok(())
    }
}

//! Configuration management for the lunch bot
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::LunchError;
use crate::models::Coordinates;
use crate::selector::SelectionMode;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the lunch bot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LunchConfig {
    /// Where lunch is being decided
    pub location: LocationConfig,
    /// Weather service and the thresholds for "good" weather
    pub weather: WeatherConfig,
    /// Dine-out search service
    pub dine_out: DineOutConfig,
    /// Delivery search service
    pub delivery: DeliveryConfig,
    /// Shared HTTP settings
    pub http: HttpConfig,
    /// How a restaurant is picked from the candidates
    pub selection: SelectionConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Center point for the weather lookup and both searches
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    pub latitude: f64,
    pub longitude: f64,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Weather API key
    pub api_key: Option<String>,
    /// Base URL for weather API
    pub base_url: String,
    /// Unit system requested from the service; thresholds are in the same units
    pub units: String,
    /// Below this apparent temperature the weather is bad
    pub min_apparent_temperature: f64,
    /// Precipitation chance above which rain counts (0.0-1.0)
    pub max_precip_chance: f64,
    /// Precipitation intensity above which rain counts (0.0-1.0)
    pub max_precip_intensity: f64,
}

/// Dine-out search settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DineOutConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    /// Walking radius in meters (1 mi ~ 1610 m)
    pub walking_distance_meters: f64,
    /// Upper bound on page requests per search
    pub max_pages: u32,
}

/// Delivery search settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliveryConfig {
    pub api_key: Option<String>,
    pub base_url: String,
}

/// HTTP client settings shared by all upstream calls
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    pub mode: SelectionMode,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

// Default value functions
fn default_latitude() -> f64 {
    43.072_864
}

fn default_longitude() -> f64 {
    -89.388_124
}

fn default_weather_base_url() -> String {
    "https://api.darksky.net".to_string()
}

fn default_weather_units() -> String {
    "us".to_string()
}

fn default_min_apparent_temperature() -> f64 {
    20.0
}

fn default_max_precip_chance() -> f64 {
    0.7
}

fn default_max_precip_intensity() -> f64 {
    0.2
}

fn default_dine_out_base_url() -> String {
    "https://developers.zomato.com/api/v2.1".to_string()
}

fn default_walking_distance() -> f64 {
    1610.0
}

fn default_max_pages() -> u32 {
    20
}

fn default_delivery_base_url() -> String {
    "https://api.eatstreet.com/publicapi/v1".to_string()
}

fn default_http_timeout() -> u32 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            latitude: default_latitude(),
            longitude: default_longitude(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_weather_base_url(),
            units: default_weather_units(),
            min_apparent_temperature: default_min_apparent_temperature(),
            max_precip_chance: default_max_precip_chance(),
            max_precip_intensity: default_max_precip_intensity(),
        }
    }
}

impl Default for DineOutConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_dine_out_base_url(),
            walking_distance_meters: default_walking_distance(),
            max_pages: default_max_pages(),
        }
    }
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_delivery_base_url(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_http_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LocationConfig {
    #[must_use]
    pub fn center(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

impl LunchConfig {
    /// Load configuration from `config_path`, or the default location when `None`,
    /// with `LUNCHBOT_` environment variables layered on top
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
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

        // Environment overrides, e.g. LUNCHBOT_WEATHER__API_KEY
        builder = builder.add_source(
            Environment::with_prefix("LUNCHBOT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: LunchConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("lunchbot").join("config.toml"))
    }

    /// Apply default values to fields left empty
    pub fn apply_defaults(&mut self) {
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.weather.units.is_empty() {
            self.weather.units = default_weather_units();
        }
        if self.dine_out.base_url.is_empty() {
            self.dine_out.base_url = default_dine_out_base_url();
        }
        if self.dine_out.max_pages == 0 {
            self.dine_out.max_pages = default_max_pages();
        }
        if self.delivery.base_url.is_empty() {
            self.delivery.base_url = default_delivery_base_url();
        }
        if self.http.timeout_seconds == 0 {
            self.http.timeout_seconds = default_http_timeout();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Every upstream service needs a credential
    pub fn validate_api_keys(&self) -> Result<()> {
        let keys = [
            ("weather", &self.weather.api_key),
            ("dine_out", &self.dine_out.api_key),
            ("delivery", &self.delivery.api_key),
        ];

        for (section, key) in keys {
            match key.as_deref().map(str::trim) {
                None | Some("") => {
                    return Err(LunchError::config(format!(
                        "Missing API key for '{section}'. Set {section}.api_key or LUNCHBOT_{}__API_KEY.",
                        section.to_uppercase()
                    ))
                    .into());
                }
                Some(_) => {}
            }
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if !self.location.center().is_valid() {
            return Err(LunchError::config(format!(
                "Location ({}, {}) is not a valid coordinate",
                self.location.latitude, self.location.longitude
            ))
            .into());
        }

        if !(0.0..=1.0).contains(&self.weather.max_precip_chance) {
            return Err(LunchError::config("Maximum precipitation chance must be between 0.0 and 1.0").into());
        }

        if !(0.0..=1.0).contains(&self.weather.max_precip_intensity) {
            return Err(
                LunchError::config("Maximum precipitation intensity must be between 0.0 and 1.0").into(),
            );
        }

        if self.dine_out.walking_distance_meters <= 0.0 {
            return Err(LunchError::config("Walking distance must be positive").into());
        }

        if self.dine_out.max_pages > 100 {
            return Err(LunchError::config("Dine-out max pages cannot exceed 100").into());
        }

        if self.http.timeout_seconds > 300 {
            return Err(LunchError::config("HTTP timeout cannot exceed 300 seconds").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(LunchError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(LunchError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        let urls = [
            ("weather", &self.weather.base_url),
            ("dine_out", &self.dine_out.base_url),
            ("delivery", &self.delivery.base_url),
        ];
        for (section, url) in urls {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(LunchError::config(format!(
                    "{section} base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}

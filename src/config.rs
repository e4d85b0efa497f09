//! Configuration management for the tourism data service
//!
//! Handles loading configuration from files and environment variables,
//! and provides validation for all configuration settings.

use crate::TourismError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TourismConfig {
    /// Remote data sources
    pub sources: SourcesConfig,
    /// HTTP client settings used when fetching sources
    pub http: HttpConfig,
    /// Dashboard API server settings
    pub server: ServerConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Locations and formats of the two source files
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// Attraction table (CSV)
    pub attractions_url: String,
    /// County boundaries (GeoJSON)
    pub boundaries_url: String,
    /// Encoding label used to decode the CSV
    pub csv_encoding: String,
    /// GeoJSON property holding the county name
    pub boundary_name_field: String,
}

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u32,
    /// User agent sent with every request
    pub user_agent: String,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
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
fn default_attractions_url() -> String {
    "https://raw.githubusercontent.com/nangami29/FinalYear-project/main/nakuru_tourist_attractions.csv"
        .to_string()
}

fn default_boundaries_url() -> String {
    "https://raw.githubusercontent.com/nangami29/FinalYear-project/main/KENYAcounties.geojson"
        .to_string()
}

fn default_csv_encoding() -> String {
    "ISO-8859-1".to_string()
}

fn default_boundary_name_field() -> String {
    "NAME_1".to_string()
}

fn default_http_timeout() -> u32 {
    30
}

fn default_user_agent() -> String {
    format!("nakuru-tourism/{}", crate::VERSION)
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8501
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            attractions_url: default_attractions_url(),
            boundaries_url: default_boundaries_url(),
            csv_encoding: default_csv_encoding(),
            boundary_name_field: default_boundary_name_field(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_http_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
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

impl TourismConfig {
    /// Load configuration from `config_path` (or the default location) and
    /// `TOURISM__` environment variables
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

        // TOURISM__SOURCES__ATTRACTIONS_URL and friends
        builder = builder.add_source(
            Environment::with_prefix("TOURISM")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: TourismConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("nakuru-tourism").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.sources.attractions_url.is_empty() {
            self.sources.attractions_url = default_attractions_url();
        }
        if self.sources.boundaries_url.is_empty() {
            self.sources.boundaries_url = default_boundaries_url();
        }
        if self.sources.csv_encoding.is_empty() {
            self.sources.csv_encoding = default_csv_encoding();
        }
        if self.sources.boundary_name_field.is_empty() {
            self.sources.boundary_name_field = default_boundary_name_field();
        }
        if self.http.timeout_seconds == 0 {
            self.http.timeout_seconds = default_http_timeout();
        }
        if self.http.user_agent.is_empty() {
            self.http.user_agent = default_user_agent();
        }
        if self.server.host.is_empty() {
            self.server.host = default_host();
        }
        if self.server.port == 0 {
            self.server.port = default_port();
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
        self.validate_sources()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate source URLs and the CSV encoding label
    fn validate_sources(&self) -> Result<()> {
        for (name, url) in [
            ("attractions_url", &self.sources.attractions_url),
            ("boundaries_url", &self.sources.boundaries_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(TourismError::config(format!(
                    "Source {name} must be a valid HTTP or HTTPS URL, got '{url}'"
                ))
                .into());
            }
        }

        if encoding_rs::Encoding::for_label(self.sources.csv_encoding.as_bytes()).is_none() {
            return Err(TourismError::config(format!(
                "Unknown CSV encoding label '{}'",
                self.sources.csv_encoding
            ))
            .into());
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.http.timeout_seconds > 300 {
            return Err(
                TourismError::config("HTTP timeout cannot exceed 300 seconds").into(),
            );
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TourismError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TourismError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}

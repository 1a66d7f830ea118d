//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the NailSync API server.
//! It retrieves configuration values from environment variables and provides defaults
//! where appropriate.
//!
//! ## Environment Variables
//!
//! The following environment variables are used:
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Request timeout (default: 30)
//! - `SLOT_AVERAGE_SERVICE_MINUTES`: Minimum gap offered as a slot (default: 90)
//! - `SLOT_BUSINESS_START` / `SLOT_BUSINESS_END`: Opening hours as `HH:MM`
//!   (default: 08:00 / 19:00)
//! - `SLOT_GRANULARITY_MINUTES`: Rounding step for "now" (default: 30)
//! - `SLOT_DEFAULT_SERVICE_MINUTES`: Duration assumed for appointments
//!   without a known service duration (default: 60)

use chrono::NaiveTime;
use eyre::{Result, WrapErr};
use nailsync_core::availability::SlotConfig;
use std::{env, str::FromStr};
use tracing::Level;

/// Configuration for the NailSync API server
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Business hours and thresholds for slot suggestions
    pub slots: SlotConfig,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The DATABASE_URL environment variable is not set
    /// - The API_PORT value cannot be parsed as a u16
    /// - A `SLOT_*` value cannot be parsed or the resulting slot settings
    ///   are inconsistent
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        // Network settings
        let host = var("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = var("API_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url = var("DATABASE_URL")
            .ok_or_else(|| eyre::eyre!("DATABASE_URL environment variable must be set"))?;

        // Logging settings
        let log_level = match var("LOG_LEVEL").unwrap_or_else(|| "info".to_string()).as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        // CORS settings
        let cors_origins = var("API_CORS_ORIGINS")
            .map(|origins| origins.split(',').map(|s| s.trim().to_string()).collect());

        // Performance settings
        let request_timeout = var("API_REQUEST_TIMEOUT_SECONDS")
            .and_then(|value| value.parse().ok())
            .unwrap_or(30);

        let slots = slot_config_from_vars(&var)?;

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            request_timeout,
            slots,
        })
    }

    /// Returns the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn slot_config_from_vars(var: &impl Fn(&str) -> Option<String>) -> Result<SlotConfig> {
    let defaults = SlotConfig::default();

    let config = SlotConfig {
        average_service_minutes: parse_or(var, "SLOT_AVERAGE_SERVICE_MINUTES", defaults.average_service_minutes)?,
        business_start: parse_time_or(var, "SLOT_BUSINESS_START", defaults.business_start)?,
        business_end: parse_time_or(var, "SLOT_BUSINESS_END", defaults.business_end)?,
        granularity_minutes: parse_or(var, "SLOT_GRANULARITY_MINUTES", defaults.granularity_minutes)?,
        default_service_minutes: parse_or(var, "SLOT_DEFAULT_SERVICE_MINUTES", defaults.default_service_minutes)?,
    };

    config.validate().wrap_err("Invalid slot configuration")?;
    Ok(config)
}

fn parse_or<T>(var: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match var(key) {
        Some(value) => value
            .trim()
            .parse()
            .wrap_err_with(|| format!("Invalid {} value", key)),
        None => Ok(default),
    }
}

fn parse_time_or(
    var: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: NaiveTime,
) -> Result<NaiveTime> {
    match var(key) {
        Some(value) => NaiveTime::parse_from_str(value.trim(), "%H:%M")
            .wrap_err_with(|| format!("Invalid {} value, expected HH:MM", key)),
        None => Ok(default),
    }
}

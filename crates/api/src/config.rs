//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the Slotbook API server.
//! It retrieves configuration values from environment variables and provides defaults
//! where appropriate.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `ADMIN_PASSWORD_HASH`: Argon2 PHC string guarding the admin endpoints
//! - `API_REQUEST_TIMEOUT_SECONDS`: Per-request timeout (default: 30)
//! - `BOOKING_TIMEZONE`: IANA timezone the weekly availability is written in (default: "UTC")
//! - `BOOKING_WINDOW_DAYS`: Length of the slot window when `to` is omitted (default: 14)
//! - `MAX_BOOKING_WINDOW_DAYS`: Longest window a slot query may cover (default: 90)

use chrono_tz::Tz;
use slotbook_core::resolver::{DEFAULT_MAX_WINDOW_DAYS, DEFAULT_WINDOW_DAYS, WINDOW_DAYS_LIMIT};
use eyre::{eyre, Result, WrapErr};
use std::env;
use tracing::Level;

/// Configuration for the Slotbook API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use slotbook_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}:{}", config.host, config.port);
///     Ok(())
/// }
/// ```
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

    /// Argon2 hash of the admin password; admin routes are closed without it
    pub admin_password_hash: Option<String>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Timezone in which weekly availability blocks and query dates are read
    pub timezone: Tz,

    /// Default window length in days when a query has no `to` date
    pub booking_window_days: i64,

    /// Longest span a single slot query may cover, counted from its start
    pub max_booking_window_days: i64,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The DATABASE_URL environment variable is not set
    /// - The API_PORT value cannot be parsed as a u16
    /// - The BOOKING_TIMEZONE value is not a known IANA timezone
    /// - MAX_BOOKING_WINDOW_DAYS or BOOKING_WINDOW_DAYS is out of range
    pub fn from_env() -> Result<Self> {
        // Network settings
        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url = env::var("DATABASE_URL")
            .wrap_err("DATABASE_URL environment variable must be set")?;

        // Logging settings
        let log_level = parse_log_level(&env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

        // CORS settings
        let cors_origins = env::var("API_CORS_ORIGINS").ok().map(|origins| {
            origins.split(',').map(|s| s.trim().to_string()).collect()
        });

        // Security settings
        let admin_password_hash = env::var("ADMIN_PASSWORD_HASH")
            .ok()
            .filter(|hash| !hash.trim().is_empty());

        // Performance settings
        let request_timeout = env::var("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        // Booking settings
        let timezone = parse_timezone(&env::var("BOOKING_TIMEZONE").unwrap_or_else(|_| "UTC".to_string()))?;
        let max_booking_window_days = parse_window_days(
            "MAX_BOOKING_WINDOW_DAYS",
            env::var("MAX_BOOKING_WINDOW_DAYS").ok().as_deref(),
            DEFAULT_MAX_WINDOW_DAYS,
            WINDOW_DAYS_LIMIT,
        )?;
        let booking_window_days = parse_window_days(
            "BOOKING_WINDOW_DAYS",
            env::var("BOOKING_WINDOW_DAYS").ok().as_deref(),
            DEFAULT_WINDOW_DAYS.min(max_booking_window_days),
            max_booking_window_days,
        )?;

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            admin_password_hash,
            request_timeout,
            timezone,
            booking_window_days,
            max_booking_window_days,
        })
    }

    /// Returns the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Maps a `LOG_LEVEL` value to a tracing level, falling back to INFO.
pub fn parse_log_level(raw: &str) -> Level {
    match raw.trim().to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Parses a day count that must lie in `1..=max`. Unset means `default`.
pub fn parse_window_days(name: &str, raw: Option<&str>, default: i64, max: i64) -> Result<i64> {
    let Some(raw) = raw else {
        return Ok(default);
    };

    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|days| (1..=max).contains(days))
        .ok_or_else(|| eyre!("{} must be a whole number of days between 1 and {}", name, max))
}

pub fn parse_timezone(raw: &str) -> Result<Tz> {
    raw.trim()
        .parse::<Tz>()
        .map_err(|e| eyre!("Invalid BOOKING_TIMEZONE value: {}", e))
}

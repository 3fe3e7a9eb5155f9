use eyre::{eyre, Result};
use std::{env, time::Duration};

pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com/calendar/v3";
pub const DEFAULT_CALENDAR_ID: &str = "primary";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 5;

/// Configuration for the external calendar integration.
///
/// Without an access token the integration is considered unconfigured and
/// slot resolution proceeds without busy filtering.
#[derive(Debug, Clone)]
pub struct CalendarConfig {
    /// Calendar whose busy intervals block slots (defaults to "primary")
    pub calendar_id: String,
    /// OAuth access token for the calendar API
    pub access_token: Option<String>,
    /// Base URL of the calendar API
    pub api_base: String,
    /// Upper bound for a single busy-interval lookup
    pub timeout: Duration,
}

impl CalendarConfig {
    pub fn new(calendar_id: impl Into<String>, access_token: Option<String>) -> Self {
        Self {
            calendar_id: calendar_id.into(),
            access_token,
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let calendar_id =
            env::var("GOOGLE_CALENDAR_ID").unwrap_or_else(|_| DEFAULT_CALENDAR_ID.to_string());

        let access_token = env::var("GOOGLE_CALENDAR_ACCESS_TOKEN")
            .ok()
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());

        let api_base =
            env::var("GOOGLE_CALENDAR_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());

        let timeout_seconds = match env::var("CALENDAR_TIMEOUT_SECONDS") {
            Ok(raw) => raw
                .parse::<u64>()
                .map_err(|_| eyre!("CALENDAR_TIMEOUT_SECONDS must be a whole number of seconds"))?,
            Err(_) => DEFAULT_TIMEOUT_SECONDS,
        };

        Ok(Self {
            calendar_id,
            access_token,
            api_base,
            timeout: Duration::from_secs(timeout_seconds),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.access_token.is_some()
    }

    /// Endpoint of the free/busy query.
    pub fn free_busy_url(&self) -> String {
        format!("{}/freeBusy", self.api_base.trim_end_matches('/'))
    }
}

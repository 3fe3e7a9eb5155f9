//! # Google Calendar Client
//!
//! Reads busy intervals through the Calendar API `freeBusy` query:
//!
//! ```text
//! POST {api_base}/freeBusy
//! { "timeMin": "...", "timeMax": "...", "items": [{ "id": "<calendar id>" }] }
//! ```
//!
//! The response lists busy periods per requested calendar, or per-calendar
//! errors when the calendar cannot be read.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eyre::Result;
use serde::{Deserialize, Serialize};
use slotbook_core::{
    models::busy::BusyInterval,
    ports::{BusyCalendar, CalendarError},
    time::BookingWindow,
};
use tracing::debug;

use crate::config::CalendarConfig;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FreeBusyRequest<'a> {
    time_min: DateTime<Utc>,
    time_max: DateTime<Utc>,
    items: Vec<FreeBusyItem<'a>>,
}

#[derive(Debug, Serialize)]
struct FreeBusyItem<'a> {
    id: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FreeBusyResponse {
    #[serde(default)]
    calendars: HashMap<String, CalendarBusy>,
}

#[derive(Debug, Deserialize)]
struct CalendarBusy {
    #[serde(default)]
    busy: Vec<BusyPeriod>,
    #[serde(default)]
    errors: Vec<CalendarErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct BusyPeriod {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct CalendarErrorEntry {
    #[serde(default)]
    domain: String,
    reason: String,
}

pub struct GoogleCalendarClient {
    http: reqwest::Client,
    config: CalendarConfig,
}

impl GoogleCalendarClient {
    pub fn new(config: CalendarConfig) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }
}

#[async_trait]
impl BusyCalendar for GoogleCalendarClient {
    async fn list_busy_intervals(
        &self,
        window: BookingWindow,
    ) -> Result<Vec<BusyInterval>, CalendarError> {
        let token = self
            .config
            .access_token
            .as_deref()
            .ok_or(CalendarError::NotConfigured)?;

        let request = FreeBusyRequest {
            time_min: window.start,
            time_max: window.end,
            items: vec![FreeBusyItem {
                id: &self.config.calendar_id,
            }],
        };

        let response = self
            .http
            .post(self.config.free_busy_url())
            .bearer_auth(token)
            .json(&request)
            .send()
            .await
            .map_err(|e| CalendarError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(CalendarError::Provider(format!(
                "freeBusy returned {}: {}",
                status, error_text
            )));
        }

        let body: FreeBusyResponse = response
            .json()
            .await
            .map_err(|e| CalendarError::Request(format!("invalid freeBusy response: {}", e)))?;

        let intervals = busy_intervals_for(body, &self.config.calendar_id)?;
        debug!(
            calendar_id = %self.config.calendar_id,
            busy = intervals.len(),
            "Fetched busy intervals"
        );
        Ok(intervals)
    }
}

/// Extracts the busy intervals of `calendar_id`, dropping empty or inverted periods.
pub(crate) fn busy_intervals_for(
    response: FreeBusyResponse,
    calendar_id: &str,
) -> Result<Vec<BusyInterval>, CalendarError> {
    let mut calendars = response.calendars;
    let calendar = calendars.remove(calendar_id).ok_or_else(|| {
        CalendarError::Provider(format!("calendar {} missing from freeBusy response", calendar_id))
    })?;

    if !calendar.errors.is_empty() {
        let reasons: Vec<String> = calendar
            .errors
            .iter()
            .map(|e| format!("{}/{}", e.domain, e.reason))
            .collect();
        return Err(CalendarError::Provider(reasons.join(", ")));
    }

    Ok(calendar
        .busy
        .into_iter()
        .filter(|period| period.end > period.start)
        .map(|period| BusyInterval {
            start: period.start,
            end: period.end,
        })
        .collect())
}

//! # Slotbook Calendar
//!
//! Implementations of [`BusyCalendar`] used by the availability resolver:
//! a Google Calendar client and a disabled calendar used when no credentials
//! are configured.

use std::sync::Arc;

use async_trait::async_trait;
use eyre::Result;
use slotbook_core::{
    models::busy::BusyInterval,
    ports::{BusyCalendar, CalendarError},
    time::BookingWindow,
};
use tracing::{info, warn};

pub mod config;
pub mod google;
pub mod mock;

use crate::{config::CalendarConfig, google::GoogleCalendarClient};

/// Calendar used when the integration is not configured. Every lookup reports
/// [`CalendarError::NotConfigured`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledCalendar;

#[async_trait]
impl BusyCalendar for DisabledCalendar {
    async fn list_busy_intervals(
        &self,
        _window: BookingWindow,
    ) -> Result<Vec<BusyInterval>, CalendarError> {
        Err(CalendarError::NotConfigured)
    }
}

/// Picks the calendar implementation matching `config`.
pub fn build_calendar(config: &CalendarConfig) -> Result<Arc<dyn BusyCalendar>> {
    if config.is_configured() {
        info!(calendar_id = %config.calendar_id, "Using Google Calendar for busy intervals");
        Ok(Arc::new(GoogleCalendarClient::new(config.clone())?))
    } else {
        warn!("GOOGLE_CALENDAR_ACCESS_TOKEN not set, slots will not be filtered by calendar");
        Ok(Arc::new(DisabledCalendar))
    }
}

//! # Availability Resolver
//!
//! Gathers the three inputs of the slot computation (one-off slots, the weekly
//! template and the external calendar's busy intervals) and hands them to
//! [`merge_slots`].
//!
//! The store and calendar reads are independent and run concurrently. A store
//! failure aborts the request. A calendar failure, a calendar timeout or a
//! missing calendar configuration all degrade to "no busy intervals", so slots
//! are still offered during a calendar outage.

use std::{sync::Arc, time::Duration};

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::{debug, error, warn};

use crate::{
    availability::{generate_weekly_slots, merge_slots},
    errors::{BookingError, BookingResult},
    models::{busy::BusyLookup, slot::Slot},
    ports::{BusyCalendar, CalendarError, SlotStore},
    time::BookingWindow,
};

pub const DEFAULT_WINDOW_DAYS: i64 = 14;
pub const DEFAULT_MAX_WINDOW_DAYS: i64 = 90;
/// Upper bound for any configured window length, about ten years.
pub const WINDOW_DAYS_LIMIT: i64 = 3660;
pub const DEFAULT_CALENDAR_TIMEOUT: Duration = Duration::from_secs(5);

pub struct AvailabilityResolver {
    store: Arc<dyn SlotStore>,
    calendar: Arc<dyn BusyCalendar>,
    timezone: Tz,
    calendar_timeout: Duration,
    default_window_days: i64,
    max_window_days: i64,
}

impl AvailabilityResolver {
    pub fn new(store: Arc<dyn SlotStore>, calendar: Arc<dyn BusyCalendar>, timezone: Tz) -> Self {
        Self {
            store,
            calendar,
            timezone,
            calendar_timeout: DEFAULT_CALENDAR_TIMEOUT,
            default_window_days: DEFAULT_WINDOW_DAYS,
            max_window_days: DEFAULT_MAX_WINDOW_DAYS,
        }
    }

    pub fn with_calendar_timeout(mut self, timeout: Duration) -> Self {
        self.calendar_timeout = timeout;
        self
    }

    pub fn with_default_window_days(mut self, days: i64) -> Self {
        self.default_window_days = days.clamp(1, WINDOW_DAYS_LIMIT);
        self
    }

    /// Caps how far past its start any queried window may reach.
    pub fn with_max_window_days(mut self, days: i64) -> Self {
        self.max_window_days = days.clamp(1, WINDOW_DAYS_LIMIT);
        self
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// The effective window for a `from`/`to` query evaluated at `now`.
    pub fn window_for(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        now: DateTime<Utc>,
    ) -> BookingWindow {
        BookingWindow::resolve(
            from,
            to,
            now,
            self.timezone,
            self.default_window_days,
            self.max_window_days,
        )
    }

    pub async fn resolve_for_query(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        now: DateTime<Utc>,
    ) -> BookingResult<Vec<Slot>> {
        let window = self.window_for(from, to, now);
        self.resolve_available_slots(window).await
    }

    /// Computes the bookable slots inside an already effective window.
    pub async fn resolve_available_slots(&self, window: BookingWindow) -> BookingResult<Vec<Slot>> {
        if window.is_empty() {
            debug!(start = %window.start, end = %window.end, "Empty booking window");
            return Ok(Vec::new());
        }

        // Weekly slots fill whole local days, so the calendar is asked about
        // the rest of the last day too.
        let busy_span = window.through_end_of_last_day(self.timezone);
        let (one_offs, blocks, busy) = tokio::join!(
            self.store.list_one_off_slots(window),
            self.store.list_weekly_availability_blocks(),
            self.lookup_busy_intervals(busy_span),
        );

        let one_offs = one_offs.map_err(|err| {
            error!("Failed to load one-off slots: {:?}", err);
            BookingError::Database(err)
        })?;
        let blocks = blocks.map_err(|err| {
            error!("Failed to load weekly availability: {:?}", err);
            BookingError::Database(err)
        })?;

        let generated = generate_weekly_slots(&blocks, &window, self.timezone);
        let busy = busy.into_intervals();
        let slots = merge_slots(one_offs, generated, &busy);

        debug!(
            start = %window.start,
            end = %window.end,
            busy = busy.len(),
            slots = slots.len(),
            "Resolved available slots"
        );
        Ok(slots)
    }

    /// Asks the calendar for busy intervals, bounded by the calendar timeout.
    pub async fn lookup_busy_intervals(&self, window: BookingWindow) -> BusyLookup {
        let request = self.calendar.list_busy_intervals(window);
        match tokio::time::timeout(self.calendar_timeout, request).await {
            Ok(Ok(intervals)) => BusyLookup::Available(intervals),
            Ok(Err(CalendarError::NotConfigured)) => {
                debug!("Calendar not configured, offering slots without busy filtering");
                BusyLookup::Unavailable(CalendarError::NotConfigured.to_string())
            }
            Ok(Err(err)) => {
                warn!("Calendar lookup failed, offering slots without busy filtering: {}", err);
                BusyLookup::Unavailable(err.to_string())
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.calendar_timeout.as_millis() as u64,
                    "Calendar lookup timed out, offering slots without busy filtering"
                );
                BusyLookup::Unavailable(CalendarError::Timeout.to_string())
            }
        }
    }
}

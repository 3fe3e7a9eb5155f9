//! # Time Values
//!
//! Calendar arithmetic used by the availability computation. All weekly
//! availability rules are expressed in the business timezone, so every
//! conversion between a local date/time and an instant goes through a
//! [`chrono_tz::Tz`] explicitly.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc, Weekday};
use chrono_tz::Tz;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::BookingError;

/// A wall-clock time within a day, written as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    pub fn from_naive(time: NaiveTime) -> Self {
        Self(time)
    }

    pub fn as_naive(&self) -> NaiveTime {
        self.0
    }

    /// Minutes elapsed since local midnight.
    pub fn minutes_from_midnight(&self) -> i64 {
        i64::from(self.0.num_seconds_from_midnight() / 60)
    }
}

impl FromStr for TimeOfDay {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        NaiveTime::parse_from_str(trimmed, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
            .map(Self)
            .map_err(|_| {
                BookingError::Validation(format!("Invalid time of day '{}', expected HH:MM", s))
            })
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Maps a day-of-week index (0 = Sunday .. 6 = Saturday) to a [`Weekday`].
pub fn weekday_from_index(index: u8) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

/// Inverse of [`weekday_from_index`].
pub fn weekday_index(day: Weekday) -> u8 {
    day.num_days_from_sunday() as u8
}

/// Converts a local date and time in `tz` to an instant.
///
/// Ambiguous local times (clocks falling back) resolve to the earlier instant.
/// Local times that do not exist (clocks springing forward) yield `None`.
pub fn local_instant(date: NaiveDate, time: NaiveTime, tz: Tz) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&NaiveDateTime::new(date, time))
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// First instant of `date` in `tz`.
///
/// A few zones skip local midnight on their DST switch; the day then starts
/// one hour later.
pub fn start_of_local_day(date: NaiveDate, tz: Tz) -> Option<DateTime<Utc>> {
    let midnight = NaiveTime::from_hms_opt(0, 0, 0)?;
    local_instant(date, midnight, tz).or_else(|| {
        let one_am = NaiveTime::from_hms_opt(1, 0, 0)?;
        local_instant(date, one_am, tz)
    })
}

/// Last whole second of `date` in `tz`.
pub fn end_of_local_day(date: NaiveDate, tz: Tz) -> Option<DateTime<Utc>> {
    let last_second = NaiveTime::from_hms_opt(23, 59, 59)?;
    tz.from_local_datetime(&NaiveDateTime::new(date, last_second))
        .latest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parses a `YYYY-MM-DD` query value. Malformed input yields `None`.
pub fn parse_query_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// A half-open range of instants `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Interval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn starting_at(start: DateTime<Utc>, duration_minutes: i64) -> Self {
        Self {
            start,
            end: start + Duration::minutes(duration_minutes),
        }
    }

    /// Back-to-back intervals do not overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && self.end > other.start
    }
}

/// The effective window a slot query covers.
///
/// The start is never earlier than "now" at resolution time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl BookingWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Builds the effective window from optional `from`/`to` calendar dates.
    ///
    /// * `from` maps to local midnight of that date, then is clamped to `now`.
    ///   Absent means `now`.
    /// * `to` maps to the last second of that local date. Absent means the
    ///   effective start plus `default_days`.
    /// * The window never spans more than `max_days` from its start.
    pub fn resolve(
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        now: DateTime<Utc>,
        tz: Tz,
        default_days: i64,
        max_days: i64,
    ) -> Self {
        let requested_start = from
            .and_then(|date| start_of_local_day(date, tz))
            .unwrap_or(now);
        let start = requested_start.max(now);

        let longest = start.checked_add_signed(Duration::days(max_days));
        let end = match to.and_then(|date| end_of_local_day(date, tz)) {
            Some(end) => end,
            None => start
                .checked_add_signed(Duration::days(default_days))
                .unwrap_or(start),
        };
        let end = match longest {
            Some(longest) => end.min(longest),
            None => end,
        };

        Self { start, end }
    }

    /// The window stretched to the end of the last local day it touches.
    ///
    /// Weekly slots are generated for whole local days, so busy intervals must
    /// be fetched for this span rather than for the window itself.
    pub fn through_end_of_last_day(&self, tz: Tz) -> Self {
        if self.is_empty() {
            return *self;
        }

        let last = self.end.with_timezone(&tz).date_naive();
        let end = end_of_local_day(last, tz)
            .map(|day_end| day_end.max(self.end))
            .unwrap_or(self.end);
        Self {
            start: self.start,
            end,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Every local calendar date touched by the window, both ends included.
    pub fn local_days(&self, tz: Tz) -> Vec<NaiveDate> {
        if self.is_empty() {
            return Vec::new();
        }

        let first = self.start.with_timezone(&tz).date_naive();
        let last = self.end.with_timezone(&tz).date_naive();
        first.iter_days().take_while(|day| *day <= last).collect()
    }
}

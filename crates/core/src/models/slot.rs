use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    errors::{BookingError, BookingResult},
    time::Interval,
};

/// An administrator-created bookable interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OneOffSlot {
    pub id: Uuid,
    pub start_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub title: Option<String>,
}

impl OneOffSlot {
    pub fn interval(&self) -> Interval {
        Interval::starting_at(self.start_at, i64::from(self.duration_minutes))
    }
}

/// A slot as offered to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub id: String,
    pub start_at: DateTime<Utc>,
    pub duration_minutes: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl From<OneOffSlot> for Slot {
    fn from(slot: OneOffSlot) -> Self {
        Slot {
            id: slot.id.to_string(),
            start_at: slot.start_at,
            duration_minutes: slot.duration_minutes,
            title: slot.title,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotsResponse {
    pub slots: Vec<Slot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOneOffSlotRequest {
    pub start_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub title: Option<String>,
}

impl CreateOneOffSlotRequest {
    pub fn validate(&self) -> BookingResult<()> {
        if self.duration_minutes <= 0 {
            return Err(BookingError::Validation(
                "durationMinutes must be a positive number of minutes".to_string(),
            ));
        }
        Ok(())
    }

    /// Blank titles are stored as no title.
    pub fn normalized_title(&self) -> Option<&str> {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())
    }
}

/// Result of trying to remove a one-off slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteSlotOutcome {
    Deleted,
    NotFound,
    /// A booking references the slot, so it was left in place.
    Booked,
}

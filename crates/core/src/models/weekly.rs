use chrono::Weekday;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    errors::{BookingError, BookingResult},
    time::{weekday_from_index, TimeOfDay},
};

/// A recurring rule that yields slots on every matching weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyAvailabilityBlock {
    pub id: Uuid,
    /// 0 = Sunday .. 6 = Saturday
    pub day_of_week: u8,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub slot_duration_minutes: i32,
}

impl WeeklyAvailabilityBlock {
    pub fn weekday(&self) -> Option<Weekday> {
        weekday_from_index(self.day_of_week)
    }

    pub fn validate(&self) -> BookingResult<()> {
        validate_rule(
            self.day_of_week,
            self.start_time,
            self.end_time,
            self.slot_duration_minutes,
        )
    }
}

/// A block as submitted by an administrator, before it has an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyAvailabilityInput {
    pub day_of_week: u8,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub slot_duration_minutes: i32,
}

impl WeeklyAvailabilityInput {
    pub fn validate(&self) -> BookingResult<()> {
        validate_rule(
            self.day_of_week,
            self.start_time,
            self.end_time,
            self.slot_duration_minutes,
        )
    }

    pub fn into_block(self, id: Uuid) -> WeeklyAvailabilityBlock {
        WeeklyAvailabilityBlock {
            id,
            day_of_week: self.day_of_week,
            start_time: self.start_time,
            end_time: self.end_time,
            slot_duration_minutes: self.slot_duration_minutes,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplaceWeeklyAvailabilityRequest {
    pub blocks: Vec<WeeklyAvailabilityInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyAvailabilityResponse {
    pub blocks: Vec<WeeklyAvailabilityBlock>,
}

fn validate_rule(
    day_of_week: u8,
    start_time: TimeOfDay,
    end_time: TimeOfDay,
    slot_duration_minutes: i32,
) -> BookingResult<()> {
    if weekday_from_index(day_of_week).is_none() {
        return Err(BookingError::Validation(format!(
            "dayOfWeek must be between 0 (Sunday) and 6 (Saturday), got {}",
            day_of_week
        )));
    }
    if end_time <= start_time {
        return Err(BookingError::Validation(format!(
            "endTime {} must be after startTime {}",
            end_time, start_time
        )));
    }
    if slot_duration_minutes <= 0 {
        return Err(BookingError::Validation(
            "slotDurationMinutes must be a positive number of minutes".to_string(),
        ));
    }
    Ok(())
}

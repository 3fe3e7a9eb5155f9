use chrono::{DateTime, NaiveTime, Utc};
use eyre::{eyre, Result};
use serde::{Deserialize, Serialize};
use slotbook_core::{
    models::{slot::OneOffSlot, weekly::WeeklyAvailabilityBlock},
    time::TimeOfDay,
};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbOneOffSlot {
    pub id: Uuid,
    pub start_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub title: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbWeeklyAvailability {
    pub id: Uuid,
    pub day_of_week: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub slot_duration_minutes: i32,
    pub created_at: DateTime<Utc>,
}

impl From<DbOneOffSlot> for OneOffSlot {
    fn from(row: DbOneOffSlot) -> Self {
        OneOffSlot {
            id: row.id,
            start_at: row.start_at,
            duration_minutes: row.duration_minutes,
            title: row.title,
        }
    }
}

impl TryFrom<DbWeeklyAvailability> for WeeklyAvailabilityBlock {
    type Error = eyre::Report;

    fn try_from(row: DbWeeklyAvailability) -> Result<Self> {
        let day_of_week = u8::try_from(row.day_of_week)
            .ok()
            .filter(|day| *day <= 6)
            .ok_or_else(|| {
                eyre!(
                    "weekly_availability row {} has invalid day_of_week {}",
                    row.id,
                    row.day_of_week
                )
            })?;

        Ok(WeeklyAvailabilityBlock {
            id: row.id,
            day_of_week,
            start_time: TimeOfDay::from_naive(row.start_time),
            end_time: TimeOfDay::from_naive(row.end_time),
            slot_duration_minutes: row.slot_duration_minutes,
        })
    }
}

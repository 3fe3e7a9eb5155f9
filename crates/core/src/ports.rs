//! # Collaborator Traits
//!
//! The resolver never constructs its own database or calendar client. Both are
//! handed in as trait objects so the server can wire real implementations and
//! tests can wire fakes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    models::{
        busy::BusyInterval,
        slot::{DeleteSlotOutcome, OneOffSlot},
        weekly::{WeeklyAvailabilityBlock, WeeklyAvailabilityInput},
    },
    time::BookingWindow,
};

/// Persistent storage for one-off slots and the weekly availability template.
#[async_trait]
pub trait SlotStore: Send + Sync {
    /// One-off slots whose start lies in `[window.start, window.end]`, ordered by start.
    async fn list_one_off_slots(&self, window: BookingWindow) -> eyre::Result<Vec<OneOffSlot>>;

    async fn list_weekly_availability_blocks(&self) -> eyre::Result<Vec<WeeklyAvailabilityBlock>>;

    async fn create_one_off_slot(
        &self,
        start_at: DateTime<Utc>,
        duration_minutes: i32,
        title: Option<String>,
    ) -> eyre::Result<OneOffSlot>;

    /// Removes a one-off slot unless a booking references it.
    async fn delete_one_off_slot(&self, id: Uuid) -> eyre::Result<DeleteSlotOutcome>;

    /// Replaces the whole weekly template in one transaction.
    async fn replace_weekly_availability(
        &self,
        blocks: Vec<WeeklyAvailabilityInput>,
    ) -> eyre::Result<Vec<WeeklyAvailabilityBlock>>;
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("calendar integration is not configured")]
    NotConfigured,

    #[error("calendar request failed: {0}")]
    Request(String),

    #[error("calendar provider returned an error: {0}")]
    Provider(String),

    #[error("calendar request timed out")]
    Timeout,
}

/// Read access to the busy intervals of an external calendar.
#[async_trait]
pub trait BusyCalendar: Send + Sync {
    async fn list_busy_intervals(
        &self,
        window: BookingWindow,
    ) -> Result<Vec<BusyInterval>, CalendarError>;
}

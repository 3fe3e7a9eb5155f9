//! [`SlotStore`] backed by PostgreSQL.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use slotbook_core::{
    models::{
        slot::{DeleteSlotOutcome, OneOffSlot},
        weekly::{WeeklyAvailabilityBlock, WeeklyAvailabilityInput},
    },
    ports::SlotStore,
    time::BookingWindow,
};
use uuid::Uuid;

use crate::{
    repositories::{one_off_slot, weekly_availability},
    DbPool,
};

#[derive(Clone)]
pub struct PgSlotStore {
    pool: DbPool,
}

impl PgSlotStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SlotStore for PgSlotStore {
    async fn list_one_off_slots(&self, window: BookingWindow) -> eyre::Result<Vec<OneOffSlot>> {
        let rows =
            one_off_slot::list_one_off_slots_between(&self.pool, window.start, window.end).await?;
        Ok(rows.into_iter().map(OneOffSlot::from).collect())
    }

    async fn list_weekly_availability_blocks(&self) -> eyre::Result<Vec<WeeklyAvailabilityBlock>> {
        weekly_availability::list_weekly_availability(&self.pool)
            .await?
            .into_iter()
            .map(WeeklyAvailabilityBlock::try_from)
            .collect()
    }

    async fn create_one_off_slot(
        &self,
        start_at: DateTime<Utc>,
        duration_minutes: i32,
        title: Option<String>,
    ) -> eyre::Result<OneOffSlot> {
        let row = one_off_slot::create_one_off_slot(
            &self.pool,
            start_at,
            duration_minutes,
            title.as_deref(),
        )
        .await?;
        Ok(row.into())
    }

    async fn delete_one_off_slot(&self, id: Uuid) -> eyre::Result<DeleteSlotOutcome> {
        one_off_slot::delete_one_off_slot(&self.pool, id).await
    }

    async fn replace_weekly_availability(
        &self,
        blocks: Vec<WeeklyAvailabilityInput>,
    ) -> eyre::Result<Vec<WeeklyAvailabilityBlock>> {
        weekly_availability::replace_weekly_availability(&self.pool, &blocks)
            .await?
            .into_iter()
            .map(WeeklyAvailabilityBlock::try_from)
            .collect()
    }
}

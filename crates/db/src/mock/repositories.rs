use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::mock;
use slotbook_core::{
    models::{
        slot::{DeleteSlotOutcome, OneOffSlot},
        weekly::{WeeklyAvailabilityBlock, WeeklyAvailabilityInput},
    },
    ports::SlotStore,
    time::BookingWindow,
};
use uuid::Uuid;

// Mock slot store for handler and resolver tests
mock! {
    pub SlotRepo {}

    #[async_trait]
    impl SlotStore for SlotRepo {
        async fn list_one_off_slots(
            &self,
            window: BookingWindow,
        ) -> eyre::Result<Vec<OneOffSlot>>;

        async fn list_weekly_availability_blocks(
            &self,
        ) -> eyre::Result<Vec<WeeklyAvailabilityBlock>>;

        async fn create_one_off_slot(
            &self,
            start_at: DateTime<Utc>,
            duration_minutes: i32,
            title: Option<String>,
        ) -> eyre::Result<OneOffSlot>;

        async fn delete_one_off_slot(
            &self,
            id: Uuid,
        ) -> eyre::Result<DeleteSlotOutcome>;

        async fn replace_weekly_availability(
            &self,
            blocks: Vec<WeeklyAvailabilityInput>,
        ) -> eyre::Result<Vec<WeeklyAvailabilityBlock>>;
    }
}

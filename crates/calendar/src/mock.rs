use async_trait::async_trait;
use mockall::mock;
use slotbook_core::{
    models::busy::BusyInterval,
    ports::{BusyCalendar, CalendarError},
    time::BookingWindow,
};

// Mock calendar for resolver and handler tests
mock! {
    pub Calendar {}

    #[async_trait]
    impl BusyCalendar for Calendar {
        async fn list_busy_intervals(
            &self,
            window: BookingWindow,
        ) -> Result<Vec<BusyInterval>, CalendarError>;
    }
}

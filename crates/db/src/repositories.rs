pub mod booking;
pub mod one_off_slot;
pub mod weekly_availability;

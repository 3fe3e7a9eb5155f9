//! # Slotbook Core
//!
//! Domain types and the availability computation for the Slotbook booking
//! service. Nothing in this crate talks to a database or the network directly;
//! the slot store and the external calendar are reached through the traits in
//! [`ports`], so the resolver can run against fakes in tests.
//!
//! - [`time`]: time-of-day, weekday and window arithmetic in a fixed business timezone
//! - [`availability`]: pure slot generation and merging
//! - [`resolver`]: the async resolver that gathers inputs and applies the merge

pub mod availability;
pub mod errors;
pub mod models;
pub mod ports;
pub mod resolver;
pub mod time;

//! # Availability Computation
//!
//! Pure functions that turn the weekly template into concrete slots and merge
//! them with one-off slots under the busy intervals of the external calendar.
//!
//! Rules applied by [`merge_slots`]:
//!
//! 1. A slot overlapping any busy interval is dropped whole, never trimmed.
//! 2. One-off slots claim their start instants before any generated slot does;
//!    a generated slot at a claimed instant is dropped.
//! 3. At most one slot is returned per start instant, and the output is sorted
//!    ascending by start.

use std::collections::HashSet;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    models::{
        busy::BusyInterval,
        slot::{OneOffSlot, Slot},
        weekly::WeeklyAvailabilityBlock,
    },
    time::{local_instant, BookingWindow, Interval},
};

/// A slot produced from a weekly block for one calendar day. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSlot {
    pub block_id: Uuid,
    pub start_at: DateTime<Utc>,
    pub duration_minutes: i32,
}

impl GeneratedSlot {
    pub fn interval(&self) -> Interval {
        Interval::starting_at(self.start_at, i64::from(self.duration_minutes))
    }

    /// Stable id derived from the owning block and the start instant.
    pub fn slot_id(&self) -> String {
        format!("weekly-{}-{}", self.block_id, self.start_at.timestamp())
    }
}

impl From<GeneratedSlot> for Slot {
    fn from(slot: GeneratedSlot) -> Self {
        Slot {
            id: slot.slot_id(),
            start_at: slot.start_at,
            duration_minutes: slot.duration_minutes,
            title: None,
        }
    }
}

/// Expands the weekly template over every local day the window touches.
///
/// Slots starting before `window.start` are not emitted. Invalid blocks are
/// skipped with a warning.
pub fn generate_weekly_slots(
    blocks: &[WeeklyAvailabilityBlock],
    window: &BookingWindow,
    tz: Tz,
) -> Vec<GeneratedSlot> {
    let valid_blocks: Vec<&WeeklyAvailabilityBlock> = blocks
        .iter()
        .filter(|block| match block.validate() {
            Ok(()) => true,
            Err(err) => {
                warn!(block_id = %block.id, "Skipping weekly availability block: {}", err);
                false
            }
        })
        .collect();

    let mut generated = Vec::new();
    for day in window.local_days(tz) {
        let weekday = day.weekday();
        for block in valid_blocks.iter().filter(|block| block.weekday() == Some(weekday)) {
            expand_block_on_day(block, day, window, tz, &mut generated);
        }
    }

    debug!(
        blocks = valid_blocks.len(),
        generated = generated.len(),
        "Expanded weekly availability"
    );
    generated
}

fn expand_block_on_day(
    block: &WeeklyAvailabilityBlock,
    day: NaiveDate,
    window: &BookingWindow,
    tz: Tz,
    out: &mut Vec<GeneratedSlot>,
) {
    let step = i64::from(block.slot_duration_minutes);
    let end_offset = block.end_time.minutes_from_midnight();
    // On DST switch days wall-clock minutes and elapsed minutes differ, so the
    // block end is also checked as an instant.
    let block_end = local_instant(day, block.end_time.as_naive(), tz);

    let mut offset = block.start_time.minutes_from_midnight();
    while offset + step <= end_offset {
        let Some(local_start) = minutes_to_time(offset) else {
            break;
        };
        offset += step;

        let Some(start_at) = local_instant(day, local_start, tz) else {
            continue;
        };
        if start_at < window.start {
            continue;
        }
        if let Some(block_end) = block_end {
            if start_at + Duration::minutes(step) > block_end {
                continue;
            }
        }

        out.push(GeneratedSlot {
            block_id: block.id,
            start_at,
            duration_minutes: block.slot_duration_minutes,
        });
    }
}

fn minutes_to_time(minutes: i64) -> Option<NaiveTime> {
    let seconds = u32::try_from(minutes * 60).ok()?;
    NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0)
}

/// Combines one-off and generated slots into the offered, sorted slot list.
pub fn merge_slots(
    one_offs: Vec<OneOffSlot>,
    generated: Vec<GeneratedSlot>,
    busy: &[BusyInterval],
) -> Vec<Slot> {
    let busy: Vec<Interval> = busy.iter().map(BusyInterval::interval).collect();
    let is_busy = |interval: &Interval| busy.iter().any(|b| interval.overlaps(b));

    let mut claimed: HashSet<DateTime<Utc>> = HashSet::new();
    let mut slots: Vec<Slot> = Vec::with_capacity(one_offs.len() + generated.len());

    for slot in one_offs {
        if !claimed.insert(slot.start_at) {
            debug!(slot_id = %slot.id, "Dropping one-off slot sharing a start instant");
            continue;
        }
        if is_busy(&slot.interval()) {
            continue;
        }
        slots.push(slot.into());
    }

    for slot in generated {
        if !claimed.insert(slot.start_at) {
            continue;
        }
        if is_busy(&slot.interval()) {
            continue;
        }
        slots.push(slot.into());
    }

    slots.sort_by_key(|slot| slot.start_at);
    slots
}

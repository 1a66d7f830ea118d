use chrono::{NaiveDate, NaiveDateTime};

use super::{config::SlotConfig, gaps::compute_free_slots};
use crate::models::{appointment::Appointment, blocked_day::BlockedDay, time_slot::TimeSlot};

/// Number of suggestions the booking screen shows.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 3;
/// Today and tomorrow.
pub const DEFAULT_HORIZON_DAYS: u32 = 2;

/// Orders slots by how close their length is to the average service
/// duration, earliest first on ties.
pub fn rank_slots(mut slots: Vec<TimeSlot>, config: &SlotConfig) -> Vec<TimeSlot> {
    let ideal = config.average_service_minutes;
    slots.sort_by_key(|slot| ((slot.duration_minutes - ideal).abs(), slot.time));
    slots
}

/// Free slots for the horizon, ranked, truncated to `limit` when given.
pub fn suggest_slots(
    appointments: &[Appointment],
    blocked_days: &[BlockedDay],
    reference_day: NaiveDate,
    horizon_days: u32,
    now: NaiveDateTime,
    config: &SlotConfig,
    limit: Option<usize>,
) -> Vec<TimeSlot> {
    let free = compute_free_slots(
        appointments,
        blocked_days,
        reference_day,
        horizon_days,
        now,
        config,
    );

    let mut ranked = rank_slots(free, config);
    if let Some(limit) = limit {
        ranked.truncate(limit);
    }
    ranked
}

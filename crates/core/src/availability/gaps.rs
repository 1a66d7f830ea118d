use chrono::{Days, NaiveDate, NaiveDateTime};
use tracing::debug;

use super::config::SlotConfig;
use crate::models::{appointment::Appointment, blocked_day::BlockedDay, time_slot::TimeSlot};

/// Computes free slots for `horizon_days` consecutive days starting at
/// `reference_day`.
///
/// # Algorithm
///
/// For each day in the horizon:
///
/// 1. Skip the day when any blocked day matches its calendar date
/// 2. Resolve the scan window with [`SlotConfig::window_for`]; an empty
///    window contributes nothing
/// 3. Take the day's non-canceled appointments sorted by start
/// 4. Walk them with an "occupied until" cursor, emitting the gap before
///    each appointment and the tail gap after the last one
/// 5. Keep only gaps of at least `average_service_minutes`
///
/// The cursor only moves forward, so overlapping appointments never
/// produce overlapping or negative gaps. Appointments are clipped to the
/// window.
///
/// Slots come out grouped by day in chronological order; use
/// [`rank_slots`](super::ranking::rank_slots) for display order.
pub fn compute_free_slots(
    appointments: &[Appointment],
    blocked_days: &[BlockedDay],
    reference_day: NaiveDate,
    horizon_days: u32,
    now: NaiveDateTime,
    config: &SlotConfig,
) -> Vec<TimeSlot> {
    let mut slots = Vec::new();

    for offset in 0..horizon_days {
        let Some(day) = reference_day.checked_add_days(Days::new(u64::from(offset))) else {
            debug!(%reference_day, offset, "Horizon runs past the calendar");
            break;
        };

        if blocked_days.iter().any(|blocked| blocked.blocks(day)) {
            debug!(%day, "Skipping blocked day");
            continue;
        }

        let Some((start, end)) = config.window_for(day, now) else {
            debug!(%day, "No bookable time left");
            continue;
        };

        let occupied = occupied_intervals(appointments, day, config);
        let before = slots.len();
        slots.extend(free_gaps(&occupied, start, end, config.average_service_minutes));
        debug!(%day, found = slots.len() - before, "Computed free slots");
    }

    slots
}

/// Sorted `(start, end)` pairs of the non-canceled appointments on `day`.
fn occupied_intervals(
    appointments: &[Appointment],
    day: NaiveDate,
    config: &SlotConfig,
) -> Vec<(NaiveDateTime, NaiveDateTime)> {
    let mut intervals: Vec<_> = appointments
        .iter()
        .filter(|appointment| appointment.occupies_time() && appointment.day() == day)
        .map(|appointment| {
            (
                appointment.date,
                appointment.ends_at(config.default_service_minutes),
            )
        })
        .collect();

    intervals.sort();
    intervals
}

fn free_gaps(
    occupied: &[(NaiveDateTime, NaiveDateTime)],
    start: NaiveDateTime,
    end: NaiveDateTime,
    min_minutes: i64,
) -> Vec<TimeSlot> {
    let mut gaps = Vec::new();
    let mut cursor = start;

    for &(busy_start, busy_end) in occupied {
        if cursor >= end {
            break;
        }

        if busy_start > cursor {
            gaps.push(TimeSlot::between(cursor, busy_start.min(end)));
        }

        cursor = cursor.max(busy_end);
    }

    if cursor < end {
        gaps.push(TimeSlot::between(cursor, end));
    }

    gaps.retain(|gap| gap.duration_minutes >= min_minutes);
    gaps
}

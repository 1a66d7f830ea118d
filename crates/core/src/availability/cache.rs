use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use super::{
    config::SlotConfig,
    ranking::{suggest_slots, DEFAULT_HORIZON_DAYS, DEFAULT_SUGGESTION_LIMIT},
};
use crate::models::{appointment::Appointment, blocked_day::BlockedDay, time_slot::TimeSlot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CacheKey {
    generation: u64,
    reference_day: NaiveDate,
    floor: NaiveDateTime,
}

/// Ranked suggestions derived from an appointment snapshot.
///
/// The cache keeps only the last result and the key it was computed for:
/// the caller's data generation (bumped whenever appointments, services or
/// blocked days change), the calendar day of "now" and "now" rounded up to
/// the slot granularity. A change in any of them triggers a full
/// recomputation, so suggestions never start before the current rounded
/// time. The day is part of the key because the last half hour before
/// midnight rounds up to the same instant as midnight itself.
#[derive(Debug, Clone)]
pub struct SuggestionCache {
    config: SlotConfig,
    horizon_days: u32,
    limit: Option<usize>,
    key: Option<CacheKey>,
    slots: Vec<TimeSlot>,
}

impl SuggestionCache {
    pub fn new(config: SlotConfig) -> Self {
        Self {
            config,
            horizon_days: DEFAULT_HORIZON_DAYS,
            limit: Some(DEFAULT_SUGGESTION_LIMIT),
            key: None,
            slots: Vec::new(),
        }
    }

    pub fn with_horizon(mut self, horizon_days: u32) -> Self {
        self.horizon_days = horizon_days;
        self.key = None;
        self
    }

    pub fn horizon_days(&self) -> u32 {
        self.horizon_days
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub fn is_stale(&self, generation: u64, now: NaiveDateTime) -> bool {
        self.key != Some(self.key_for(generation, now))
    }

    /// Recomputes the suggestions when `generation` or the rounded `now`
    /// differ from the cached key, then returns them.
    pub fn refresh(
        &mut self,
        generation: u64,
        appointments: &[Appointment],
        blocked_days: &[BlockedDay],
        now: NaiveDateTime,
    ) -> &[TimeSlot] {
        let key = self.key_for(generation, now);
        if self.key == Some(key) {
            return &self.slots;
        }

        debug!(generation, floor = %key.floor, "Recomputing slot suggestions");
        self.slots = suggest_slots(
            appointments,
            blocked_days,
            now.date(),
            self.horizon_days,
            now,
            &self.config,
            self.limit,
        );
        self.key = Some(key);

        &self.slots
    }

    fn key_for(&self, generation: u64, now: NaiveDateTime) -> CacheKey {
        CacheKey {
            generation,
            reference_day: now.date(),
            floor: self.config.round_up(now),
        }
    }
}

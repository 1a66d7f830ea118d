use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::time_slot::TimeSlot;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotResponse {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub duration_minutes: i64,
}

impl From<TimeSlot> for SlotResponse {
    fn from(slot: TimeSlot) -> Self {
        Self {
            start: slot.time,
            end: slot.end(),
            duration_minutes: slot.duration_minutes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotsResponse {
    pub reference_day: NaiveDate,
    pub horizon_days: u32,
    pub slots: Vec<SlotResponse>,
}

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A free interval long enough to book a typical service.
///
/// Slots carry no identity; they are recomputed from scratch on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    pub time: NaiveDateTime,
    pub duration_minutes: i64,
}

impl TimeSlot {
    pub fn between(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            time: start,
            duration_minutes: (end - start).num_minutes(),
        }
    }

    pub fn end(&self) -> NaiveDateTime {
        self.time + Duration::minutes(self.duration_minutes)
    }

    pub fn day(&self) -> NaiveDate {
        self.time.date()
    }
}

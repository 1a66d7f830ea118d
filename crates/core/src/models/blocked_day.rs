use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A calendar day closed for bookings (holiday, vacation, training).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedDay {
    pub id: Uuid,
    pub date: NaiveDate,
    pub reason: Option<String>,
}

impl BlockedDay {
    pub fn blocks(&self, day: NaiveDate) -> bool {
        self.date == day
    }
}

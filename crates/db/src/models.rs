use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use nailsync_core::{
    errors::CrmError,
    models::{
        appointment::{Appointment, AppointmentStatus},
        blocked_day::BlockedDay,
    },
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};
use uuid::Uuid;

/// Appointment row joined with its service's duration.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: Uuid,
    pub client_id: Option<Uuid>,
    pub service_id: Option<Uuid>,
    pub scheduled_at: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
    pub status: String,
    pub service_duration_minutes: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBlockedDay {
    pub id: Uuid,
    pub blocked_on: NaiveDate,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Row counts and content digests of the tables the availability
/// calculation reads. A digest is `None` for an empty table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, FromRow)]
pub struct DbDataVersion {
    pub appointment_count: i64,
    pub appointments_digest: Option<String>,
    pub service_count: i64,
    pub services_digest: Option<String>,
    pub blocked_day_count: i64,
    pub blocked_days_digest: Option<String>,
}

impl DbDataVersion {
    /// Stable within a process; only compared for equality.
    pub fn generation(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

impl TryFrom<DbAppointment> for Appointment {
    type Error = CrmError;

    fn try_from(row: DbAppointment) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            client_id: row.client_id,
            service_id: row.service_id,
            date: row.scheduled_at,
            end_time: row.end_time,
            service_duration_minutes: row.service_duration_minutes.map(i64::from),
            status: row.status.parse::<AppointmentStatus>()?,
        })
    }
}

impl From<DbBlockedDay> for BlockedDay {
    fn from(row: DbBlockedDay) -> Self {
        Self {
            id: row.id,
            date: row.blocked_on,
            reason: row.reason,
        }
    }
}

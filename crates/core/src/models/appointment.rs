use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

use crate::errors::CrmError;

/// Booking state of an appointment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    #[serde(alias = "cancelled")]
    Canceled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Canceled => "canceled",
        }
    }

    /// Canceled appointments free their time again
    pub fn occupies_time(&self) -> bool {
        !matches!(self, Self::Canceled)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = CrmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "canceled" | "cancelled" => Ok(Self::Canceled),
            other => Err(CrmError::Validation(format!(
                "Unknown appointment status: {}",
                other
            ))),
        }
    }
}

/// A booked appointment as seen by the availability engine.
///
/// Times are naive local wall-clock values. `service_duration_minutes` is
/// filled from the service catalog, either by the database join or by
/// [`ServiceCatalog::attach_durations`](crate::models::service::ServiceCatalog::attach_durations).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub client_id: Option<Uuid>,
    pub service_id: Option<Uuid>,
    pub date: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
    pub service_duration_minutes: Option<i64>,
    pub status: AppointmentStatus,
}

impl Appointment {
    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }

    pub fn occupies_time(&self) -> bool {
        self.status.occupies_time()
    }

    /// Service duration, or `default_minutes` when the service is unknown
    /// or carries no positive duration.
    pub fn duration_minutes(&self, default_minutes: i64) -> i64 {
        self.service_duration_minutes
            .filter(|minutes| *minutes > 0)
            .unwrap_or(default_minutes)
    }

    /// End of the occupied interval.
    ///
    /// An explicit `end_time` wins over the computed one. An end earlier
    /// than the start is clamped to the start.
    pub fn ends_at(&self, default_minutes: i64) -> NaiveDateTime {
        let end = self
            .end_time
            .unwrap_or_else(|| {
                Duration::try_minutes(self.duration_minutes(default_minutes))
                    .and_then(|length| self.date.checked_add_signed(length))
                    .unwrap_or(NaiveDateTime::MAX)
            });
        end.max(self.date)
    }
}

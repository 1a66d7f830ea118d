use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::errors::{CrmError, CrmResult};

/// Minimum free minutes for a gap to count as a slot.
pub const DEFAULT_AVERAGE_SERVICE_MINUTES: i64 = 90;
/// Occupancy assumed for an appointment whose service duration is unknown.
pub const DEFAULT_SERVICE_MINUTES: i64 = 60;
/// Boundary "now" is rounded up to on the current day.
pub const DEFAULT_GRANULARITY_MINUTES: i64 = 30;
pub const DEFAULT_BUSINESS_START: (u32, u32) = (8, 0);
pub const DEFAULT_BUSINESS_END: (u32, u32) = (19, 0);

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Tunables of the free-slot calculation.
///
/// One instance is built at startup and passed to every call, so the
/// threshold, business hours and rounding never drift between call sites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotConfig {
    /// A gap must be at least this long to be offered
    pub average_service_minutes: i64,

    /// Opening time, inclusive
    pub business_start: NaiveTime,

    /// Closing time, exclusive
    pub business_end: NaiveTime,

    /// Today's scan starts at "now" rounded up to a multiple of this
    pub granularity_minutes: i64,

    /// Duration used for appointments without a known service duration
    pub default_service_minutes: i64,
}

impl Default for SlotConfig {
    fn default() -> Self {
        let (start_h, start_m) = DEFAULT_BUSINESS_START;
        let (end_h, end_m) = DEFAULT_BUSINESS_END;

        Self {
            average_service_minutes: DEFAULT_AVERAGE_SERVICE_MINUTES,
            business_start: NaiveTime::from_hms_opt(start_h, start_m, 0).unwrap_or(NaiveTime::MIN),
            business_end: NaiveTime::from_hms_opt(end_h, end_m, 0).unwrap_or(NaiveTime::MIN),
            granularity_minutes: DEFAULT_GRANULARITY_MINUTES,
            default_service_minutes: DEFAULT_SERVICE_MINUTES,
        }
    }
}

impl SlotConfig {
    pub fn validate(&self) -> CrmResult<()> {
        if self.average_service_minutes <= 0 {
            return Err(CrmError::Validation(
                "Average service duration must be positive".to_string(),
            ));
        }

        if self.default_service_minutes <= 0 {
            return Err(CrmError::Validation(
                "Default service duration must be positive".to_string(),
            ));
        }

        if !(1..=MINUTES_PER_DAY).contains(&self.granularity_minutes) {
            return Err(CrmError::Validation(format!(
                "Granularity must be between 1 and {} minutes",
                MINUTES_PER_DAY
            )));
        }

        if self.business_start >= self.business_end {
            return Err(CrmError::Validation(format!(
                "Business hours start ({}) must be before end ({})",
                self.business_start, self.business_end
            )));
        }

        Ok(())
    }

    /// Rounds `instant` up to the next multiple of the granularity,
    /// counted from midnight. Instants already on a boundary are kept.
    /// Saturates at the last representable instant.
    pub fn round_up(&self, instant: NaiveDateTime) -> NaiveDateTime {
        let step = self.granularity_minutes.max(1) * 60;
        let midnight = instant.date().and_time(NaiveTime::MIN);
        let elapsed = i64::from(instant.num_seconds_from_midnight());
        let has_fraction = elapsed % step != 0 || instant.nanosecond() != 0;

        let mut boundary = elapsed - elapsed % step;
        if has_fraction {
            boundary += step;
        }

        midnight
            .checked_add_signed(Duration::seconds(boundary))
            .unwrap_or(NaiveDateTime::MAX)
    }

    /// Scan window `[start, end)` for `day`, or `None` when nothing is left.
    ///
    /// On the current day the window opens at the rounded "now", but never
    /// before business hours start.
    pub fn window_for(
        &self,
        day: NaiveDate,
        now: NaiveDateTime,
    ) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let open = day.and_time(self.business_start);
        let close = day.and_time(self.business_end);

        let start = if day == now.date() {
            self.round_up(now).max(open)
        } else {
            open
        };

        (start < close).then_some((start, close))
    }
}

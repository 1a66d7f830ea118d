use chrono::{NaiveDate, NaiveDateTime};
use mockall::mock;

use crate::models::{DbAppointment, DbBlockedDay};

// Mock repositories for testing
mock! {
    pub AppointmentRepo {
        pub async fn get_appointments_between(
            &self,
            from: NaiveDateTime,
            to: NaiveDateTime,
        ) -> eyre::Result<Vec<DbAppointment>>;
    }
}

mock! {
    pub BlockedDayRepo {
        pub async fn get_blocked_days_between(
            &self,
            from: NaiveDate,
            to: NaiveDate,
        ) -> eyre::Result<Vec<DbBlockedDay>>;
    }
}

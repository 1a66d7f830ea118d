use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use super::appointment::Appointment;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    pub price_cents: i64,
    pub duration_minutes: Option<i64>,
}

/// Duration lookup over the service catalog.
///
/// Used to join appointments against services when the caller did not
/// already get the duration from the database.
#[derive(Debug, Clone, Default)]
pub struct ServiceCatalog {
    durations: HashMap<Uuid, i64>,
}

impl ServiceCatalog {
    pub fn new<'a>(services: impl IntoIterator<Item = &'a Service>) -> Self {
        let durations = services
            .into_iter()
            .filter_map(|service| service.duration_minutes.map(|minutes| (service.id, minutes)))
            .collect();

        Self { durations }
    }

    pub fn duration_for(&self, appointment: &Appointment) -> Option<i64> {
        appointment
            .service_id
            .and_then(|id| self.durations.get(&id).copied())
    }

    /// Fills `service_duration_minutes` on appointments that lack one.
    pub fn attach_durations(&self, appointments: &mut [Appointment]) {
        for appointment in appointments
            .iter_mut()
            .filter(|a| a.service_duration_minutes.is_none())
        {
            appointment.service_duration_minutes = self.duration_for(appointment);
        }
    }
}

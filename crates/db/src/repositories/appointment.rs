use crate::models::DbAppointment;
use chrono::NaiveDateTime;
use eyre::Result;
use sqlx::{Pool, Postgres};

/// Appointments starting in `[from, to)`, with the duration of their
/// service joined in, ordered by start.
pub async fn get_appointments_between(
    pool: &Pool<Postgres>,
    from: NaiveDateTime,
    to: NaiveDateTime,
) -> Result<Vec<DbAppointment>> {
    tracing::debug!("Loading appointments between {} and {}", from, to);

    let appointments = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT a.id, a.client_id, a.service_id, a.scheduled_at, a.end_time, a.status,
               s.duration_minutes AS service_duration_minutes,
               a.created_at, a.updated_at
        FROM appointments a
        LEFT JOIN services s ON s.id = a.service_id
        WHERE a.scheduled_at >= $1 AND a.scheduled_at < $2
        ORDER BY a.scheduled_at ASC
        "#,
    )
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;

    tracing::debug!("Loaded {} appointments", appointments.len());
    Ok(appointments)
}

use crate::models::DbDataVersion;
use eyre::Result;
use sqlx::{Pool, Postgres};

/// Fingerprint of everything the slot calculation reads.
///
/// Each table contributes its row count and an md5 digest of its rows in id
/// order, so any insert, delete or column update changes the result whether
/// or not the writer touched `updated_at`.
pub async fn get_data_version(pool: &Pool<Postgres>) -> Result<DbDataVersion> {
    let version = sqlx::query_as::<_, DbDataVersion>(
        r#"
        SELECT
            (SELECT COUNT(*) FROM appointments) AS appointment_count,
            (SELECT md5(string_agg(a::text, '|' ORDER BY a.id)) FROM appointments a) AS appointments_digest,
            (SELECT COUNT(*) FROM services) AS service_count,
            (SELECT md5(string_agg(s::text, '|' ORDER BY s.id)) FROM services s) AS services_digest,
            (SELECT COUNT(*) FROM blocked_days) AS blocked_day_count,
            (SELECT md5(string_agg(b::text, '|' ORDER BY b.id)) FROM blocked_days b) AS blocked_days_digest
        "#,
    )
    .fetch_one(pool)
    .await?;

    tracing::debug!("Current data generation: {}", version.generation());
    Ok(version)
}

use crate::models::DbBlockedDay;
use chrono::NaiveDate;
use eyre::Result;
use sqlx::{Pool, Postgres};

/// Blocked days in `[from, to)`.
pub async fn get_blocked_days_between(
    pool: &Pool<Postgres>,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<DbBlockedDay>> {
    let blocked_days = sqlx::query_as::<_, DbBlockedDay>(
        r#"
        SELECT id, blocked_on, reason, created_at
        FROM blocked_days
        WHERE blocked_on >= $1 AND blocked_on < $2
        ORDER BY blocked_on ASC
        "#,
    )
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;

    Ok(blocked_days)
}

use eyre::Result;
use sqlx::{Executor, Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create services table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS services (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            price_cents BIGINT NOT NULL DEFAULT 0,
            duration_minutes INTEGER NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT positive_duration CHECK (duration_minutes IS NULL OR duration_minutes > 0)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create appointments table; times are salon-local wall clock
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS appointments (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            client_id UUID NULL,
            service_id UUID NULL REFERENCES services(id) ON DELETE SET NULL,
            scheduled_at TIMESTAMP WITHOUT TIME ZONE NOT NULL,
            end_time TIMESTAMP WITHOUT TIME ZONE NULL,
            status VARCHAR(16) NOT NULL DEFAULT 'pending',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_status CHECK (status IN ('pending', 'confirmed', 'canceled'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create blocked_days table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS blocked_days (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            blocked_on DATE NOT NULL,
            reason VARCHAR(255) NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes; several statements need the simple query protocol
    pool.execute(
        r#"
        CREATE INDEX IF NOT EXISTS idx_appointments_scheduled_at ON appointments(scheduled_at);
        CREATE INDEX IF NOT EXISTS idx_appointments_service_id ON appointments(service_id);
        CREATE INDEX IF NOT EXISTS idx_blocked_days_blocked_on ON blocked_days(blocked_on);
        "#,
    )
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}

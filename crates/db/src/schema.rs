use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_one_off_slots_start_at ON one_off_slots(start_at)",
    "CREATE INDEX IF NOT EXISTS idx_weekly_availability_day ON weekly_availability(day_of_week)",
    "CREATE INDEX IF NOT EXISTS idx_bookings_slot_id ON bookings(slot_id)",
];

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create one_off_slots table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS one_off_slots (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            start_at TIMESTAMP WITH TIME ZONE NOT NULL,
            duration_minutes INTEGER NOT NULL,
            title VARCHAR(255) NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT positive_duration CHECK (duration_minutes > 0)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create weekly_availability table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS weekly_availability (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            day_of_week SMALLINT NOT NULL,
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            slot_duration_minutes INTEGER NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_day_of_week CHECK (day_of_week BETWEEN 0 AND 6),
            CONSTRAINT valid_time_range CHECK (end_time > start_time),
            CONSTRAINT positive_slot_duration CHECK (slot_duration_minutes > 0)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create bookings table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bookings (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            slot_id UUID NOT NULL REFERENCES one_off_slots(id),
            name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    for statement in INDEXES {
        sqlx::query(*statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}

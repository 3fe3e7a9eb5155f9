use crate::models::DbWeeklyAvailability;
use chrono::Utc;
use eyre::Result;
use slotbook_core::models::weekly::WeeklyAvailabilityInput;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn list_weekly_availability(pool: &Pool<Postgres>) -> Result<Vec<DbWeeklyAvailability>> {
    let blocks = sqlx::query_as::<_, DbWeeklyAvailability>(
        r#"
        SELECT id, day_of_week, start_time, end_time, slot_duration_minutes, created_at
        FROM weekly_availability
        ORDER BY day_of_week ASC, start_time ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(blocks)
}

/// Swaps the whole weekly template for `blocks` in a single transaction.
pub async fn replace_weekly_availability(
    pool: &Pool<Postgres>,
    blocks: &[WeeklyAvailabilityInput],
) -> Result<Vec<DbWeeklyAvailability>> {
    let now = Utc::now();
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM weekly_availability")
        .execute(&mut *tx)
        .await?;

    let mut inserted = Vec::with_capacity(blocks.len());
    for block in blocks {
        let row = sqlx::query_as::<_, DbWeeklyAvailability>(
            r#"
            INSERT INTO weekly_availability
                (id, day_of_week, start_time, end_time, slot_duration_minutes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, day_of_week, start_time, end_time, slot_duration_minutes, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(i16::from(block.day_of_week))
        .bind(block.start_time.as_naive())
        .bind(block.end_time.as_naive())
        .bind(block.slot_duration_minutes)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;
        inserted.push(row);
    }

    tx.commit().await?;

    tracing::debug!("Replaced weekly availability with {} blocks", inserted.len());
    inserted.sort_by_key(|row| (row.day_of_week, row.start_time));
    Ok(inserted)
}

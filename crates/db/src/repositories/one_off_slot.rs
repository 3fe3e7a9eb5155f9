use crate::{models::DbOneOffSlot, repositories::booking};
use chrono::{DateTime, Utc};
use eyre::Result;
use slotbook_core::models::slot::DeleteSlotOutcome;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_one_off_slot(
    pool: &Pool<Postgres>,
    start_at: DateTime<Utc>,
    duration_minutes: i32,
    title: Option<&str>,
) -> Result<DbOneOffSlot> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating one-off slot: id={}, start_at={}, duration_minutes={}",
        id, start_at, duration_minutes
    );

    let slot = sqlx::query_as::<_, DbOneOffSlot>(
        r#"
        INSERT INTO one_off_slots (id, start_at, duration_minutes, title, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, start_at, duration_minutes, title, created_at
        "#,
    )
    .bind(id)
    .bind(start_at)
    .bind(duration_minutes)
    .bind(title)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(slot)
}

/// One-off slots starting inside `[start, end]`, earliest first.
pub async fn list_one_off_slots_between(
    pool: &Pool<Postgres>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<DbOneOffSlot>> {
    let slots = sqlx::query_as::<_, DbOneOffSlot>(
        r#"
        SELECT id, start_at, duration_minutes, title, created_at
        FROM one_off_slots
        WHERE start_at >= $1 AND start_at <= $2
        ORDER BY start_at ASC, created_at ASC
        "#,
    )
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    Ok(slots)
}

#[cfg(test)]
pub async fn get_one_off_slot_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbOneOffSlot>> {
    let slot = sqlx::query_as::<_, DbOneOffSlot>(
        r#"
        SELECT id, start_at, duration_minutes, title, created_at
        FROM one_off_slots
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(slot)
}

/// Deletes a one-off slot unless a booking references it.
///
/// The slot row is locked for the duration of the check so a booking cannot
/// slip in between the check and the delete.
pub async fn delete_one_off_slot(pool: &Pool<Postgres>, id: Uuid) -> Result<DeleteSlotOutcome> {
    let mut tx = pool.begin().await?;

    let locked = sqlx::query_scalar::<_, Uuid>(
        r#"
        SELECT id
        FROM one_off_slots
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?;

    if locked.is_none() {
        tx.rollback().await?;
        return Ok(DeleteSlotOutcome::NotFound);
    }

    if booking::slot_has_booking(&mut *tx, id).await? {
        tracing::debug!("Refusing to delete booked slot: id={}", id);
        tx.rollback().await?;
        return Ok(DeleteSlotOutcome::Booked);
    }

    sqlx::query(
        r#"
        DELETE FROM one_off_slots
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(DeleteSlotOutcome::Deleted)
}

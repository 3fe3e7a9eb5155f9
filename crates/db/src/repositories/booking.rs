use eyre::Result;
use sqlx::postgres::PgExecutor;
use uuid::Uuid;

/// Whether any booking references the given one-off slot.
pub async fn slot_has_booking<'e, E>(executor: E, slot_id: Uuid) -> Result<bool>
where
    E: PgExecutor<'e>,
{
    let exists = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (
            SELECT 1
            FROM bookings
            WHERE slot_id = $1
        );
        "#,
    )
    .bind(slot_id)
    .fetch_one(executor)
    .await?;

    Ok(exists)
}

//! Administration of one-off slots and the weekly availability template.
//!
//! Every handler authorizes the caller before touching the store.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use slotbook_core::{
    errors::BookingError,
    models::{
        slot::{CreateOneOffSlotRequest, DeleteSlotOutcome, Slot},
        weekly::{ReplaceWeeklyAvailabilityRequest, WeeklyAvailabilityResponse},
    },
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::{
    middleware::{auth::authorize_admin, error_handling::AppError},
    ApiState,
};

pub async fn create_slot(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    payload: Result<Json<CreateOneOffSlotRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Slot>), AppError> {
    authorize_admin(&state, &headers)?;
    let Json(request) = payload?;
    request.validate()?;

    let title = request.normalized_title().map(str::to_string);
    let slot = state
        .store
        .create_one_off_slot(request.start_at, request.duration_minutes, title)
        .await?;

    info!(slot_id = %slot.id, start_at = %slot.start_at, "Created one-off slot");
    Ok((StatusCode::CREATED, Json(Slot::from(slot))))
}

pub async fn delete_slot(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    authorize_admin(&state, &headers)?;

    match state.store.delete_one_off_slot(id).await? {
        DeleteSlotOutcome::Deleted => {
            info!(slot_id = %id, "Deleted one-off slot");
            Ok(StatusCode::NO_CONTENT)
        }
        DeleteSlotOutcome::NotFound => Err(AppError(BookingError::NotFound(format!(
            "Slot {} not found",
            id
        )))),
        DeleteSlotOutcome::Booked => Err(AppError(BookingError::Conflict(format!(
            "Slot {} has a booking and cannot be deleted",
            id
        )))),
    }
}

pub async fn get_availability(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
) -> Result<Json<WeeklyAvailabilityResponse>, AppError> {
    authorize_admin(&state, &headers)?;

    let blocks = state.store.list_weekly_availability_blocks().await?;
    Ok(Json(WeeklyAvailabilityResponse { blocks }))
}

pub async fn replace_availability(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    payload: Result<Json<ReplaceWeeklyAvailabilityRequest>, JsonRejection>,
) -> Result<Json<WeeklyAvailabilityResponse>, AppError> {
    authorize_admin(&state, &headers)?;
    let Json(request) = payload?;

    for (index, block) in request.blocks.iter().enumerate() {
        block.validate().map_err(|err| match err {
            BookingError::Validation(message) => {
                AppError(BookingError::Validation(format!("blocks[{}]: {}", index, message)))
            }
            other => AppError(other),
        })?;
    }

    let count = request.blocks.len();
    let blocks = state
        .store
        .replace_weekly_availability(request.blocks)
        .await?;

    info!(blocks = count, "Replaced weekly availability");
    Ok(Json(WeeklyAvailabilityResponse { blocks }))
}

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use slotbook_core::{models::slot::SlotsResponse, time::parse_query_date};
use std::sync::Arc;
use tracing::debug;

use crate::{middleware::error_handling::AppError, ApiState};

/// Raw `from`/`to` query parameters. They are kept as strings so a malformed
/// date falls back to the default instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct SlotsQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Lists the bookable slots between `from` and `to` (local dates).
pub async fn list_available_slots(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<SlotsResponse>, AppError> {
    let from = query.from.as_deref().and_then(parse_query_date);
    let to = query.to.as_deref().and_then(parse_query_date);

    if query.from.is_some() && from.is_none() {
        debug!(raw = ?query.from, "Ignoring malformed from date");
    }
    if query.to.is_some() && to.is_none() {
        debug!(raw = ?query.to, "Ignoring malformed to date");
    }

    let slots = state
        .resolver
        .resolve_for_query(from, to, Utc::now())
        .await?;

    Ok(Json(SlotsResponse { slots }))
}

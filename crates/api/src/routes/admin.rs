use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/admin/slots", post(handlers::admin::create_slot))
        .route("/api/admin/slots/:id", delete(handlers::admin::delete_slot))
        .route(
            "/api/admin/availability",
            get(handlers::admin::get_availability).put(handlers::admin::replace_availability),
        )
}

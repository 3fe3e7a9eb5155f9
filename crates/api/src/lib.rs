//! # Slotbook API
//!
//! The API crate provides the web server for the Slotbook booking service.
//! It exposes the public slot availability endpoint and the admin endpoints
//! that manage one-off slots and the weekly availability template.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Implement request processing
//! - **Middleware**: Admin authentication and error mapping
//! - **Config**: Environment configuration
//!
//! Handlers never touch the database pool directly; they go through the
//! [`SlotStore`] and the [`AvailabilityResolver`] held in [`ApiState`].

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Authentication and error handling helpers
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use eyre::Result;
use slotbook_calendar::{build_calendar, config::CalendarConfig};
use slotbook_core::{
    ports::{BusyCalendar, SlotStore},
    resolver::AvailabilityResolver,
};
use slotbook_db::{DbPool, PgSlotStore};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Computes the bookable slots for a window
    pub resolver: AvailabilityResolver,
    /// Slot storage used by the admin endpoints
    pub store: Arc<dyn SlotStore>,
    /// Argon2 hash of the admin password, if admin access is enabled
    pub admin_password_hash: Option<String>,
}

impl ApiState {
    pub fn new(
        store: Arc<dyn SlotStore>,
        calendar: Arc<dyn BusyCalendar>,
        config: &config::ApiConfig,
        calendar_timeout: Duration,
    ) -> Self {
        let resolver = AvailabilityResolver::new(store.clone(), calendar, config.timezone)
            .with_calendar_timeout(calendar_timeout)
            .with_max_window_days(config.max_booking_window_days)
            .with_default_window_days(config.booking_window_days);

        Self {
            resolver,
            store,
            admin_password_hash: config.admin_password_hash.clone(),
        }
    }
}

/// Builds the application router with all routes and request tracing.
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Public booking endpoints
        .merge(routes::booking::routes())
        // Slot administration endpoints
        .merge(routes::admin::routes())
        // Attach shared state to all routes
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Starts the API server with the provided configuration, database and calendar
///
/// # Arguments
///
/// * `config` - API configuration including host, port, and other settings
/// * `db_pool` - PostgreSQL connection pool backing the slot store
/// * `calendar_config` - External calendar settings; an unconfigured calendar
///   disables busy filtering
pub async fn start_server(
    config: config::ApiConfig,
    db_pool: DbPool,
    calendar_config: CalendarConfig,
) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if config.admin_password_hash.is_none() {
        warn!("ADMIN_PASSWORD_HASH not set, admin endpoints will reject every request");
    }

    // Create shared state with dependencies
    let calendar = build_calendar(&calendar_config)?;
    let store: Arc<dyn SlotStore> = Arc::new(PgSlotStore::new(db_pool));
    let state = Arc::new(ApiState::new(
        store,
        calendar,
        &config,
        calendar_config.timeout,
    ));

    let app = app(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let allowed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin: {}", origin);
                    None
                }
            })
            .collect();

        let cors = CorsLayer::new()
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
            .allow_origin(allowed)
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware
    let app = app.layer(
        ServiceBuilder::new()
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout)))
            .into_inner(),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(timezone = %config.timezone, "Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

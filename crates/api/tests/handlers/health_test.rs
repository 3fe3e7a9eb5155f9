use axum::http::StatusCode;
use chrono_tz::Tz;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::test_utils::TestContext;

#[tokio::test]
async fn test_health_reports_timezone_and_version() {
    let mut ctx = TestContext::new();
    ctx.timezone = Tz::Europe__Berlin;
    let server = ctx.server();

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(
        body,
        json!({
            "status": "ok",
            "timezone": "Europe/Berlin",
            "version": env!("CARGO_PKG_VERSION"),
        })
    );
}

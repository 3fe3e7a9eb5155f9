use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use slotbook_core::{
    models::{
        slot::{DeleteSlotOutcome, OneOffSlot},
        weekly::{WeeklyAvailabilityBlock, WeeklyAvailabilityInput},
    },
    time::TimeOfDay,
};
use uuid::Uuid;

use crate::test_utils::{admin_auth, bearer, TestContext};

#[tokio::test]
async fn test_create_slot_returns_created_slot() {
    let id = Uuid::new_v4();
    let mut ctx = TestContext::new();
    ctx.store
        .expect_create_one_off_slot()
        .withf(|start_at, duration, title| {
            *start_at == "2030-02-01T15:00:00Z".parse::<DateTime<Utc>>().unwrap()
                && *duration == 45
                && title.as_deref() == Some("Intro call")
        })
        .times(1)
        .returning(move |start_at, duration_minutes, title| {
            Ok(OneOffSlot {
                id,
                start_at,
                duration_minutes,
                title,
            })
        });

    let server = ctx.server();
    let (name, value) = admin_auth();
    let response = server
        .post("/api/admin/slots")
        .add_header(name, value)
        .json(&json!({
            "startAt": "2030-02-01T15:00:00Z",
            "durationMinutes": 45,
            "title": "  Intro call  ",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(
        body,
        json!({
            "id": id.to_string(),
            "startAt": "2030-02-01T15:00:00Z",
            "durationMinutes": 45,
            "title": "Intro call",
        })
    );
}

#[tokio::test]
async fn test_create_slot_rejects_non_positive_duration() {
    let mut ctx = TestContext::new();
    ctx.store.expect_create_one_off_slot().never();

    let server = ctx.server();
    let (name, value) = admin_auth();
    let response = server
        .post("/api/admin/slots")
        .add_header(name, value)
        .json(&json!({
            "startAt": "2030-02-01T15:00:00Z",
            "durationMinutes": 0,
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("durationMinutes"));
}

#[tokio::test]
async fn test_admin_routes_require_bearer_token() {
    let mut ctx = TestContext::new();
    ctx.store.expect_create_one_off_slot().never();
    ctx.store.expect_list_weekly_availability_blocks().never();

    let server = ctx.server();
    let response = server
        .post("/api/admin/slots")
        .json(&json!({
            "startAt": "2030-02-01T15:00:00Z",
            "durationMinutes": 30,
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = server.get("/api/admin/availability").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_routes_reject_wrong_password() {
    let mut ctx = TestContext::new();
    ctx.store.expect_list_weekly_availability_blocks().never();

    let server = ctx.server();
    let (name, value) = bearer("hunter2");
    let response = server
        .get("/api/admin/availability")
        .add_header(name, value)
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(
        body,
        json!({ "error": "Authentication error: Invalid admin password" })
    );
}

#[tokio::test]
async fn test_admin_routes_closed_without_configured_hash() {
    let mut ctx = TestContext::new().without_admin_password();
    ctx.store.expect_list_weekly_availability_blocks().never();

    let server = ctx.server();
    let (name, value) = admin_auth();
    let response = server
        .get("/api/admin/availability")
        .add_header(name, value)
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_delete_slot_outcomes() {
    let deleted = Uuid::new_v4();
    let missing = Uuid::new_v4();
    let booked = Uuid::new_v4();

    let mut ctx = TestContext::new();
    ctx.store
        .expect_delete_one_off_slot()
        .returning(move |id| {
            Ok(if id == deleted {
                DeleteSlotOutcome::Deleted
            } else if id == booked {
                DeleteSlotOutcome::Booked
            } else {
                DeleteSlotOutcome::NotFound
            })
        })
        .times(3);

    let server = ctx.server();

    let (name, value) = admin_auth();
    let response = server
        .delete(&format!("/api/admin/slots/{}", deleted))
        .add_header(name, value)
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let (name, value) = admin_auth();
    let response = server
        .delete(&format!("/api/admin/slots/{}", missing))
        .add_header(name, value)
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let (name, value) = admin_auth();
    let response = server
        .delete(&format!("/api/admin/slots/{}", booked))
        .add_header(name, value)
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_delete_slot_with_malformed_id() {
    let mut ctx = TestContext::new();
    ctx.store.expect_delete_one_off_slot().never();

    let server = ctx.server();
    let (name, value) = admin_auth();
    let response = server
        .delete("/api/admin/slots/not-a-uuid")
        .add_header(name, value)
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_availability_lists_blocks() {
    let id = Uuid::new_v4();
    let mut ctx = TestContext::new();
    ctx.store
        .expect_list_weekly_availability_blocks()
        .returning(move || {
            Ok(vec![WeeklyAvailabilityBlock {
                id,
                day_of_week: 2,
                start_time: TimeOfDay::new(13, 0).unwrap(),
                end_time: TimeOfDay::new(17, 30).unwrap(),
                slot_duration_minutes: 45,
            }])
        });

    let server = ctx.server();
    let (name, value) = admin_auth();
    let response = server
        .get("/api/admin/availability")
        .add_header(name, value)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(
        body,
        json!({
            "blocks": [{
                "id": id.to_string(),
                "dayOfWeek": 2,
                "startTime": "13:00",
                "endTime": "17:30",
                "slotDurationMinutes": 45,
            }]
        })
    );
}

#[tokio::test]
async fn test_replace_availability_writes_all_blocks() {
    let mut ctx = TestContext::new();
    ctx.store
        .expect_replace_weekly_availability()
        .withf(|blocks: &Vec<WeeklyAvailabilityInput>| {
            blocks.len() == 2 && blocks[0].day_of_week == 1 && blocks[1].day_of_week == 3
        })
        .times(1)
        .returning(|blocks| {
            Ok(blocks
                .into_iter()
                .map(|block| block.into_block(Uuid::new_v4()))
                .collect())
        });

    let server = ctx.server();
    let (name, value) = admin_auth();
    let response = server
        .put("/api/admin/availability")
        .add_header(name, value)
        .json(&json!({
            "blocks": [
                { "dayOfWeek": 1, "startTime": "09:00", "endTime": "12:00", "slotDurationMinutes": 30 },
                { "dayOfWeek": 3, "startTime": "14:00", "endTime": "16:00", "slotDurationMinutes": 60 },
            ]
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    let blocks = body["blocks"].as_array().unwrap();
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[1]["startTime"], json!("14:00"));
}

#[tokio::test]
async fn test_replace_availability_rejects_invalid_block() {
    let mut ctx = TestContext::new();
    ctx.store.expect_replace_weekly_availability().never();

    let server = ctx.server();
    let (name, value) = admin_auth();
    let response = server
        .put("/api/admin/availability")
        .add_header(name, value)
        .json(&json!({
            "blocks": [
                { "dayOfWeek": 1, "startTime": "09:00", "endTime": "12:00", "slotDurationMinutes": 30 },
                { "dayOfWeek": 7, "startTime": "09:00", "endTime": "12:00", "slotDurationMinutes": 30 },
            ]
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("blocks[1]"));
}

#[tokio::test]
async fn test_created_slot_start_is_preserved() {
    let mut ctx = TestContext::new();
    ctx.store
        .expect_create_one_off_slot()
        .returning(|start_at, duration_minutes, title| {
            Ok(OneOffSlot {
                id: Uuid::new_v4(),
                start_at,
                duration_minutes,
                title,
            })
        });

    let server = ctx.server();
    let (name, value) = admin_auth();
    let response = server
        .post("/api/admin/slots")
        .add_header(name, value)
        .json(&json!({
            "startAt": "2030-02-01T16:00:00+01:00",
            "durationMinutes": 30,
            "title": "   ",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["startAt"], json!("2030-02-01T15:00:00Z"));
    assert!(body.get("title").is_none());
}

#[tokio::test]
async fn test_malformed_body_is_a_json_validation_error() {
    let mut ctx = TestContext::new();
    ctx.store.expect_create_one_off_slot().never();
    ctx.store.expect_replace_weekly_availability().never();

    let server = ctx.server();

    let (name, value) = admin_auth();
    let response = server
        .post("/api/admin/slots")
        .add_header(name, value)
        .json(&json!({ "durationMinutes": 30 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("startAt"));

    let (name, value) = admin_auth();
    let response = server
        .put("/api/admin/availability")
        .add_header(name, value)
        .json(&json!({ "blocks": [{ "dayOfWeek": 1, "startTime": "nine", "endTime": "12:00", "slotDurationMinutes": 30 }] }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_body_is_not_inspected_before_authentication() {
    let mut ctx = TestContext::new();
    ctx.store.expect_create_one_off_slot().never();

    let server = ctx.server();
    let response = server
        .post("/api/admin/slots")
        .json(&json!({ "unexpected": true }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

use axum::http::StatusCode;
use chrono::{DateTime, Duration, Utc};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use slotbook_core::{
    models::{
        busy::BusyInterval,
        slot::{OneOffSlot, SlotsResponse},
        weekly::WeeklyAvailabilityBlock,
    },
    ports::CalendarError,
    time::TimeOfDay,
};
use uuid::Uuid;

use crate::test_utils::TestContext;

fn at(raw: &str) -> DateTime<Utc> {
    raw.parse().unwrap()
}

fn monday_block(id: Uuid) -> WeeklyAvailabilityBlock {
    WeeklyAvailabilityBlock {
        id,
        day_of_week: 1,
        start_time: TimeOfDay::new(9, 0).unwrap(),
        end_time: TimeOfDay::new(11, 0).unwrap(),
        slot_duration_minutes: 30,
    }
}

fn starts(response: &SlotsResponse) -> Vec<DateTime<Utc>> {
    response.slots.iter().map(|slot| slot.start_at).collect()
}

// 2030-01-07 is a Monday
const MONDAY: &str = "2030-01-07";

#[test_log::test(tokio::test)]
async fn test_weekly_block_expands_into_slots() {
    let block_id = Uuid::new_v4();
    let mut ctx = TestContext::new();
    ctx.store
        .expect_list_one_off_slots()
        .returning(|_| Ok(Vec::new()));
    ctx.store
        .expect_list_weekly_availability_blocks()
        .returning(move || Ok(vec![monday_block(block_id)]));
    ctx.calendar
        .expect_list_busy_intervals()
        .returning(|_| Ok(Vec::new()));

    let server = ctx.server();
    let response = server
        .get("/api/booking/slots")
        .add_query_param("from", MONDAY)
        .add_query_param("to", MONDAY)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: SlotsResponse = response.json();
    assert_eq!(
        starts(&body),
        vec![
            at("2030-01-07T09:00:00Z"),
            at("2030-01-07T09:30:00Z"),
            at("2030-01-07T10:00:00Z"),
            at("2030-01-07T10:30:00Z"),
        ]
    );
    assert_eq!(
        body.slots[0].id,
        format!("weekly-{}-{}", block_id, 1894006800)
    );
    assert!(body.slots.iter().all(|slot| slot.duration_minutes == 30));
}

#[test_log::test(tokio::test)]
async fn test_busy_intervals_remove_overlapping_slots() {
    let mut ctx = TestContext::new();
    ctx.store
        .expect_list_one_off_slots()
        .returning(|_| Ok(Vec::new()));
    ctx.store
        .expect_list_weekly_availability_blocks()
        .returning(|| Ok(vec![monday_block(Uuid::new_v4())]));
    ctx.calendar.expect_list_busy_intervals().returning(|_| {
        Ok(vec![BusyInterval {
            start: at("2030-01-07T09:30:00Z"),
            end: at("2030-01-07T10:00:00Z"),
        }])
    });

    let server = ctx.server();
    let response = server
        .get("/api/booking/slots")
        .add_query_param("from", MONDAY)
        .add_query_param("to", MONDAY)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: SlotsResponse = response.json();
    assert_eq!(
        starts(&body),
        vec![
            at("2030-01-07T09:00:00Z"),
            at("2030-01-07T10:00:00Z"),
            at("2030-01-07T10:30:00Z"),
        ]
    );
}

#[test_log::test(tokio::test)]
async fn test_calendar_failure_still_returns_slots() {
    let mut ctx = TestContext::new();
    ctx.store
        .expect_list_one_off_slots()
        .returning(|_| Ok(Vec::new()));
    ctx.store
        .expect_list_weekly_availability_blocks()
        .returning(|| Ok(vec![monday_block(Uuid::new_v4())]));
    ctx.calendar
        .expect_list_busy_intervals()
        .returning(|_| Err(CalendarError::Provider("503 Service Unavailable".to_string())));

    let server = ctx.server();
    let response = server
        .get("/api/booking/slots")
        .add_query_param("from", MONDAY)
        .add_query_param("to", MONDAY)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: SlotsResponse = response.json();
    assert_eq!(body.slots.len(), 4);
}

#[test_log::test(tokio::test)]
async fn test_one_off_slot_wins_over_generated_slot() {
    let one_off_id = Uuid::new_v4();
    let mut ctx = TestContext::new();
    ctx.store.expect_list_one_off_slots().returning(move |_| {
        Ok(vec![OneOffSlot {
            id: one_off_id,
            start_at: at("2030-01-07T09:00:00Z"),
            duration_minutes: 60,
            title: Some("Office hours".to_string()),
        }])
    });
    ctx.store
        .expect_list_weekly_availability_blocks()
        .returning(|| Ok(vec![monday_block(Uuid::new_v4())]));
    ctx.calendar
        .expect_list_busy_intervals()
        .returning(|_| Ok(Vec::new()));

    let server = ctx.server();
    let response = server
        .get("/api/booking/slots")
        .add_query_param("from", MONDAY)
        .add_query_param("to", MONDAY)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    let slots = body["slots"].as_array().unwrap();
    assert_eq!(slots.len(), 4);
    assert_eq!(
        slots[0],
        json!({
            "id": one_off_id.to_string(),
            "startAt": "2030-01-07T09:00:00Z",
            "durationMinutes": 60,
            "title": "Office hours",
        })
    );
    // Generated slots carry no title
    assert!(slots[1].get("title").is_none());
}

#[test_log::test(tokio::test)]
async fn test_malformed_dates_fall_back_to_default_window() {
    let mut ctx = TestContext::new();
    ctx.store
        .expect_list_one_off_slots()
        .withf(|window| {
            let now = Utc::now();
            window.start <= now
                && window.start > now - Duration::minutes(1)
                && window.end - window.start == Duration::days(14)
        })
        .returning(|_| Ok(Vec::new()));
    ctx.store
        .expect_list_weekly_availability_blocks()
        .returning(|| Ok(Vec::new()));
    ctx.calendar
        .expect_list_busy_intervals()
        .returning(|_| Ok(Vec::new()));

    let server = ctx.server();
    let response = server
        .get("/api/booking/slots")
        .add_query_param("from", "next tuesday")
        .add_query_param("to", "2030-13-45")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: SlotsResponse = response.json();
    assert!(body.slots.is_empty());
}

#[test_log::test(tokio::test)]
async fn test_past_window_returns_no_slots_without_reads() {
    let mut ctx = TestContext::new();
    ctx.store.expect_list_one_off_slots().never();
    ctx.store.expect_list_weekly_availability_blocks().never();
    ctx.calendar.expect_list_busy_intervals().never();

    let server = ctx.server();
    let response = server
        .get("/api/booking/slots")
        .add_query_param("from", "2001-01-01")
        .add_query_param("to", "2001-01-31")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: SlotsResponse = response.json();
    assert!(body.slots.is_empty());
}

#[test_log::test(tokio::test)]
async fn test_store_failure_returns_internal_error() {
    let mut ctx = TestContext::new();
    ctx.store
        .expect_list_one_off_slots()
        .returning(|_| Err(eyre::eyre!("connection refused")));
    ctx.store
        .expect_list_weekly_availability_blocks()
        .returning(|| Ok(Vec::new()));
    ctx.calendar
        .expect_list_busy_intervals()
        .returning(|_| Ok(Vec::new()));

    let server = ctx.server();
    let response = server
        .get("/api/booking/slots")
        .add_query_param("from", MONDAY)
        .add_query_param("to", MONDAY)
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body, json!({ "error": "Internal server error" }));
}

#[test_log::test(tokio::test)]
async fn test_far_future_to_is_capped() {
    let mut ctx = TestContext::new();
    ctx.store
        .expect_list_one_off_slots()
        .withf(|window| window.end - window.start == Duration::days(90))
        .times(1)
        .returning(|_| Ok(Vec::new()));
    ctx.store
        .expect_list_weekly_availability_blocks()
        .returning(|| Ok(vec![monday_block(Uuid::new_v4())]));
    ctx.calendar
        .expect_list_busy_intervals()
        .returning(|_| Ok(Vec::new()));

    let server = ctx.server();
    let response = server
        .get("/api/booking/slots")
        .add_query_param("to", "9999-12-31")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: SlotsResponse = response.json();
    // Roughly thirteen Mondays of four slots each
    assert!(body.slots.len() <= 14 * 4);
}

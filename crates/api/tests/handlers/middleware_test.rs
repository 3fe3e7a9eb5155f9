use axum::{http::StatusCode, response::IntoResponse};
use rstest::rstest;
use slotbook_api::middleware::{auth, error_handling::AppError};
use slotbook_core::errors::BookingError;

#[rstest]
#[case::not_found(BookingError::NotFound("slot".to_string()), StatusCode::NOT_FOUND)]
#[case::validation(BookingError::Validation("bad".to_string()), StatusCode::BAD_REQUEST)]
#[case::authentication(BookingError::Authentication("no".to_string()), StatusCode::UNAUTHORIZED)]
#[case::conflict(BookingError::Conflict("booked".to_string()), StatusCode::CONFLICT)]
#[case::database(BookingError::Database(eyre::eyre!("db down")), StatusCode::INTERNAL_SERVER_ERROR)]
#[case::internal(
    BookingError::Internal(Box::new(std::io::Error::new(std::io::ErrorKind::Other, "boom"))),
    StatusCode::INTERNAL_SERVER_ERROR
)]
fn test_error_status_mapping(#[case] error: BookingError, #[case] expected: StatusCode) {
    let response = AppError(error).into_response();
    assert_eq!(response.status(), expected);
}

#[test]
fn test_hash_password() {
    let password = "test_password";
    let hashed = auth::hash_password(password).unwrap();

    assert_ne!(hashed, password);
    assert!(hashed.starts_with("$argon2"));
}

#[test]
fn test_verify_password() {
    let hashed = auth::hash_password("test_password").unwrap();

    assert!(auth::verify_password(&hashed, "test_password"));
    assert!(!auth::verify_password(&hashed, "wrong_password"));
}

use thiserror::Error;

/// Failures surfaced by booking operations.
///
/// Client-caused variants carry a message safe to show to the caller;
/// `Database` and `Internal` carry details meant for the logs only.
#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    /// The operation would change a slot that is already booked.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl BookingError {
    /// Whether the error stems from the service itself rather than the request.
    pub fn is_internal(&self) -> bool {
        matches!(self, BookingError::Database(_) | BookingError::Internal(_))
    }
}

pub type BookingResult<T> = Result<T, BookingError>;

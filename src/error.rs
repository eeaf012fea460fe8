//! Gateway error types with HTTP status code mapping.
//!
//! [`GatewayError`] is the central error type for the gateway. Each variant
//! maps to a specific HTTP status code and structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::EventStatus;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "success": false,
///   "error": {
///     "code": 2001,
///     "message": "event not found: 7"
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category            | HTTP Status                   |
/// |-----------|---------------------|-------------------------------|
/// | 1000–1999 | Validation / Auth   | 400 Bad Request / 401         |
/// | 2000–2099 | Not Found           | 404 Not Found                 |
/// | 2100–2199 | Lifecycle state     | 400 / 409 Conflict            |
/// | 3000–3999 | Server              | 500 Internal Server Error     |
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Event with the given ID was not found.
    #[error("event not found: {0}")]
    EventNotFound(u64),

    /// Poll was not found on the event.
    #[error("poll {poll_id} not found for event {event_id}")]
    PollNotFound {
        /// Event the poll was looked up on.
        event_id: u64,
        /// Missing poll id.
        poll_id: u64,
    },

    /// Question was not found on the event.
    #[error("question {question_id} not found for event {event_id}")]
    QuestionNotFound {
        /// Event the question was looked up on.
        event_id: u64,
        /// Missing question id.
        question_id: u64,
    },

    /// The event has no engagement record yet.
    #[error("no engagement data for event {0}")]
    EngagementNotFound(u64),

    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Analytics were requested before the event ended.
    #[error("Analytics will be available after the event ends")]
    NotCompleted(u64),

    /// The requested status change is not allowed from the current status.
    #[error("event {event_id} cannot move from {from} to {to}")]
    InvalidTransition {
        /// Event whose status was changed.
        event_id: u64,
        /// Current status.
        from: EventStatus,
        /// Requested status.
        to: EventStatus,
    },

    /// Credentials did not match.
    #[error("Invalid credentials")]
    Unauthorized,

    /// Persistence layer failure.
    #[error("persistence error: {0}")]
    PersistenceError(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::Unauthorized => 1401,
            Self::EventNotFound(_) => 2001,
            Self::PollNotFound { .. } => 2002,
            Self::QuestionNotFound { .. } => 2003,
            Self::EngagementNotFound(_) => 2004,
            Self::NotCompleted(_) => 2101,
            Self::InvalidTransition { .. } => 2102,
            Self::PersistenceError(_) => 3001,
            Self::Internal(_) => 3000,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::NotCompleted(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::EventNotFound(_)
            | Self::PollNotFound { .. }
            | Self::QuestionNotFound { .. }
            | Self::EngagementNotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidTransition { .. } => StatusCode::CONFLICT,
            Self::PersistenceError(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            Self::NotCompleted(_) => Some("Event not completed yet".to_string()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GatewayError {
    fn from(err: std::io::Error) -> Self {
        Self::PersistenceError(err.to_string())
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        Self::PersistenceError(err.to_string())
    }
}

impl From<sqlx::Error> for GatewayError {
    fn from(err: sqlx::Error) -> Self {
        Self::PersistenceError(err.to_string())
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, code = self.error_code(), "request failed");
        } else {
            tracing::debug!(error = %self, code = self.error_code(), "request rejected");
        }
        let body = ErrorResponse {
            success: false,
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: self.details(),
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_variants_map_to_404() {
        assert_eq!(
            GatewayError::EventNotFound(3).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            GatewayError::PollNotFound {
                event_id: 1,
                poll_id: 9
            }
            .status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn not_completed_is_bad_request_with_user_message() {
        let err = GatewayError::NotCompleted(1);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.to_string(),
            "Analytics will be available after the event ends"
        );
    }

    #[test]
    fn invalid_transition_is_conflict() {
        let err = GatewayError::InvalidTransition {
            event_id: 1,
            from: EventStatus::Completed,
            to: EventStatus::Live,
        };
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.to_string(), "event 1 cannot move from completed to live");
    }

    #[test]
    fn io_errors_become_persistence_errors() {
        let err: GatewayError = std::io::Error::other("disk full").into();
        assert_eq!(err.error_code(), 3001);
    }
}

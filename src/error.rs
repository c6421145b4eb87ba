//! Ledger error types with HTTP status code mapping.
//!
//! [`LedgerError`] is the central error type for the service. Each variant
//! maps to a specific HTTP status code and structured JSON error response.
//! The pure ledger engines never produce one: every variant is raised at
//! the boundary (input validation, store access, lookups).

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::MoneyError;
use crate::ledger::{ParticipantRejected, WindowError};

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1002,
///     "message": "participant \"x\" is not part of this event; ..."
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see code ranges on [`LedgerError`]).
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
/// | Range     | Category        | HTTP Status                  |
/// |-----------|-----------------|------------------------------|
/// | 1000–1999 | Validation      | 400 Bad Request              |
/// | 2000–2999 | State/Not Found | 404 Not Found / 409 Conflict |
/// | 3000–3999 | Server          | 500 Internal Server Error    |
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Transaction references a participant outside the event roster.
    #[error(transparent)]
    InvalidParticipant(#[from] ParticipantRejected),

    /// Pagination parameters out of range.
    #[error(transparent)]
    InvalidWindow(#[from] WindowError),

    /// Amount could not be represented with two decimal places.
    #[error(transparent)]
    InvalidAmount(#[from] MoneyError),

    /// Event with the given ID was not found.
    #[error("event not found: {0}")]
    EventNotFound(uuid::Uuid),

    /// Transaction with the given ID was not found in the addressed event.
    #[error("transaction not found: {0}")]
    TransactionNotFound(uuid::Uuid),

    /// A roster change would orphan existing transactions.
    #[error(
        "participant \"{participant_id}\" still has {transactions} transaction(s) in this event"
    )]
    ParticipantInUse {
        /// Participant that would be removed.
        participant_id: String,
        /// Number of transactions still referencing them.
        transactions: usize,
    },

    /// Persistence layer failure.
    #[error("persistence error: {0}")]
    PersistenceError(String),
}

impl LedgerError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::InvalidParticipant(_) => 1002,
            Self::InvalidWindow(_) => 1003,
            Self::InvalidAmount(_) => 1004,
            Self::EventNotFound(_) => 2001,
            Self::TransactionNotFound(_) => 2002,
            Self::ParticipantInUse { .. } => 2101,
            Self::PersistenceError(_) => 3001,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_)
            | Self::InvalidParticipant(_)
            | Self::InvalidWindow(_)
            | Self::InvalidAmount(_) => StatusCode::BAD_REQUEST,
            Self::EventNotFound(_) | Self::TransactionNotFound(_) => StatusCode::NOT_FOUND,
            Self::ParticipantInUse { .. } => StatusCode::CONFLICT,
            Self::PersistenceError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to return to a client.
    ///
    /// Server-side failures are reduced to a generic message; the detail
    /// only goes to the log.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::PersistenceError(_) => "internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<JsonRejection> for LedgerError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for LedgerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.public_message(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

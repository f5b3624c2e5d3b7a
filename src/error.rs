// src/error.rs

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

use crate::ledger::LedgerError;

/// Failures of the scoring core.
///
/// Each variant maps to a stable kind string that callers can match on.
#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    /// Bad caller input. Nothing was written; fix and resend.
    #[error("invalid submission: {0}")]
    InvalidSubmission(String),

    /// The referenced account does not exist.
    #[error("account {0} not found")]
    AccountNotFound(i64),

    /// Lost a concurrent account creation race; a fresh lookup may succeed.
    #[error("account '{0}' is being created concurrently")]
    Conflict(String),

    /// Transient backend failure or timeout. Safe to retry with backoff.
    /// `uncertain` is set when a write may or may not have been applied.
    #[error("storage error: {message}")]
    Storage { message: String, uncertain: bool },
}

impl ScoreError {
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
            uncertain: false,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ScoreError::InvalidSubmission(_) => "invalid_submission",
            ScoreError::AccountNotFound(_) => "account_not_found",
            ScoreError::Conflict(_) => "conflict",
            ScoreError::Storage { .. } => "storage_error",
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, ScoreError::Conflict(_) | ScoreError::Storage { .. })
    }
}

impl From<LedgerError> for ScoreError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::AccountNotFound(id) => ScoreError::AccountNotFound(id),
            LedgerError::DuplicateName(name) => ScoreError::Conflict(name),
            LedgerError::Overflow(id) => ScoreError::InvalidSubmission(format!(
                "submission would overflow the totals of account {}",
                id
            )),
            LedgerError::Storage(message) => ScoreError::Storage {
                message,
                uncertain: false,
            },
            LedgerError::Uncertain(message) => ScoreError::Storage {
                message,
                uncertain: true,
            },
        }
    }
}

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    // 500 Internal Server Error
    InternalServerError(String),

    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized
    AuthError(String),

    // Status depends on the kind of scoring failure
    Score(ScoreError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Score(err) => write!(f, "{}", err),
            other => write!(f, "{:?}", other),
        }
    }
}

impl std::error::Error for AppError {}

/// Converts the error into a JSON body
/// `{"code", "kind", "message", "data": null}` with a matching HTTP status.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal Server Error".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            AppError::AuthError(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg),
            AppError::Score(err) => {
                let kind = err.kind();
                match err {
                    ScoreError::InvalidSubmission(msg) => (StatusCode::BAD_REQUEST, kind, msg),
                    ScoreError::AccountNotFound(_) => (
                        StatusCode::NOT_FOUND,
                        kind,
                        "Account not found".to_string(),
                    ),
                    ScoreError::Conflict(name) => (
                        StatusCode::CONFLICT,
                        kind,
                        format!("Account '{}' is being created, please retry", name),
                    ),
                    ScoreError::Storage { message, uncertain } => {
                        tracing::error!(uncertain, "Storage error: {}", message);
                        let text = if uncertain {
                            "Storage unavailable, the request may or may not have been applied"
                        } else {
                            "Storage unavailable, please retry"
                        };
                        (StatusCode::SERVICE_UNAVAILABLE, kind, text.to_string())
                    }
                }
            }
        };

        let body = Json(json!({
            "code": status.as_u16(),
            "kind": kind,
            "message": message,
            "data": null,
        }));

        (status, body).into_response()
    }
}

impl From<ScoreError> for AppError {
    fn from(err: ScoreError) -> Self {
        AppError::Score(err)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

/// A body that is not the expected JSON shape.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ledger_errors_keep_their_meaning() {
        let err: ScoreError = LedgerError::AccountNotFound(7).into();
        assert!(matches!(err, ScoreError::AccountNotFound(7)));
        assert!(!err.is_retryable());

        let err: ScoreError = LedgerError::DuplicateName("alice".into()).into();
        assert_eq!(err.kind(), "conflict");
        assert!(err.is_retryable());

        let err: ScoreError = LedgerError::Overflow(3).into();
        assert_eq!(err.kind(), "invalid_submission");
        assert!(!err.is_retryable());

        let err: ScoreError = LedgerError::Uncertain("commit failed".into()).into();
        assert!(matches!(err, ScoreError::Storage { uncertain: true, .. }));
    }

    #[test]
    fn score_errors_map_to_http_status() {
        let cases = [
            (ScoreError::InvalidSubmission("x".into()), StatusCode::BAD_REQUEST),
            (ScoreError::AccountNotFound(1), StatusCode::NOT_FOUND),
            (ScoreError::Conflict("bob".into()), StatusCode::CONFLICT),
            (ScoreError::storage("down"), StatusCode::SERVICE_UNAVAILABLE),
        ];

        for (err, status) in cases {
            let response = AppError::from(err).into_response();
            assert_eq!(response.status(), status);
        }
    }
}

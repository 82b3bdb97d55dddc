//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.
//!
//! Every error body is a JSON object carrying at least a human-readable
//! `message` field, matching what the frontend expects.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
///
/// # Error Categories
///
/// - **Authentication errors**: missing, empty, or failed bearer tokens (401)
/// - **Resource errors**: requested rows not found (404)
/// - **Validation errors**: invalid request data or unparseable JSON (400)
/// - **CORS errors**: disallowed browser origins (403)
/// - **Database errors**: any sqlx::Error from store operations (500)
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed (e.g., connection error, query error).
    ///
    /// This wraps any sqlx::Error using the `#[from]` attribute, which
    /// automatically implements `From<sqlx::Error> for AppError`.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// No `Authorization` header, or the value is not a `Bearer` credential.
    #[error("Missing authorization token")]
    MissingToken,

    /// `Authorization: Bearer ` with nothing (or only whitespace) after the scheme.
    #[error("Invalid authorization token")]
    EmptyToken,

    /// Token verification failed: bad signature, expired, or malformed.
    ///
    /// All three collapse into one generic message on purpose. Clients get no
    /// hint whether a forged token failed its signature check or a real one
    /// merely expired.
    #[error("Unauthorized")]
    Unauthorized,

    /// Login attempt with a wrong username or password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Token issuance failed after a successful login.
    #[error("Failed to issue token")]
    TokenIssue(#[source] jsonwebtoken::errors::Error),

    /// Requested customer does not exist.
    #[error("Customer not found")]
    CustomerNotFound,

    /// Requested measurement does not exist.
    #[error("Measurement not found")]
    MeasurementNotFound,

    /// Requested order does not exist.
    #[error("Order not found")]
    OrderNotFound,

    /// Request body was not valid JSON (or did not match the expected shape).
    ///
    /// The String carries the parser's diagnostic, returned alongside the
    /// generic message rather than letting the fault surface as a 500.
    #[error("Invalid JSON payload")]
    MalformedPayload(String),

    /// Request was well-formed JSON but semantically invalid.
    ///
    /// The String contains details about what was invalid.
    #[error("Invalid request")]
    InvalidRequest(String),

    /// Browser request from an origin outside the allow-list.
    #[error("CORS blocked for origin: {0}")]
    OriginBlocked(String),
}

impl AppError {
    /// Map a foreign-key violation to a missing-customer 404.
    ///
    /// Used on inserts into tables referencing `customers`: the owning row is
    /// checked first, but it can be deleted between that check and the
    /// insert, in which case the store reports the dangling reference as a
    /// constraint violation rather than a database fault.
    pub fn customer_fk(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                AppError::CustomerNotFound
            }
            _ => AppError::Database(err),
        }
    }
}

/// Convert AppError into an HTTP response.
///
/// This implementation allows Axum handlers to return `Result<T, AppError>`
/// and have errors automatically converted to proper HTTP responses.
///
/// # Status Code Mapping
///
/// - `MissingToken` / `EmptyToken` / `Unauthorized` / `InvalidCredentials` → 401
/// - `CustomerNotFound` / `MeasurementNotFound` / `OrderNotFound` → 404
/// - `MalformedPayload` / `InvalidRequest` → 400
/// - `OriginBlocked` → 403
/// - `Database` / `TokenIssue` → 500 (details hidden from the client)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::MissingToken
            | AppError::EmptyToken
            | AppError::Unauthorized
            | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::CustomerNotFound
            | AppError::MeasurementNotFound
            | AppError::OrderNotFound => StatusCode::NOT_FOUND,
            AppError::MalformedPayload(_) | AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::OriginBlocked(_) => StatusCode::FORBIDDEN,
            AppError::Database(_) | AppError::TokenIssue(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Build JSON response body. The malformed-payload case carries the
        // parser diagnostic in a separate field; internal errors hide details.
        let body = match self {
            AppError::MalformedPayload(ref detail) => Json(json!({
                "message": self.to_string(),
                "error": detail,
            })),
            AppError::InvalidRequest(ref detail) => Json(json!({
                "message": detail,
            })),
            AppError::Database(_) | AppError::TokenIssue(_) => Json(json!({
                "message": "Server error",
            })),
            ref other => Json(json!({
                "message": other.to_string(),
            })),
        };

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_failures_map_to_401() {
        for err in [
            AppError::MissingToken,
            AppError::EmptyToken,
            AppError::Unauthorized,
            AppError::InvalidCredentials,
        ] {
            let response = err.into_response();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn malformed_payload_maps_to_400() {
        let response = AppError::MalformedPayload("expected value at line 1".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn blocked_origin_maps_to_403() {
        let response = AppError::OriginBlocked("http://evil.example".into()).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn database_error_hides_details() {
        let err = AppError::Database(sqlx::Error::PoolTimedOut);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    /// Minimal DatabaseError impl for exercising the constraint mapping.
    #[derive(Debug)]
    struct StubDbError(sqlx::error::ErrorKind);

    impl std::fmt::Display for StubDbError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "stub database error")
        }
    }

    impl std::error::Error for StubDbError {}

    impl sqlx::error::DatabaseError for StubDbError {
        fn message(&self) -> &str {
            "stub database error"
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            match self.0 {
                sqlx::error::ErrorKind::ForeignKeyViolation => {
                    sqlx::error::ErrorKind::ForeignKeyViolation
                }
                _ => sqlx::error::ErrorKind::Other,
            }
        }
    }

    #[test]
    fn foreign_key_violation_maps_to_customer_not_found() {
        let err = sqlx::Error::Database(Box::new(StubDbError(
            sqlx::error::ErrorKind::ForeignKeyViolation,
        )));
        assert!(matches!(
            AppError::customer_fk(err),
            AppError::CustomerNotFound
        ));
    }

    #[test]
    fn other_database_errors_stay_database_errors() {
        let err = sqlx::Error::Database(Box::new(StubDbError(sqlx::error::ErrorKind::Other)));
        assert!(matches!(AppError::customer_fk(err), AppError::Database(_)));
        assert!(matches!(
            AppError::customer_fk(sqlx::Error::PoolTimedOut),
            AppError::Database(_)
        ));
    }
}

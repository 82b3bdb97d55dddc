//! Bearer token authentication middleware.
//!
//! This middleware intercepts every protected request to:
//! 1. Extract the bearer token from the Authorization header
//! 2. Verify its signature and expiry against the configured secret
//! 3. Inject the decoded claims into the request
//! 4. Reject unauthenticated requests with HTTP 401
//!
//! Verification is purely local (no database round trip), so this middleware
//! never blocks on the store. Failures are answered at this boundary and
//! never reach route handlers; nothing is logged about them.

use crate::{config::Config, error::AppError, token};
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Bearer token authentication middleware function.
///
/// # Flow
///
/// 1. Extract `Authorization: Bearer <token>` header from request
/// 2. Reject with `MissingToken` if the header is absent or the scheme is wrong
/// 3. Reject with `EmptyToken` if nothing remains after trimming whitespace
/// 4. Verify the token; any failure (signature, expiry, malformed payload)
///    collapses into a single `Unauthorized` rejection
/// 5. On success: inject [`token::Claims`] into request extensions, call next
///
/// # Returns
///
/// - `Ok(Response)` if authenticated successfully (calls next handler)
/// - `Err(AppError)` mapping to 401 otherwise
pub async fn require_auth(
    State(config): State<Arc<Config>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default();

    // Expected format: "Bearer <token>"
    let raw = header_value
        .strip_prefix("Bearer ")
        .ok_or(AppError::MissingToken)?;

    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AppError::EmptyToken);
    }

    // One generic rejection for every verification failure mode.
    let claims = token::verify(raw, &config.jwt_secret).map_err(|_| AppError::Unauthorized)?;

    // Route handlers can now extract this using Extension<Claims>
    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Extension, Router,
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        middleware::from_fn_with_state,
        routing::get,
    };
    use tower::ServiceExt;

    const SECRET: &str = "middleware-test-secret";

    fn test_config() -> Arc<Config> {
        Arc::new(Config {
            database_url: "postgres://localhost/unused".to_string(),
            port: 5000,
            jwt_secret: SECRET.to_string(),
            frontend_origins: String::new(),
            admin_username: "admin".to_string(),
            admin_password_sha256: String::new(),
            token_ttl_secs: 3600,
        })
    }

    /// Echoes the authenticated subject, proving claims reached the handler.
    async fn whoami(Extension(claims): Extension<token::Claims>) -> String {
        claims.sub
    }

    fn app() -> Router {
        Router::new()
            .route("/protected", get(whoami))
            .route_layer(from_fn_with_state(test_config(), require_auth))
    }

    fn request_with_auth(value: Option<&str>) -> HttpRequest<Body> {
        let mut builder = HttpRequest::builder().method("GET").uri("/protected");
        if let Some(value) = value {
            builder = builder.header("Authorization", value);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_message(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        body["message"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn missing_header_is_rejected_with_401() {
        let response = app().oneshot(request_with_auth(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_message(response).await, "Missing authorization token");
    }

    #[tokio::test]
    async fn wrong_scheme_is_rejected_with_401() {
        let response = app()
            .oneshot(request_with_auth(Some("Basic dXNlcjpwYXNz")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_message(response).await, "Missing authorization token");
    }

    #[tokio::test]
    async fn empty_token_after_trim_is_rejected_with_401() {
        let response = app()
            .oneshot(request_with_auth(Some("Bearer   ")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_message(response).await, "Invalid authorization token");
    }

    #[tokio::test]
    async fn badly_signed_token_gets_generic_unauthorized() {
        let token = token::issue("admin", "a-different-secret", 3600).unwrap();
        let response = app()
            .oneshot(request_with_auth(Some(&format!("Bearer {token}"))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        // Not a signature-specific message.
        assert_eq!(body_message(response).await, "Unauthorized");
    }

    #[tokio::test]
    async fn valid_token_reaches_handler_with_claims() {
        let token = token::issue("admin", SECRET, 3600).unwrap();
        let response = app()
            .oneshot(request_with_auth(Some(&format!("Bearer {token}"))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"admin");
    }
}

//! Origin allow-list and CORS wiring.
//!
//! Browser requests are only served for origins on an exact-match allow-list:
//! two local development origins plus whatever the operator supplies via
//! `FRONTEND_ORIGINS`. Requests without an `Origin` header (curl, server to
//! server calls) always pass.
//!
//! Enforcement is split in two:
//! - [`origin_guard`] rejects disallowed origins outright with a 403 JSON
//!   error, mirroring how the frontend expects CORS failures to surface
//! - [`AllowedOrigins::cors_layer`] emits the `Access-Control-Allow-*`
//!   headers for listed origins and answers preflight requests

use crate::error::AppError;
use axum::{
    extract::{Request, State},
    http::{HeaderValue, header},
    middleware::Next,
    response::Response,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Origins always allowed, regardless of operator configuration.
const DEFAULT_ORIGINS: &[&str] = &["http://localhost:3000", "http://127.0.0.1:3000"];

/// Immutable origin allow-list, built once at startup from config.
#[derive(Debug, Clone)]
pub struct AllowedOrigins(Vec<String>);

impl AllowedOrigins {
    /// Combine the built-in development origins with operator extras.
    pub fn with_extras(extras: &[String]) -> Self {
        let mut origins: Vec<String> = DEFAULT_ORIGINS.iter().map(|s| s.to_string()).collect();
        origins.extend(extras.iter().cloned());
        Self(origins)
    }

    /// Whether a request with this `Origin` header may proceed.
    ///
    /// `None` (non-browser clients and same-origin server calls) is always
    /// allowed; otherwise the origin must exactly match a list entry.
    pub fn is_allowed(&self, origin: Option<&str>) -> bool {
        match origin {
            None => true,
            Some(origin) => self.0.iter().any(|allowed| allowed == origin),
        }
    }

    /// Build the `tower-http` layer that emits CORS response headers for
    /// listed origins.
    pub fn cors_layer(&self) -> CorsLayer {
        let origins: Vec<HeaderValue> = self
            .0
            .iter()
            .filter_map(|origin| HeaderValue::from_str(origin).ok())
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Reject browser requests from origins outside the allow-list.
pub async fn origin_guard(
    State(allowed): State<AllowedOrigins>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let origin = request
        .headers()
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok());

    if !allowed.is_allowed(origin) {
        return Err(AppError::OriginBlocked(
            origin.unwrap_or_default().to_string(),
        ));
    }

    Ok(next.run(request).await)
}

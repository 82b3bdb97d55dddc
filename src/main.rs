//! Tailoring-business backend - Main Application Entry Point
//!
//! This is a REST API server for a tailoring shop: customers, their body
//! measurements, and clothing orders with payment tracking. Protected routes
//! require a bearer token issued by `/auth/login`.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx (async queries)
//! - **Authentication**: HS256 bearer tokens, verified in middleware
//! - **Format**: JSON requests/responses
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create database connection pool and verify connectivity
//! 3. Run the idempotent schema bootstrap
//! 4. Build HTTP router with routes, CORS, and auth middleware
//! 5. Start server on configured port
//!
//! Any failure before step 5 is fatal: the process exits non-zero instead of
//! serving traffic against an unreachable store or unverified schema.

mod config;
mod db;
mod error;
mod extract;
mod handlers;
mod middleware;
mod models;
mod schema;
mod token;

use std::sync::Arc;

use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::{config::Config, db::DbPool, middleware::cors::AllowedOrigins};

/// Shared application state: the connection pool plus the immutable startup
/// configuration. Cloned per request by Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with tracing subscriber. Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load configuration; fails fast on a missing DATABASE_URL or JWT_SECRET
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Create database pool
    let pool = db::create_pool(&config.database_url).await?;

    // Blocking connectivity check before anything else touches the store
    db::ping(&pool).await?;
    tracing::info!("Database connected");

    // Idempotent schema bootstrap: core tables, then payment-column migration
    schema::bootstrap(&pool).await?;
    tracing::info!("Schema bootstrap complete");

    let port = config.port;
    let state = AppState {
        pool,
        config: Arc::new(config),
    };
    let app = build_router(state);

    // Bind to network address and start server
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Backend running on port {}", port);

    // Start serving HTTP requests
    // This blocks forever, handling requests concurrently with tokio
    axum::serve(listener, app).await?;

    Ok(())
}

/// Assemble the full router: probes, credential issuance, protected CRUD
/// groups, CORS, and tracing.
fn build_router(state: AppState) -> Router {
    let allowed = AllowedOrigins::with_extras(&state.config.extra_origins());

    // Protected routes: every request must carry a valid bearer token
    let protected = Router::new()
        // Customer management routes
        .route("/customers", post(handlers::customers::create_customer))
        .route("/customers", get(handlers::customers::list_customers))
        .route("/customers/{id}", get(handlers::customers::get_customer))
        .route("/customers/{id}", put(handlers::customers::update_customer))
        .route(
            "/customers/{id}",
            delete(handlers::customers::delete_customer),
        )
        // Measurement routes
        .route(
            "/measurements",
            post(handlers::measurements::create_measurement),
        )
        .route(
            "/measurements",
            get(handlers::measurements::list_measurements),
        )
        .route(
            "/measurements/{id}",
            get(handlers::measurements::get_measurement),
        )
        .route(
            "/measurements/{id}",
            delete(handlers::measurements::delete_measurement),
        )
        // Order routes
        .route("/orders", post(handlers::orders::create_order))
        .route("/orders", get(handlers::orders::list_orders))
        .route("/orders/{id}", get(handlers::orders::get_order))
        .route("/orders/{id}", put(handlers::orders::update_order))
        .route("/orders/{id}", delete(handlers::orders::delete_order))
        // Apply authentication middleware to all routes in this group
        .route_layer(axum_middleware::from_fn_with_state(
            state.config.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        // Public probes and credential issuance (no authentication required)
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health))
        .route("/auth/login", post(handlers::auth::login))
        // Merge authenticated routes
        .merge(protected)
        // Emit CORS headers and answer preflight for listed origins
        .layer(allowed.cors_layer())
        // Reject unlisted origins outside the CorsLayer so even preflight
        // requests from them get the 403 JSON rejection
        .layer(axum_middleware::from_fn_with_state(
            allowed.clone(),
            middleware::cors::origin_guard,
        ))
        // Request tracing for observability
        .layer(TraceLayer::new_for_http())
        // Share state with all handlers via State extraction
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    /// State backed by a lazy pool: nothing here ever touches the store.
    fn test_state() -> AppState {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://postgres@localhost/unused")
            .unwrap();
        AppState {
            pool,
            config: Arc::new(Config {
                database_url: "postgres://postgres@localhost/unused".to_string(),
                port: 5000,
                jwt_secret: "router-test-secret".to_string(),
                frontend_origins: "https://shop.example".to_string(),
                admin_username: "admin".to_string(),
                admin_password_sha256: String::new(),
                token_ttl_secs: 3600,
            }),
        }
    }

    #[tokio::test]
    async fn root_probe_is_public() {
        let response = build_router(test_state())
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn protected_group_rejects_missing_token() {
        let response = build_router(test_state())
            .oneshot(Request::get("/customers").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn unlisted_origin_is_blocked_before_routing() {
        let response = build_router(test_state())
            .oneshot(
                Request::get("/")
                    .header("Origin", "http://evil.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn preflight_from_unlisted_origin_is_blocked() {
        let response = build_router(test_state())
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/customers")
                    .header("Origin", "http://evil.example")
                    .header("Access-Control-Request-Method", "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn preflight_from_listed_origin_gets_allow_headers() {
        let response = build_router(test_state())
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/customers")
                    .header("Origin", "http://localhost:3000")
                    .header("Access-Control-Request-Method", "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .and_then(|v| v.to_str().ok()),
            Some("http://localhost:3000")
        );
    }

    #[tokio::test]
    async fn configured_extra_origin_is_allowed() {
        let response = build_router(test_state())
            .oneshot(
                Request::get("/")
                    .header("Origin", "https://shop.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

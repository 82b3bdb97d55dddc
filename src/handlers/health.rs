//! Liveness and health probes.

use crate::{AppState, db};
use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};

/// Root probe: trivial liveness endpoint identifying the service.
///
/// # Response (200 OK)
///
/// ```json
/// {"ok": true, "service": "tailors-backend"}
/// ```
pub async fn root() -> Json<Value> {
    Json(json!({
        "ok": true,
        "service": env!("CARGO_PKG_NAME"),
    }))
}

/// Health probe: verifies the data store answers a trivial query.
///
/// # Response (200 OK)
///
/// ```json
/// {"ok": true}
/// ```
///
/// # Response (500 Internal Server Error)
///
/// ```json
/// {"ok": false, "error": "<diagnostic>"}
/// ```
///
/// A store failure here is reported, never fatal: the probe must answer even
/// when the database is down.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match db::ping(&state.pool).await {
        Ok(()) => (StatusCode::OK, Json(json!({"ok": true}))),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"ok": false, "error": err.to_string()})),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn root_identifies_the_service() {
        let Json(body) = root().await;
        assert_eq!(body["ok"], true);
        assert_eq!(body["service"], "tailors-backend");
    }
}

//! Credential issuance.
//!
//! `POST /auth/login` is the only unauthenticated route group. It checks the
//! supplied credential against the operator account from configuration and
//! answers with a signed bearer token. The schema holds exactly three tables
//! (customers, measurements, orders), so the operator credential lives in
//! config rather than a users table.

use crate::{AppState, error::AppError, extract::AppJson, token};
use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response body.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Bearer token for the `Authorization` header
    pub token: String,

    /// Token lifetime in seconds
    pub expires_in: u64,
}

/// Issue a bearer token for a valid operator credential.
///
/// # Endpoint
///
/// `POST /auth/login`
///
/// # Flow
///
/// 1. SHA-256 the submitted password and compare against the configured
///    digest (the plaintext is never stored or compared directly)
/// 2. Wrong username or password → 401 `{"message": "Invalid credentials"}`
/// 3. Otherwise sign a token with the configured secret and TTL
pub async fn login(
    State(state): State<AppState>,
    AppJson(request): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let digest = hex::encode(Sha256::digest(request.password.as_bytes()));

    let username_ok = request.username == state.config.admin_username;
    let password_ok = digest.eq_ignore_ascii_case(&state.config.admin_password_sha256);
    if !username_ok || !password_ok {
        return Err(AppError::InvalidCredentials);
    }

    let token = token::issue(
        &request.username,
        &state.config.jwt_secret,
        state.config.token_ttl_secs,
    )
    .map_err(AppError::TokenIssue)?;

    Ok(Json(LoginResponse {
        token,
        expires_in: state.config.token_ttl_secs,
    }))
}

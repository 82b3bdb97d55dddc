//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, URL params, etc.)
//! 2. Performs business logic (database queries, validation)
//! 3. Returns HTTP response (JSON, status code)

/// Credential issuance (login)
pub mod auth;
/// Customer CRUD endpoints
pub mod customers;
/// Liveness and store-connectivity probes
pub mod health;
/// Measurement endpoints
pub mod measurements;
/// Order endpoints
pub mod orders;

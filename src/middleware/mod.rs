//! HTTP middleware components.
//!
//! Middleware are functions that run before route handlers.
//! They can:
//! - Authenticate requests
//! - Enforce the CORS origin allow-list
//! - Short-circuit requests (reject unauthorized)

/// Bearer token authentication middleware
pub mod auth;
/// Origin allow-list and CORS layer
pub mod cors;

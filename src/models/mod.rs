//! Data models representing database entities.
//!
//! This module contains all data structures that map to database tables,
//! plus the request types accepted by their handlers.

/// Customer model
pub mod customer;
/// Body measurement model
pub mod measurement;
/// Clothing order model
pub mod order;

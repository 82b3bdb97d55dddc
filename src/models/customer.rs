//! Customer model and request types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents a customer record from the database.
///
/// # Database Table
///
/// Maps to the `customers` table. A customer owns zero or more measurements
/// and orders; both are removed by foreign-key cascade when the customer row
/// is deleted.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Customer {
    /// Auto-assigned identifier
    pub id: i32,

    /// Customer's full name
    pub name: String,

    /// Contact phone number
    pub phone: String,

    /// Postal address
    pub address: String,

    /// Timestamp when the record was created
    pub created_at: DateTime<Utc>,
}

/// Request body for creating or replacing a customer.
///
/// # JSON Example
///
/// ```json
/// {
///   "name": "Asha Karanjkar",
///   "phone": "+91 98200 00000",
///   "address": "12 Tilak Road, Pune"
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct CustomerPayload {
    pub name: String,
    pub phone: String,
    pub address: String,
}

impl CustomerPayload {
    /// Reject blank names and phone numbers before they hit the database.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        if self.phone.trim().is_empty() {
            return Err("phone must not be empty".to_string());
        }
        Ok(())
    }
}

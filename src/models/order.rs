//! Clothing order model and request types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents an order record from the database.
///
/// # Database Table
///
/// Maps to the `orders` table. Belongs to exactly one customer and is
/// cascade-deleted with it. `paid_amount` is tracked independently of
/// `price`; the schema deliberately does not enforce `paid_amount <= price`.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Order {
    /// Auto-assigned identifier
    pub id: i32,

    /// Owning customer
    pub customer_id: i32,

    /// What is being tailored ("Sherwani", "Blouse", ...)
    pub dress_type: String,

    /// Agreed price
    pub price: Decimal,

    /// Amount paid so far, defaults to 0
    pub paid_amount: Decimal,

    /// Optional fitting date
    pub trial_date: Option<NaiveDate>,

    /// Promised delivery date
    pub delivery_date: NaiveDate,

    /// Workflow status, defaults to "Pending"
    pub status: String,

    /// How the customer paid ("Cash", "UPI", ...), once they have
    pub payment_mode: Option<String>,

    /// When the payment was made
    pub payment_date: Option<NaiveDate>,

    /// Timestamp when the record was created
    pub created_at: DateTime<Utc>,
}

/// Request body for creating a new order.
///
/// # JSON Example
///
/// ```json
/// {
///   "customer_id": 3,
///   "dress_type": "Sherwani",
///   "price": "4500.00",
///   "delivery_date": "2026-09-15",
///   "trial_date": "2026-09-08"
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub customer_id: i32,

    pub dress_type: String,

    pub price: Decimal,

    /// Defaults to 0 when omitted
    #[serde(default)]
    pub paid_amount: Decimal,

    pub trial_date: Option<NaiveDate>,

    pub delivery_date: NaiveDate,

    /// Defaults to "Pending" when omitted
    #[serde(default = "default_status")]
    pub status: String,

    pub payment_mode: Option<String>,

    pub payment_date: Option<NaiveDate>,
}

/// Default order status for new orders.
fn default_status() -> String {
    "Pending".to_string()
}

impl CreateOrderRequest {
    /// Money fields must be non-negative; dress type must not be blank.
    pub fn validate(&self) -> Result<(), String> {
        if self.dress_type.trim().is_empty() {
            return Err("dress_type must not be empty".to_string());
        }
        if self.price < Decimal::ZERO {
            return Err("price must be non-negative".to_string());
        }
        if self.paid_amount < Decimal::ZERO {
            return Err("paid_amount must be non-negative".to_string());
        }
        Ok(())
    }
}

/// Request body for updating an order.
///
/// Every field is optional; omitted fields keep their current value.
#[derive(Debug, Deserialize)]
pub struct UpdateOrderRequest {
    pub dress_type: Option<String>,
    pub price: Option<Decimal>,
    pub paid_amount: Option<Decimal>,
    pub trial_date: Option<NaiveDate>,
    pub delivery_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub payment_mode: Option<String>,
    pub payment_date: Option<NaiveDate>,
}

impl UpdateOrderRequest {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(ref dress_type) = self.dress_type
            && dress_type.trim().is_empty()
        {
            return Err("dress_type must not be empty".to_string());
        }
        if let Some(price) = self.price
            && price < Decimal::ZERO
        {
            return Err("price must be non-negative".to_string());
        }
        if let Some(paid) = self.paid_amount
            && paid < Decimal::ZERO
        {
            return Err("paid_amount must be non-negative".to_string());
        }
        Ok(())
    }
}

/// Optional filters for listing orders.
#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    pub customer_id: Option<i32>,
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request() -> CreateOrderRequest {
        serde_json::from_value(serde_json::json!({
            "customer_id": 1,
            "dress_type": "Sherwani",
            "price": "4500.00",
            "delivery_date": "2026-09-15"
        }))
        .unwrap()
    }

    #[test]
    fn omitted_fields_take_documented_defaults() {
        let request = create_request();
        assert_eq!(request.paid_amount, Decimal::ZERO);
        assert_eq!(request.status, "Pending");
        assert!(request.trial_date.is_none());
        assert!(request.payment_mode.is_none());
    }

    #[test]
    fn negative_price_is_rejected() {
        let mut request = create_request();
        request.price = Decimal::new(-1, 0);
        assert!(request.validate().is_err());
    }

    #[test]
    fn negative_paid_amount_is_rejected() {
        let mut request = create_request();
        request.paid_amount = Decimal::new(-500, 2);
        assert!(request.validate().is_err());
    }

    #[test]
    fn overpayment_is_not_rejected() {
        // paid_amount > price is allowed: the store enforces no such
        // invariant.
        let mut request = create_request();
        request.paid_amount = Decimal::new(999_999, 2);
        assert!(request.validate().is_ok());
    }
}

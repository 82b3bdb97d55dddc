//! Body measurement model and request types.
//!
//! Dimensions are stored as `DECIMAL(10,2)` and mapped to
//! `rust_decimal::Decimal` to avoid floating-point drift in values the tailor
//! reads back off a tape measure.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents a measurement record from the database.
///
/// Maps to the `measurements` table. Belongs to exactly one customer and is
/// cascade-deleted with it.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Measurement {
    /// Auto-assigned identifier
    pub id: i32,

    /// Owning customer
    pub customer_id: i32,

    /// Chest circumference
    pub chest: Decimal,

    /// Waist circumference
    pub waist: Decimal,

    /// Shoulder width
    pub shoulder: Decimal,

    /// Garment length
    pub length: Decimal,

    /// Timestamp when the record was created
    pub created_at: DateTime<Utc>,
}

/// Request body for recording a new measurement.
#[derive(Debug, Deserialize)]
pub struct CreateMeasurementRequest {
    pub customer_id: i32,
    pub chest: Decimal,
    pub waist: Decimal,
    pub shoulder: Decimal,
    pub length: Decimal,
}

impl CreateMeasurementRequest {
    /// All four dimensions must be non-negative.
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("chest", self.chest),
            ("waist", self.waist),
            ("shoulder", self.shoulder),
            ("length", self.length),
        ] {
            if value < Decimal::ZERO {
                return Err(format!("{name} must be non-negative"));
            }
        }
        Ok(())
    }
}

/// Optional filter for listing measurements.
#[derive(Debug, Deserialize)]
pub struct MeasurementListQuery {
    pub customer_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(chest: Decimal) -> CreateMeasurementRequest {
        CreateMeasurementRequest {
            customer_id: 1,
            chest,
            waist: Decimal::new(3200, 2),
            shoulder: Decimal::new(1750, 2),
            length: Decimal::new(4100, 2),
        }
    }

    #[test]
    fn negative_dimension_is_rejected() {
        assert!(request(Decimal::new(-100, 2)).validate().is_err());
    }

    #[test]
    fn non_negative_dimensions_validate() {
        assert!(request(Decimal::ZERO).validate().is_ok());
    }
}

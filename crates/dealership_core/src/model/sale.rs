//! Sale record.
//!
//! # Invariants
//! - `dealer_id`, `car_id` and `customer_id` resolve to existing records at
//!   creation time and are not changed by updates.
//! - `car_id` is unique across sales.

use super::car::CarId;
use super::customer::CustomerId;
use super::dealer::DealerId;
use super::validation::{require_finite, require_text, Validate, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Store-assigned sale identifier.
pub type SaleId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleFields {
    /// Calendar date, `YYYY-MM-DD` on the wire and in storage.
    pub sale_date: NaiveDate,
    pub sale_amount: f64,
    pub payment_method: String,
}

impl Validate for SaleFields {
    fn validate(&self) -> Result<(), ValidationError> {
        require_finite("sale_amount", self.sale_amount)?;
        require_text("payment_method", &self.payment_method)?;
        Ok(())
    }
}

/// Create payload: the three referenced ids plus the base fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSale {
    pub dealer_id: DealerId,
    pub car_id: CarId,
    pub customer_id: CustomerId,
    #[serde(flatten)]
    pub fields: SaleFields,
}

impl Validate for NewSale {
    fn validate(&self) -> Result<(), ValidationError> {
        self.fields.validate()
    }
}

/// Stored sale row. Serializes as the flat list shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: SaleId,
    pub dealer_id: DealerId,
    pub car_id: CarId,
    pub customer_id: CustomerId,
    #[serde(flatten)]
    pub fields: SaleFields,
}

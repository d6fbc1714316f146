//! Car record.
//!
//! # Invariants
//! - `vin` is unique across all cars.
//! - `dealer_id` references an existing dealer and is fixed at creation.
//! - A car is referenced by at most one sale.

use super::dealer::DealerId;
use super::validation::{require_finite, require_text, Validate, ValidationError};
use serde::{Deserialize, Serialize};

/// Store-assigned car identifier.
pub type CarId = i64;

/// Base fields of a car, replaced as a whole on update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarFields {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub color: String,
    pub vin: String,
    pub price: f64,
}

impl Validate for CarFields {
    fn validate(&self) -> Result<(), ValidationError> {
        require_text("make", &self.make)?;
        require_text("model", &self.model)?;
        require_text("color", &self.color)?;
        require_text("vin", &self.vin)?;
        require_finite("price", self.price)?;
        Ok(())
    }
}

/// Create payload: the owning dealer plus the base fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCar {
    pub dealer_id: DealerId,
    #[serde(flatten)]
    pub fields: CarFields,
}

impl Validate for NewCar {
    fn validate(&self) -> Result<(), ValidationError> {
        self.fields.validate()
    }
}

/// Stored car row. Serializes as the flat list shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub id: CarId,
    pub dealer_id: DealerId,
    #[serde(flatten)]
    pub fields: CarFields,
}

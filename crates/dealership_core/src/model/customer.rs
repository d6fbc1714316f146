//! Customer record.

use super::validation::{require_text, Validate, ValidationError};
use serde::{Deserialize, Serialize};

/// Store-assigned customer identifier.
pub type CustomerId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerFields {
    pub first_name: String,
    pub last_name: String,
    pub contact_info: Option<String>,
    pub address: Option<String>,
}

impl CustomerFields {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            contact_info: None,
            address: None,
        }
    }
}

impl Validate for CustomerFields {
    fn validate(&self) -> Result<(), ValidationError> {
        require_text("first_name", &self.first_name)?;
        require_text("last_name", &self.last_name)?;
        Ok(())
    }
}

/// Stored customer row. Serializes as the flat list shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    #[serde(flatten)]
    pub fields: CustomerFields,
}

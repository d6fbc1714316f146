//! Dealer record.
//!
//! A dealer owns zero or more cars and zero or more sales. Those relations
//! are resolved by repository join queries, never stored on the record.

use super::validation::{require_text, Validate, ValidationError};
use serde::{Deserialize, Serialize};

/// Store-assigned dealer identifier.
pub type DealerId = i64;

/// Base fields of a dealer, used verbatim by create and full update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealerFields {
    pub name: String,
    pub location: String,
    pub contact_info: Option<String>,
}

impl DealerFields {
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            contact_info: None,
        }
    }
}

impl Validate for DealerFields {
    fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_text("location", &self.location)?;
        Ok(())
    }
}

/// Stored dealer row. Serializes as the flat list shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dealer {
    pub id: DealerId,
    #[serde(flatten)]
    pub fields: DealerFields,
}

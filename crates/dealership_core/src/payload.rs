//! JSON payload decoding for create/update operations.
//!
//! # Invariants
//! - Decoding failures (missing field, wrong type, malformed date) and rule
//!   failures both surface as `ValidationError`.
//! - A payload that passes here is safe to hand to a service.

use crate::model::validation::{Validate, ValidationError};
use serde::de::DeserializeOwned;

/// Decodes `json` into `T` and runs its validation rules.
pub fn parse_payload<T>(json: &str) -> Result<T, ValidationError>
where
    T: DeserializeOwned + Validate,
{
    let payload: T =
        serde_json::from_str(json).map_err(|err| ValidationError::Payload(err.to_string()))?;
    payload.validate()?;
    Ok(payload)
}

//! Domain model for dealers, cars, customers and sales.
//!
//! # Responsibility
//! - Define one stored record type per entity plus the field sets used by
//!   create/update payloads.
//! - Keep relations as explicit foreign-key ids, never as object graphs.
//!
//! # Invariants
//! - Identifiers are assigned by the store and never reused.
//! - A record's base fields live in its `*Fields` struct, so create and
//!   update share one validated shape.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub mod car;
pub mod customer;
pub mod dealer;
pub mod sale;
pub mod validation;

/// The four record kinds held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Dealer,
    Car,
    Customer,
    Sale,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dealer => "dealer",
            Self::Car => "car",
            Self::Customer => "customer",
            Self::Sale => "sale",
        }
    }

    /// Backing table name.
    pub fn table(self) -> &'static str {
        match self {
            Self::Dealer => "dealers",
            Self::Car => "cars",
            Self::Customer => "customers",
            Self::Sale => "sales",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

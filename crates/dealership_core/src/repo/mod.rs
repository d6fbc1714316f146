//! Repository layer: the SQLite-backed entity store.
//!
//! # Responsibility
//! - Define per-entity store contracts (insert, point lookup, paginated scan,
//!   full update, delete) plus the join lookups projections need.
//! - Isolate SQL and constraint handling from service orchestration.
//!
//! # Invariants
//! - Point lookups return `Ok(None)` for absent ids; update/delete return
//!   `RepoError::NotFound`.
//! - Every write runs in one immediate transaction; a failed write leaves
//!   no partial rows behind.
//! - Scans are ordered by primary key ascending.

pub mod car_repo;
pub mod customer_repo;
pub mod dealer_repo;
pub mod error;
pub mod sale_repo;
mod store;

use crate::model::validation::{Validate, ValidationError};

pub use error::{ErrorKind, RepoError, RepoResult};
pub use store::SqliteStore;

/// Page size applied when the caller does not pass one.
pub const DEFAULT_LIST_LIMIT: u32 = 10;

/// Pagination options for list scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListQuery {
    /// Number of rows to skip. Out-of-range values yield an empty page.
    pub skip: u32,
    /// Maximum rows to return. Must be greater than zero.
    pub limit: u32,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIST_LIMIT,
        }
    }
}

impl ListQuery {
    /// Builds a query from optional caller input, applying defaults.
    pub fn new(skip: Option<u32>, limit: Option<u32>) -> Result<Self, ValidationError> {
        let query = Self {
            skip: skip.unwrap_or(0),
            limit: limit.unwrap_or(DEFAULT_LIST_LIMIT),
        };
        query.validate()?;
        Ok(query)
    }
}

impl Validate for ListQuery {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.limit == 0 {
            return Err(ValidationError::InvalidLimit(self.limit));
        }
        Ok(())
    }
}

//! Use-case services: the create/list/get/update/delete surface.
//!
//! # Responsibility
//! - Validate payloads before the store is touched.
//! - Turn absent lookups into `RepoError::NotFound`.
//! - Assemble response projections from repository join lookups.
//!
//! # Invariants
//! - Services hold no state between calls; the store is the only source of
//!   truth.
//! - Every operation emits exactly one `module=service` log event.

use crate::model::validation::Validate;
use crate::model::EntityKind;
use crate::repo::{ErrorKind, RepoError, RepoResult};
use log::{debug, log, Level};

pub mod car_service;
pub mod customer_service;
pub mod dealer_service;
pub mod sale_service;

pub(crate) fn validated(payload: &impl Validate) -> RepoResult<()> {
    payload.validate()?;
    Ok(())
}

pub(crate) fn found<T>(entity: EntityKind, id: i64, record: Option<T>) -> RepoResult<T> {
    record.ok_or(RepoError::NotFound { entity, id })
}

/// Logs the outcome of one operation and hands the result back unchanged.
pub(crate) fn observe<T>(
    event: &'static str,
    result: RepoResult<T>,
    describe: impl FnOnce(&T) -> String,
) -> RepoResult<T> {
    match &result {
        Ok(value) => debug!("event={event} module=service status=ok {}", describe(value)),
        Err(err) => {
            let level = match err.kind() {
                ErrorKind::Storage => Level::Error,
                _ => Level::Info,
            };
            log!(
                level,
                "event={event} module=service status=error error_code={}",
                err.code()
            );
        }
    }
    result
}

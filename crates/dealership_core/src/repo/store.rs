//! SQLite store handle shared by all entity repositories.
//!
//! # Invariants
//! - A store is only constructed over a fully migrated connection.
//! - Constraint failures are reported as domain errors, not raw SQLite codes.

use super::error::{RepoError, RepoResult};
use crate::db::migrations::{current_version, latest_version};
use crate::model::EntityKind;
use rusqlite::{ffi, Connection, Transaction, TransactionBehavior};

const REQUIRED_TABLES: [&str; 4] = ["dealers", "cars", "customers", "sales"];

/// SQLite-backed store implementing every entity repository.
///
/// Borrows one connection for its lifetime; the caller owns the session and
/// closes it by dropping the connection.
#[derive(Debug, Clone, Copy)]
pub struct SqliteStore<'conn> {
    pub(super) conn: &'conn Connection,
}

impl<'conn> SqliteStore<'conn> {
    /// Wraps a connection returned by `db::open_db*`.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations were not applied.
    /// - `MissingRequiredTable` when the schema was tampered with.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version = current_version(conn)?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        for table in REQUIRED_TABLES {
            if !table_exists(conn, table)? {
                return Err(RepoError::MissingRequiredTable(table));
            }
        }

        Ok(Self { conn })
    }

    /// Begins the immediate transaction every write runs in.
    ///
    /// Dropping the returned transaction without commit rolls it back.
    pub(super) fn write_tx(&self) -> RepoResult<Transaction<'conn>> {
        Ok(Transaction::new_unchecked(
            self.conn,
            TransactionBehavior::Immediate,
        )?)
    }
}

pub(super) fn record_exists(conn: &Connection, entity: EntityKind, id: i64) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        &format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?1);", entity.table()),
        [id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

pub(super) fn ensure_reference(conn: &Connection, entity: EntityKind, id: i64) -> RepoResult<()> {
    if !record_exists(conn, entity, id)? {
        return Err(RepoError::MissingReference { entity, id });
    }
    Ok(())
}

/// Fails with `StillReferenced` when any `dependent` row points at `id`.
pub(super) fn ensure_unreferenced(
    conn: &Connection,
    entity: EntityKind,
    id: i64,
    dependent: EntityKind,
    column: &str,
) -> RepoResult<()> {
    let referenced: i64 = conn.query_row(
        &format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE {column} = ?1);",
            dependent.table()
        ),
        [id],
        |row| row.get(0),
    )?;
    if referenced == 1 {
        return Err(RepoError::StillReferenced {
            entity,
            id,
            dependent,
        });
    }
    Ok(())
}

/// Maps a unique-constraint failure on `entity` to `UniquenessViolation`.
pub(super) fn map_write_error(err: rusqlite::Error, entity: EntityKind) -> RepoError {
    if let rusqlite::Error::SqliteFailure(failure, _) = &err {
        if failure.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE {
            return RepoError::UniquenessViolation {
                entity,
                field: unique_field(entity),
            };
        }
    }
    RepoError::from(err)
}

fn unique_field(entity: EntityKind) -> &'static str {
    match entity {
        EntityKind::Car => "vin",
        EntityKind::Sale => "car_id",
        EntityKind::Dealer | EntityKind::Customer => "id",
    }
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

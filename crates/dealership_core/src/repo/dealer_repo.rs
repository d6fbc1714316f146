//! Dealer repository contract and SQLite implementation.
//!
//! # Invariants
//! - A dealer that still owns cars or sales cannot be deleted.

use super::error::{RepoError, RepoResult};
use super::store::{ensure_unreferenced, SqliteStore};
use super::ListQuery;
use crate::model::dealer::{Dealer, DealerFields, DealerId};
use crate::model::EntityKind;
use rusqlite::{params, Connection, OptionalExtension, Row};

const DEALER_SELECT_SQL: &str = "SELECT id, name, location, contact_info FROM dealers";

/// Store contract for dealer rows.
pub trait DealerRepository {
    /// Inserts a dealer and returns it with its assigned id.
    fn insert_dealer(&self, fields: &DealerFields) -> RepoResult<Dealer>;
    fn get_dealer(&self, id: DealerId) -> RepoResult<Option<Dealer>>;
    fn list_dealers(&self, query: &ListQuery) -> RepoResult<Vec<Dealer>>;
    /// Replaces every base field of an existing dealer.
    fn update_dealer(&self, id: DealerId, fields: &DealerFields) -> RepoResult<Dealer>;
    /// Removes a dealer and returns the row as it was before deletion.
    fn delete_dealer(&self, id: DealerId) -> RepoResult<Dealer>;
}

impl DealerRepository for SqliteStore<'_> {
    fn insert_dealer(&self, fields: &DealerFields) -> RepoResult<Dealer> {
        let tx = self.write_tx()?;
        tx.execute(
            "INSERT INTO dealers (name, location, contact_info) VALUES (?1, ?2, ?3);",
            params![
                fields.name.as_str(),
                fields.location.as_str(),
                fields.contact_info.as_deref(),
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(Dealer {
            id,
            fields: fields.clone(),
        })
    }

    fn get_dealer(&self, id: DealerId) -> RepoResult<Option<Dealer>> {
        select_dealer(self.conn, id)
    }

    fn list_dealers(&self, query: &ListQuery) -> RepoResult<Vec<Dealer>> {
        let mut stmt = self.conn.prepare(&format!(
            "{DEALER_SELECT_SQL} ORDER BY id ASC LIMIT ?1 OFFSET ?2;"
        ))?;
        let rows = stmt.query_map(
            params![i64::from(query.limit), i64::from(query.skip)],
            parse_dealer_row,
        )?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn update_dealer(&self, id: DealerId, fields: &DealerFields) -> RepoResult<Dealer> {
        let tx = self.write_tx()?;
        let changed = tx.execute(
            "UPDATE dealers
             SET
                name = ?1,
                location = ?2,
                contact_info = ?3
             WHERE id = ?4;",
            params![
                fields.name.as_str(),
                fields.location.as_str(),
                fields.contact_info.as_deref(),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::Dealer,
                id,
            });
        }
        tx.commit()?;

        Ok(Dealer {
            id,
            fields: fields.clone(),
        })
    }

    fn delete_dealer(&self, id: DealerId) -> RepoResult<Dealer> {
        let tx = self.write_tx()?;
        let dealer = select_dealer(&tx, id)?.ok_or(RepoError::NotFound {
            entity: EntityKind::Dealer,
            id,
        })?;

        ensure_unreferenced(&tx, EntityKind::Dealer, id, EntityKind::Car, "dealer_id")?;
        ensure_unreferenced(&tx, EntityKind::Dealer, id, EntityKind::Sale, "dealer_id")?;

        tx.execute("DELETE FROM dealers WHERE id = ?1;", [id])?;
        tx.commit()?;
        Ok(dealer)
    }
}

fn select_dealer(conn: &Connection, id: DealerId) -> RepoResult<Option<Dealer>> {
    let dealer = conn
        .query_row(
            &format!("{DEALER_SELECT_SQL} WHERE id = ?1;"),
            [id],
            parse_dealer_row,
        )
        .optional()?;
    Ok(dealer)
}

fn parse_dealer_row(row: &Row<'_>) -> rusqlite::Result<Dealer> {
    Ok(Dealer {
        id: row.get("id")?,
        fields: DealerFields {
            name: row.get("name")?,
            location: row.get("location")?,
            contact_info: row.get("contact_info")?,
        },
    })
}

//! Customer repository contract and SQLite implementation.

use super::error::{RepoError, RepoResult};
use super::store::{ensure_unreferenced, SqliteStore};
use super::ListQuery;
use crate::model::customer::{Customer, CustomerFields, CustomerId};
use crate::model::EntityKind;
use rusqlite::{params, Connection, OptionalExtension, Row};

const CUSTOMER_SELECT_SQL: &str =
    "SELECT id, first_name, last_name, contact_info, address FROM customers";

/// Store contract for customer rows.
pub trait CustomerRepository {
    fn insert_customer(&self, fields: &CustomerFields) -> RepoResult<Customer>;
    fn get_customer(&self, id: CustomerId) -> RepoResult<Option<Customer>>;
    fn list_customers(&self, query: &ListQuery) -> RepoResult<Vec<Customer>>;
    fn update_customer(&self, id: CustomerId, fields: &CustomerFields) -> RepoResult<Customer>;
    /// Fails with `StillReferenced` while any sale points at the customer.
    fn delete_customer(&self, id: CustomerId) -> RepoResult<Customer>;
}

impl CustomerRepository for SqliteStore<'_> {
    fn insert_customer(&self, fields: &CustomerFields) -> RepoResult<Customer> {
        let tx = self.write_tx()?;
        tx.execute(
            "INSERT INTO customers (first_name, last_name, contact_info, address)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                fields.first_name.as_str(),
                fields.last_name.as_str(),
                fields.contact_info.as_deref(),
                fields.address.as_deref(),
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(Customer {
            id,
            fields: fields.clone(),
        })
    }

    fn get_customer(&self, id: CustomerId) -> RepoResult<Option<Customer>> {
        select_customer(self.conn, id)
    }

    fn list_customers(&self, query: &ListQuery) -> RepoResult<Vec<Customer>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CUSTOMER_SELECT_SQL} ORDER BY id ASC LIMIT ?1 OFFSET ?2;"
        ))?;
        let rows = stmt.query_map(
            params![i64::from(query.limit), i64::from(query.skip)],
            parse_customer_row,
        )?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn update_customer(&self, id: CustomerId, fields: &CustomerFields) -> RepoResult<Customer> {
        let tx = self.write_tx()?;
        let changed = tx.execute(
            "UPDATE customers
             SET
                first_name = ?1,
                last_name = ?2,
                contact_info = ?3,
                address = ?4
             WHERE id = ?5;",
            params![
                fields.first_name.as_str(),
                fields.last_name.as_str(),
                fields.contact_info.as_deref(),
                fields.address.as_deref(),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::Customer,
                id,
            });
        }
        tx.commit()?;

        Ok(Customer {
            id,
            fields: fields.clone(),
        })
    }

    fn delete_customer(&self, id: CustomerId) -> RepoResult<Customer> {
        let tx = self.write_tx()?;
        let customer = select_customer(&tx, id)?.ok_or(RepoError::NotFound {
            entity: EntityKind::Customer,
            id,
        })?;

        ensure_unreferenced(
            &tx,
            EntityKind::Customer,
            id,
            EntityKind::Sale,
            "customer_id",
        )?;

        tx.execute("DELETE FROM customers WHERE id = ?1;", [id])?;
        tx.commit()?;
        Ok(customer)
    }
}

fn select_customer(conn: &Connection, id: CustomerId) -> RepoResult<Option<Customer>> {
    let customer = conn
        .query_row(
            &format!("{CUSTOMER_SELECT_SQL} WHERE id = ?1;"),
            [id],
            parse_customer_row,
        )
        .optional()?;
    Ok(customer)
}

fn parse_customer_row(row: &Row<'_>) -> rusqlite::Result<Customer> {
    Ok(Customer {
        id: row.get("id")?,
        fields: CustomerFields {
            first_name: row.get("first_name")?,
            last_name: row.get("last_name")?,
            contact_info: row.get("contact_info")?,
            address: row.get("address")?,
        },
    })
}

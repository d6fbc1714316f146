//! Sale repository contract and SQLite implementation.
//!
//! # Invariants
//! - Inserts verify dealer, car and customer exist inside the write
//!   transaction; the first missing one is reported.
//! - A car is sold at most once (`UniquenessViolation` on `car_id`).
//! - Updates touch base fields only; references are fixed at creation.

use super::error::{RepoError, RepoResult};
use super::store::{ensure_reference, map_write_error, SqliteStore};
use super::ListQuery;
use crate::model::customer::CustomerId;
use crate::model::dealer::DealerId;
use crate::model::sale::{NewSale, Sale, SaleFields, SaleId};
use crate::model::EntityKind;
use rusqlite::{params, Connection, OptionalExtension, Row};

const SALE_SELECT_SQL: &str = "SELECT
    id,
    sale_date,
    sale_amount,
    payment_method,
    dealer_id,
    car_id,
    customer_id
FROM sales";

/// Store contract for sale rows.
pub trait SaleRepository {
    fn insert_sale(&self, sale: &NewSale) -> RepoResult<Sale>;
    fn get_sale(&self, id: SaleId) -> RepoResult<Option<Sale>>;
    fn list_sales(&self, query: &ListQuery) -> RepoResult<Vec<Sale>>;
    fn list_sales_for_dealer(&self, dealer_id: DealerId) -> RepoResult<Vec<Sale>>;
    fn list_sales_for_customer(&self, customer_id: CustomerId) -> RepoResult<Vec<Sale>>;
    fn update_sale(&self, id: SaleId, fields: &SaleFields) -> RepoResult<Sale>;
    fn delete_sale(&self, id: SaleId) -> RepoResult<Sale>;
}

impl SaleRepository for SqliteStore<'_> {
    fn insert_sale(&self, sale: &NewSale) -> RepoResult<Sale> {
        let tx = self.write_tx()?;
        ensure_reference(&tx, EntityKind::Dealer, sale.dealer_id)?;
        ensure_reference(&tx, EntityKind::Car, sale.car_id)?;
        ensure_reference(&tx, EntityKind::Customer, sale.customer_id)?;

        let fields = &sale.fields;
        tx.execute(
            "INSERT INTO sales (
                sale_date,
                sale_amount,
                payment_method,
                dealer_id,
                car_id,
                customer_id
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                fields.sale_date,
                fields.sale_amount,
                fields.payment_method.as_str(),
                sale.dealer_id,
                sale.car_id,
                sale.customer_id,
            ],
        )
        .map_err(|err| map_write_error(err, EntityKind::Sale))?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(Sale {
            id,
            dealer_id: sale.dealer_id,
            car_id: sale.car_id,
            customer_id: sale.customer_id,
            fields: sale.fields.clone(),
        })
    }

    fn get_sale(&self, id: SaleId) -> RepoResult<Option<Sale>> {
        select_sale(self.conn, id)
    }

    fn list_sales(&self, query: &ListQuery) -> RepoResult<Vec<Sale>> {
        let mut stmt = self.conn.prepare(&format!(
            "{SALE_SELECT_SQL} ORDER BY id ASC LIMIT ?1 OFFSET ?2;"
        ))?;
        let rows = stmt.query_map(
            params![i64::from(query.limit), i64::from(query.skip)],
            parse_sale_row,
        )?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn list_sales_for_dealer(&self, dealer_id: DealerId) -> RepoResult<Vec<Sale>> {
        select_sales_by(self.conn, "dealer_id", dealer_id)
    }

    fn list_sales_for_customer(&self, customer_id: CustomerId) -> RepoResult<Vec<Sale>> {
        select_sales_by(self.conn, "customer_id", customer_id)
    }

    fn update_sale(&self, id: SaleId, fields: &SaleFields) -> RepoResult<Sale> {
        let tx = self.write_tx()?;
        let changed = tx.execute(
            "UPDATE sales
             SET
                sale_date = ?1,
                sale_amount = ?2,
                payment_method = ?3
             WHERE id = ?4;",
            params![
                fields.sale_date,
                fields.sale_amount,
                fields.payment_method.as_str(),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::Sale,
                id,
            });
        }

        let sale = select_sale(&tx, id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("sale {id} vanished inside its update transaction"))
        })?;
        tx.commit()?;
        Ok(sale)
    }

    fn delete_sale(&self, id: SaleId) -> RepoResult<Sale> {
        let tx = self.write_tx()?;
        let sale = select_sale(&tx, id)?.ok_or(RepoError::NotFound {
            entity: EntityKind::Sale,
            id,
        })?;

        tx.execute("DELETE FROM sales WHERE id = ?1;", [id])?;
        tx.commit()?;
        Ok(sale)
    }
}

fn select_sale(conn: &Connection, id: SaleId) -> RepoResult<Option<Sale>> {
    let sale = conn
        .query_row(
            &format!("{SALE_SELECT_SQL} WHERE id = ?1;"),
            [id],
            parse_sale_row,
        )
        .optional()?;
    Ok(sale)
}

fn select_sales_by(conn: &Connection, column: &str, id: i64) -> RepoResult<Vec<Sale>> {
    let mut stmt = conn.prepare(&format!(
        "{SALE_SELECT_SQL} WHERE {column} = ?1 ORDER BY id ASC;"
    ))?;
    let rows = stmt.query_map([id], parse_sale_row)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

fn parse_sale_row(row: &Row<'_>) -> rusqlite::Result<Sale> {
    Ok(Sale {
        id: row.get("id")?,
        dealer_id: row.get("dealer_id")?,
        car_id: row.get("car_id")?,
        customer_id: row.get("customer_id")?,
        fields: SaleFields {
            sale_date: row.get("sale_date")?,
            sale_amount: row.get("sale_amount")?,
            payment_method: row.get("payment_method")?,
        },
    })
}

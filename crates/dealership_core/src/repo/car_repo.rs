//! Car repository contract and SQLite implementation.
//!
//! # Invariants
//! - Inserts fail with `MissingReference` when the dealer does not exist.
//! - VIN collisions on insert or update fail with `UniquenessViolation`.
//! - `dealer_id` is never rewritten by an update.
//! - A sold car cannot be deleted.

use super::error::{RepoError, RepoResult};
use super::store::{ensure_reference, ensure_unreferenced, map_write_error, SqliteStore};
use super::ListQuery;
use crate::model::car::{Car, CarFields, CarId, NewCar};
use crate::model::dealer::DealerId;
use crate::model::EntityKind;
use rusqlite::{params, Connection, OptionalExtension, Row};

const CAR_SELECT_SQL: &str = "SELECT
    id,
    make,
    model,
    year,
    color,
    vin,
    price,
    dealer_id
FROM cars";

/// Store contract for car rows.
pub trait CarRepository {
    fn insert_car(&self, car: &NewCar) -> RepoResult<Car>;
    fn get_car(&self, id: CarId) -> RepoResult<Option<Car>>;
    fn list_cars(&self, query: &ListQuery) -> RepoResult<Vec<Car>>;
    /// All cars owned by one dealer, by id ascending.
    fn list_cars_for_dealer(&self, dealer_id: DealerId) -> RepoResult<Vec<Car>>;
    fn update_car(&self, id: CarId, fields: &CarFields) -> RepoResult<Car>;
    fn delete_car(&self, id: CarId) -> RepoResult<Car>;
}

impl CarRepository for SqliteStore<'_> {
    fn insert_car(&self, car: &NewCar) -> RepoResult<Car> {
        let tx = self.write_tx()?;
        ensure_reference(&tx, EntityKind::Dealer, car.dealer_id)?;

        let fields = &car.fields;
        tx.execute(
            "INSERT INTO cars (
                make,
                model,
                year,
                color,
                vin,
                price,
                dealer_id
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                fields.make.as_str(),
                fields.model.as_str(),
                fields.year,
                fields.color.as_str(),
                fields.vin.as_str(),
                fields.price,
                car.dealer_id,
            ],
        )
        .map_err(|err| map_write_error(err, EntityKind::Car))?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(Car {
            id,
            dealer_id: car.dealer_id,
            fields: car.fields.clone(),
        })
    }

    fn get_car(&self, id: CarId) -> RepoResult<Option<Car>> {
        select_car(self.conn, id)
    }

    fn list_cars(&self, query: &ListQuery) -> RepoResult<Vec<Car>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CAR_SELECT_SQL} ORDER BY id ASC LIMIT ?1 OFFSET ?2;"))?;
        let rows = stmt.query_map(
            params![i64::from(query.limit), i64::from(query.skip)],
            parse_car_row,
        )?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn list_cars_for_dealer(&self, dealer_id: DealerId) -> RepoResult<Vec<Car>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CAR_SELECT_SQL} WHERE dealer_id = ?1 ORDER BY id ASC;"))?;
        let rows = stmt.query_map([dealer_id], parse_car_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn update_car(&self, id: CarId, fields: &CarFields) -> RepoResult<Car> {
        let tx = self.write_tx()?;
        let changed = tx
            .execute(
                "UPDATE cars
                 SET
                    make = ?1,
                    model = ?2,
                    year = ?3,
                    color = ?4,
                    vin = ?5,
                    price = ?6
                 WHERE id = ?7;",
                params![
                    fields.make.as_str(),
                    fields.model.as_str(),
                    fields.year,
                    fields.color.as_str(),
                    fields.vin.as_str(),
                    fields.price,
                    id,
                ],
            )
            .map_err(|err| map_write_error(err, EntityKind::Car))?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::Car,
                id,
            });
        }

        let car = select_car(&tx, id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("car {id} vanished inside its update transaction"))
        })?;
        tx.commit()?;
        Ok(car)
    }

    fn delete_car(&self, id: CarId) -> RepoResult<Car> {
        let tx = self.write_tx()?;
        let car = select_car(&tx, id)?.ok_or(RepoError::NotFound {
            entity: EntityKind::Car,
            id,
        })?;

        ensure_unreferenced(&tx, EntityKind::Car, id, EntityKind::Sale, "car_id")?;

        tx.execute("DELETE FROM cars WHERE id = ?1;", [id])?;
        tx.commit()?;
        Ok(car)
    }
}

fn select_car(conn: &Connection, id: CarId) -> RepoResult<Option<Car>> {
    let car = conn
        .query_row(
            &format!("{CAR_SELECT_SQL} WHERE id = ?1;"),
            [id],
            parse_car_row,
        )
        .optional()?;
    Ok(car)
}

fn parse_car_row(row: &Row<'_>) -> rusqlite::Result<Car> {
    Ok(Car {
        id: row.get("id")?,
        dealer_id: row.get("dealer_id")?,
        fields: CarFields {
            make: row.get("make")?,
            model: row.get("model")?,
            year: row.get("year")?,
            color: row.get("color")?,
            vin: row.get("vin")?,
            price: row.get("price")?,
        },
    })
}

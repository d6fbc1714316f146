//! Car use-case service.
//!
//! # Invariants
//! - The car detail shape embeds its dealer in detail shape, one level deep.
//! - `delete` returns the prior car in list shape.

use super::dealer_service::dealer_detail;
use super::{found, observe, validated};
use crate::model::car::{Car, CarFields, CarId, NewCar};
use crate::model::EntityKind;
use crate::projection::CarDetail;
use crate::repo::car_repo::CarRepository;
use crate::repo::dealer_repo::DealerRepository;
use crate::repo::sale_repo::SaleRepository;
use crate::repo::{ListQuery, RepoResult};

pub struct CarService<R> {
    repo: R,
}

impl<R> CarService<R>
where
    R: CarRepository + DealerRepository + SaleRepository,
{
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a car owned by `car.dealer_id`.
    ///
    /// Fails with `MissingReference` for an unknown dealer and
    /// `UniquenessViolation` for a duplicate VIN.
    pub fn create(&self, car: &NewCar) -> RepoResult<CarDetail> {
        let detail = validated(car)
            .and_then(|()| self.repo.insert_car(car))
            .and_then(|car| self.detail(car));
        observe("car_create", detail, |detail| format!("id={}", detail.car.id))
    }

    pub fn list(&self, query: &ListQuery) -> RepoResult<Vec<Car>> {
        let rows = validated(query).and_then(|()| self.repo.list_cars(query));
        observe("car_list", rows, |rows| format!("count={}", rows.len()))
    }

    pub fn get(&self, id: CarId) -> RepoResult<CarDetail> {
        let detail = self
            .repo
            .get_car(id)
            .and_then(|car| found(EntityKind::Car, id, car))
            .and_then(|car| self.detail(car));
        observe("car_get", detail, |_| format!("id={id}"))
    }

    /// Replaces every base field. The owning dealer is not part of the
    /// update payload and stays as created.
    pub fn update(&self, id: CarId, fields: &CarFields) -> RepoResult<CarDetail> {
        let detail = validated(fields)
            .and_then(|()| self.repo.update_car(id, fields))
            .and_then(|car| self.detail(car));
        observe("car_update", detail, |_| format!("id={id}"))
    }

    pub fn delete(&self, id: CarId) -> RepoResult<Car> {
        let deleted = self.repo.delete_car(id);
        observe("car_delete", deleted, |_| format!("id={id}"))
    }

    fn detail(&self, car: Car) -> RepoResult<CarDetail> {
        let dealer = match self.repo.get_dealer(car.dealer_id)? {
            Some(dealer) => Some(dealer_detail(&self.repo, dealer)?),
            None => None,
        };
        Ok(CarDetail::new(car, dealer))
    }
}

//! Dealer use-case service.
//!
//! # Invariants
//! - `get`/`update` return the detail shape with the dealer's cars and
//!   sales in list shape.
//! - `delete` returns the prior detail shape; delete is restricted while
//!   cars or sales reference the dealer, so its relation lists are empty.

use super::{found, observe, validated};
use crate::model::dealer::{Dealer, DealerFields, DealerId};
use crate::model::EntityKind;
use crate::projection::DealerDetail;
use crate::repo::car_repo::CarRepository;
use crate::repo::dealer_repo::DealerRepository;
use crate::repo::sale_repo::SaleRepository;
use crate::repo::{ListQuery, RepoResult};

pub struct DealerService<R> {
    repo: R,
}

impl<R> DealerService<R>
where
    R: DealerRepository + CarRepository + SaleRepository,
{
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create(&self, fields: &DealerFields) -> RepoResult<DealerDetail> {
        let created = validated(fields).and_then(|()| self.repo.insert_dealer(fields));
        observe("dealer_create", created, |dealer| format!("id={}", dealer.id))
            .map(DealerDetail::bare)
    }

    pub fn list(&self, query: &ListQuery) -> RepoResult<Vec<Dealer>> {
        let rows = validated(query).and_then(|()| self.repo.list_dealers(query));
        observe("dealer_list", rows, |rows| format!("count={}", rows.len()))
    }

    pub fn get(&self, id: DealerId) -> RepoResult<DealerDetail> {
        let detail = self
            .repo
            .get_dealer(id)
            .and_then(|dealer| found(EntityKind::Dealer, id, dealer))
            .and_then(|dealer| dealer_detail(&self.repo, dealer));
        observe("dealer_get", detail, |_| format!("id={id}"))
    }

    /// Replaces every base field; nothing from the previous row is merged.
    pub fn update(&self, id: DealerId, fields: &DealerFields) -> RepoResult<DealerDetail> {
        let detail = validated(fields)
            .and_then(|()| self.repo.update_dealer(id, fields))
            .and_then(|dealer| dealer_detail(&self.repo, dealer));
        observe("dealer_update", detail, |_| format!("id={id}"))
    }

    pub fn delete(&self, id: DealerId) -> RepoResult<DealerDetail> {
        let deleted = self.repo.delete_dealer(id);
        observe("dealer_delete", deleted, |_| format!("id={id}")).map(DealerDetail::bare)
    }
}

/// Loads the cars and sales that make up a dealer's detail shape.
pub(crate) fn dealer_detail<R>(repo: &R, dealer: Dealer) -> RepoResult<DealerDetail>
where
    R: CarRepository + SaleRepository,
{
    let cars = repo.list_cars_for_dealer(dealer.id)?;
    let sales = repo.list_sales_for_dealer(dealer.id)?;
    Ok(DealerDetail::new(dealer, cars, sales))
}

//! Sale use-case service.
//!
//! # Invariants
//! - The sale detail shape embeds dealer, car and customer in flat list
//!   shape only.
//! - `delete` returns the prior sale in list shape.

use super::{found, observe, validated};
use crate::model::sale::{NewSale, Sale, SaleFields, SaleId};
use crate::model::EntityKind;
use crate::projection::SaleDetail;
use crate::repo::car_repo::CarRepository;
use crate::repo::customer_repo::CustomerRepository;
use crate::repo::dealer_repo::DealerRepository;
use crate::repo::sale_repo::SaleRepository;
use crate::repo::{ListQuery, RepoResult};

pub struct SaleService<R> {
    repo: R,
}

impl<R> SaleService<R>
where
    R: SaleRepository + DealerRepository + CarRepository + CustomerRepository,
{
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Records a sale of `sale.car_id` to `sale.customer_id` by
    /// `sale.dealer_id`.
    ///
    /// Fails with `MissingReference` when any referenced record is absent and
    /// with `UniquenessViolation` when the car was already sold.
    pub fn create(&self, sale: &NewSale) -> RepoResult<SaleDetail> {
        let detail = validated(sale)
            .and_then(|()| self.repo.insert_sale(sale))
            .and_then(|sale| self.detail(sale));
        observe("sale_create", detail, |detail| format!("id={}", detail.sale.id))
    }

    pub fn list(&self, query: &ListQuery) -> RepoResult<Vec<Sale>> {
        let rows = validated(query).and_then(|()| self.repo.list_sales(query));
        observe("sale_list", rows, |rows| format!("count={}", rows.len()))
    }

    pub fn get(&self, id: SaleId) -> RepoResult<SaleDetail> {
        let detail = self
            .repo
            .get_sale(id)
            .and_then(|sale| found(EntityKind::Sale, id, sale))
            .and_then(|sale| self.detail(sale));
        observe("sale_get", detail, |_| format!("id={id}"))
    }

    /// Replaces date, amount and payment method; references stay as created.
    pub fn update(&self, id: SaleId, fields: &SaleFields) -> RepoResult<SaleDetail> {
        let detail = validated(fields)
            .and_then(|()| self.repo.update_sale(id, fields))
            .and_then(|sale| self.detail(sale));
        observe("sale_update", detail, |_| format!("id={id}"))
    }

    pub fn delete(&self, id: SaleId) -> RepoResult<Sale> {
        let deleted = self.repo.delete_sale(id);
        observe("sale_delete", deleted, |_| format!("id={id}"))
    }

    fn detail(&self, sale: Sale) -> RepoResult<SaleDetail> {
        let dealer = self.repo.get_dealer(sale.dealer_id)?;
        let car = self.repo.get_car(sale.car_id)?;
        let customer = self.repo.get_customer(sale.customer_id)?;
        Ok(SaleDetail::new(sale, dealer, car, customer))
    }
}

//! Customer use-case service.

use super::{found, observe, validated};
use crate::model::customer::{Customer, CustomerFields, CustomerId};
use crate::model::EntityKind;
use crate::projection::CustomerDetail;
use crate::repo::customer_repo::CustomerRepository;
use crate::repo::sale_repo::SaleRepository;
use crate::repo::{ListQuery, RepoResult};

pub struct CustomerService<R> {
    repo: R,
}

impl<R> CustomerService<R>
where
    R: CustomerRepository + SaleRepository,
{
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create(&self, fields: &CustomerFields) -> RepoResult<CustomerDetail> {
        let created = validated(fields).and_then(|()| self.repo.insert_customer(fields));
        observe("customer_create", created, |customer| {
            format!("id={}", customer.id)
        })
        .map(|customer| CustomerDetail::new(customer, Vec::new()))
    }

    pub fn list(&self, query: &ListQuery) -> RepoResult<Vec<Customer>> {
        let rows = validated(query).and_then(|()| self.repo.list_customers(query));
        observe("customer_list", rows, |rows| format!("count={}", rows.len()))
    }

    pub fn get(&self, id: CustomerId) -> RepoResult<CustomerDetail> {
        let detail = self
            .repo
            .get_customer(id)
            .and_then(|customer| found(EntityKind::Customer, id, customer))
            .and_then(|customer| self.detail(customer));
        observe("customer_get", detail, |_| format!("id={id}"))
    }

    pub fn update(&self, id: CustomerId, fields: &CustomerFields) -> RepoResult<CustomerDetail> {
        let detail = validated(fields)
            .and_then(|()| self.repo.update_customer(id, fields))
            .and_then(|customer| self.detail(customer));
        observe("customer_update", detail, |_| format!("id={id}"))
    }

    /// Deletes a customer without sales and returns its prior detail shape.
    pub fn delete(&self, id: CustomerId) -> RepoResult<CustomerDetail> {
        let deleted = self.repo.delete_customer(id);
        observe("customer_delete", deleted, |_| format!("id={id}"))
            .map(|customer| CustomerDetail::new(customer, Vec::new()))
    }

    fn detail(&self, customer: Customer) -> RepoResult<CustomerDetail> {
        let sales = self.repo.list_sales_for_customer(customer.id)?;
        Ok(CustomerDetail::new(customer, sales))
    }
}

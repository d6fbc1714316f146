//! Maps `<resource> <action>` onto service operations.
//!
//! The core never formats status codes; this module turns its tagged
//! failures into HTTP-like labels and exit codes.

use crate::{Action, Resource};
use anyhow::Context;
use dealership_core::{
    parse_payload, CarFields, CarService, CustomerFields, CustomerService, DealerFields,
    DealerService, ErrorKind, ListQuery, NewCar, NewSale, RepoError, SaleFields, SaleService,
    SqliteStore,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::io::Read;

pub fn dispatch(store: SqliteStore<'_>, resource: Resource) -> anyhow::Result<Value> {
    match resource {
        Resource::Dealers { action } => dealers(store, action),
        Resource::Cars { action } => cars(store, action),
        Resource::Customers { action } => customers(store, action),
        Resource::Sales { action } => sales(store, action),
    }
}

fn dealers(store: SqliteStore<'_>, action: Action) -> anyhow::Result<Value> {
    let service = DealerService::new(store);
    match action {
        Action::Create { json } => {
            let fields: DealerFields = payload(json)?;
            to_json(service.create(&fields)?)
        }
        Action::List { skip, limit } => to_json(service.list(&list_query(skip, limit)?)?),
        Action::Get { id } => to_json(service.get(id)?),
        Action::Update { id, json } => {
            let fields: DealerFields = payload(json)?;
            to_json(service.update(id, &fields)?)
        }
        Action::Delete { id } => to_json(service.delete(id)?),
    }
}

fn cars(store: SqliteStore<'_>, action: Action) -> anyhow::Result<Value> {
    let service = CarService::new(store);
    match action {
        Action::Create { json } => {
            let car: NewCar = payload(json)?;
            to_json(service.create(&car)?)
        }
        Action::List { skip, limit } => to_json(service.list(&list_query(skip, limit)?)?),
        Action::Get { id } => to_json(service.get(id)?),
        Action::Update { id, json } => {
            let fields: CarFields = payload(json)?;
            to_json(service.update(id, &fields)?)
        }
        Action::Delete { id } => to_json(service.delete(id)?),
    }
}

fn customers(store: SqliteStore<'_>, action: Action) -> anyhow::Result<Value> {
    let service = CustomerService::new(store);
    match action {
        Action::Create { json } => {
            let fields: CustomerFields = payload(json)?;
            to_json(service.create(&fields)?)
        }
        Action::List { skip, limit } => to_json(service.list(&list_query(skip, limit)?)?),
        Action::Get { id } => to_json(service.get(id)?),
        Action::Update { id, json } => {
            let fields: CustomerFields = payload(json)?;
            to_json(service.update(id, &fields)?)
        }
        Action::Delete { id } => to_json(service.delete(id)?),
    }
}

fn sales(store: SqliteStore<'_>, action: Action) -> anyhow::Result<Value> {
    let service = SaleService::new(store);
    match action {
        Action::Create { json } => {
            let sale: NewSale = payload(json)?;
            to_json(service.create(&sale)?)
        }
        Action::List { skip, limit } => to_json(service.list(&list_query(skip, limit)?)?),
        Action::Get { id } => to_json(service.get(id)?),
        Action::Update { id, json } => {
            let fields: SaleFields = payload(json)?;
            to_json(service.update(id, &fields)?)
        }
        Action::Delete { id } => to_json(service.delete(id)?),
    }
}

fn payload<T>(json: Option<String>) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned + dealership_core::Validate,
{
    let raw = match json {
        Some(raw) => raw,
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("failed to read payload from stdin")?;
            raw
        }
    };
    parse_payload(&raw).map_err(|err| RepoError::from(err).into())
}

fn list_query(skip: Option<u32>, limit: Option<u32>) -> anyhow::Result<ListQuery> {
    ListQuery::new(skip, limit).map_err(|err| RepoError::from(err).into())
}

fn to_json(value: impl Serialize) -> anyhow::Result<Value> {
    Ok(serde_json::to_value(value)?)
}

/// A failed invocation, classified for the caller.
#[derive(Debug)]
pub struct Failure {
    kind: Option<ErrorKind>,
    detail: String,
}

impl Failure {
    pub fn from_error(err: &anyhow::Error) -> Self {
        Self {
            kind: err.downcast_ref::<RepoError>().map(RepoError::kind),
            detail: format!("{err:#}"),
        }
    }

    pub fn status(&self) -> &'static str {
        match self.kind {
            Some(ErrorKind::NotFound) => "404 not found",
            Some(ErrorKind::UniquenessViolation) => "409 conflict",
            Some(ErrorKind::ReferentialViolation) | Some(ErrorKind::Validation) => {
                "422 unprocessable"
            }
            Some(ErrorKind::Storage) | None => "500 internal",
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self.kind {
            Some(ErrorKind::NotFound) => 4,
            Some(ErrorKind::Validation) => 2,
            Some(ErrorKind::ReferentialViolation) => 3,
            Some(ErrorKind::UniquenessViolation) => 5,
            Some(ErrorKind::Storage) | None => 1,
        }
    }

    pub fn body(&self) -> Value {
        json!({ "status": self.status(), "detail": self.detail })
    }
}

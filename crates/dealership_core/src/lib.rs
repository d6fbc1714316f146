//! Record-management core for a car dealership: dealers, cars, customers
//! and sales over a SQLite store.
//!
//! Layers, leaves first: `db` (connections, migrations) → `repo` (entity
//! store) → `service` (create/list/get/update/delete) → `projection`
//! (response shapes). `payload` decodes and validates JSON request bodies.

pub mod db;
pub mod logging;
pub mod model;
pub mod payload;
pub mod projection;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::car::{Car, CarFields, CarId, NewCar};
pub use model::customer::{Customer, CustomerFields, CustomerId};
pub use model::dealer::{Dealer, DealerFields, DealerId};
pub use model::sale::{NewSale, Sale, SaleFields, SaleId};
pub use model::validation::{Validate, ValidationError};
pub use model::EntityKind;
pub use payload::parse_payload;
pub use projection::{CarDetail, CustomerDetail, DealerDetail, SaleDetail};
pub use repo::car_repo::CarRepository;
pub use repo::customer_repo::CustomerRepository;
pub use repo::dealer_repo::DealerRepository;
pub use repo::sale_repo::SaleRepository;
pub use repo::{ErrorKind, ListQuery, RepoError, RepoResult, SqliteStore, DEFAULT_LIST_LIMIT};
pub use service::car_service::CarService;
pub use service::customer_service::CustomerService;
pub use service::dealer_service::DealerService;
pub use service::sale_service::SaleService;

//! Day-to-day operations: customers (with spreadsheet import), employees,
//! work orders, internal orders, products (with images), routes and the
//! dashboard.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod config;
pub mod domain;
pub mod infra;

use std::sync::Arc;

use fsm_db::{Db, DocumentStore};

pub use config::OperationsConfig;
pub use domain::model::{
    Customer, Employee, InternalOrder, OrderStatus, OrderType, Product, Route, TaskType, WorkOrder,
};
pub use domain::service::OperationsService;

/// Wire the service over the given database handle.
#[must_use]
pub fn service(db: Db, config: &OperationsConfig) -> Arc<OperationsService> {
    let images = infra::images::ImageStore::new(&config.uploads_dir);
    Arc::new(OperationsService::new(DocumentStore::new(db), images))
}

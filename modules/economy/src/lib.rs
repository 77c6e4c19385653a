//! Economy registers: employee payouts, the service price list (with
//! spreadsheet import), supplier rates, and the lookup that prices a customer
//! site by its service type.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod domain;

use std::sync::Arc;

use fsm_db::{Db, DocumentStore};

pub use domain::model::{Payout, Service, SupplierPricing};
pub use domain::service::EconomyService;

#[must_use]
pub fn service(db: Db) -> Arc<EconomyService> {
    Arc::new(EconomyService::new(DocumentStore::new(db)))
}

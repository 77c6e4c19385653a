//! HSE (health, safety and environment) registers. Plain tenant-scoped CRUD
//! under `/api/hms/...`.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod domain;

use std::sync::Arc;

use fsm_db::{Db, DocumentStore};

pub use domain::model::{Equipment, Incident, RiskAssessment, Training};
pub use domain::service::HseService;

#[must_use]
pub fn service(db: Db) -> Arc<HseService> {
    Arc::new(HseService::new(DocumentStore::new(db)))
}

//! Demo data reset: wipes every organization, user and record, then loads
//! two fixed organizations with a realistic working set.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod domain;

pub use domain::service::{SeedService, SeedSummary, Targets};

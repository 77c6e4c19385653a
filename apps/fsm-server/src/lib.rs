//! Composition root: configuration, logging, and the HTTP application built
//! from every domain module.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod app;
pub mod config;
pub mod cors;
pub mod logging;
pub mod signals;

pub use app::{build_router, migrate};
pub use config::AppConfig;

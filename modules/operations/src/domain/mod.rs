pub mod dashboard;
pub mod error;
pub mod import;
pub mod model;
pub mod route_optimizer;
pub mod service;

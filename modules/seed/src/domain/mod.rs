pub mod error;
pub mod fixtures;
pub mod service;

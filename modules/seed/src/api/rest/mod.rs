pub mod error;
mod handlers;
pub mod routes;

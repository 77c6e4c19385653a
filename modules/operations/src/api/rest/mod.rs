pub mod dto;
pub mod error;
mod handlers;
pub mod routes;

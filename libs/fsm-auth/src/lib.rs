//! Credentials and request authentication.
//!
//! - [`password`]: salted one-way hashing (Argon2id)
//! - [`token`]: signed bearer tokens carrying the user id and a 24h expiry
//! - [`axum_ext`]: middleware that turns a bearer token into a
//!   [`fsm_security::SecurityContext`] and the [`axum_ext::Authz`] extractor

pub mod axum_ext;
pub mod config;
pub mod errors;
pub mod password;
pub mod token;

pub use axum_ext::{AuthState, Authz, IdentityResolver, require_auth};
pub use config::AuthConfig;
pub use errors::AuthError;
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenService};

//! Caller identity and the tenant isolation guard.
//!
//! Every authenticated request carries a [`SecurityContext`] naming the user,
//! the organization the user belongs to and the user's role. Domain services
//! use [`SecurityContext::ensure_owns`] on every record they fetch by id and
//! [`SecurityContext::require_admin`] on administrative operations.

pub mod context;
pub mod role;

pub use context::{AccessError, SecurityContext};
pub use role::{Role, UnknownRole};

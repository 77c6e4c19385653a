//! REST plumbing shared by the domain modules.
//!
//! - [`crud`]: axum handlers for create/list/get/replace/delete over any
//!   [`fsm_db::Collection`], injected as an `Extension`
//! - [`repo_error_to_problem`]: status mapping for repository errors
//! - [`parse_id`]: path ids, malformed ones answered as 404 problems
//! - [`upload`]: single-file multipart extraction
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod crud;
mod error;
pub mod upload;

pub use error::{parse_id, repo_error_to_problem};
pub use upload::{Upload, read_upload};

use serde::{Deserialize, Serialize};

/// `{"message": ...}` body returned by deletes and other side-effect-only
/// endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDto {
    pub message: String,
}

impl MessageDto {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

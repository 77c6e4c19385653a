//! Error model shared by every HTTP surface of the server: the
//! [`Problem`] body, the [`catalog`] of error kinds, and [`ApiResult`] for
//! axum handlers.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod catalog;
pub mod problem;

pub use catalog::ErrDef;
pub use problem::{APPLICATION_PROBLEM_JSON, Problem};

pub type ApiResult<T> = Result<T, Problem>;

/// Id of the current tracing span, used as the problem `trace_id`.
#[cfg(feature = "axum")]
#[must_use]
pub fn current_trace_id() -> Option<String> {
    tracing::Span::current()
        .id()
        .map(|id| id.into_u64().to_string())
}

use fsm_errors::{Problem, catalog, current_trace_id};

use crate::domain::error::DomainError;

pub fn domain_error_to_problem(e: &DomainError, instance: &str) -> Problem {
    let trace_id = current_trace_id();
    let detail = e.to_string();

    match e {
        DomainError::InvalidFileFormat => {
            catalog::BAD_REQUEST.with_context(detail, instance, trace_id)
        }
        DomainError::NotFound(_) => catalog::NOT_FOUND.with_context(detail, instance, trace_id),
        DomainError::Forbidden(_) => {
            tracing::warn!(error = %e, "access forbidden");
            catalog::FORBIDDEN.with_context(detail, instance, trace_id)
        }
        DomainError::ImportFailed(_) => {
            tracing::error!(error = %e, "import failed");
            catalog::INTERNAL.with_context(detail, instance, trace_id)
        }
        DomainError::Internal(_) => {
            tracing::error!(error = ?e, "economy internal error");
            catalog::INTERNAL.with_context("An internal error occurred", instance, trace_id)
        }
    }
}

impl From<DomainError> for Problem {
    fn from(e: DomainError) -> Self {
        domain_error_to_problem(&e, "/")
    }
}

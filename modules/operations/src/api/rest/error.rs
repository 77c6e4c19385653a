use fsm_errors::{Problem, catalog, current_trace_id};

use crate::domain::error::DomainError;

/// Map a domain error to an RFC 9457 Problem.
pub fn domain_error_to_problem(e: &DomainError, instance: &str) -> Problem {
    let trace_id = current_trace_id();
    let detail = e.to_string();

    match e {
        DomainError::InvalidFileFormat | DomainError::InvalidImageType => {
            catalog::BAD_REQUEST.with_context(detail, instance, trace_id)
        }
        DomainError::NotFound(_) | DomainError::ImageNotFound => {
            catalog::NOT_FOUND.with_context(detail, instance, trace_id)
        }
        DomainError::Forbidden(_) => {
            tracing::warn!(error = %e, "access forbidden");
            catalog::FORBIDDEN.with_context(detail, instance, trace_id)
        }
        DomainError::ImportFailed(_) => {
            tracing::error!(error = %e, "import failed");
            catalog::INTERNAL.with_context(detail, instance, trace_id)
        }
        DomainError::Internal(_) => {
            tracing::error!(error = ?e, "operations internal error");
            catalog::INTERNAL.with_context("An internal error occurred", instance, trace_id)
        }
    }
}

impl From<DomainError> for Problem {
    fn from(e: DomainError) -> Self {
        domain_error_to_problem(&e, "/")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use fsm_security::AccessError;

    #[test]
    fn statuses() {
        let cases = [
            (DomainError::InvalidFileFormat, StatusCode::BAD_REQUEST),
            (DomainError::InvalidImageType, StatusCode::BAD_REQUEST),
            (DomainError::NotFound("Product"), StatusCode::NOT_FOUND),
            (DomainError::ImageNotFound, StatusCode::NOT_FOUND),
            (
                DomainError::Forbidden(AccessError::ForeignTenant),
                StatusCode::FORBIDDEN,
            ),
            (
                DomainError::ImportFailed("bad zip".to_owned()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(domain_error_to_problem(&err, "/x").status, status, "{err}");
        }
    }

    #[test]
    fn import_failure_reason_is_surfaced() {
        let p = domain_error_to_problem(&DomainError::ImportFailed("bad zip".to_owned()), "/");
        assert_eq!(p.detail, "Import failed: bad zip");
    }

    #[test]
    fn not_found_names_entity() {
        let p = domain_error_to_problem(&DomainError::NotFound("Customer"), "/api/customers/1");
        assert_eq!(p.detail, "Customer not found");
    }
}

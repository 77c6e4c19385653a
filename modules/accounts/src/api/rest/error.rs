use fsm_errors::{Problem, catalog, current_trace_id};

use crate::domain::error::DomainError;

/// Map a domain error to an RFC 9457 Problem.
pub fn domain_error_to_problem(e: &DomainError, instance: &str) -> Problem {
    let trace_id = current_trace_id();
    let detail = e.to_string();

    match e {
        DomainError::EmailTaken | DomainError::InvalidRole(_) | DomainError::Validation(_) => {
            catalog::BAD_REQUEST.with_context(detail, instance, trace_id)
        }
        DomainError::InvalidCredentials => {
            catalog::UNAUTHORIZED.with_context(detail, instance, trace_id)
        }
        DomainError::OrganizationNotFound | DomainError::UserNotFound => {
            catalog::NOT_FOUND.with_context(detail, instance, trace_id)
        }
        DomainError::Forbidden(_)
        | DomainError::CannotRemoveSelf
        | DomainError::CannotChangeOwnRole => {
            tracing::warn!(error = %e, "access forbidden");
            catalog::FORBIDDEN.with_context(detail, instance, trace_id)
        }
        DomainError::Auth(_) | DomainError::Internal(_) => {
            tracing::error!(error = ?e, "accounts internal error");
            catalog::INTERNAL.with_context("An internal error occurred", instance, trace_id)
        }
    }
}

/// Lets handlers use `?` on domain results.
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
    fn statuses_follow_error_taxonomy() {
        let cases = [
            (DomainError::EmailTaken, StatusCode::BAD_REQUEST),
            (DomainError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (DomainError::UserNotFound, StatusCode::NOT_FOUND),
            (DomainError::CannotRemoveSelf, StatusCode::FORBIDDEN),
            (
                DomainError::Forbidden(AccessError::AdminRequired),
                StatusCode::FORBIDDEN,
            ),
            (
                DomainError::Internal(anyhow::anyhow!("disk full")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(domain_error_to_problem(&err, "/x").status, status, "{err}");
        }
    }

    #[test]
    fn detail_carries_message() {
        let p = domain_error_to_problem(&DomainError::InvalidCredentials, "/api/auth/login");
        assert_eq!(p.detail, "Incorrect email or password");
        assert_eq!(p.instance, "/api/auth/login");
    }

    #[test]
    fn internal_detail_is_generic() {
        let p = domain_error_to_problem(&DomainError::Internal(anyhow::anyhow!("secret dsn")), "/");
        assert!(!p.detail.contains("secret"));
    }
}

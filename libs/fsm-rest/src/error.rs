use fsm_db::RepoError;
use fsm_errors::{Problem, catalog, current_trace_id};
use uuid::Uuid;

/// Map a repository error to an RFC 9457 Problem.
///
/// `NotFound` -> 404 with `"<Label> not found"`, tenant mismatch -> 403,
/// storage failures -> 500 with a generic detail.
#[must_use]
pub fn repo_error_to_problem(e: &RepoError, instance: &str) -> Problem {
    let trace_id = current_trace_id();
    match e {
        RepoError::NotFound(_) => {
            catalog::NOT_FOUND.with_context(e.to_string(), instance, trace_id)
        }
        RepoError::Forbidden(_) => {
            tracing::warn!(error = %e, instance, "cross-tenant access rejected");
            catalog::FORBIDDEN.with_context(e.to_string(), instance, trace_id)
        }
        RepoError::Db(db) => {
            tracing::error!(error = %db, instance, "storage failure");
            let detail = "An internal database error occurred";
            catalog::INTERNAL.with_context(detail, instance, trace_id)
        }
    }
}

/// Parse a record id taken from the request path.
///
/// # Errors
/// 404 `"<label> not found"` when `raw` is not a UUID, since no record can
/// carry that id.
pub fn parse_id(raw: &str, label: &str, instance: &str) -> Result<Uuid, Problem> {
    Uuid::parse_str(raw).map_err(|_| {
        catalog::NOT_FOUND.with_context(format!("{label} not found"), instance, current_trace_id())
    })
}

use fsm_errors::{Problem, catalog, current_trace_id};

use crate::domain::error::SeedError;

pub fn seed_error_to_problem(e: &SeedError, instance: &str) -> Problem {
    let trace_id = current_trace_id();
    match e {
        SeedError::InvalidSecret => {
            catalog::FORBIDDEN.with_context(e.to_string(), instance, trace_id)
        }
        SeedError::Failed(_) => {
            tracing::error!(error = ?e, "seeding failed");
            catalog::INTERNAL.with_context("Seeding failed", instance, trace_id)
        }
    }
}

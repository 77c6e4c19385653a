use fsm_errors::catalog;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Could not validate credentials")]
    InvalidToken(String),

    #[error("Token has expired")]
    TokenExpired,

    #[error("User not found")]
    UnknownSubject,

    #[error("Crypto failure: {0}")]
    Crypto(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AuthError> for fsm_errors::Problem {
    fn from(e: AuthError) -> Self {
        let trace_id = fsm_errors::current_trace_id();
        match e {
            AuthError::Unauthenticated
            | AuthError::InvalidToken(_)
            | AuthError::TokenExpired
            | AuthError::UnknownSubject => {
                catalog::UNAUTHORIZED.with_context(e.to_string(), "/", trace_id)
            }
            AuthError::Crypto(_) | AuthError::Internal(_) => {
                tracing::error!(error = %e, "authentication failure");
                catalog::INTERNAL.with_context("Authentication failed", "/", trace_id)
            }
        }
    }
}

impl axum::response::IntoResponse for AuthError {
    fn into_response(self) -> axum::response::Response {
        fsm_errors::Problem::from(self).into_response()
    }
}

use fsm_auth::AuthError;
use fsm_security::{AccessError, UnknownRole};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Email already registered")]
    EmailTaken,

    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error("Organization not found")]
    OrganizationNotFound,

    #[error("User not found")]
    UserNotFound,

    #[error(transparent)]
    InvalidRole(#[from] UnknownRole),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Forbidden(#[from] AccessError),

    #[error("Cannot remove yourself")]
    CannotRemoveSelf,

    #[error("Cannot change your own role")]
    CannotChangeOwnRole,

    #[error("Credential processing failed: {0}")]
    Auth(#[from] AuthError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl DomainError {
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

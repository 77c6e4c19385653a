use fsm_db::RepoError;
use fsm_security::AccessError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error(transparent)]
    Forbidden(#[from] AccessError),

    #[error("Invalid file format. Please upload .xlsx or .xls file")]
    InvalidFileFormat,

    #[error("Import failed: {0}")]
    ImportFailed(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<RepoError> for DomainError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::NotFound(label) => Self::NotFound(label),
            RepoError::Forbidden(a) => Self::Forbidden(a),
            RepoError::Db(db) => Self::Internal(db.into()),
        }
    }
}

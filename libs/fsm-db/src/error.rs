use thiserror::Error;

use crate::migration_runner::MigrationError;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sea(#[from] sea_orm::DbErr),

    #[error("stored document is not valid: {0}")]
    Codec(#[from] serde_json::Error),

    #[error(transparent)]
    Migration(#[from] MigrationError),
}

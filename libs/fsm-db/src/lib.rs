//! Persistence layer.
//!
//! - [`Db`]: the explicitly constructed connection handle, injected into every
//!   repository and closed at shutdown
//! - [`migration_runner`]: per-module migration history
//! - [`document`]: the `documents` table and its raw store
//! - [`collection`]: typed, tenant-scoped CRUD over one document collection
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod collection;
pub mod config;
pub mod document;
pub mod error;
pub mod handle;
pub mod migration_runner;

pub use collection::{Collection, Document, Record, RepoError};
pub use config::DatabaseConfig;
pub use document::DocumentStore;
pub use error::DbError;
pub use handle::{Db, redact_credentials_in_dsn};
pub use migration_runner::{MigrationError, MigrationResult, run_migrations_for_module};

/// Connect to an in-memory SQLite database with the document schema applied.
///
/// # Errors
/// Returns an error if the connection or the migrations fail.
#[cfg(feature = "sqlite")]
pub async fn connect_in_memory() -> Result<Db, DbError> {
    let db = Db::connect(&DatabaseConfig::in_memory()).await?;
    document::migrate(&db).await?;
    Ok(db)
}

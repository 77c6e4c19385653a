//! Schemaless record storage.
//!
//! Every domain collection (customers, work orders, HSE records, ...) is a set
//! of rows in one `documents` table, discriminated by `collection` and owned
//! by `organization_id`. The typed view lives in [`crate::collection`].

pub mod entity;
pub mod migrations;
mod store;

pub use store::DocumentStore;

use sea_orm_migration::MigratorTrait;

use crate::{Db, DbError, run_migrations_for_module};

/// Module name used for the document schema's migration history.
pub const MODULE_NAME: &str = "documents";

/// Apply the document schema.
///
/// # Errors
/// Returns `DbError::Migration` if a migration fails.
pub async fn migrate(db: &Db) -> Result<(), DbError> {
    run_migrations_for_module(db, MODULE_NAME, migrations::Migrator::migrations()).await?;
    Ok(())
}

//! Accounts module: organizations (tenants), users, registration and login.
//!
//! Organizations and users live in their own typed tables; every other
//! module only sees the [`fsm_security::SecurityContext`] this module
//! resolves for a bearer token.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod domain;
pub mod identity;
pub mod infra;

use std::sync::Arc;

use fsm_auth::TokenService;
use fsm_db::{Db, DbError};
use sea_orm_migration::MigratorTrait;

pub use domain::model::{Organization, User};
pub use domain::service::{AccountsService, ServiceConfig};
pub use identity::AccountsIdentity;

/// Apply the accounts schema.
///
/// # Errors
/// Returns an error if a migration fails.
pub async fn migrate(db: &Db) -> Result<(), DbError> {
    let migrations = infra::storage::migrations::Migrator::migrations();
    fsm_db::run_migrations_for_module(db, MODULE_NAME, migrations).await?;
    Ok(())
}

pub const MODULE_NAME: &str = "accounts";

/// Wire the service over the given database handle.
#[must_use]
pub fn service(db: Db, tokens: Arc<TokenService>, config: ServiceConfig) -> Arc<AccountsService> {
    let repo = Arc::new(infra::storage::SeaOrmAccountsRepository::new(db));
    Arc::new(AccountsService::new(repo, tokens, config))
}

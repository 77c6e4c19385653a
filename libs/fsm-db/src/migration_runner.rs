//! Per-module schema migrations.
//!
//! Every module keeps its own history table, `fsm_migrations__<name>__<hash8>`
//! (`<hash8>` = first 8 hex digits of `xxh3_64(module name)`), so two modules
//! can ship migrations with the same name. A migration and its history row
//! are committed in one transaction.

use std::collections::HashSet;

use sea_orm::{
    ConnectionTrait, DatabaseBackend, DbErr, FromQueryResult, Statement, TransactionTrait, Value,
};
use sea_orm_migration::{MigrationTrait, SchemaManager};
use thiserror::Error;
use tracing::{debug, info, instrument};
use xxhash_rust::xxh3::xxh3_64;

use crate::handle::Db;

const TABLE_PREFIX: &str = "fsm_migrations__";
const PG_IDENT_MAX: usize = 63;

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("module '{module}': cannot prepare migration history: {source}")]
    History { module: String, source: DbErr },

    #[error("module '{module}': migration '{migration}' failed: {source}")]
    Failed {
        module: String,
        migration: String,
        source: DbErr,
    },

    #[error("module '{module}': migration name '{name}' is used twice")]
    DuplicateName { module: String, name: String },
}

/// Outcome of one module's run.
#[derive(Debug, Clone, Default)]
pub struct MigrationResult {
    pub applied: Vec<String>,
    pub skipped: usize,
}

#[derive(Debug, FromQueryResult)]
struct AppliedRow {
    version: String,
}

/// History table of one module on one backend.
struct History {
    backend: DatabaseBackend,
    table: String,
}

impl History {
    fn new(backend: DatabaseBackend, module: &str) -> Self {
        Self {
            backend,
            table: history_table_name(module),
        }
    }

    fn quoted(&self) -> String {
        match self.backend {
            DatabaseBackend::MySql => format!("`{}`", self.table),
            DatabaseBackend::Postgres | DatabaseBackend::Sqlite => format!("\"{}\"", self.table),
        }
    }

    async fn ensure(&self, conn: &impl ConnectionTrait) -> Result<(), DbErr> {
        let (version, applied_at) = match self.backend {
            DatabaseBackend::Postgres => {
                ("VARCHAR(255)", "TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP")
            }
            DatabaseBackend::MySql => {
                ("VARCHAR(255)", "TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP")
            }
            DatabaseBackend::Sqlite => ("TEXT", "TEXT NOT NULL DEFAULT (datetime('now'))"),
        };
        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {} (version {version} PRIMARY KEY, applied_at {applied_at})",
            self.quoted()
        );
        conn.execute(Statement::from_string(self.backend, sql)).await?;
        Ok(())
    }

    async fn applied(&self, conn: &impl ConnectionTrait) -> Result<HashSet<String>, DbErr> {
        let sql = format!("SELECT version FROM {}", self.quoted());
        let rows = AppliedRow::find_by_statement(Statement::from_string(self.backend, sql))
            .all(conn)
            .await?;
        Ok(rows.into_iter().map(|r| r.version).collect())
    }

    async fn record(&self, conn: &impl ConnectionTrait, version: &str) -> Result<(), DbErr> {
        let placeholder = match self.backend {
            DatabaseBackend::Postgres => "$1",
            DatabaseBackend::MySql | DatabaseBackend::Sqlite => "?",
        };
        let sql = format!("INSERT INTO {} (version) VALUES ({placeholder})", self.quoted());
        let values: [Value; 1] = [version.into()];
        conn.execute(Statement::from_sql_and_values(self.backend, sql, values))
            .await?;
        Ok(())
    }
}

fn history_table_name(module: &str) -> String {
    let hash = format!("{:016x}", xxh3_64(module.as_bytes()));
    let mut name: String = module
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if name.is_empty() {
        name.push('_');
    }
    name.truncate(PG_IDENT_MAX - TABLE_PREFIX.len() - 2 - 8);
    format!("{TABLE_PREFIX}{name}__{}", &hash[..8])
}

/// Apply the not yet applied migrations of `module`, ordered by name.
///
/// # Errors
/// `DuplicateName` if two migrations share a name, `History` if the history
/// table cannot be created or read, `Failed` for the first migration that
/// fails; it is rolled back and later migrations are not attempted.
#[instrument(skip(db, migrations), fields(count = migrations.len()))]
pub async fn run_migrations_for_module(
    db: &Db,
    module: &str,
    mut migrations: Vec<Box<dyn MigrationTrait>>,
) -> Result<MigrationResult, MigrationError> {
    let mut result = MigrationResult::default();
    if migrations.is_empty() {
        return Ok(result);
    }

    migrations.sort_by(|a, b| a.name().cmp(b.name()));
    if let Some(pair) = migrations.windows(2).find(|w| w[0].name() == w[1].name()) {
        return Err(MigrationError::DuplicateName {
            module: module.to_owned(),
            name: pair[0].name().to_owned(),
        });
    }

    let conn = db.conn();
    let history = History::new(conn.get_database_backend(), module);
    let history_err = |source| MigrationError::History {
        module: module.to_owned(),
        source,
    };
    history.ensure(conn).await.map_err(history_err)?;
    let done = history.applied(conn).await.map_err(history_err)?;

    for migration in migrations {
        let name = migration.name().to_owned();
        if done.contains(&name) {
            debug!(migration = %name, "already applied");
            result.skipped += 1;
            continue;
        }

        let failed = |source| MigrationError::Failed {
            module: module.to_owned(),
            migration: name.clone(),
            source,
        };
        let txn = conn.begin().await.map_err(failed)?;
        let step = async {
            migration.up(&SchemaManager::new(&txn)).await?;
            history.record(&txn, &name).await
        }
        .await;
        if let Err(e) = step {
            if let Err(rollback) = txn.rollback().await {
                debug!(error = %rollback, "rollback after failed migration");
            }
            return Err(failed(e));
        }
        txn.commit().await.map_err(failed)?;

        info!(migration = %name, "migration applied");
        result.applied.push(name);
    }

    info!(applied = result.applied.len(), skipped = result.skipped, "migrations up to date");
    Ok(result)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use sea_orm_migration::prelude::*;

    #[test]
    fn history_table_names() {
        let accounts = history_table_name("accounts");
        assert!(accounts.starts_with("fsm_migrations__accounts__"));
        assert_eq!(accounts, history_table_name("accounts"));
        assert_ne!(accounts, history_table_name("documents"));
        assert!(history_table_name("my-module").starts_with("fsm_migrations__my_module__"));
        assert!(history_table_name("").starts_with("fsm_migrations_____"));
        assert!(history_table_name(&"x".repeat(200)).len() <= 63);
    }

    struct Step(&'static str);

    impl MigrationName for Step {
        fn name(&self) -> &str {
            self.0
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Step {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            let sql = format!("CREATE TABLE \"t_{}\" (id INTEGER PRIMARY KEY)", self.0);
            manager.get_connection().execute_unprepared(&sql).await?;
            Ok(())
        }
    }

    struct Broken;

    impl MigrationName for Broken {
        fn name(&self) -> &str {
            "m002_broken"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Broken {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager.get_connection().execute_unprepared("NOT SQL").await?;
            Ok(())
        }
    }

    #[tokio::test]
    async fn applies_pending_in_name_order_and_skips_done() {
        let db = Db::connect(&DatabaseConfig::in_memory()).await.unwrap();

        let first = run_migrations_for_module(&db, "m", vec![Box::new(Step("one"))])
            .await
            .unwrap();
        assert_eq!(first.applied, vec!["one".to_owned()]);

        let second = run_migrations_for_module(
            &db,
            "m",
            vec![Box::new(Step("two")), Box::new(Step("one"))],
        )
        .await
        .unwrap();
        assert_eq!(second.applied, vec!["two".to_owned()]);
        assert_eq!(second.skipped, 1);
    }

    #[tokio::test]
    async fn failed_migration_stops_the_run() {
        let db = Db::connect(&DatabaseConfig::in_memory()).await.unwrap();
        let err = run_migrations_for_module(
            &db,
            "f",
            vec![Box::new(Step("m001_ok")), Box::new(Broken), Box::new(Step("m003_late"))],
        )
        .await
        .unwrap_err();
        assert!(
            matches!(err, MigrationError::Failed { ref migration, .. } if migration == "m002_broken")
        );

        let again = run_migrations_for_module(&db, "f", vec![Box::new(Step("m001_ok"))])
            .await
            .unwrap();
        assert_eq!(again.skipped, 1);
    }

    #[tokio::test]
    async fn rejects_duplicate_names() {
        let db = Db::connect(&DatabaseConfig::in_memory()).await.unwrap();
        let err = run_migrations_for_module(
            &db,
            "dup",
            vec![Box::new(Step("x")), Box::new(Step("x"))],
        )
        .await
        .unwrap_err();
        assert!(matches!(err, MigrationError::DuplicateName { .. }));
    }
}

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::DatabaseConfig;
use crate::error::DbError;

/// Shared database handle.
///
/// Constructed once at process start and handed to every repository; cloning
/// shares the underlying pool.
#[derive(Clone, Debug)]
pub struct Db {
    conn: DatabaseConnection,
}

impl Db {
    /// Open a pool for the configured DSN.
    ///
    /// # Errors
    /// Returns `DbError::Sea` if the database cannot be reached.
    pub async fn connect(cfg: &DatabaseConfig) -> Result<Self, DbError> {
        let mut opts = ConnectOptions::new(cfg.url.clone());
        // An in-memory SQLite database lives and dies with its connection.
        let max = if cfg.url.contains(":memory:") {
            1
        } else {
            cfg.max_connections.max(1)
        };
        opts.max_connections(max)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        info!(dsn = %redact_credentials_in_dsn(&cfg.url), max_connections = max, "connecting to database");
        let conn = Database::connect(opts).await?;
        Ok(Self { conn })
    }

    #[must_use]
    pub fn from_connection(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    #[must_use]
    pub fn conn(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Close the pool. Called once during shutdown.
    ///
    /// # Errors
    /// Returns `DbError::Sea` if the pool fails to close cleanly.
    pub async fn close(self) -> Result<(), DbError> {
        self.conn.close().await?;
        info!("database connection closed");
        Ok(())
    }
}

/// Replace the password part of a DSN with `***` so it can be logged.
#[must_use]
pub fn redact_credentials_in_dsn(dsn: &str) -> String {
    match url::Url::parse(dsn) {
        Ok(mut parsed) if parsed.password().is_some() => {
            if parsed.set_password(Some("***")).is_ok() {
                parsed.to_string()
            } else {
                "***".to_owned()
            }
        }
        Ok(_) => dsn.to_owned(),
        Err(_) => "***".to_owned(),
    }
}

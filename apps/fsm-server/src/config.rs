//! Layered configuration: built-in defaults, then an optional YAML file, then
//! `APP__`-prefixed environment variables (`__` separates nesting levels),
//! then command-line overrides.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use fsm_auth::AuthConfig;
use fsm_db::{DatabaseConfig, redact_credentials_in_dsn};
use serde::{Deserialize, Serialize};

const REDACTED: &str = "***";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub seed: SeedConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Root directory for uploaded files.
    #[serde(default = "default_uploads_dir")]
    pub uploads_dir: PathBuf,
    /// Maximum request body size, uploads included.
    #[serde(default = "default_body_limit_bytes")]
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            uploads_dir: default_uploads_dir(),
            body_limit_bytes: default_body_limit_bytes(),
        }
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_owned()
}

fn default_port() -> u16 {
    8001
}

fn default_uploads_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_body_limit_bytes() -> usize {
    16 * 1024 * 1024
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorsConfig {
    /// `*` allows any origin.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

fn default_allowed_origins() -> Vec<String> {
    vec!["*".to_owned()]
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedConfig {
    /// Shared secret for `/api/seed-database`; unset disables the endpoint.
    #[serde(default)]
    pub secret: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_owned()
}

impl AppConfig {
    /// Defaults, then `path` (if any), then the environment.
    ///
    /// # Errors
    /// Returns the figment error for unreadable files, malformed values or
    /// unknown keys.
    pub fn load(path: Option<&Path>) -> Result<Self, figment::Error> {
        Self::figment(path).extract()
    }

    fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment.merge(Env::prefixed("APP__").split("__"))
    }

    /// Command-line overrides. `-v` raises the level to info, `-vv` to debug,
    /// `-vvv` to trace.
    pub fn apply_cli_overrides(&mut self, port: Option<u16>, verbose: u8) {
        if let Some(port) = port {
            self.server.port = port;
        }
        let level = match verbose {
            0 => None,
            1 => Some("info"),
            2 => Some("debug"),
            _ => Some("trace"),
        };
        if let Some(level) = level {
            level.clone_into(&mut self.logging.level);
        }
    }

    /// Copy safe to print: secrets masked, DSN credentials removed.
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        copy.database.url = redact_credentials_in_dsn(&self.database.url);
        REDACTED.clone_into(&mut copy.auth.jwt_secret);
        if copy.seed.secret.is_some() {
            copy.seed.secret = Some(REDACTED.to_owned());
        }
        copy
    }

    #[must_use]
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.bind_addr, self.server.port)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.port, 8001);
        assert_eq!(cfg.auth.token_ttl_hours, 24);
        assert_eq!(cfg.cors.allowed_origins, vec!["*"]);
        assert_eq!(cfg.seed.secret, None);
        assert_eq!(cfg.listen_addr(), "0.0.0.0:8001");
    }

    #[test]
    fn yaml_then_env_then_cli() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "fsm.yaml",
                r"
server:
  port: 9000
  uploads_dir: /var/lib/fsm/uploads
database:
  url: sqlite://test.db?mode=rwc
auth:
  jwt_secret: from-file
",
            )?;
            jail.set_env("APP__AUTH__JWT_SECRET", "from-env");
            jail.set_env("APP__SEED__SECRET", "seed-me");

            let mut cfg = AppConfig::load(Some(Path::new("fsm.yaml")))?;
            assert_eq!(cfg.server.port, 9000);
            assert_eq!(cfg.server.uploads_dir, PathBuf::from("/var/lib/fsm/uploads"));
            assert_eq!(cfg.database.url, "sqlite://test.db?mode=rwc");
            assert_eq!(cfg.auth.jwt_secret, "from-env");
            assert_eq!(cfg.seed.secret.as_deref(), Some("seed-me"));

            cfg.apply_cli_overrides(Some(7000), 2);
            assert_eq!(cfg.server.port, 7000);
            assert_eq!(cfg.logging.level, "debug");
            Ok(())
        });
    }

    #[test]
    fn unknown_keys_are_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("fsm.yaml", "server:\n  prot: 1\n")?;
            assert!(AppConfig::load(Some(Path::new("fsm.yaml"))).is_err());
            Ok(())
        });
    }

    #[test]
    fn redacted_masks_secrets() {
        let mut cfg = AppConfig::default();
        cfg.database.url = "postgres://fsm:hunter2@db/fsm".to_owned();
        cfg.seed.secret = Some("seed".to_owned());
        let shown = cfg.redacted();
        assert!(!shown.database.url.contains("hunter2"));
        assert_eq!(shown.auth.jwt_secret, "***");
        assert_eq!(shown.seed.secret.as_deref(), Some("***"));
    }
}

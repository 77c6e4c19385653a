use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fsm_db::{Db, DatabaseConfig};
use fsm_server::{AppConfig, build_router, logging, migrate, signals};

/// Field-service management server
#[derive(Parser)]
#[command(name = "fsm-server")]
#[command(about = "Field-service management server")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print effective configuration (JSON, secrets masked) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory SQLite database
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = cli.config.as_deref()
        && !Path::new(path).is_file()
    {
        anyhow::bail!("config file does not exist: {}", path.display());
    }

    // defaults -> YAML -> env (APP__*) -> CLI
    let mut config = AppConfig::load(cli.config.as_deref()).context("invalid configuration")?;
    config.apply_cli_overrides(cli.port, cli.verbose);
    if cli.mock {
        config.database = DatabaseConfig::in_memory();
    }

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config.redacted())?);
        return Ok(());
    }

    logging::init(&config.logging).context("failed to initialize logging")?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => {
            check_config(&config)?;
            Ok(())
        }
    }
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("configuration checked");
    println!("Configuration is valid");
    println!("{}", serde_json::to_string_pretty(&config.redacted())?);
    Ok(())
}

async fn run_server(config: AppConfig) -> Result<()> {
    tracing::info!("fsm-server starting");

    let db = Db::connect(&config.database).await?;
    migrate(&db).await.context("database migration failed")?;

    if config.auth.jwt_secret == fsm_auth::AuthConfig::default().jwt_secret {
        tracing::warn!("auth.jwt_secret is the built-in default; set APP__AUTH__JWT_SECRET");
    }

    let app = build_router(&config, &db);
    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(signals::shutdown_signal())
        .await?;

    tracing::info!("HTTP server stopped");
    db.close().await?;
    Ok(())
}

use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{Layer, fmt};

use crate::config::LoggingConfig;

/// Install the global subscriber writing to stderr. `RUST_LOG` wins over the
/// configured level.
///
/// # Errors
/// Fails if a global subscriber is already installed.
pub fn init(cfg: &LoggingConfig) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.level));

    let fmt_layer = if cfg.json {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        fmt::layer().with_target(true).with_writer(std::io::stderr).boxed()
    };

    tracing_subscriber::registry().with(filter).with(fmt_layer).try_init()
}

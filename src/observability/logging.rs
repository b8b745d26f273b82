//! Structured logging setup.
//!
//! # Design Decisions
//! - Uses tracing-subscriber with an `EnvFilter`
//! - `RUST_LOG` overrides the configured level
//! - JSON output for log shipping, pretty output for development

use tracing::Subscriber;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::LoggingConfig;

/// Build the filter for `config`, preferring `RUST_LOG` when set.
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("api_pipeline={0},protective_monitoring={0}", config.log_level)))
}

/// Build the subscriber for `config` without installing it.
pub fn subscriber(config: &LoggingConfig) -> impl Subscriber + Send + Sync + 'static {
    let fmt_layer = if config.json {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };
    tracing_subscriber::registry().with(env_filter(config)).with(fmt_layer)
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), tracing_subscriber::util::TryInitError> {
    subscriber(config).try_init()
}

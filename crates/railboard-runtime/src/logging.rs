//! Subscriber setup for binaries and tests

use railboard_core::{RailboardError, RailboardResult};
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::RuntimeConfig;

/// Install the global subscriber. `RUST_LOG` wins over the configured filter.
pub fn init(config: &RuntimeConfig) -> RailboardResult<()> {
    let filter = env_filter(&config.log_filter)?;
    let (plain, json) = if config.json_logs {
        (None, Some(fmt::layer().json()))
    } else {
        (Some(fmt::layer()), None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(plain)
        .with(json)
        .try_init()
        .map_err(|e| RailboardError::InvalidConfig(e.to_string()))
}

/// Thread-local subscriber writing through the test harness
#[must_use]
pub fn init_test() -> DefaultGuard {
    let filter = env_filter("debug").unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_test_writer())
        .set_default()
}

fn env_filter(fallback: &str) -> RailboardResult<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .map_err(|e| RailboardError::InvalidConfig(format!("log filter {fallback:?}: {e}")))
}

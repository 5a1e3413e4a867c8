//! Structured logging.
//!
//! # Responsibilities
//! - Initialize logging subsystem
//! - Configure log level from `RUST_LOG` or config
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - `RUST_LOG` wins over `observability.log_level`

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

fn filter_for(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("hardened_defaults={}", config.log_level)))
        .unwrap_or_else(|_| EnvFilter::new("hardened_defaults=info"))
}

/// Install the global subscriber. Subsequent calls are ignored.
pub fn init(config: &ObservabilityConfig) {
    let result = tracing_subscriber::registry()
        .with(filter_for(config))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}

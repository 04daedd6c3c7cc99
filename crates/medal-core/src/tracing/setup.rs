//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::ObservabilityConfig;
use crate::constants::LOG_ENV_VAR;

static INIT: Once = Once::new();

/// Initialize the MedAL tracing/logging system.
///
/// Reads the `MEDAL_LOG` environment variable for per-module log levels.
/// Format: `MEDAL_LOG=medal_learning=debug,medal_sampling=info`
///
/// Falls back to `observability.log_level` if `MEDAL_LOG` is not set or is
/// invalid. Calling it more than once is a no-op.
pub fn init_tracing(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    install(filter, config.json_logs);
}

/// Initialize tracing with a custom filter string (for tests or embedding).
pub fn init_tracing_with_filter(filter: &str) {
    install(EnvFilter::new(filter), false);
}

fn install(filter: EnvFilter, json: bool) {
    INIT.call_once(|| {
        let registry = tracing_subscriber::registry().with(filter);
        // `try_init` so a subscriber installed by the host application wins.
        let _ = if json {
            registry
                .with(fmt::layer().json().with_target(true))
                .try_init()
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .try_init()
        };
    });
}

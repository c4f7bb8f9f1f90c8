//! Logging initialization for facet.
//!
//! Structured logging via `tracing`, configured once at startup.

use std::sync::Once;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Log output format.
#[derive(Debug, Clone, Copy, Default)]
pub enum LogFormat {
    /// JSON structured logs, one object per line.
    Json,
    /// Human-readable logs for interactive use.
    #[default]
    Text,
}

/// Initializes the logging subsystem.
///
/// Call once at startup. Safe to call again; subsequent calls are no-ops.
/// Levels come from `RUST_LOG`, defaulting to `info`.
pub fn init_logging(format: LogFormat) {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        match format {
            LogFormat::Json => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt::layer().json())
                    .init();
            }
            LogFormat::Text => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt::layer().with_target(false))
                    .init();
            }
        }
    });
}

//! Structured logging setup.
//!
//! `RUST_LOG` wins when set; otherwise the configured `LOG_LEVEL` directive
//! is used. Output goes to stderr, either human-readable or as JSON lines.

use std::io;

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter,
};

use crate::config::{LogFormat, ServerConfig};

/// Fallback filter when neither `RUST_LOG` nor `LOG_LEVEL` parses.
const FALLBACK_FILTER: &str = "info";

/// Install the global tracing subscriber.
///
/// # Errors
///
/// Returns `TryInitError` if a global subscriber is already installed.
pub fn init_tracing(config: &ServerConfig) -> Result<(), TryInitError> {
    let filter = build_filter(&config.log_level);
    let subscriber = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Pretty => subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .with_writer(io::stderr),
            )
            .try_init(),
        LogFormat::Json => subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_target(true)
                    .with_writer(io::stderr),
            )
            .try_init(),
    }
}

fn build_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new(FALLBACK_FILTER))
}

//! Logging initialization
//!
//! Structured logging via tracing, with RUST_LOG taking precedence over the
//! configured level.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber
///
/// Call once at startup from the embedding service.
pub fn init(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("heures={},info", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

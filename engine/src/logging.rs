//! Tracing initialization
//!
//! The engine is embedded, so the host application decides when to call
//! [`init_tracing`]. Output is pretty in development and JSON in production
//! (better for log aggregation), selected by `RUST_ENV`.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::EngineConfig;

/// Initialize tracing/logging for the embedding application.
///
/// Respects `RUST_LOG` when set; otherwise defaults to debug-level engine
/// logs in development and info-level in production. Calling this twice
/// panics (the global subscriber can only be set once), so hosts should
/// call it exactly once at startup.
pub fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if EngineConfig::is_production() {
            "nutritrack_engine=info".into()
        } else {
            "nutritrack_engine=debug".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if EngineConfig::is_production() {
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

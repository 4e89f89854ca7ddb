//! Structured logging setup.
//!
//! The library only emits `tracing` events; installing a subscriber is up to
//! the embedding program. [`init`] is a convenience for programs and tests
//! that want the default fmt output.

use crate::config::Settings;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Installs a global fmt subscriber. `RUST_LOG` wins over
/// [`Settings::log_filter`]. Returns false if a global subscriber was
/// already set.
pub fn init(settings: &Settings) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_filter()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber).is_ok()
}

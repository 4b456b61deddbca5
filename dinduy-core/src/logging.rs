//! Logging setup
//!
//! The host shell calls [`init`] once at startup. Everything in this crate
//! logs through `tracing` macros; nothing is written to stdout directly.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "dinduy_core=debug,info";

/// Install the global subscriber.
///
/// Safe to call more than once; later calls are ignored.
pub fn init() {
    let result = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();

    if result.is_ok() {
        tracing::info!("Logging initialized");
    }
}

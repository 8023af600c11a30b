//! Diagnostic logging.
//!
//! Events go to standard error through `tracing_subscriber::fmt`, filtered by
//! `RUST_LOG` (default `warn`). Standard output carries identifiers only.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber.
///
/// Calling this more than once keeps the first subscriber.
pub fn init() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

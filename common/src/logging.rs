//! Structured logging initialization
//!
//! Logs go to stderr. Stdout is reserved for the user-facing progress lines
//! the binaries print.

use std::io;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Guard that keeps the tracing subscriber active.
/// Hold it for the lifetime of `main`.
pub struct LogGuard;

/// Initialize structured logging for a component.
///
/// Meant to be called once, at the top of `main`. A repeated call leaves the
/// existing subscriber in place and records that at debug level.
///
/// `RUST_LOG` narrows or widens the filter; without it everything at INFO
/// and above is shown.
///
/// # Example
/// ```ignore
/// let _guard = init_logging("run-supabase-sql");
/// info!("Starting up...");
/// ```
pub fn init_logging(component: &'static str) -> LogGuard {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let format = fmt::layer().with_target(false).with_writer(io::stderr);

    // A second call keeps the first subscriber
    match tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .try_init()
    {
        Ok(()) => tracing::debug!(component, "Logging initialized"),
        Err(e) => tracing::debug!(component, error = %e, "Logging already initialized"),
    }

    LogGuard
}

//! Opt-in structured logging.
//!
//! The crate emits `tracing` events at coercion and clause-building
//! sites; this module wires up an optional subscriber controlled by
//! environment variables:
//!
//! - `SIFT_DEBUG=true|1|yes` - enable debug logging
//! - `SIFT_LOG_LEVEL=trace|debug|info|warn|error` - explicit level
//! - `SIFT_LOG_FORMAT=json|pretty|compact` - output format (default: json)
//!
//! Subscriber installation requires the `tracing-subscriber` feature;
//! without it the events still fire and the host application's own
//! subscriber picks them up.

use std::env;
use std::sync::Once;

static INIT: Once = Once::new();

/// Check if debug logging is enabled via `SIFT_DEBUG`.
#[inline]
pub fn is_debug_enabled() -> bool {
    env::var("SIFT_DEBUG")
        .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(false)
}

/// The configured log level, from `SIFT_LOG_LEVEL`.
///
/// Defaults to "debug" when `SIFT_DEBUG` is enabled, otherwise "warn".
pub fn get_log_level() -> &'static str {
    let fallback = if is_debug_enabled() { "debug" } else { "warn" };
    match env::var("SIFT_LOG_LEVEL") {
        Ok(level) => match level.to_lowercase().as_str() {
            "trace" => "trace",
            "debug" => "debug",
            "info" => "info",
            "warn" => "warn",
            "error" => "error",
            _ => fallback,
        },
        Err(_) => fallback,
    }
}

/// The configured output format, from `SIFT_LOG_FORMAT`.
pub fn get_log_format() -> &'static str {
    env::var("SIFT_LOG_FORMAT")
        .map(|f| match f.to_lowercase().as_str() {
            "pretty" => "pretty",
            "compact" => "compact",
            _ => "json",
        })
        .unwrap_or("json")
}

/// Install the subscriber once, if logging was requested through the
/// environment. Subsequent calls are no-ops.
pub fn init() {
    INIT.call_once(|| {
        if !is_debug_enabled() && env::var("SIFT_LOG_LEVEL").is_err() {
            return;
        }

        #[cfg(feature = "tracing-subscriber")]
        {
            use tracing_subscriber::{EnvFilter, fmt, prelude::*};

            let level = get_log_level();
            let filter = EnvFilter::try_new(format!("sift_query={level},sift_axum={level}"))
                .unwrap_or_else(|_| EnvFilter::new("warn"));

            match get_log_format() {
                "pretty" => {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(fmt::layer().pretty())
                        .init();
                }
                "compact" => {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(fmt::layer().compact())
                        .init();
                }
                _ => {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(fmt::layer().json())
                        .init();
                }
            }

            tracing::info!(level, format = get_log_format(), "sift logging initialized");
        }
    });
}

/// Set `SIFT_LOG_LEVEL` and install the subscriber.
///
/// # Safety
///
/// Mutates the process environment; call at startup before spawning
/// threads.
pub fn init_with_level(level: &str) {
    // SAFETY: intended for single-threaded program startup only.
    unsafe {
        env::set_var("SIFT_LOG_LEVEL", level);
    }
    init();
}

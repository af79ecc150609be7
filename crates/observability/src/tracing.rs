//! Tracing subscriber initialization.
//!
//! Events are written as one JSON object per line. Fields recorded on the
//! current span (the catalog group, product id, operation) are included so
//! a swallowed query failure can be traced back to its request.

use tracing_subscriber::EnvFilter;

/// Directives used when `RUST_LOG` is unset or invalid.
///
/// SQLx logs every statement at `info`; keep it to warnings.
pub const DEFAULT_FILTER: &str = "info,sqlx=warn";

/// Initialize with [`DEFAULT_FILTER`] as the fallback.
pub fn init() {
    init_with_default(DEFAULT_FILTER);
}

/// Initialize, overridable via `RUST_LOG`.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init_with_default(default_directives: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_current_span(true)
        .with_span_list(false)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}

//! Tracing initialization for the mediaclip server.
//!
//! Filtering is controlled through the `RUST_LOG` environment variable,
//! e.g. `RUST_LOG=debug` or `RUST_LOG=warn,mediaclip_mcp=debug`. The
//! default level is `info`.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

/// Initialize the tracing subscriber with environment-based filtering.
///
/// # Panics
///
/// Panics if called more than once, as the global subscriber can only
/// be set once.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer())
        .init();
}

/// Try to initialize tracing, returning an error if already initialized.
///
/// Useful in tests, where initialization may race between test cases.
pub fn try_init_tracing() -> Result<(), ()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer())
        .try_init()
        .map_err(|_| ())
}

fn fmt_layer<S>() -> fmt::Layer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .with_span_events(FmtSpan::NONE)
}

use tracing_subscriber::{fmt, EnvFilter};

/// §10.2: an env-filtered `tracing_subscriber` writer, defaulting to
/// `log_level` when `RUST_LOG` is unset.
pub fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt().with_env_filter(filter).with_target(true).init();
}

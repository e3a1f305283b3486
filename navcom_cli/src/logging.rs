use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub const LOG_ENV: &str = "NAVCOM_LOGLEVEL";

/// Filter directives from `RUST_LOG`, then `NAVCOM_LOGLEVEL`, then info for
/// this binary and the library
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env(LOG_ENV))
        .unwrap_or_else(|_| {
            EnvFilter::new(format!("navcom=info,{}=info", env!("CARGO_CRATE_NAME")))
        })
}

/// Logs go to stderr so stdout only carries decoded records
pub fn initialize() {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(env_filter());
    tracing_subscriber::registry().with(fmt_layer).init();
}

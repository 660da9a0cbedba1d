//! Tracing setup for the `ancla` binary.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable read when `--log-level` isn't given.
pub const LOG_ENV: &str = "ANCLA_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Pick the filter directive: flag, then `ANCLA_LOG`, then `warn`.
#[must_use]
pub fn filter_directive(flag: Option<&str>, env: Option<String>) -> String {
    flag.map(str::to_string)
        .or(env)
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

/// Install a stderr subscriber so stdout stays clean for JSON output.
pub fn init(flag: Option<&str>) {
    let directive = filter_directive(flag, std::env::var(LOG_ENV).ok());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}

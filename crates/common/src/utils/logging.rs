use std::io;
use configs::{LogFormat, LoggingConfig};
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize tracing from the logging section of the app config.
/// - `RUST_LOG` wins when set, otherwise `cfg.level` is used as the filter
/// - `cfg.format` selects compact text or JSON lines
/// - Writes to stdout so container runtimes pick it up
pub fn init_logging(cfg: &LoggingConfig) {
    match cfg.format {
        LogFormat::Compact => init_logging_compact(&cfg.level),
        LogFormat::Json => init_logging_json(&cfg.level),
    }
}

/// Compact human-readable output; used before the config is loaded too.
pub fn init_logging_default() {
    init_logging_compact("info,tower_http=info,axum=info");
}

fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

fn init_logging_compact(fallback: &str) {
    let _ = fmt()
        .with_env_filter(env_filter(fallback))
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}

fn init_logging_json(fallback: &str) {
    let _ = fmt()
        .with_env_filter(env_filter(fallback))
        .json()
        .with_writer(io::stdout)
        .try_init();
}

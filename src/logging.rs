// src/logging.rs

use tracing_subscriber::{fmt, EnvFilter};

/// Console logging for the binaries. Goes to stderr so stdout carries only
/// the records; `RUST_LOG` overrides the default filter.
pub fn init_logging() {
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,co2scraper=info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .init();
}

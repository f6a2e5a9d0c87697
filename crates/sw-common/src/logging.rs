//! Structured Logging Configuration
//!
//! Provides configurable logging with:
//! - JSON output for production (LOG_FORMAT=json)
//! - Human-readable output for development (default)
//!
//! # Usage
//!
//! ```rust,ignore
//! use sw_common::logging::init_logging;
//!
//! fn main() {
//!     init_logging("steward");
//!
//!     tracing::info!(org_guid = %org, "Granting role");
//! }
//! ```
//!
//! # Environment Variables
//!
//! - `LOG_FORMAT`: Set to "json" for JSON output, anything else for text (default: text)
//! - `RUST_LOG`: Standard log level filter (default: info)
//!   Examples: `RUST_LOG=debug`, `RUST_LOG=sw_users=trace,reqwest=info`

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter, Registry,
};

/// Output format selected from `LOG_FORMAT`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Text,
}

impl LogFormat {
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("LOG_FORMAT").unwrap_or_default())
    }

    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }
}

/// Initialize logging with the given service name.
///
/// Panics if a global subscriber is already installed; embedders that may
/// initialise twice should use [`try_init_logging`].
pub fn init_logging(service_name: &str) {
    if let Err(e) = try_init_logging(service_name) {
        panic!("failed to initialise logging for {}: {}", service_name, e);
    }
}

/// Initialize logging, returning an error instead of panicking when a
/// subscriber has already been set.
pub fn try_init_logging(service_name: &str) -> Result<(), TryInitError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let result = match LogFormat::from_env() {
        LogFormat::Json => json_subscriber(env_filter).try_init(),
        LogFormat::Text => text_subscriber(env_filter).try_init(),
    };

    if result.is_ok() {
        tracing::debug!(service = service_name, "Logging initialised");
    }
    result
}

fn json_subscriber(env_filter: EnvFilter) -> impl SubscriberInitExt {
    Registry::default()
        .with(env_filter)
        .with(
            fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(false)
                .with_target(true)
                .flatten_event(true)
                .with_span_events(FmtSpan::CLOSE),
        )
}

fn text_subscriber(env_filter: EnvFilter) -> impl SubscriberInitExt {
    Registry::default()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_ansi(true),
        )
}

/// Initialize logging with defaults (uses "steward" as service name).
pub fn init_default_logging() {
    init_logging("steward");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::parse("text"), LogFormat::Text);
        assert_eq!(LogFormat::parse(""), LogFormat::Text);
    }

    #[test]
    fn test_try_init_twice_does_not_panic() {
        let _ = try_init_logging("steward-test");
        assert!(try_init_logging("steward-test").is_err());
    }
}

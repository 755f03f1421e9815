//! Logging initialization.
//!
//! Two output formats: `json` for log shipping in deployment, a compact
//! human-readable layout everywhere else. `RUST_LOG` overrides the
//! configured level filter when set.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::LoggingConfig;

const JSON_FORMAT: &str = "json";

fn wants_json(format: &str) -> bool {
    format.eq_ignore_ascii_case(JSON_FORMAT)
}

/// Initializes the logging subsystem based on configuration.
pub fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let registry = tracing_subscriber::registry().with(filter);

    if wants_json(&config.format) {
        registry
            .with(
                fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .with_target(true),
            )
            .init();
    } else {
        registry
            .with(fmt::layer().compact().with_target(true))
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_selection_is_case_insensitive() {
        assert!(wants_json("json"));
        assert!(wants_json("JSON"));
        assert!(!wants_json("compact"));
        assert!(!wants_json(""));
    }
}

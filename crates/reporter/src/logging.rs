use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;
use crate::error::{ReporterError, ReporterResult};

/// Crates whose events are shown at the configured level
const TARGETS: [&str; 5] = [
    "tickwap",
    "tickwap_reporter",
    "tickwap_core",
    "tickwap_source",
    "tickwap_chart",
];

/// Filter directives used when `RUST_LOG` is not set
pub fn default_directives(level: &str) -> String {
    let level = level.to_lowercase();
    TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize the global subscriber
pub fn init_logging(config: &LoggingConfig) -> ReporterResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.level)));

    let result = if config.structured {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .try_init()
    };

    result.map_err(|e| ReporterError::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        let directives = default_directives("DEBUG");
        assert!(directives.starts_with("tickwap=debug,"));
        assert!(directives.contains("tickwap_source=debug"));
        assert_eq!(directives.split(',').count(), TARGETS.len());
    }
}

use tracing_subscriber::EnvFilter;

use crate::config::TelemetryConfig;

const DEFAULT_FILTER: &str = "info";

/// Installs a fmt subscriber. Safe to call more than once; later calls are
/// ignored. Returns whether this call installed it.
pub fn init(config: &TelemetryConfig) -> bool {
    if config.enable_trace == Some(false) {
        return false;
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter(config))
        .try_init()
        .is_ok()
}

fn filter(config: &TelemetryConfig) -> EnvFilter {
    match config.trace_filter.as_deref() {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_tracing_installs_nothing() {
        let config = TelemetryConfig {
            enable_trace: Some(false),
            trace_filter: None,
        };
        assert!(!init(&config));
    }

    #[test]
    fn init_is_idempotent() {
        let config = TelemetryConfig {
            enable_trace: Some(true),
            trace_filter: Some("companion_core=debug".into()),
        };
        init(&config);
        assert!(!init(&config));
    }
}

//! Telemetry configuration from environment variables.

use std::env;

/// Configuration for log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name attached to every event
    pub service_name: String,

    /// Log level or full `EnvFilter` directive (trace, debug, info, warn, error)
    pub log_level: String,

    /// Whether to emit JSON formatted logs
    pub json_logs: bool,

    /// Whether to include event targets
    pub log_targets: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "trc".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
            log_targets: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `TRC_SERVICE_NAME`: Service name (default: trc)
    /// - `TRC_LOG_LEVEL` or `RUST_LOG`: Log filter (default: info)
    /// - `TRC_JSON_LOGS`: Enable JSON logs (default: false)
    /// - `TRC_LOG_TARGETS`: Include event targets (default: false)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`TelemetryConfig::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            service_name: lookup("TRC_SERVICE_NAME").unwrap_or(defaults.service_name),

            log_level: lookup("TRC_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.log_level),

            json_logs: lookup("TRC_JSON_LOGS")
                .map(|v| flag(&v))
                .unwrap_or(defaults.json_logs),

            log_targets: lookup("TRC_LOG_TARGETS")
                .map(|v| flag(&v))
                .unwrap_or(defaults.log_targets),
        }
    }

    /// Override the level, as from a `--verbose` flag.
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }
}

fn flag(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1"
}

//! # TRC Telemetry
//!
//! Logging setup for binaries built on `trc-core`. The library crates only
//! emit `tracing` events; this crate installs the subscriber that prints them.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use trc_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     init_logging(&config).expect("Failed to init logging");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `TRC_SERVICE_NAME` | `trc` | Service name in log output |
//! | `TRC_LOG_LEVEL` / `RUST_LOG` | `info` | Log filter |
//! | `TRC_JSON_LOGS` | `false` | JSON formatted output |
//! | `TRC_LOG_TARGETS` | `false` | Include event targets |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{env_filter, init_logging};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TelemetryError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Logging already initialized: {0}")]
    AlreadyInitialized(String),
}

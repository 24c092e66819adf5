//! Observability for recordtrail
//!
//! Structured logging through `tracing`. Every event carries a stable
//! upper-snake `event` field (`RECORD_ADDED`, `RECORDS_PAGED`, ...) plus
//! key/value context, so log lines stay greppable and machine-readable.
//!
//! # Usage
//!
//! ```ignore
//! recordtrail::observability::init("info")?;
//! tracing::info!(event = "RECORD_ADDED", id = "alice/login");
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable overriding the configured log filter
pub const LOG_ENV: &str = "RECORDTRAIL_LOG";

/// Build the filter: `RECORDTRAIL_LOG` wins over the configured level
pub fn filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init(default_level: &str) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(filter(default_level))
        .with(fmt::layer().with_target(false))
        .try_init()
}

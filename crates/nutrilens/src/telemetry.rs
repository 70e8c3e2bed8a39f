//! Logging bootstrap shared by the engine's binaries.
//!
//! Diagnostics always go to stderr; stdout carries analysis JSON only.

use crate::config::TelemetryConfig;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("log filter '{directive}' is not a valid tracing directive")]
    InvalidFilter {
        directive: String,
        #[source]
        source: ParseError,
    },
    #[error("a global tracing subscriber is already installed")]
    AlreadyInstalled(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Build the filter from an explicit override, else the configured level.
/// A blank override counts as unset.
fn build_filter(override_directive: Option<String>, configured: &str) -> Result<EnvFilter, TelemetryError> {
    let directive = override_directive
        .filter(|directive| !directive.trim().is_empty())
        .unwrap_or_else(|| configured.to_string());
    EnvFilter::try_new(&directive).map_err(|source| TelemetryError::InvalidFilter { directive, source })
}

/// Install the process-wide subscriber. `RUST_LOG` overrides the configured
/// level, and an unparsable value is reported rather than ignored.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = build_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok(), &config.log_level)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(false)
        .compact()
        .try_init()
        .map_err(TelemetryError::AlreadyInstalled)
}

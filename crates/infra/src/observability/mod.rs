//! Logging setup and stable log labels
//!
//! The crate only emits `tracing` events. Applications call
//! [`init_tracing`] once at startup to install a subscriber; libraries
//! embedding the client may install their own instead.

use fincontrol_domain::LoggingConfig;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::http::{ApiError, ApiErrorCategory};

/// Errors raised while installing the subscriber
#[derive(Debug, thiserror::Error)]
pub enum ObservabilityError {
    #[error("Invalid log filter '{filter}': {message}")]
    InvalidFilter { filter: String, message: String },

    #[error("Failed to initialize tracing subscriber: {0}")]
    Init(String),
}

/// Install a global `tracing` subscriber
///
/// `RUST_LOG` overrides the configured filter when set. Output goes to
/// stderr, as JSON lines when `config.json` is set.
///
/// # Errors
/// Returns `ObservabilityError::InvalidFilter` for a malformed filter and
/// `ObservabilityError::Init` if a global subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), ObservabilityError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.filter).map_err(|e| {
            ObservabilityError::InvalidFilter {
                filter: config.filter.clone(),
                message: e.to_string(),
            }
        })?,
    };

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = if config.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr).with_current_span(true))
            .try_init()
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr).with_target(true).compact()).try_init()
    };
    result.map_err(|e| ObservabilityError::Init(e.to_string()))?;

    tracing::debug!(filter = %config.filter, json = config.json, "Logging initialized");
    Ok(())
}

/// Convert an `ApiError` into a stable label suitable for logging
#[inline]
pub fn error_label(error: &ApiError) -> &'static str {
    match error.category() {
        ApiErrorCategory::Authentication => "authentication",
        ApiErrorCategory::Authorization => "authorization",
        ApiErrorCategory::RateLimit => "rate_limit",
        ApiErrorCategory::Server => "server",
        ApiErrorCategory::Client => "client",
        ApiErrorCategory::Network => "network",
        ApiErrorCategory::Config => "config",
        ApiErrorCategory::Validation => "validation",
    }
}

//! Subscriber setup for the rule board service.
//!
//! Production writes JSON lines for log shipping; development and test runs
//! keep a compact single-line format.

use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

use crate::config::{AppEnvironment, TelemetryConfig};

/// Target of the drag and commit events emitted by the rule engine.
const ENGINE_TARGET: &str = "loan_rules::rules";

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("invalid log filter '{value}'")]
    Filter {
        value: String,
        #[source]
        source: ParseError,
    },
    #[error("a global subscriber is already installed: {0}")]
    AlreadyInstalled(Box<dyn std::error::Error + Send + Sync>),
}

/// Filter directives used when `RUST_LOG` is unset. Development also surfaces
/// hover and drag-start events from the engine.
pub fn default_directives(config: &TelemetryConfig, environment: AppEnvironment) -> String {
    match environment {
        AppEnvironment::Development => format!("{},{ENGINE_TARGET}=debug", config.log_level),
        AppEnvironment::Test | AppEnvironment::Production => config.log_level.clone(),
    }
}

/// A valid `RUST_LOG` wins; otherwise the configured directives must parse.
fn build_filter(rust_log: Option<&str>, fallback: String) -> Result<EnvFilter, TelemetryError> {
    if let Some(filter) = rust_log.and_then(|raw| EnvFilter::try_new(raw).ok()) {
        return Ok(filter);
    }
    EnvFilter::try_new(&fallback).map_err(|source| TelemetryError::Filter {
        value: fallback,
        source,
    })
}

pub fn init(config: &TelemetryConfig, environment: AppEnvironment) -> Result<(), TelemetryError> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(rust_log.as_deref(), default_directives(config, environment))?;

    // Formatter types differ per branch, so each one installs itself.
    let installed = match environment {
        AppEnvironment::Production => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(false)
            .try_init(),
        AppEnvironment::Development | AppEnvironment::Test => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .with_ansi(false)
            .try_init(),
    };
    installed.map_err(TelemetryError::AlreadyInstalled)
}

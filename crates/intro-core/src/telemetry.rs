//! Tracing setup for binaries and tests embedding the pipeline
//!
//! `RUST_LOG` wins over the default directive when set.

use crate::error::PipelineError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Output format of the fmt layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

fn filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Install a global subscriber with an env filter and the fmt layer.
///
/// Fails instead of panicking when a subscriber is already installed.
pub fn init_tracing(default_directive: &str) -> Result<(), PipelineError> {
    init_tracing_with(default_directive, LogFormat::Pretty)
}

/// Like [`init_tracing`], choosing the output format.
pub fn init_tracing_with(default_directive: &str, format: LogFormat) -> Result<(), PipelineError> {
    let registry = tracing_subscriber::registry().with(filter(default_directive));
    let result = match format {
        LogFormat::Pretty => registry.with(fmt::layer().with_target(true)).try_init(),
        LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
    };
    result.map_err(|e| PipelineError::Telemetry(e.to_string()))
}

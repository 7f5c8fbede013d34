//! Error types for the pipeline
//!
//! Only configuration and input loading fail. Guardrail violations and
//! unmatched campaigns are reported in the pipeline output.

use intro_guardrails::GuardrailError;
use intro_research::ResearchError;
use intro_resolve::ResolveError;
use intro_scenario::LayoutError;
use std::path::PathBuf;

/// Pipeline error type
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Configuration text is not valid TOML for [`PipelineConfig`](crate::PipelineConfig)
    #[error("invalid pipeline config: {0}")]
    Config(#[from] toml::de::Error),

    /// Configuration file could not be read
    #[error("failed to read config {}: {source}", .path.display())]
    ConfigIo {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Column layout rejected
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),

    /// Match threshold rejected
    #[error("resolver error: {0}")]
    Resolve(#[from] ResolveError),

    /// Guardrail configuration rejected
    #[error("guardrail error: {0}")]
    Guardrail(#[from] GuardrailError),

    /// Research document could not be found or loaded
    #[error("research error: {0}")]
    Research(#[from] ResearchError),

    /// Tracing subscriber could not be installed
    #[error("telemetry error: {0}")]
    Telemetry(String),
}

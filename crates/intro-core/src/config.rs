//! Pipeline configuration
//!
//! Every section has defaults, so an empty TOML document is a valid config:
//!
//! ```toml
//! industry = "manufacturing"
//! last_annual_ebitda = 10000000.0
//!
//! [layout]
//! label_col = 1
//! base_col = 2
//!
//! [thresholds]
//! campaign_to_model = 0.55
//!
//! [guardrails]
//! accretion_ceiling_pct = 15.0
//!
//! [workspace]
//! root = "/srv/intro"
//! ```

use crate::error::PipelineError;
use intro_guardrails::{GuardrailConfig, IndustryProfile};
use intro_research::WorkspaceConfig;
use intro_resolve::MatchThresholds;
use intro_scenario::ColumnLayout;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for [`IntroModelPipeline`](crate::IntroModelPipeline)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Industry profile selecting the incentive cost cap
    pub industry: IndustryProfile,
    /// Scenario sheet column positions
    pub layout: ColumnLayout,
    /// Fuzzy-match thresholds per calling context
    pub thresholds: MatchThresholds,
    /// Guardrail constants
    pub guardrails: GuardrailConfig,
    /// Workspace paths
    pub workspace: WorkspaceConfig,
    /// EBITDA used when the research document has none
    pub last_annual_ebitda: Option<f64>,
}

impl PipelineConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With industry profile
    #[must_use]
    pub fn with_industry(mut self, industry: IndustryProfile) -> Self {
        self.industry = industry;
        self
    }

    /// With column layout
    #[must_use]
    pub fn with_layout(mut self, layout: ColumnLayout) -> Self {
        self.layout = layout;
        self
    }

    /// With workspace paths
    #[must_use]
    pub fn with_workspace(mut self, workspace: WorkspaceConfig) -> Self {
        self.workspace = workspace;
        self
    }

    /// With fallback EBITDA
    #[must_use]
    pub fn with_last_annual_ebitda(mut self, ebitda: f64) -> Self {
        self.last_annual_ebitda = Some(ebitda);
        self
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, PipelineError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| PipelineError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Check every section.
    pub fn validate(&self) -> Result<(), PipelineError> {
        self.layout.validate()?;
        self.guardrails.validate()?;
        Ok(())
    }
}

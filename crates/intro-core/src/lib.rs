//! Intro Model pipeline
//!
//! Joins the values of an Intro Model workbook with the campaigns a
//! research pass selected:
//! - Reads `Inputs`, `Campaigns` and the scenario block from the workbook
//! - Resolves loosely spelled campaign names to model slugs
//! - Validates researched assumptions against industry guardrails
//! - Summarizes the total opportunity and the accretion check
//!
//! # Example
//!
//! ```rust
//! use intro_core::prelude::*;
//!
//! let pipeline = IntroModelPipeline::new(PipelineConfig::new())?;
//! let research = ResearchDocument::from_json_str(r#"{
//!     "last_annual_ebitda": 10000000,
//!     "campaigns_selected": ["Loyalty Rewards"],
//!     "campaign_assumptions": {
//!         "Loyalty Rewards": {"Avg Ticket Lift": {"value": 4.5, "source": "WEB", "incentive_cost": 0.25}}
//!     }
//! }"#).map_err(|e| e.to_string())?;
//!
//! let output = pipeline.run(&Workbook::new(), &research);
//! assert_eq!(output.campaigns.len(), 1);
//! assert!(output.is_valid());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]

// Core modules
pub mod config;
pub mod error;
pub mod normalize;
pub mod opportunity;
pub mod pipeline;
pub mod telemetry;

// Re-exports for convenience
pub use config::PipelineConfig;
pub use error::PipelineError;
pub use normalize::{normalize_campaign, normalize_campaigns, CampaignEntry, ModelLookup, DEFAULT_PRIORITY};
pub use opportunity::OpportunitySummary;
pub use pipeline::{CampaignOutcome, IntroModelPipeline, PipelineOutput};
pub use telemetry::{init_tracing, init_tracing_with, LogFormat};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for running the pipeline
    pub use crate::{
        CampaignEntry, CampaignOutcome, IntroModelPipeline, OpportunitySummary, PipelineConfig, PipelineError,
        PipelineOutput,
    };
    pub use intro_guardrails::{AssumptionSource, IndustryProfile, ValidationResult};
    pub use intro_research::{ResearchDocument, WorkspaceConfig};
    pub use intro_scenario::{CellValue, SheetGrid, Workbook};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

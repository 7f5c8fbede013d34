//! Intro Model research inputs
//!
//! Typed records for research output JSON and the workspace layout used to
//! find it. Everything path-related goes through an explicit
//! [`WorkspaceConfig`]; nothing reads process-wide state.
//!
//! # Example
//!
//! ```rust
//! use intro_research::ResearchDocument;
//!
//! let doc = ResearchDocument::from_json_str(r#"{
//!     "company": "Acme Foods",
//!     "last_annual_ebitda": 10000000,
//!     "campaigns_selected": ["Loyalty Rewards", {"campaign_type": "Shift Coverage", "priority": "high"}]
//! }"#)?;
//!
//! assert_eq!(doc.campaigns_selected.len(), 2);
//! assert_eq!(doc.campaigns_selected[1].name(), "Shift Coverage");
//! # Ok::<(), serde_json::Error>(())
//! ```

#![warn(missing_docs)]

pub mod document;
pub mod error;
pub mod workspace;

// Re-exports
pub use document::{CampaignInput, CampaignRecord, CampaignSelection, Metric, ResearchDocument, SummaryFlags};
pub use error::ResearchError;
pub use intro_guardrails::{CampaignAssumptions, SourceMetadata};
pub use workspace::{load_research, WorkspaceConfig, MODEL_FOLDER, WORKSPACE_CONFIG_FILE};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

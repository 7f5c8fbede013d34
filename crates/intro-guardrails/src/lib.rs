//! Intro Model assumption guardrails
//!
//! Business rules a number must pass before it may reach a client-facing
//! document. Every outcome is a [`ValidationResult`]; a violated guardrail is
//! a flagged result for a human reviewer, never an error.
//!
//! # Overview
//!
//! - **AssumptionGuardrails**: per-field ROPS check and aggregate accretion ceiling
//! - **AssumptionValidator**: runs every field of one campaign, keeping declared sources
//! - **check_portfolio**: portfolio accretion band and per-campaign ROPS band
//! - **render_report**: banner-wrapped plain-text report
//!
//! # Example
//!
//! ```rust
//! use intro_guardrails::{Action, AssumptionGuardrails, AssumptionSource};
//!
//! let guardrails = AssumptionGuardrails::for_industry("qsr")?;
//!
//! let field = guardrails.validate("Food Uplift %", 12.0, AssumptionSource::Web, Some(5.0), Some(0.25));
//! assert_eq!(field.rops, Some(20.0));
//! assert!(field.valid);
//!
//! let total = guardrails.validate_total(2_000_000.0, 10_000_000.0, &[AssumptionSource::Web]);
//! assert_eq!(total.action, Action::Flag);
//! # Ok::<(), intro_guardrails::GuardrailError>(())
//! ```

#![warn(missing_docs)]

pub mod batch;
pub mod config;
pub mod error;
pub mod guardrails;
pub mod portfolio;
pub mod report;
pub mod result;
pub mod source;

// Re-exports
pub use batch::{AssumptionValidator, CampaignAssumptions, CampaignValidation, SourceMetadata};
pub use config::{Bounds, GuardrailConfig, IndustryProfile, PortfolioBounds};
pub use error::GuardrailError;
pub use guardrails::{AssumptionGuardrails, TOTAL_ACCRETION_FIELD};
pub use portfolio::{check_portfolio, AccretionSummary, CampaignEconomics};
pub use report::{render_report, ReportFormatter};
pub use result::ValidationResult;
pub use source::{Action, AssumptionSource, ResultSource};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

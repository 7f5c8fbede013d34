//! Intro Model name resolution
//!
//! Campaigns reach the pipeline from two independent sources: spreadsheet
//! headers and research output. This crate gives both sides one key space.
//!
//! # Overview
//!
//! - **slugify**: the shared normalization rule
//! - **ratio**: gestalt similarity score in `[0, 1]`
//! - **CampaignNameResolver**: exact-then-fuzzy lookup against canonical slugs
//! - **compare_label_sets**: template recognition by row labels
//!
//! # Example
//!
//! ```rust
//! use intro_resolve::{CampaignNameResolver, MatchThreshold};
//!
//! let model_slugs = ["loyalty_rewards", "shift_coverage"];
//! let resolver = CampaignNameResolver::new(MatchThreshold::CAMPAIGN_TO_MODEL);
//!
//! assert_eq!(resolver.resolve("Loyalty Program", &model_slugs), Some("loyalty_rewards"));
//! assert_eq!(resolver.resolve("Fleet Telematics", &model_slugs), None);
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod labels;
pub mod resolver;
pub mod similarity;
pub mod slug;

// Re-exports
pub use error::ResolveError;
pub use labels::{best_matching_profile, compare_label_sets, ProfileMatch};
pub use resolver::{resolve, CampaignNameResolver, MatchThreshold, MatchThresholds, Resolution};
pub use similarity::ratio;
pub use slug::{is_slug, slugify};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

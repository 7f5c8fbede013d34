//! Intro Model scenario extraction
//!
//! Reads post-calculation worksheet values and pulls out the pieces the rest
//! of the pipeline works with:
//! - the cell grid / workbook model handed over by an exporter
//! - the scenario assumption block of the `Inputs` sheet, grouped by campaign
//! - plain inputs, campaign slots and per-campaign results ([`ModelReader`])
//!
//! Parsing is total: missing sections and malformed rows give less data,
//! never an error.
//!
//! # Example
//!
//! ```rust
//! use intro_scenario::{parse, AssumptionRow, CellValue, SheetGrid};
//!
//! let row = |label: &str, base: CellValue| vec![CellValue::Empty, label.into(), base];
//! let grid = SheetGrid::new(vec![
//!     row("SCENARIO ASSUMPTIONS", CellValue::Empty),
//!     row("Campaign 1: Loyalty Rewards", CellValue::Empty),
//!     row("Visit frequency uplift", 0.125.into()),
//! ]);
//!
//! let groups = parse(&grid);
//! assert_eq!(
//!     groups["loyalty_rewards"],
//!     vec![AssumptionRow::new("Visit frequency uplift", "13%", "", "")]
//! );
//! ```

#![warn(missing_docs)]

pub mod cell;
pub mod error;
pub mod format;
pub mod layout;
pub mod model;
pub mod parser;

// Re-exports
pub use cell::{cell_at, CellValue, SheetGrid, Workbook};
pub use error::LayoutError;
pub use format::{format_assumption, format_currency, format_integer, format_number};
pub use layout::{column_index, ColumnLayout};
pub use model::{CampaignSlot, ModelReader, ModelValues, CAMPAIGNS_SHEET, INPUTS_SHEET};
pub use parser::{header_name, parse, AssumptionRow, ScenarioBlockParser, ScenarioGroups, SCENARIO_MARKER};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

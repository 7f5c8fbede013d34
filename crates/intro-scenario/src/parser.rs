//! Scenario assumption block parser
//!
//! The `Inputs` sheet of an intro model carries a free-form block that starts
//! below a `SCENARIO ASSUMPTIONS` marker:
//!
//! ```text
//! SCENARIO ASSUMPTIONS
//! Campaign 1: Loyalty Rewards          <- header, base column empty
//! Visit frequency uplift   0.05  0.08  0.03
//! Incentive per visit      0.25
//!                                      <- blank row ends the group
//! Campaign 2: Shift Coverage
//! ...
//! ```
//!
//! [`ScenarioBlockParser::parse`] walks that block once and returns the
//! captured rows grouped by campaign slug. Bad rows cost data, never the
//! parse.

use crate::cell::{cell_at, CellValue, SheetGrid};
use crate::format::format_assumption;
use crate::layout::ColumnLayout;
use indexmap::IndexMap;
use intro_resolve::slugify;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Label text that opens the scenario block (case-sensitive substring).
pub const SCENARIO_MARKER: &str = "SCENARIO ASSUMPTIONS";

static CAMPAIGN_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Campaign \d+:").expect("campaign header pattern is valid"));

/// One captured scenario row, formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssumptionRow {
    /// Row label
    pub label: String,
    /// Base scenario value
    pub base: String,
    /// Upside scenario value (empty when no variance supplied)
    pub upside: String,
    /// Downside scenario value (empty when no variance supplied)
    pub downside: String,
}

impl AssumptionRow {
    /// Create row from already formatted values
    pub fn new(
        label: impl Into<String>,
        base: impl Into<String>,
        upside: impl Into<String>,
        downside: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            base: base.into(),
            upside: upside.into(),
            downside: downside.into(),
        }
    }

    /// Whether an upside or downside value was supplied
    #[inline]
    #[must_use]
    pub fn has_variance(&self) -> bool {
        !self.upside.is_empty() || !self.downside.is_empty()
    }
}

/// Campaign slug → rows in sheet order. Every group holds at least one row.
pub type ScenarioGroups = IndexMap<String, Vec<AssumptionRow>>;

/// How a single row is treated by the scan
#[derive(Debug, Clone, PartialEq)]
enum RowKind<'a> {
    /// Label empty or out of reach: closes the open group
    Blank,
    /// `Campaign N: name` with an empty base value
    Header(String),
    /// Non-empty base value
    Data(&'a [CellValue]),
    /// Labelled row with no base value and no header shape
    Other,
}

/// Group under construction
#[derive(Debug, Default)]
struct OpenGroup {
    name: Option<String>,
    rows: Vec<AssumptionRow>,
}

impl OpenGroup {
    /// Commit into `groups` if named and non-empty, then reset.
    ///
    /// A group with no rows stays open, name included.
    fn commit(&mut self, groups: &mut ScenarioGroups) {
        if self.name.is_none() || self.rows.is_empty() {
            return;
        }

        let name = self.name.take().unwrap_or_default();
        let rows = std::mem::take(&mut self.rows);

        let slug = slugify(&name);
        if slug.is_empty() {
            tracing::debug!(rows = rows.len(), campaign = %name, "discarding scenario group with empty slug");
            return;
        }

        if groups.insert(slug.clone(), rows).is_some() {
            tracing::warn!(%slug, campaign = %name, "duplicate scenario group replaces earlier group");
        }
    }
}

/// Single-pass parser for the scenario block of one sheet.
#[derive(Debug, Clone, Default)]
pub struct ScenarioBlockParser {
    layout: ColumnLayout,
}

impl ScenarioBlockParser {
    /// Create parser for a column layout
    #[inline]
    #[must_use]
    pub fn new(layout: ColumnLayout) -> Self {
        Self { layout }
    }

    /// Layout in use
    #[inline]
    #[must_use]
    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    /// Row index of the marker, if present
    #[must_use]
    pub fn find_marker(&self, grid: &SheetGrid) -> Option<usize> {
        grid.rows().iter().position(|row| {
            cell_at(row, self.layout.label_col)
                .to_string()
                .contains(SCENARIO_MARKER)
        })
    }

    /// Parse the scenario block into campaign groups.
    ///
    /// Returns an empty map when the sheet has no marker.
    #[must_use]
    pub fn parse(&self, grid: &SheetGrid) -> ScenarioGroups {
        let mut groups = ScenarioGroups::new();

        let Some(marker) = self.find_marker(grid) else {
            tracing::debug!("no scenario block in sheet");
            return groups;
        };

        let mut open = OpenGroup::default();

        for (offset, row) in grid.rows()[marker + 1..].iter().enumerate() {
            match self.classify(row) {
                RowKind::Blank => {
                    open.commit(&mut groups);
                }
                RowKind::Header(name) => {
                    open.commit(&mut groups);
                    open.name = Some(name);
                    open.rows.clear();
                }
                RowKind::Data(cells) => {
                    if open.name.is_some() {
                        open.rows.push(self.capture(cells));
                    } else {
                        tracing::debug!(row = marker + 1 + offset, "data row outside any campaign group");
                    }
                }
                RowKind::Other => {}
            }
        }

        open.commit(&mut groups);

        tracing::debug!(groups = groups.len(), "parsed scenario block");
        groups
    }

    fn classify<'a>(&self, row: &'a [CellValue]) -> RowKind<'a> {
        let label = cell_at(row, self.layout.label_col).label_text();
        if label.is_empty() {
            return RowKind::Blank;
        }

        let base_empty = cell_at(row, self.layout.base_col).is_blank();
        if base_empty {
            return match header_name(&label) {
                Some(name) => RowKind::Header(name),
                None => RowKind::Other,
            };
        }

        RowKind::Data(row)
    }

    fn capture(&self, row: &[CellValue]) -> AssumptionRow {
        AssumptionRow {
            label: cell_at(row, self.layout.label_col).label_text(),
            base: format_assumption(cell_at(row, self.layout.base_col)),
            upside: format_assumption(cell_at(row, self.layout.upside_col)),
            downside: format_assumption(cell_at(row, self.layout.downside_col)),
        }
    }
}

/// Campaign name of a `Campaign N: name` label (text after the first colon, trimmed).
#[must_use]
pub fn header_name(label: &str) -> Option<String> {
    if !CAMPAIGN_HEADER.is_match(label) {
        return None;
    }
    label
        .split_once(':')
        .map(|(_, rest)| rest.trim().to_string())
}

/// Parse `grid` with the default B/C/D/E layout.
#[must_use]
pub fn parse(grid: &SheetGrid) -> ScenarioGroups {
    ScenarioBlockParser::default().parse(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(label: impl Into<CellValue>, base: impl Into<CellValue>) -> Vec<CellValue> {
        vec![CellValue::Empty, label.into(), base.into()]
    }

    #[test]
    fn header_name_extraction() {
        assert_eq!(header_name("Campaign 1: Loyalty Rewards").as_deref(), Some("Loyalty Rewards"));
        assert_eq!(header_name("Campaign 12:Shift: Nights ").as_deref(), Some("Shift: Nights"));
        assert_eq!(header_name("Campaign 1:").as_deref(), Some(""));
        assert_eq!(header_name("Campaign one: Loyalty"), None);
        assert_eq!(header_name("campaign 1: Loyalty"), None);
        assert_eq!(header_name("Old Campaign 1: Loyalty"), None);
    }

    #[test]
    fn classify_rows() {
        let parser = ScenarioBlockParser::default();
        assert_eq!(parser.classify(&[]), RowKind::Blank);
        assert_eq!(parser.classify(&[CellValue::from("x")]), RowKind::Blank);
        assert_eq!(parser.classify(&[CellValue::Empty]), RowKind::Blank);
        assert_eq!(parser.classify(&row("  ", 1.0)), RowKind::Blank);
        assert_eq!(
            parser.classify(&row("Campaign 2: Shift Coverage", CellValue::Empty)),
            RowKind::Header("Shift Coverage".into())
        );
        assert_eq!(parser.classify(&row("Notes", CellValue::Empty)), RowKind::Other);

        let data = row("Campaign 2: Shift Coverage", 5.0);
        assert_eq!(parser.classify(&data), RowKind::Data(&data));
    }

    #[test]
    fn missing_marker_yields_empty_map() {
        let grid = SheetGrid::new(vec![row("Campaign 1: Loyalty", CellValue::Empty), row("Uplift", 0.05)]);
        assert!(parse(&grid).is_empty());
    }

    #[test]
    fn marker_may_be_embedded_in_label() {
        let grid = SheetGrid::new(vec![
            row("== SCENARIO ASSUMPTIONS ==", CellValue::Empty),
            row("Campaign 1: Loyalty Rewards", CellValue::Empty),
            row("Uplift", 0.05),
        ]);
        let groups = parse(&grid);
        assert_eq!(groups["loyalty_rewards"], vec![AssumptionRow::new("Uplift", "5%", "", "")]);
    }

    #[test]
    fn header_without_rows_keeps_name_across_blank() {
        let grid = SheetGrid::new(vec![
            row(SCENARIO_MARKER, CellValue::Empty),
            row("Campaign 1: Loyalty Rewards", CellValue::Empty),
            vec![],
            row("Uplift", 0.05),
        ]);
        let groups = parse(&grid);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups["loyalty_rewards"].len(), 1);
    }

    #[test]
    fn empty_campaign_name_is_never_committed() {
        let grid = SheetGrid::new(vec![
            row(SCENARIO_MARKER, CellValue::Empty),
            row("Campaign 1:   ", CellValue::Empty),
            row("Uplift", 0.05),
        ]);
        assert!(parse(&grid).is_empty());
    }
}

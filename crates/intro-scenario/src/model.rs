//! Model workbook reader
//!
//! Collects everything the downstream documents need from a populated intro
//! model: plain `Inputs` values, the campaign slot names, the scenario groups,
//! and the per-campaign ROPS / EBITDA uplift figures from the `Campaigns`
//! sheet. Missing sheets give empty sections.

use crate::cell::{cell_at, CellValue, SheetGrid, Workbook};
use crate::layout::ColumnLayout;
use crate::parser::{ScenarioBlockParser, ScenarioGroups};
use indexmap::IndexMap;
use intro_resolve::slugify;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Sheet holding inputs, campaign slots and the scenario block
pub const INPUTS_SHEET: &str = "Inputs";
/// Sheet holding computed per-campaign results
pub const CAMPAIGNS_SHEET: &str = "Campaigns";
/// Label fragment of per-campaign ROPS rows
pub const ROPS_LABEL: &str = "Return on Points Spend";
/// Label fragment of per-campaign EBITDA uplift rows
pub const EBITDA_LABEL: &str = "EBITDA Uplift";

static SLOT_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Campaign (\d+)([A-Za-z])?").expect("campaign slot pattern is valid"));

/// A named campaign slot from the `Inputs` sheet (`Campaign 2` → `Shift Coverage`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignSlot {
    /// Slot label as written, e.g. `Campaign 2`
    pub label: String,
    /// Slot number
    pub number: u32,
    /// Campaign name assigned to the slot
    pub name: String,
}

impl CampaignSlot {
    /// Slug of the assigned campaign name
    #[inline]
    #[must_use]
    pub fn slug(&self) -> String {
        slugify(&self.name)
    }
}

/// Values extracted from one model workbook
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelValues {
    /// `Inputs` label → value
    pub inputs: IndexMap<String, CellValue>,
    /// Campaign slots ordered by slot number
    pub campaign_slots: Vec<CampaignSlot>,
    /// Scenario groups keyed by campaign slug
    pub assumptions: ScenarioGroups,
    /// Campaign slug → ROPS
    pub rops: IndexMap<String, CellValue>,
    /// Campaign slug → EBITDA uplift
    pub ebitda: IndexMap<String, CellValue>,
}

impl ModelValues {
    /// Slugs that carry a ROPS or EBITDA figure, ROPS first
    #[must_use]
    pub fn model_slugs(&self) -> Vec<&str> {
        let mut slugs: Vec<&str> = self.rops.keys().map(String::as_str).collect();
        for slug in self.ebitda.keys() {
            if !slugs.contains(&slug.as_str()) {
                slugs.push(slug);
            }
        }
        slugs
    }

    /// Slugs of parsed scenario groups
    #[must_use]
    pub fn assumption_slugs(&self) -> Vec<&str> {
        self.assumptions.keys().map(String::as_str).collect()
    }

    /// Input value by exact label
    #[inline]
    #[must_use]
    pub fn input(&self, label: &str) -> Option<&CellValue> {
        self.inputs.get(label)
    }
}

/// Reads [`ModelValues`] from a workbook.
#[derive(Debug, Clone, Default)]
pub struct ModelReader {
    layout: ColumnLayout,
    parser: ScenarioBlockParser,
}

impl ModelReader {
    /// Create reader for a column layout
    #[must_use]
    pub fn new(layout: ColumnLayout) -> Self {
        Self {
            layout,
            parser: ScenarioBlockParser::new(layout),
        }
    }

    /// Read all sections from `workbook`.
    #[must_use]
    pub fn read(&self, workbook: &Workbook) -> ModelValues {
        let mut values = ModelValues::default();

        if let Some(inputs) = workbook.sheet(INPUTS_SHEET) {
            values.inputs = self.read_inputs(inputs);
            values.campaign_slots = self.read_slots(inputs);
            values.assumptions = self.parser.parse(inputs);
        } else {
            tracing::debug!(sheet = INPUTS_SHEET, "sheet missing from workbook");
        }

        if let Some(campaigns) = workbook.sheet(CAMPAIGNS_SHEET) {
            let (rops, ebitda) = self.read_campaign_results(campaigns);
            for (i, slot) in values.campaign_slots.iter().enumerate() {
                let slug = slot.slug();
                if let Some(v) = rops.get(i) {
                    values.rops.insert(slug.clone(), v.clone());
                }
                if let Some(v) = ebitda.get(i) {
                    values.ebitda.insert(slug, v.clone());
                }
            }
        }

        tracing::debug!(
            inputs = values.inputs.len(),
            slots = values.campaign_slots.len(),
            groups = values.assumptions.len(),
            "read model workbook"
        );
        values
    }

    fn read_inputs(&self, grid: &SheetGrid) -> IndexMap<String, CellValue> {
        let mut inputs = IndexMap::new();
        for row in grid.rows() {
            let label = cell_at(row, self.layout.label_col).label_text();
            let value = cell_at(row, self.layout.input_value_col);
            if !label.is_empty() && *value != CellValue::Empty {
                inputs.insert(label, value.clone());
            }
        }
        inputs
    }

    fn read_slots(&self, grid: &SheetGrid) -> Vec<CampaignSlot> {
        let mut slots: IndexMap<String, CampaignSlot> = IndexMap::new();

        for row in grid.rows() {
            let label = cell_at(row, self.layout.label_col).label_text();
            let name = cell_at(row, self.layout.base_col);
            if name.is_blank() {
                continue;
            }

            let Some(caps) = SLOT_LABEL.captures(&label) else {
                continue;
            };
            // lettered sub-slots ("Campaign 3a") belong to their parent slot
            if caps.get(2).is_some() {
                continue;
            }
            let Some(number) = caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok()) else {
                continue;
            };

            slots.insert(
                label.clone(),
                CampaignSlot {
                    label,
                    number,
                    name: name.label_text(),
                },
            );
        }

        let mut slots: Vec<CampaignSlot> = slots.into_values().collect();
        slots.sort_by(|a, b| a.number.cmp(&b.number).then_with(|| a.label.cmp(&b.label)));
        slots
    }

    fn read_campaign_results(&self, grid: &SheetGrid) -> (Vec<CellValue>, Vec<CellValue>) {
        let mut rops = Vec::new();
        let mut ebitda = Vec::new();

        for row in grid.rows() {
            let label = cell_at(row, self.layout.label_col).label_text();
            if label.is_empty() {
                continue;
            }
            let base = cell_at(row, self.layout.base_col);
            if *base == CellValue::Empty {
                continue;
            }
            if label.contains(ROPS_LABEL) {
                rops.push(base.clone());
            }
            if label.contains(EBITDA_LABEL) {
                ebitda.push(base.clone());
            }
        }

        (rops, ebitda)
    }
}

//! Testing utilities for the Intro Model workspace
//!
//! Sheet builders and a consistent workbook/research fixture pair.

#![allow(missing_docs)]

use intro_research::ResearchDocument;
use intro_scenario::{CellValue, SheetGrid, Workbook, CAMPAIGNS_SHEET, INPUTS_SHEET, SCENARIO_MARKER};
use std::path::{Path, PathBuf};

/// Builds sheets in the default B/C/D/E layout, column A left empty.
#[derive(Debug, Clone, Default)]
pub struct GridBuilder {
    rows: Vec<Vec<CellValue>>,
}

impl GridBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Row with label in B, base in C and the `Inputs` value in E
    pub fn input(self, label: &str, value: impl Into<CellValue>) -> Self {
        self.row(vec![CellValue::Empty, label.into(), CellValue::Empty, CellValue::Empty, value.into()])
    }

    /// `Campaign N` slot row naming a campaign
    pub fn slot(self, number: u32, name: &str) -> Self {
        let label = format!("Campaign {number}");
        self.labelled(&label, name)
    }

    /// Row with label in B and base in C
    pub fn labelled(self, label: &str, base: impl Into<CellValue>) -> Self {
        self.row(vec![CellValue::Empty, label.into(), base.into(), CellValue::Empty, CellValue::Empty])
    }

    pub fn marker(self) -> Self {
        self.labelled(SCENARIO_MARKER, CellValue::Empty)
    }

    pub fn header(self, number: u32, name: &str) -> Self {
        let label = format!("Campaign {number}: {name}");
        self.labelled(&label, CellValue::Empty)
    }

    /// Scenario data row with base, upside and downside values
    pub fn scenario(
        self,
        label: &str,
        base: impl Into<CellValue>,
        upside: impl Into<CellValue>,
        downside: impl Into<CellValue>,
    ) -> Self {
        self.row(vec![CellValue::Empty, label.into(), base.into(), upside.into(), downside.into()])
    }

    pub fn blank(self) -> Self {
        self.row(Vec::new())
    }

    pub fn row(mut self, row: Vec<CellValue>) -> Self {
        self.rows.push(row);
        self
    }

    pub fn build(self) -> SheetGrid {
        SheetGrid::new(self.rows)
    }
}

/// Inputs sheet with three campaign slots and their scenario groups
pub fn sample_inputs() -> SheetGrid {
    GridBuilder::new()
        .input("Company EBITDA", 10_000_000.0)
        .input("Locations", 240.0)
        .slot(1, "Loyalty Rewards")
        .slot(2, "Shift Coverage")
        .slot(3, "Safety Streaks")
        .blank()
        .marker()
        .header(1, "Loyalty Rewards")
        .scenario("Visit frequency uplift", 0.05, 0.08, 0.03)
        .scenario("Incentive per visit", 0.25, CellValue::Empty, CellValue::Empty)
        .blank()
        .header(2, "Shift Coverage")
        .scenario("Overtime hours saved", 1200.0, 1500.0, 900.0)
        .blank()
        .header(3, "Safety Streaks")
        .scenario("Incident reduction", 0.12, 0.15, 0.08)
        .build()
}

/// Campaigns sheet with ROPS and EBITDA uplift per slot
pub fn sample_campaigns() -> SheetGrid {
    GridBuilder::new()
        .labelled("Loyalty Rewards", CellValue::Empty)
        .labelled("Return on Points Spend (ROPS)", 18.5)
        .labelled("EBITDA Uplift", 420_000.0)
        .labelled("Shift Coverage", CellValue::Empty)
        .labelled("Return on Points Spend (ROPS)", 12.0)
        .labelled("EBITDA Uplift", 180_000.0)
        .labelled("Safety Streaks", CellValue::Empty)
        .labelled("Return on Points Spend (ROPS)", 22.0)
        .labelled("EBITDA Uplift", 150_000.0)
        .build()
}

pub fn sample_workbook() -> Workbook {
    Workbook::new()
        .with_sheet(INPUTS_SHEET, sample_inputs())
        .with_sheet(CAMPAIGNS_SHEET, sample_campaigns())
}

/// Research matching [`sample_workbook`], spelled the way research spells it
pub const SAMPLE_RESEARCH_JSON: &str = r#"{
    "company": "Acme Foods",
    "industry": "qsr",
    "last_annual_ebitda": "$10,000,000",
    "campaigns_selected": [
        "Loyalty Program",
        {"campaign_type": "Shift Coverage", "priority": "high", "include_summary_slide": true, "interest": "Explicit"},
        "Safety Streaks"
    ],
    "campaign_inputs": {
        "loyalty_program": {"priority": "high", "rationale": "Gong: GM asked for repeat visits"},
        "safety_streaks": {"evidence": "OSHA log review", "client_interest": "Implied", "savings": 90000}
    },
    "campaign_assumptions": {
        "Loyalty Program": {
            "Avg Ticket Lift": {"value": 4.5, "source": "WEB", "incentive_cost": 0.25},
            "Visit Uplift": {"value": 12000, "source": "GONG", "incentive_cost": 0.5}
        },
        "Shift Coverage": {
            "Overtime Savings": {"value": 2.0, "source": "manual", "incentive_cost": 0.5}
        }
    }
}"#;

pub fn sample_research() -> ResearchDocument {
    ResearchDocument::from_json_str(SAMPLE_RESEARCH_JSON).expect("sample research parses")
}

/// Write research JSON for `company` under `<root>/Clients/<company>/`.
pub fn write_research(root: &Path, company: &str, file_name: &str, json: &str) -> PathBuf {
    let dir = root.join("Clients").join(company);
    std::fs::create_dir_all(&dir).expect("create client dir");
    let path = dir.join(file_name);
    std::fs::write(&path, json).expect("write research");
    path
}

/// Research document JSON with one GONG-only campaign
pub fn gong_only_research(ebitda: f64) -> String {
    serde_json::json!({
        "company": "Gong Co",
        "last_annual_ebitda": ebitda,
        "campaigns_selected": ["Loyalty Rewards"],
        "campaign_assumptions": {
            "Loyalty Rewards": {
                "Visit Uplift": {"value": 12000, "source": "GONG", "incentive_cost": 0.5}
            }
        }
    })
    .to_string()
}

//! Campaign normalization and join
//!
//! A selected campaign reaches the pipeline as a bare name or a record, with
//! optional extra inputs keyed by slug. Normalization folds those into one
//! [`CampaignEntry`]. ROPS and savings prefer model values, found through the
//! resolver because research and spreadsheet rarely spell a campaign alike.

use intro_research::{CampaignSelection, Metric, ResearchDocument};
use intro_resolve::{slugify, CampaignNameResolver};
use intro_scenario::{CellValue, ModelValues};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Priority assigned when research gives none
pub const DEFAULT_PRIORITY: &str = "standard";

/// One selected campaign, with research and model values merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignEntry {
    /// Campaign name as selected
    pub name: String,
    /// `high`, `standard`, ...
    pub priority: String,
    /// Supporting evidence
    pub evidence: Option<String>,
    /// Client interest level
    pub client_interest: Option<String>,
    /// Model ROPS, else researched ROPS
    pub rops: Option<Metric>,
    /// Model EBITDA uplift, else researched savings
    pub savings: Option<Metric>,
    /// Whether the campaign belongs on the summary slide
    pub include_summary: bool,
}

impl CampaignEntry {
    /// Whether the priority reads `high` in any case
    #[must_use]
    pub fn is_high_priority(&self) -> bool {
        self.priority.eq_ignore_ascii_case("high")
    }
}

/// Model-side lookups by loosely spelled campaign name.
#[derive(Debug, Clone)]
pub struct ModelLookup<'m> {
    model: &'m ModelValues,
    resolver: CampaignNameResolver,
    model_slugs: Vec<&'m str>,
    assumption_slugs: Vec<&'m str>,
}

impl<'m> ModelLookup<'m> {
    /// Create lookup over model values
    #[must_use]
    pub fn new(model: &'m ModelValues, resolver: CampaignNameResolver) -> Self {
        // sorted so fuzzy ties do not depend on sheet order
        let model_slugs: BTreeSet<&str> = model.model_slugs().into_iter().collect();
        Self {
            model,
            resolver,
            model_slugs: model_slugs.into_iter().collect(),
            assumption_slugs: model.assumption_slugs(),
        }
    }

    /// Model slug a campaign name resolves to
    #[must_use]
    pub fn model_slug(&self, name: &str) -> Option<&'m str> {
        self.resolver.resolve(name, self.model_slugs.iter().copied())
    }

    /// Model ROPS for a campaign name
    #[must_use]
    pub fn rops(&self, name: &str) -> Option<Metric> {
        self.metric(name, |m| &m.rops)
    }

    /// Model EBITDA uplift for a campaign name
    #[must_use]
    pub fn ebitda(&self, name: &str) -> Option<Metric> {
        self.metric(name, |m| &m.ebitda)
    }

    fn metric<F>(&self, name: &str, section: F) -> Option<Metric>
    where
        F: Fn(&'m ModelValues) -> &'m indexmap::IndexMap<String, CellValue>,
    {
        let values = section(self.model);
        values
            .get(&slugify(name))
            .or_else(|| self.model_slug(name).and_then(|slug| values.get(slug)))
            .and_then(cell_metric)
    }

    /// Scenario group slug for a campaign name: exact slug, else fuzzy
    #[must_use]
    pub fn assumption_slug(&self, name: &str) -> Option<&'m str> {
        self.resolver.resolve(name, self.assumption_slugs.iter().copied())
    }
}

fn cell_metric(cell: &CellValue) -> Option<Metric> {
    let metric = match cell {
        CellValue::Empty => return None,
        CellValue::Number(n) => Metric::Number(*n),
        CellValue::Text(s) => Metric::Text(s.clone()),
    };
    metric.is_present().then_some(metric)
}

fn owned(text: Option<&str>) -> Option<String> {
    text.map(str::to_string)
}

/// Normalize one selection. `None` for a record without any name.
#[must_use]
pub fn normalize_campaign(
    selection: &CampaignSelection,
    research: &ResearchDocument,
    lookup: &ModelLookup<'_>,
) -> Option<CampaignEntry> {
    let name = selection.name();
    if name.trim().is_empty() {
        tracing::debug!("skipping selected campaign without a name");
        return None;
    }

    let input = research.input(&slugify(name)).cloned().unwrap_or_default();

    let entry = match selection {
        CampaignSelection::Name(name) => CampaignEntry {
            name: name.clone(),
            priority: input.priority().unwrap_or(DEFAULT_PRIORITY).to_string(),
            evidence: owned(input.evidence()),
            client_interest: owned(input.client_interest()),
            rops: lookup.rops(name).or_else(|| input.rops().cloned()),
            savings: lookup.ebitda(name).or_else(|| input.savings().cloned()),
            include_summary: input.summary.any() || input.is_high_priority(),
        },
        CampaignSelection::Record(record) => CampaignEntry {
            name: name.to_string(),
            priority: record.priority().unwrap_or(DEFAULT_PRIORITY).to_string(),
            evidence: owned(record.evidence().or_else(|| input.evidence_or_rationale())),
            client_interest: owned(record.client_interest().or_else(|| input.client_interest())),
            rops: lookup.rops(name).or_else(|| record.rops().cloned()),
            savings: lookup.ebitda(name).or_else(|| record.savings().cloned()),
            include_summary: record.summary.any(),
        },
    };
    Some(entry)
}

/// Normalize every selected campaign, in selection order.
#[must_use]
pub fn normalize_campaigns(research: &ResearchDocument, lookup: &ModelLookup<'_>) -> Vec<CampaignEntry> {
    research
        .campaigns_selected
        .iter()
        .filter_map(|selection| normalize_campaign(selection, research, lookup))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use intro_research::CampaignRecord;
    use pretty_assertions::assert_eq;

    fn model() -> ModelValues {
        let mut model = ModelValues::default();
        model.rops.insert("loyalty_rewards".into(), CellValue::from(18.5));
        model.ebitda.insert("loyalty_rewards".into(), CellValue::from(420_000.0));
        model.rops.insert("shift_coverage".into(), CellValue::from(0.0));
        model
    }

    fn research(json: &str) -> ResearchDocument {
        ResearchDocument::from_json_str(json).unwrap()
    }

    #[test]
    fn bare_name_prefers_fuzzy_model_values() {
        let model = model();
        let lookup = ModelLookup::new(&model, CampaignNameResolver::campaign_to_model());
        let doc = research(
            r#"{"campaigns_selected": ["Loyalty Program"],
                "campaign_inputs": {"loyalty_program": {"rops": 99, "rationale": "Gong: wants points", "priority": "HIGH"}}}"#,
        );

        let entries = normalize_campaigns(&doc, &lookup);
        assert_eq!(
            entries,
            vec![CampaignEntry {
                name: "Loyalty Program".into(),
                priority: "HIGH".into(),
                evidence: Some("Gong: wants points".into()),
                client_interest: None,
                rops: Some(Metric::Number(18.5)),
                savings: Some(Metric::Number(420_000.0)),
                include_summary: true,
            }]
        );
    }

    #[test]
    fn zero_model_value_falls_back_to_research() {
        let model = model();
        let lookup = ModelLookup::new(&model, CampaignNameResolver::campaign_to_model());
        let doc = research(r#"{"campaigns_selected": [{"name": "Shift Coverage", "rops": "15x"}]}"#);

        let entry = &normalize_campaigns(&doc, &lookup)[0];
        assert_eq!(entry.rops, Some(Metric::from("15x")));
        assert_eq!(entry.priority, DEFAULT_PRIORITY);
        assert!(!entry.include_summary);
    }

    #[test]
    fn record_fields_win_over_inputs() {
        let model = ModelValues::default();
        let lookup = ModelLookup::new(&model, CampaignNameResolver::campaign_to_model());
        let record = CampaignRecord {
            campaign_type: Some("Fleet Telematics".into()),
            priority: Some("high".into()),
            interest: Some("Explicit".into()),
            ..CampaignRecord::default()
        };
        let mut doc = research(
            r#"{"campaign_inputs": {"fleet_telematics": {"evidence": "Site visit", "client_interest": "Implied"}}}"#,
        );
        doc.campaigns_selected.push(record.into());

        let entry = &normalize_campaigns(&doc, &lookup)[0];
        assert_eq!(entry.evidence.as_deref(), Some("Site visit"));
        assert_eq!(entry.client_interest.as_deref(), Some("Explicit"));
        assert!(entry.is_high_priority());
        assert!(!entry.include_summary);
        assert_eq!(entry.rops, None);
    }

    #[test]
    fn nameless_record_is_skipped() {
        let model = ModelValues::default();
        let lookup = ModelLookup::new(&model, CampaignNameResolver::campaign_to_model());
        let doc = research(r#"{"campaigns_selected": [{"priority": "high"}, "Loyalty Rewards"]}"#);
        assert_eq!(normalize_campaigns(&doc, &lookup).len(), 1);
    }
}

//! Research document records
//!
//! Research output is loosely shaped JSON: keys are optional, a campaign may
//! be a bare name or a record, numbers sometimes arrive as strings. Every
//! entity here has explicit optional fields with defaults, and unknown keys
//! are ignored.

use indexmap::IndexMap;
use intro_guardrails::CampaignAssumptions;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A number or a preformatted display string (`18.5` or `"18x"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Metric {
    /// Numeric value
    Number(f64),
    /// Display text
    Text(String),
}

impl Metric {
    /// Numeric content
    #[inline]
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Metric::Number(n) => Some(*n),
            Metric::Text(_) => None,
        }
    }

    /// Zero and empty text count as absent when choosing between sources.
    #[must_use]
    pub fn is_present(&self) -> bool {
        match self {
            Metric::Number(n) => *n != 0.0 && !n.is_nan(),
            Metric::Text(s) => !s.trim().is_empty(),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Number(n) => write!(f, "{n}"),
            Metric::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Metric {
    fn from(value: f64) -> Self {
        Metric::Number(value)
    }
}

impl From<&str> for Metric {
    fn from(value: &str) -> Self {
        Metric::Text(value.to_string())
    }
}

/// Summary-slide flags written by research tooling under three spellings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryFlags {
    /// `include_summary_slide`
    #[serde(deserialize_with = "truthy")]
    pub include_summary_slide: bool,
    /// `include_in_summary_slide`
    #[serde(deserialize_with = "truthy")]
    pub include_in_summary_slide: bool,
    /// `summary_slide`
    #[serde(deserialize_with = "truthy")]
    pub summary_slide: bool,
}

impl SummaryFlags {
    /// Whether any spelling is set
    #[inline]
    #[must_use]
    pub fn any(&self) -> bool {
        self.include_summary_slide || self.include_in_summary_slide || self.summary_slide
    }
}

/// A selected campaign written out as a record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CampaignRecord {
    /// Preferred name field
    pub campaign_type: Option<String>,
    /// Fallback name field
    pub name: Option<String>,
    /// `high`, `standard`, ...
    pub priority: Option<String>,
    /// Supporting evidence
    pub evidence: Option<String>,
    /// Where the evidence came from
    pub evidence_source: Option<String>,
    /// Client interest level
    pub client_interest: Option<String>,
    /// Alternate spelling of `client_interest`
    pub interest: Option<String>,
    /// Researched ROPS
    pub rops: Option<Metric>,
    /// Researched savings
    pub savings: Option<Metric>,
    /// Alternate spelling of `savings`
    pub ebitda_impact: Option<Metric>,
    /// Summary-slide flags
    #[serde(flatten)]
    pub summary: SummaryFlags,
}

impl CampaignRecord {
    /// `campaign_type`, else `name`, else empty
    #[must_use]
    pub fn display_name(&self) -> &str {
        first_text([&self.campaign_type, &self.name]).unwrap_or_default()
    }

    /// Non-empty priority
    #[must_use]
    pub fn priority(&self) -> Option<&str> {
        first_text([&self.priority])
    }

    /// `evidence`, else `evidence_source`
    #[must_use]
    pub fn evidence(&self) -> Option<&str> {
        first_text([&self.evidence, &self.evidence_source])
    }

    /// `client_interest`, else `interest`
    #[must_use]
    pub fn client_interest(&self) -> Option<&str> {
        first_text([&self.client_interest, &self.interest])
    }

    /// `savings`, else `ebitda_impact`
    #[must_use]
    pub fn savings(&self) -> Option<&Metric> {
        first_metric([&self.savings, &self.ebitda_impact])
    }

    /// Present ROPS
    #[must_use]
    pub fn rops(&self) -> Option<&Metric> {
        first_metric([&self.rops])
    }
}

/// One entry of `campaigns_selected`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CampaignSelection {
    /// Bare campaign name
    Name(String),
    /// Campaign record
    Record(CampaignRecord),
}

impl CampaignSelection {
    /// Campaign name, empty for a record without one
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            CampaignSelection::Name(name) => name,
            CampaignSelection::Record(record) => record.display_name(),
        }
    }
}

impl From<&str> for CampaignSelection {
    fn from(value: &str) -> Self {
        CampaignSelection::Name(value.to_string())
    }
}

impl From<CampaignRecord> for CampaignSelection {
    fn from(value: CampaignRecord) -> Self {
        CampaignSelection::Record(value)
    }
}

/// Per-campaign research inputs, keyed by campaign slug in the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CampaignInput {
    /// `high`, `standard`, ...
    pub priority: Option<String>,
    /// Supporting evidence
    pub evidence: Option<String>,
    /// Where the evidence came from
    pub evidence_source: Option<String>,
    /// Why the campaign was selected
    pub rationale: Option<String>,
    /// Client interest level
    pub client_interest: Option<String>,
    /// Alternate spelling of `client_interest`
    pub interest: Option<String>,
    /// Researched ROPS
    pub rops: Option<Metric>,
    /// Researched savings
    pub savings: Option<Metric>,
    /// Alternate spelling of `savings`
    pub ebitda_impact: Option<Metric>,
    /// Summary-slide flags
    #[serde(flatten)]
    pub summary: SummaryFlags,
}

impl CampaignInput {
    /// Non-empty priority
    #[must_use]
    pub fn priority(&self) -> Option<&str> {
        first_text([&self.priority])
    }

    /// Whether the priority reads `HIGH` in any case
    #[must_use]
    pub fn is_high_priority(&self) -> bool {
        self.priority().is_some_and(|p| p.eq_ignore_ascii_case("high"))
    }

    /// `evidence`, else `evidence_source`, else `rationale`
    #[must_use]
    pub fn evidence(&self) -> Option<&str> {
        first_text([&self.evidence, &self.evidence_source, &self.rationale])
    }

    /// `evidence`, else `rationale`
    #[must_use]
    pub fn evidence_or_rationale(&self) -> Option<&str> {
        first_text([&self.evidence, &self.rationale])
    }

    /// `client_interest`, else `interest`
    #[must_use]
    pub fn client_interest(&self) -> Option<&str> {
        first_text([&self.client_interest, &self.interest])
    }

    /// `savings`, else `ebitda_impact`
    #[must_use]
    pub fn savings(&self) -> Option<&Metric> {
        first_metric([&self.savings, &self.ebitda_impact])
    }

    /// Present ROPS
    #[must_use]
    pub fn rops(&self) -> Option<&Metric> {
        first_metric([&self.rops])
    }
}

/// A research output document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResearchDocument {
    /// Company name
    pub company: Option<String>,
    /// Free-form industry description
    pub industry: Option<String>,
    /// Last annual EBITDA, dollars
    #[serde(deserialize_with = "lenient_number")]
    pub last_annual_ebitda: Option<f64>,
    /// Campaigns chosen for the deliverable, in order
    #[serde(deserialize_with = "selections")]
    pub campaigns_selected: Vec<CampaignSelection>,
    /// Campaign slug → inputs
    #[serde(deserialize_with = "null_as_default")]
    pub campaign_inputs: IndexMap<String, CampaignInput>,
    /// Campaign name → field → provenance
    #[serde(deserialize_with = "null_as_default")]
    pub campaign_assumptions: IndexMap<String, CampaignAssumptions>,
}

impl ResearchDocument {
    /// Parse a document from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Inputs for a campaign slug
    #[inline]
    #[must_use]
    pub fn input(&self, slug: &str) -> Option<&CampaignInput> {
        self.campaign_inputs.get(slug)
    }

    /// Field provenance for a campaign, by exact name, then by slug of the name
    #[must_use]
    pub fn assumptions_for(&self, campaign: &str) -> Option<&CampaignAssumptions> {
        self.campaign_assumptions.get(campaign).or_else(|| {
            let slug = intro_resolve::slugify(campaign);
            self.campaign_assumptions
                .iter()
                .find(|(name, _)| intro_resolve::slugify(name) == slug)
                .map(|(_, a)| a)
        })
    }
}

fn first_text<'a, const N: usize>(fields: [&'a Option<String>; N]) -> Option<&'a str> {
    fields
        .into_iter()
        .filter_map(Option::as_deref)
        .find(|s| !s.trim().is_empty())
}

fn first_metric<'a, const N: usize>(fields: [&'a Option<Metric>; N]) -> Option<&'a Metric> {
    fields.into_iter().filter_map(Option::as_ref).find(|m| m.is_present())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Skip `campaigns_selected` entries that are neither a name nor a record.
fn selections<'de, D>(deserializer: D) -> Result<Vec<CampaignSelection>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Entry {
        Known(CampaignSelection),
        Other(IgnoredAny),
    }

    let entries: Option<Vec<Entry>> = Option::deserialize(deserializer)?;
    Ok(entries
        .unwrap_or_default()
        .into_iter()
        .filter_map(|e| match e {
            Entry::Known(selection) => Some(selection),
            Entry::Other(_) => None,
        })
        .collect())
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Some(n),
        Raw::Text(s) => s.trim().replace([',', '$'], "").parse().ok(),
        Raw::Other(_) => None,
    })
}

fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Number(f64),
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Bool(b) => b,
        Raw::Number(n) => n != 0.0,
        Raw::Text(s) => !s.is_empty(),
        Raw::Other(_) => false,
    })
}

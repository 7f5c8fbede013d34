//! Per-campaign batch validation
//!
//! Research output attaches `{value, source, incentive_cost}` metadata to
//! each assumption field of a campaign. [`AssumptionValidator`] runs every
//! field through the guardrails and keeps each field's declared source so the
//! caller can run the aggregate check over all campaigns afterwards.

use crate::config::IndustryProfile;
use crate::error::GuardrailError;
use crate::guardrails::AssumptionGuardrails;
use crate::result::ValidationResult;
use crate::source::AssumptionSource;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Provenance record for one assumption field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceMetadata {
    /// Assumption value; non-numeric input reads as `None`
    #[serde(deserialize_with = "lenient_number")]
    pub value: Option<f64>,
    /// Declared source, `manual` when omitted
    pub source: AssumptionSource,
    /// Per-unit incentive cost
    #[serde(deserialize_with = "lenient_number")]
    pub incentive_cost: Option<f64>,
}

impl SourceMetadata {
    /// Create metadata
    #[must_use]
    pub fn new(value: f64, source: AssumptionSource) -> Self {
        Self {
            value: Some(value),
            source,
            incentive_cost: None,
        }
    }

    /// With incentive cost
    #[must_use]
    pub fn with_incentive_cost(mut self, cost: f64) -> Self {
        self.incentive_cost = Some(cost);
        self
    }
}

/// Accept a number, a numeric string, or anything else as `None`.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Some(n),
        Raw::Text(s) => s.trim().parse().ok(),
        Raw::Other(_) => None,
    })
}

/// Field name → metadata, in document order
pub type CampaignAssumptions = IndexMap<String, SourceMetadata>;

/// Results for one campaign
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignValidation {
    /// Campaign name
    pub campaign: String,
    /// AND of every field result (true for a campaign with no fields)
    pub valid: bool,
    /// One result per field, in input order
    pub results: Vec<ValidationResult>,
    /// Declared source per field
    pub sources: IndexMap<String, AssumptionSource>,
}

impl CampaignValidation {
    /// Flagged results only
    pub fn flagged(&self) -> impl Iterator<Item = &ValidationResult> {
        self.results.iter().filter(|r| r.is_flagged())
    }

    /// Declared sources in field order
    #[must_use]
    pub fn source_list(&self) -> Vec<AssumptionSource> {
        self.sources.values().copied().collect()
    }
}

/// Batch validator over the guardrails of one industry profile.
#[derive(Debug, Clone, Default)]
pub struct AssumptionValidator {
    guardrails: AssumptionGuardrails,
}

impl AssumptionValidator {
    /// Validator with default constants
    #[must_use]
    pub fn new(industry: IndustryProfile) -> Self {
        Self::from_guardrails(AssumptionGuardrails::new(industry))
    }

    /// Validator from an industry selector
    pub fn for_industry(industry: &str) -> Result<Self, GuardrailError> {
        Ok(Self::from_guardrails(AssumptionGuardrails::for_industry(industry)?))
    }

    /// Validator over prepared guardrails
    #[inline]
    #[must_use]
    pub fn from_guardrails(guardrails: AssumptionGuardrails) -> Self {
        Self { guardrails }
    }

    /// Guardrails in use
    #[inline]
    #[must_use]
    pub fn guardrails(&self) -> &AssumptionGuardrails {
        &self.guardrails
    }

    /// Validate every field of one campaign.
    ///
    /// Each field's value doubles as its cost assumption for the ROPS check.
    /// A field without a numeric value is validated as `0.0` with no ROPS.
    #[must_use]
    pub fn validate_campaign(&self, campaign: &str, assumptions: &CampaignAssumptions) -> CampaignValidation {
        let mut results = Vec::with_capacity(assumptions.len());
        let mut sources = IndexMap::with_capacity(assumptions.len());

        for (field, meta) in assumptions {
            let result = self.guardrails.validate(
                &format!("{campaign}: {field}"),
                meta.value.unwrap_or_default(),
                meta.source,
                meta.value,
                meta.incentive_cost,
            );
            results.push(result);
            sources.insert(field.clone(), meta.source);
        }

        let valid = results.iter().all(|r| r.valid);
        tracing::debug!(campaign, fields = results.len(), valid, "validated campaign assumptions");

        CampaignValidation {
            campaign: campaign.to_string(),
            valid,
            results,
            sources,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_defaults_to_manual() {
        let meta: SourceMetadata = serde_json::from_str(r#"{"value": 5}"#).unwrap();
        assert_eq!(meta.source, AssumptionSource::Manual);
        assert_eq!(meta.value, Some(5.0));
        assert_eq!(meta.incentive_cost, None);
    }

    #[test]
    fn metadata_reads_numeric_strings() {
        let meta: SourceMetadata =
            serde_json::from_str(r#"{"value": " 12.5 ", "source": "WEB", "incentive_cost": "n/a"}"#).unwrap();
        assert_eq!(meta.value, Some(12.5));
        assert_eq!(meta.source, AssumptionSource::Web);
        assert_eq!(meta.incentive_cost, None);
    }

    #[test]
    fn campaign_valid_is_and_of_fields() {
        let mut assumptions = CampaignAssumptions::new();
        assumptions.insert(
            "uplift_pct".into(),
            SourceMetadata::new(5.0, AssumptionSource::Web).with_incentive_cost(0.25),
        );
        assumptions.insert(
            "retention".into(),
            SourceMetadata::new(2.0, AssumptionSource::Gong).with_incentive_cost(50.0),
        );

        let out = AssumptionValidator::default().validate_campaign("Loyalty Rewards", &assumptions);
        assert!(out.valid);
        assert_eq!(out.results[0].field_name, "Loyalty Rewards: uplift_pct");
        assert_eq!(out.results[0].rops, Some(20.0));
        assert_eq!(out.source_list(), vec![AssumptionSource::Web, AssumptionSource::Gong]);

        assumptions.insert(
            "visits".into(),
            SourceMetadata::new(2.0, AssumptionSource::Web).with_incentive_cost(50.0),
        );
        let out = AssumptionValidator::default().validate_campaign("Loyalty Rewards", &assumptions);
        assert!(!out.valid);
        assert_eq!(out.flagged().count(), 1);
    }

    #[test]
    fn empty_campaign_is_valid() {
        let out = AssumptionValidator::default().validate_campaign("Empty", &CampaignAssumptions::new());
        assert!(out.valid);
        assert!(out.results.is_empty());
    }
}

//! Per-field and aggregate guardrails
//!
//! Rules for one field, first match wins:
//! 1. GONG-sourced values are accepted without any check
//! 2. with cost data, ROPS = cost assumption / incentive cost must lie within
//!    the configured bounds; misses are flagged, and the suggestion names an
//!    unreasonable incentive cost when that is the likely cause
//! 3. without cost data the value is accepted
//!
//! The aggregate check compares total accretion with a ceiling on last annual
//! EBITDA, skipped only when every contributing source is GONG.

use crate::config::{GuardrailConfig, IndustryProfile};
use crate::error::GuardrailError;
use crate::portfolio::{check_portfolio, AccretionSummary, CampaignEconomics};
use crate::result::ValidationResult;
use crate::source::{AssumptionSource, ResultSource};
use intro_scenario::format_currency;

/// Field name used for the aggregate accretion result
pub const TOTAL_ACCRETION_FIELD: &str = "Total EBITDA Accretion";

/// Validates assumptions against the guardrails of one industry profile.
#[derive(Debug, Clone, PartialEq)]
pub struct AssumptionGuardrails {
    industry: IndustryProfile,
    config: GuardrailConfig,
}

impl Default for AssumptionGuardrails {
    fn default() -> Self {
        Self::new(IndustryProfile::default())
    }
}

impl AssumptionGuardrails {
    /// Guardrails with default constants
    #[must_use]
    pub fn new(industry: IndustryProfile) -> Self {
        Self {
            industry,
            config: GuardrailConfig::default(),
        }
    }

    /// Guardrails from an industry selector such as `"qsr"`.
    ///
    /// Unknown selectors fail here, before any value is validated.
    pub fn for_industry(industry: &str) -> Result<Self, GuardrailError> {
        Ok(Self::new(industry.parse()?))
    }

    /// Guardrails with custom constants
    pub fn with_config(industry: IndustryProfile, config: GuardrailConfig) -> Result<Self, GuardrailError> {
        config.validate()?;
        Ok(Self { industry, config })
    }

    /// Industry profile in use
    #[inline]
    #[must_use]
    pub fn industry(&self) -> IndustryProfile {
        self.industry
    }

    /// Constants in use
    #[inline]
    #[must_use]
    pub fn config(&self) -> &GuardrailConfig {
        &self.config
    }

    /// Incentive cost cap for this profile
    #[inline]
    #[must_use]
    pub fn cost_max(&self) -> f64 {
        self.config.cost_max(self.industry)
    }

    /// ROPS for a cost pair, when both are present and the incentive is positive
    #[must_use]
    pub fn rops(cost_assumption: Option<f64>, incentive_cost: Option<f64>) -> Option<f64> {
        match (cost_assumption, incentive_cost) {
            (Some(cost), Some(incentive)) if incentive > 0.0 => Some(cost / incentive),
            _ => None,
        }
    }

    /// Whether an incentive cost lies outside `[cost_min, cost_max]`
    #[must_use]
    pub fn is_cost_unreasonable(&self, incentive_cost: f64) -> bool {
        incentive_cost < self.config.cost_min || incentive_cost > self.cost_max()
    }

    /// Validate one assumption value.
    #[must_use]
    pub fn validate(
        &self,
        field_name: &str,
        value: f64,
        source: AssumptionSource,
        cost_assumption: Option<f64>,
        incentive_cost: Option<f64>,
    ) -> ValidationResult {
        if source.is_trusted() {
            return ValidationResult::accept(
                ResultSource::Gong,
                field_name,
                value,
                "Gong-sourced assumption — accepted without validation",
            );
        }

        let (Some(rops), Some(incentive)) = (Self::rops(cost_assumption, incentive_cost), incentive_cost) else {
            return ValidationResult::accept(source.into(), field_name, value, "No ROPS data available, accepting");
        };

        let bounds = self.config.rops_bounds();
        let range = format!("{}-{}x", bounds.min, bounds.max);

        if bounds.contains(rops) {
            return ValidationResult::accept(
                source.into(),
                field_name,
                value,
                format!("ROPS {rops:.1}x within {range} range"),
            )
            .with_rops(Some(rops));
        }

        tracing::debug!(field = field_name, rops, incentive, "ROPS outside guardrail");

        if self.is_cost_unreasonable(incentive) {
            return ValidationResult::flag(
                source.into(),
                field_name,
                value,
                format!("ROPS {rops:.1}x outside {range} range"),
                self.cost_suggestion(incentive),
            )
            .with_rops(Some(rops));
        }

        ValidationResult::flag(
            source.into(),
            field_name,
            value,
            format!("ROPS {rops:.1}x outside {range} guardrail"),
            format!("Adjust value or cost assumption. Target ROPS: {range}"),
        )
        .with_rops(Some(rops))
    }

    fn cost_suggestion(&self, incentive: f64) -> String {
        if incentive < self.config.cost_min {
            format!(
                "Incentive cost ${incentive:.2} is below the ${:.2} minimum for {}. Review assumption.",
                self.config.cost_min, self.industry
            )
        } else {
            format!(
                "Incentive cost ${incentive:.2} exceeds the {} maximum for {}. Review assumption.",
                format_currency(self.cost_max()),
                self.industry
            )
        }
    }

    /// Validate total accretion across all campaigns.
    ///
    /// `sources` are the declared sources of every contributing assumption.
    /// The ceiling is skipped when every listed source is GONG, which holds
    /// for an empty list.
    #[must_use]
    pub fn validate_total(
        &self,
        total_accretion: f64,
        last_annual_ebitda: f64,
        sources: &[AssumptionSource],
    ) -> ValidationResult {
        let accretion_pct = (last_annual_ebitda > 0.0 && last_annual_ebitda.is_finite())
            .then(|| total_accretion / last_annual_ebitda * 100.0);

        if sources.iter().all(|s| s.is_trusted()) {
            return ValidationResult::accept(
                ResultSource::Gong,
                TOTAL_ACCRETION_FIELD,
                total_accretion,
                "All assumptions Gong-sourced — accretion check bypassed",
            )
            .with_accretion(accretion_pct);
        }

        let ceiling = self.config.accretion_ceiling_pct;

        let Some(pct) = accretion_pct else {
            tracing::warn!(last_annual_ebitda, "accretion cannot be computed without positive EBITDA");
            return ValidationResult::flag(
                ResultSource::Mixed,
                TOTAL_ACCRETION_FIELD,
                total_accretion,
                format!("Last annual EBITDA {last_annual_ebitda} is not positive; accretion cannot be checked"),
                "Provide the company's last annual EBITDA",
            );
        };

        if pct > ceiling {
            let max = format_currency(last_annual_ebitda * ceiling / 100.0);
            return ValidationResult::flag(
                ResultSource::Mixed,
                TOTAL_ACCRETION_FIELD,
                total_accretion,
                format!("Total accretion {pct:.1}% exceeds {ceiling}% ceiling"),
                format!("Reduce assumption values or campaign count. Max: {max}"),
            )
            .with_accretion(Some(pct));
        }

        ValidationResult::accept(
            ResultSource::Mixed,
            TOTAL_ACCRETION_FIELD,
            total_accretion,
            format!("Total accretion {pct:.1}% within {ceiling}% guardrail"),
        )
        .with_accretion(Some(pct))
    }

    /// Check campaign economics against the configured portfolio bounds
    #[must_use]
    pub fn check_portfolio(&self, campaigns: &[CampaignEconomics], company_ebitda: f64) -> AccretionSummary {
        check_portfolio(campaigns, company_ebitda, &self.config.portfolio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Action;

    fn qsr() -> AssumptionGuardrails {
        AssumptionGuardrails::new(IndustryProfile::Qsr)
    }

    #[test]
    fn gong_bypasses_everything() {
        let r = qsr().validate("Campaign 1: Uplift", -5.0, AssumptionSource::Gong, Some(1.0), Some(-3.0));
        assert!(r.valid);
        assert_eq!(r.action, Action::Accept);
        assert_eq!(r.rops, None);
        assert_eq!(r.source, ResultSource::Gong);
        assert_eq!(r.reason, "Gong-sourced assumption — accepted without validation");
    }

    #[test]
    fn rops_within_range_accepts() {
        let r = qsr().validate("Food Uplift", 12.0, AssumptionSource::Web, Some(5.0), Some(0.25));
        assert!(r.valid);
        assert_eq!(r.rops, Some(20.0));
        assert_eq!(r.reason, "ROPS 20.0x within 10-30x range");
    }

    #[test]
    fn bounds_are_inclusive() {
        let g = qsr();
        assert!(g.validate("f", 1.0, AssumptionSource::Web, Some(10.0), Some(1.0)).valid);
        assert!(g.validate("f", 1.0, AssumptionSource::Web, Some(30.0), Some(1.0)).valid);
    }

    #[test]
    fn rops_out_of_range_with_reasonable_cost() {
        let r = qsr().validate("Retention", 2.0, AssumptionSource::Web, Some(200.0), Some(50.0));
        assert!(!r.valid);
        assert_eq!(r.action, Action::Flag);
        assert_eq!(r.rops, Some(4.0));
        assert_eq!(r.reason, "ROPS 4.0x outside 10-30x guardrail");
        assert_eq!(r.suggestion.as_deref(), Some("Adjust value or cost assumption. Target ROPS: 10-30x"));
    }

    #[test]
    fn rops_out_of_range_with_unreasonable_cost_names_cap() {
        let r = qsr().validate("Hiring", 1.0, AssumptionSource::Manual, Some(6_000.0), Some(6_000.0));
        assert_eq!(r.reason, "ROPS 1.0x outside 10-30x range");
        let suggestion = r.suggestion.unwrap();
        assert!(suggestion.contains("$6000.00"));
        assert!(suggestion.contains("$5,000 maximum for qsr"));

        let r = AssumptionGuardrails::new(IndustryProfile::Manufacturing).validate(
            "Hiring",
            1.0,
            AssumptionSource::Web,
            Some(12_000.0),
            Some(12_000.0),
        );
        assert!(r.suggestion.unwrap().contains("$10,000 maximum for manufacturing"));
    }

    #[test]
    fn tiny_incentive_cost_names_minimum() {
        let r = qsr().validate("Points", 1.0, AssumptionSource::Web, Some(1.0), Some(0.005));
        assert!(!r.valid);
        assert!(r.suggestion.unwrap().contains("below the $0.01 minimum"));
    }

    #[test]
    fn missing_or_zero_cost_accepts() {
        let g = qsr();
        for (cost, incentive) in [(None, Some(0.5)), (Some(5.0), None), (Some(5.0), Some(0.0))] {
            let r = g.validate("f", 5.0, AssumptionSource::Web, cost, incentive);
            assert!(r.valid);
            assert_eq!(r.rops, None);
            assert_eq!(r.reason, "No ROPS data available, accepting");
        }
    }

    #[test]
    fn unknown_industry_fails_at_construction() {
        assert!(AssumptionGuardrails::for_industry("retail").is_err());
        assert_eq!(
            AssumptionGuardrails::for_industry("Manufacturing").unwrap().cost_max(),
            10_000.0
        );
    }

    #[test]
    fn total_under_ceiling_accepts() {
        let r = qsr().validate_total(1_200_000.0, 10_000_000.0, &[AssumptionSource::Web; 2]);
        assert!(r.valid);
        assert_eq!(r.accretion_pct, Some(12.0));
        assert_eq!(r.source, ResultSource::Mixed);
        assert_eq!(r.reason, "Total accretion 12.0% within 15% guardrail");
    }

    #[test]
    fn total_over_ceiling_flags_with_dollar_cap() {
        let r = qsr().validate_total(2_000_000.0, 10_000_000.0, &[AssumptionSource::Web]);
        assert!(!r.valid);
        assert_eq!(r.action, Action::Flag);
        assert_eq!(r.accretion_pct, Some(20.0));
        assert_eq!(r.reason, "Total accretion 20.0% exceeds 15% ceiling");
        assert_eq!(
            r.suggestion.as_deref(),
            Some("Reduce assumption values or campaign count. Max: $1,500,000")
        );
    }

    #[test]
    fn all_gong_bypasses_ceiling() {
        let r = qsr().validate_total(5_000_000.0, 10_000_000.0, &[AssumptionSource::Gong; 3]);
        assert!(r.valid);
        assert_eq!(r.accretion_pct, Some(50.0));
        assert!(r.reason.contains("bypassed"));
    }

    #[test]
    fn mixed_sources_enforce_ceiling() {
        let r = qsr().validate_total(
            5_000_000.0,
            10_000_000.0,
            &[AssumptionSource::Gong, AssumptionSource::Manual],
        );
        assert!(!r.valid);
    }

    #[test]
    fn empty_sources_bypass_ceiling() {
        let r = qsr().validate_total(5_000_000.0, 10_000_000.0, &[]);
        assert!(r.valid);
        assert_eq!(r.action, Action::Accept);
        assert_eq!(r.source, ResultSource::Gong);
        assert_eq!(r.accretion_pct, Some(50.0));
        assert!(r.reason.contains("bypassed"));
    }

    #[test]
    fn non_positive_ebitda_flags_without_pct() {
        let r = qsr().validate_total(1_000.0, 0.0, &[AssumptionSource::Web]);
        assert!(!r.valid);
        assert_eq!(r.accretion_pct, None);
    }
}

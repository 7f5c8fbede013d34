//! The assumption pipeline
//!
//! ```text
//! Workbook ──ModelReader──▶ ModelValues ─┐
//!                                         ├─ normalize + resolve ─▶ CampaignOutcome*
//! ResearchDocument ───────────────────────┘          │
//!                                   AssumptionValidator (per campaign)
//!                                                    │
//!                           validate_total over every declared source
//! ```
//!
//! One run is a pure function of its inputs; a pipeline can be shared
//! across threads and reused for any number of runs.

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::normalize::{normalize_campaigns, CampaignEntry, ModelLookup};
use crate::opportunity::OpportunitySummary;
use intro_guardrails::{
    AssumptionGuardrails, AssumptionSource, AssumptionValidator, CampaignValidation, ReportFormatter,
    ValidationResult,
};
use intro_research::ResearchDocument;
use intro_resolve::{best_matching_profile, CampaignNameResolver, ProfileMatch};
use intro_scenario::{AssumptionRow, ModelReader, ModelValues, Workbook};
use serde::{Deserialize, Serialize};

/// Everything the pipeline knows about one selected campaign
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignOutcome {
    /// Normalized campaign
    pub entry: CampaignEntry,
    /// Scenario group the campaign resolved to
    pub assumption_slug: Option<String>,
    /// Scenario rows of that group
    pub assumptions: Vec<AssumptionRow>,
    /// Guardrail results, when research declared field provenance
    pub validation: Option<CampaignValidation>,
}

impl CampaignOutcome {
    /// Whether no guardrail flagged this campaign
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validation.as_ref().map_or(true, |v| v.valid)
    }
}

/// Result of one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineOutput {
    /// Values read from the workbook
    pub model: ModelValues,
    /// One outcome per selected campaign, in selection order
    pub campaigns: Vec<CampaignOutcome>,
    /// Headline totals
    pub opportunity: OpportunitySummary,
    /// Aggregate accretion check, when last annual EBITDA was known
    pub aggregate: Option<ValidationResult>,
}

impl PipelineOutput {
    /// Every validation result, campaigns first, aggregate last
    pub fn results(&self) -> impl Iterator<Item = &ValidationResult> {
        self.campaigns
            .iter()
            .filter_map(|c| c.validation.as_ref())
            .flat_map(|v| v.results.iter())
            .chain(self.aggregate.iter())
    }

    /// Flagged results only
    pub fn flagged(&self) -> impl Iterator<Item = &ValidationResult> {
        self.results().filter(|r| r.is_flagged())
    }

    /// Whether every result passed
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.results().all(|r| r.valid)
    }

    /// Declared sources of every validated field
    #[must_use]
    pub fn sources(&self) -> Vec<AssumptionSource> {
        self.campaigns
            .iter()
            .filter_map(|c| c.validation.as_ref())
            .flat_map(CampaignValidation::source_list)
            .collect()
    }

    /// Campaigns destined for the summary slide
    pub fn summary_campaigns(&self) -> impl Iterator<Item = &CampaignEntry> {
        self.campaigns.iter().map(|c| &c.entry).filter(|e| e.include_summary)
    }
}

/// Joins model values with research campaigns and validates them.
#[derive(Debug, Clone)]
pub struct IntroModelPipeline {
    config: PipelineConfig,
    reader: ModelReader,
    resolver: CampaignNameResolver,
    validator: AssumptionValidator,
}

impl IntroModelPipeline {
    /// Build a pipeline; invalid configuration fails here.
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        config.validate()?;
        let guardrails = AssumptionGuardrails::with_config(config.industry, config.guardrails)?;
        Ok(Self {
            reader: ModelReader::new(config.layout),
            resolver: CampaignNameResolver::new(config.thresholds.campaign_to_model),
            validator: AssumptionValidator::from_guardrails(guardrails),
            config,
        })
    }

    /// Configuration in use
    #[inline]
    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Guardrails in use
    #[inline]
    #[must_use]
    pub fn guardrails(&self) -> &AssumptionGuardrails {
        self.validator.guardrails()
    }

    /// Read `workbook` and run against `research`.
    #[must_use]
    pub fn run(&self, workbook: &Workbook, research: &ResearchDocument) -> PipelineOutput {
        self.run_with_model(self.reader.read(workbook), research)
    }

    /// Run against already extracted model values.
    #[must_use]
    pub fn run_with_model(&self, model: ModelValues, research: &ResearchDocument) -> PipelineOutput {
        let lookup = ModelLookup::new(&model, self.resolver);
        let entries = normalize_campaigns(research, &lookup);
        let opportunity = OpportunitySummary::compute(&model, &entries);

        let campaigns: Vec<CampaignOutcome> = entries
            .into_iter()
            .map(|entry| self.outcome(entry, &model, &lookup, research))
            .collect();

        let matched = campaigns.iter().filter(|c| c.assumption_slug.is_some()).count();
        tracing::info!(
            groups = model.assumptions.len(),
            campaigns = campaigns.len(),
            matched,
            "joined research campaigns to scenario groups"
        );

        let mut output = PipelineOutput {
            campaigns,
            opportunity,
            aggregate: None,
            model: ModelValues::default(),
        };
        output.aggregate = self.aggregate(&output, research);
        output.model = model;

        let flags = output.flagged().count();
        if flags > 0 {
            tracing::info!(flags, "guardrails flagged assumptions for review");
        }
        output
    }

    fn outcome(
        &self,
        entry: CampaignEntry,
        model: &ModelValues,
        lookup: &ModelLookup<'_>,
        research: &ResearchDocument,
    ) -> CampaignOutcome {
        let assumption_slug = lookup.assumption_slug(&entry.name);
        let assumptions = assumption_slug
            .and_then(|slug| model.assumptions.get(slug))
            .cloned()
            .unwrap_or_default();

        if assumption_slug.is_none() {
            tracing::debug!(campaign = %entry.name, "no scenario group for campaign");
        }

        let validation = research
            .assumptions_for(&entry.name)
            .map(|fields| self.validator.validate_campaign(&entry.name, fields));

        CampaignOutcome {
            assumption_slug: assumption_slug.map(str::to_string),
            assumptions,
            validation,
            entry,
        }
    }

    fn aggregate(&self, output: &PipelineOutput, research: &ResearchDocument) -> Option<ValidationResult> {
        let Some(ebitda) = research.last_annual_ebitda.or(self.config.last_annual_ebitda) else {
            tracing::warn!("last annual EBITDA unknown; aggregate accretion check skipped");
            return None;
        };

        Some(
            self.guardrails()
                .validate_total(output.opportunity.total_ebitda, ebitda, &output.sources()),
        )
    }

    /// Plain-text report of every result in `output`
    #[must_use]
    pub fn report(&self, output: &PipelineOutput) -> String {
        let results: Vec<ValidationResult> = output.results().cloned().collect();
        ReportFormatter::new(&self.config.guardrails).render(&results)
    }

    /// Recognize the workbook template among stored label profiles.
    ///
    /// Labels are the `Inputs` labels the model reader found.
    #[must_use]
    pub fn recognize_template<'p, P: AsRef<str>>(
        &self,
        model: &ModelValues,
        profiles: &'p [(P, Vec<String>)],
    ) -> ProfileMatch<'p> {
        let labels: Vec<&str> = model.inputs.keys().map(String::as_str).collect();
        best_matching_profile(
            &labels,
            profiles,
            self.config.thresholds.label_to_label,
            self.config.thresholds.template_match,
        )
    }

    /// Find the company's research in the configured workspace and run.
    pub fn run_for_company(&self, company: &str, workbook: &Workbook) -> Result<PipelineOutput, PipelineError> {
        let (path, research) = self.config.workspace.find_research(company)?;
        tracing::debug!(company, path = %path.display(), "loaded research");
        Ok(self.run(workbook, &research))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intro_guardrails::{IndustryProfile, ResultSource};

    #[test]
    fn invalid_config_fails_at_construction() {
        let mut config = PipelineConfig::default();
        config.guardrails.accretion_ceiling_pct = -1.0;
        assert!(matches!(
            IntroModelPipeline::new(config),
            Err(PipelineError::Guardrail(_))
        ));
    }

    #[test]
    fn empty_inputs_give_empty_output() {
        let pipeline = IntroModelPipeline::new(PipelineConfig::default()).unwrap();
        let output = pipeline.run(&Workbook::new(), &ResearchDocument::default());
        assert!(output.campaigns.is_empty());
        assert!(output.aggregate.is_none());
        assert!(output.is_valid());
    }

    #[test]
    fn config_ebitda_backs_up_research() {
        let config = PipelineConfig::new()
            .with_industry(IndustryProfile::Manufacturing)
            .with_last_annual_ebitda(10_000_000.0);
        let pipeline = IntroModelPipeline::new(config).unwrap();
        let output = pipeline.run(&Workbook::new(), &ResearchDocument::default());
        let aggregate = output.aggregate.unwrap();
        // no declared sources: the all-GONG bypass holds vacuously
        assert!(aggregate.valid);
        assert_eq!(aggregate.source, ResultSource::Gong);
        assert_eq!(aggregate.accretion_pct, Some(0.0));
    }
}

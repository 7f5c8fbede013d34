//! Total opportunity across selected campaigns

use crate::normalize::CampaignEntry;
use intro_scenario::{CellValue, ModelValues};
use serde::{Deserialize, Serialize};

/// Headline numbers for the opportunity slide
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpportunitySummary {
    /// Sum of positive model EBITDA uplift values
    pub total_ebitda: f64,
    /// Mean of positive model ROPS values
    pub avg_rops: Option<f64>,
    /// Campaigns with `high` priority
    pub high_count: usize,
    /// Campaigns considered
    pub total_count: usize,
}

impl OpportunitySummary {
    /// Summarize model values and normalized campaigns.
    #[must_use]
    pub fn compute(model: &ModelValues, campaigns: &[CampaignEntry]) -> Self {
        let total_ebitda = positive(model.ebitda.values()).sum();

        let rops: Vec<f64> = positive(model.rops.values()).collect();
        #[allow(clippy::cast_precision_loss)]
        let avg_rops = (!rops.is_empty()).then(|| rops.iter().sum::<f64>() / rops.len() as f64);

        Self {
            total_ebitda,
            avg_rops,
            high_count: campaigns.iter().filter(|c| c.is_high_priority()).count(),
            total_count: campaigns.len(),
        }
    }
}

fn positive<'a>(values: impl Iterator<Item = &'a CellValue>) -> impl Iterator<Item = f64> {
    values.filter_map(CellValue::as_number).filter(|v| *v > 0.0)
}

//! Portfolio accretion bounds
//!
//! A coarser check than [`validate_total`](crate::AssumptionGuardrails::validate_total):
//! the portfolio's net uplift should land inside a target band of company
//! EBITDA, and each campaign's net / incentive ratio inside a wider ROPS band.

use crate::config::PortfolioBounds;
use serde::{Deserialize, Serialize};

/// Economics of one campaign
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CampaignEconomics {
    /// Gross uplift
    pub gross: f64,
    /// Incentive spend
    pub incentive: f64,
    /// Net uplift after incentive
    pub net: f64,
}

impl CampaignEconomics {
    /// Create from gross and incentive; net is the difference
    #[must_use]
    pub fn from_gross(gross: f64, incentive: f64) -> Self {
        Self {
            gross,
            incentive,
            net: gross - incentive,
        }
    }

    /// Net / incentive, when incentive is positive
    #[inline]
    #[must_use]
    pub fn rops(&self) -> Option<f64> {
        (self.incentive > 0.0).then(|| self.net / self.incentive)
    }
}

/// Portfolio totals and bound violations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccretionSummary {
    /// Sum of gross uplift
    pub total_gross: f64,
    /// Sum of incentive spend
    pub total_incentive: f64,
    /// Sum of net uplift
    pub total_net: f64,
    /// Total net as a fraction of company EBITDA (0 when EBITDA is 0)
    pub accretion_pct: f64,
    /// One message per violated bound
    pub issues: Vec<String>,
    /// True when `issues` is empty
    pub in_bounds: bool,
}

/// Check a set of campaigns against portfolio bounds.
#[must_use]
pub fn check_portfolio(
    campaigns: &[CampaignEconomics],
    company_ebitda: f64,
    bounds: &PortfolioBounds,
) -> AccretionSummary {
    let total_gross: f64 = campaigns.iter().map(|c| c.gross).sum();
    let total_incentive: f64 = campaigns.iter().map(|c| c.incentive).sum();
    let total_net: f64 = campaigns.iter().map(|c| c.net).sum();
    let accretion_pct = if company_ebitda == 0.0 {
        0.0
    } else {
        total_net / company_ebitda
    };

    let mut issues = Vec::new();

    let total = bounds.total_pct;
    if !total.contains(accretion_pct) {
        issues.push(format!(
            "Total accretion {:.1}% outside {:.0}%-{:.0}% bounds",
            accretion_pct * 100.0,
            total.min * 100.0,
            total.max * 100.0
        ));
    }

    let per_campaign = bounds.rops_per_campaign;
    for (i, campaign) in campaigns.iter().enumerate() {
        if let Some(rops) = campaign.rops() {
            if !per_campaign.contains(rops) {
                issues.push(format!(
                    "Campaign {} ROPS {rops:.1}x outside {}x-{}x",
                    i + 1,
                    per_campaign.min,
                    per_campaign.max
                ));
            }
        }
    }

    if !issues.is_empty() {
        tracing::debug!(issues = issues.len(), accretion_pct, "portfolio outside bounds");
    }

    AccretionSummary {
        total_gross,
        total_incentive,
        total_net,
        accretion_pct,
        in_bounds: issues.is_empty(),
        issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_bounds_portfolio() {
        let campaigns = [
            CampaignEconomics::from_gross(840_000.0, 40_000.0),
            CampaignEconomics::from_gross(420_000.0, 20_000.0),
        ];
        let summary = check_portfolio(&campaigns, 10_000_000.0, &PortfolioBounds::default());
        assert_eq!(summary.total_net, 1_200_000.0);
        assert!((summary.accretion_pct - 0.12).abs() < 1e-12);
        assert!(summary.in_bounds, "{:?}", summary.issues);
    }

    #[test]
    fn low_total_and_campaign_rops_reported() {
        let campaigns = [
            CampaignEconomics::from_gross(100_000.0, 50_000.0),
            CampaignEconomics::from_gross(30_000.0, 0.0),
        ];
        let summary = check_portfolio(&campaigns, 10_000_000.0, &PortfolioBounds::default());
        assert!(!summary.in_bounds);
        assert_eq!(
            summary.issues,
            vec![
                "Total accretion 0.8% outside 10%-15% bounds".to_string(),
                "Campaign 1 ROPS 1.0x outside 10x-50x".to_string(),
            ]
        );
    }

    #[test]
    fn zero_ebitda_gives_zero_fraction() {
        let summary = check_portfolio(&[], 0.0, &PortfolioBounds::default());
        assert_eq!(summary.accretion_pct, 0.0);
        assert!(!summary.in_bounds);
    }
}

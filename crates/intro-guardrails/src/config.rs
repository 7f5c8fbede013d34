//! Guardrail configuration
//!
//! Defaults are the business constants: ROPS 10-30x, a 15% accretion
//! ceiling, per-unit incentive cost between $0.01 and an industry cap.

use crate::error::GuardrailError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Industry profile selecting the incentive cost cap
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum IndustryProfile {
    /// Quick-service restaurants
    #[default]
    Qsr,
    /// Manufacturing
    Manufacturing,
}

impl IndustryProfile {
    /// Lowercase selector
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            IndustryProfile::Qsr => "qsr",
            IndustryProfile::Manufacturing => "manufacturing",
        }
    }
}

impl FromStr for IndustryProfile {
    type Err = GuardrailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "qsr" => Ok(IndustryProfile::Qsr),
            "manufacturing" => Ok(IndustryProfile::Manufacturing),
            _ => Err(GuardrailError::UnknownIndustry(s.to_string())),
        }
    }
}

impl TryFrom<String> for IndustryProfile {
    type Error = GuardrailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<IndustryProfile> for &'static str {
    fn from(value: IndustryProfile) -> Self {
        value.as_str()
    }
}

impl fmt::Display for IndustryProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed interval `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Lower bound (inclusive)
    pub min: f64,
    /// Upper bound (inclusive)
    pub max: f64,
}

impl Bounds {
    /// Create bounds
    #[inline]
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether `value` lies within the interval
    #[inline]
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    fn check(&self, name: &'static str) -> Result<(), GuardrailError> {
        if self.min.is_finite() && self.max.is_finite() && self.min <= self.max {
            Ok(())
        } else {
            Err(GuardrailError::InvalidBounds {
                name,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// Bounds for the whole campaign portfolio
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioBounds {
    /// Total net uplift as a fraction of company EBITDA
    pub total_pct: Bounds,
    /// Net uplift / incentive spend per campaign
    pub rops_per_campaign: Bounds,
}

impl Default for PortfolioBounds {
    fn default() -> Self {
        Self {
            total_pct: Bounds::new(0.10, 0.15),
            rops_per_campaign: Bounds::new(10.0, 50.0),
        }
    }
}

/// Guardrail constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardrailConfig {
    /// Lowest acceptable ROPS
    pub rops_min: f64,
    /// Highest acceptable ROPS
    pub rops_max: f64,
    /// Total accretion ceiling, percent of last annual EBITDA
    pub accretion_ceiling_pct: f64,
    /// Smallest reasonable per-unit incentive cost
    pub cost_min: f64,
    /// Incentive cost cap for [`IndustryProfile::Qsr`]
    pub cost_max_qsr: f64,
    /// Incentive cost cap for [`IndustryProfile::Manufacturing`]
    pub cost_max_manufacturing: f64,
    /// Portfolio-level bounds
    pub portfolio: PortfolioBounds,
}

impl Default for GuardrailConfig {
    fn default() -> Self {
        Self {
            rops_min: 10.0,
            rops_max: 30.0,
            accretion_ceiling_pct: 15.0,
            cost_min: 0.01,
            cost_max_qsr: 5_000.0,
            cost_max_manufacturing: 10_000.0,
            portfolio: PortfolioBounds::default(),
        }
    }
}

impl GuardrailConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With ROPS bounds
    #[must_use]
    pub fn with_rops_bounds(mut self, min: f64, max: f64) -> Self {
        self.rops_min = min;
        self.rops_max = max;
        self
    }

    /// With accretion ceiling (percent)
    #[must_use]
    pub fn with_accretion_ceiling(mut self, pct: f64) -> Self {
        self.accretion_ceiling_pct = pct;
        self
    }

    /// ROPS bounds as an interval
    #[inline]
    #[must_use]
    pub fn rops_bounds(&self) -> Bounds {
        Bounds::new(self.rops_min, self.rops_max)
    }

    /// Incentive cost cap for an industry
    #[must_use]
    pub fn cost_max(&self, industry: IndustryProfile) -> f64 {
        match industry {
            IndustryProfile::Qsr => self.cost_max_qsr,
            IndustryProfile::Manufacturing => self.cost_max_manufacturing,
        }
    }

    /// Reject unusable constants.
    pub fn validate(&self) -> Result<(), GuardrailError> {
        self.rops_bounds().check("rops")?;
        Bounds::new(self.cost_min, self.cost_max_qsr).check("qsr cost")?;
        Bounds::new(self.cost_min, self.cost_max_manufacturing).check("manufacturing cost")?;
        self.portfolio.total_pct.check("portfolio accretion")?;
        self.portfolio.rops_per_campaign.check("portfolio rops")?;

        if !(self.accretion_ceiling_pct.is_finite() && self.accretion_ceiling_pct > 0.0) {
            return Err(GuardrailError::InvalidCeiling(self.accretion_ceiling_pct));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn industry_selector() {
        assert_eq!("QSR".parse::<IndustryProfile>().unwrap(), IndustryProfile::Qsr);
        assert_eq!(
            "manufacturing".parse::<IndustryProfile>().unwrap(),
            IndustryProfile::Manufacturing
        );
        assert_eq!(
            "retail".parse::<IndustryProfile>(),
            Err(GuardrailError::UnknownIndustry("retail".into()))
        );
    }

    #[test]
    fn cost_cap_follows_industry() {
        let config = GuardrailConfig::default();
        assert_eq!(config.cost_max(IndustryProfile::Qsr), 5_000.0);
        assert_eq!(config.cost_max(IndustryProfile::Manufacturing), 10_000.0);
    }

    #[test]
    fn defaults_validate() {
        assert!(GuardrailConfig::default().validate().is_ok());
    }

    #[test]
    fn inverted_bounds_rejected() {
        let err = GuardrailConfig::new().with_rops_bounds(30.0, 10.0).validate().unwrap_err();
        assert!(matches!(err, GuardrailError::InvalidBounds { name: "rops", .. }));
        assert!(GuardrailConfig::new().with_rops_bounds(f64::NAN, 10.0).validate().is_err());
    }

    #[test]
    fn ceiling_must_be_positive() {
        assert_eq!(
            GuardrailConfig::new().with_accretion_ceiling(0.0).validate(),
            Err(GuardrailError::InvalidCeiling(0.0))
        );
    }

    #[test]
    fn bounds_are_inclusive() {
        let b = Bounds::new(10.0, 30.0);
        assert!(b.contains(10.0));
        assert!(b.contains(30.0));
        assert!(!b.contains(30.000_1));
    }
}

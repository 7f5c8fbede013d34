//! Validation result record

use crate::source::{Action, ResultSource};
use serde::{Deserialize, Serialize};

/// Outcome of validating one field or one aggregate.
///
/// Only the guardrails construct results. Fields are public plain data for
/// reporting code; the guardrails keep no reference to a result they return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the value passed
    pub valid: bool,
    /// Declared source of the value (`Mixed` for aggregates)
    pub source: ResultSource,
    /// Field being validated, e.g. `Loyalty Rewards: uplift_pct`
    pub field_name: String,
    /// Value under validation
    pub value: f64,
    /// Computed ROPS, when cost data was available
    pub rops: Option<f64>,
    /// Computed accretion percentage (aggregate checks only)
    pub accretion_pct: Option<f64>,
    /// Decision
    pub action: Action,
    /// Human-readable explanation
    pub reason: String,
    /// Corrective hint for flagged values
    pub suggestion: Option<String>,
}

impl ValidationResult {
    /// Accepted result
    pub(crate) fn accept(
        source: ResultSource,
        field_name: impl Into<String>,
        value: f64,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            valid: true,
            source,
            field_name: field_name.into(),
            value,
            rops: None,
            accretion_pct: None,
            action: Action::Accept,
            reason: reason.into(),
            suggestion: None,
        }
    }

    /// Flagged result carrying a suggestion
    pub(crate) fn flag(
        source: ResultSource,
        field_name: impl Into<String>,
        value: f64,
        reason: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            valid: false,
            source,
            field_name: field_name.into(),
            value,
            rops: None,
            accretion_pct: None,
            action: Action::Flag,
            reason: reason.into(),
            suggestion: Some(suggestion.into()),
        }
    }

    pub(crate) fn with_rops(mut self, rops: Option<f64>) -> Self {
        self.rops = rops;
        self
    }

    pub(crate) fn with_accretion(mut self, pct: Option<f64>) -> Self {
        self.accretion_pct = pct;
        self
    }

    /// Whether a reviewer must look at this value
    #[inline]
    #[must_use]
    pub fn is_flagged(&self) -> bool {
        self.action == Action::Flag
    }

    /// `ACCEPT` or `FLAG`, as printed in reports
    #[inline]
    #[must_use]
    pub fn status(&self) -> &'static str {
        if self.valid {
            "ACCEPT"
        } else {
            "FLAG"
        }
    }
}

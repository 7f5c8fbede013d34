//! Assumption provenance and decision tags

use crate::error::GuardrailError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where an assumption value came from.
///
/// Declared at ingestion and carried with the value; validation never infers it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum AssumptionSource {
    /// Verified against a recorded sales-call transcript
    Gong,
    /// Derived from external research
    Web,
    /// Human judgment
    #[default]
    Manual,
}

impl AssumptionSource {
    /// Lowercase tag as written in research documents
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AssumptionSource::Gong => "gong",
            AssumptionSource::Web => "web",
            AssumptionSource::Manual => "manual",
        }
    }

    /// Whether this source bypasses numeric guardrails
    #[inline]
    #[must_use]
    pub fn is_trusted(self) -> bool {
        self == AssumptionSource::Gong
    }
}

impl FromStr for AssumptionSource {
    type Err = GuardrailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gong" => Ok(AssumptionSource::Gong),
            "web" => Ok(AssumptionSource::Web),
            "manual" => Ok(AssumptionSource::Manual),
            _ => Err(GuardrailError::UnknownSource(s.to_string())),
        }
    }
}

impl TryFrom<String> for AssumptionSource {
    type Error = GuardrailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AssumptionSource> for &'static str {
    fn from(value: AssumptionSource) -> Self {
        value.as_str()
    }
}

impl fmt::Display for AssumptionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source recorded on a result: a single field's source, or `Mixed` for
/// aggregate checks over several sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultSource {
    /// Call-verified
    Gong,
    /// External research
    Web,
    /// Human judgment
    Manual,
    /// Aggregate over non-uniform or untrusted sources
    Mixed,
}

impl ResultSource {
    /// Uppercase label used in reports
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ResultSource::Gong => "GONG",
            ResultSource::Web => "WEB",
            ResultSource::Manual => "MANUAL",
            ResultSource::Mixed => "MIXED",
        }
    }
}

impl From<AssumptionSource> for ResultSource {
    fn from(value: AssumptionSource) -> Self {
        match value {
            AssumptionSource::Gong => ResultSource::Gong,
            AssumptionSource::Web => ResultSource::Web,
            AssumptionSource::Manual => ResultSource::Manual,
        }
    }
}

impl fmt::Display for ResultSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Decision attached to a validation result
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Value may reach a client-facing document
    #[default]
    Accept,
    /// Value needs human review
    Flag,
    /// Value should be changed before use
    Adjust,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Accept => "accept",
            Action::Flag => "flag",
            Action::Adjust => "adjust",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("GONG".parse::<AssumptionSource>().unwrap(), AssumptionSource::Gong);
        assert_eq!(" Web ".parse::<AssumptionSource>().unwrap(), AssumptionSource::Web);
        assert!("call".parse::<AssumptionSource>().is_err());
    }

    #[test]
    fn serde_uses_lowercase_tags() {
        let json = serde_json::to_string(&AssumptionSource::Gong).unwrap();
        assert_eq!(json, "\"gong\"");
        let back: AssumptionSource = serde_json::from_str("\"Manual\"").unwrap();
        assert_eq!(back, AssumptionSource::Manual);
        assert!(serde_json::from_str::<AssumptionSource>("\"crm\"").is_err());
    }

    #[test]
    fn only_gong_is_trusted() {
        assert!(AssumptionSource::Gong.is_trusted());
        assert!(!AssumptionSource::Web.is_trusted());
        assert!(!AssumptionSource::default().is_trusted());
    }
}

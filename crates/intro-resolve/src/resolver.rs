//! Campaign name resolution
//!
//! Research output and spreadsheet headers name the same campaign loosely
//! ("Loyalty Program" vs "Loyalty Rewards"). [`CampaignNameResolver`] maps a
//! query name onto one of a known set of canonical slugs, or reports that
//! nothing is close enough.
//!
//! Callers pick the threshold for their context:
//! - [`MatchThreshold::CAMPAIGN_TO_MODEL`] (0.55) when joining research
//!   campaigns to model values and assumption groups
//! - [`MatchThreshold::LABEL_TO_LABEL`] (0.8) when comparing template labels
//! - [`MatchThreshold::TEMPLATE_MATCH`] (0.85) for the share of matched labels
//!   a template needs before it counts as a known profile

use crate::error::ResolveError;
use crate::similarity::ratio;
use crate::slug::slugify;
use serde::{Deserialize, Serialize};

/// Minimum similarity ratio for a fuzzy match, in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct MatchThreshold(f64);

impl MatchThreshold {
    /// Research campaign → model slug.
    pub const CAMPAIGN_TO_MODEL: Self = Self(0.55);
    /// Template label → config label.
    pub const LABEL_TO_LABEL: Self = Self(0.8);
    /// Matched-label share needed to accept a template profile.
    pub const TEMPLATE_MATCH: Self = Self(0.85);

    /// Create a threshold, rejecting values outside `[0.0, 1.0]`.
    pub fn new(value: f64) -> Result<Self, ResolveError> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ResolveError::InvalidThreshold(value))
        }
    }

    /// Raw threshold value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Check whether `score` clears this threshold (inclusive).
    #[inline]
    #[must_use]
    pub fn accepts(self, score: f64) -> bool {
        score >= self.0
    }
}

impl TryFrom<f64> for MatchThreshold {
    type Error = ResolveError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MatchThreshold> for f64 {
    fn from(value: MatchThreshold) -> Self {
        value.0
    }
}

impl std::fmt::Display for MatchThreshold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Thresholds for every matching context, loadable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchThresholds {
    /// Research campaign names against model and assumption-group slugs
    pub campaign_to_model: MatchThreshold,
    /// Individual template labels against config labels
    pub label_to_label: MatchThreshold,
    /// Share of template labels that must match for a profile to be accepted
    pub template_match: MatchThreshold,
}

impl Default for MatchThresholds {
    fn default() -> Self {
        Self {
            campaign_to_model: MatchThreshold::CAMPAIGN_TO_MODEL,
            label_to_label: MatchThreshold::LABEL_TO_LABEL,
            template_match: MatchThreshold::TEMPLATE_MATCH,
        }
    }
}

/// Outcome of a successful resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution<'c> {
    /// Matched candidate slug
    pub slug: &'c str,
    /// Similarity of the query slug to `slug` (`1.0` for exact matches)
    pub score: f64,
    /// Whether the normalized query equalled the candidate
    pub exact: bool,
}

/// Resolves loosely specified campaign names against canonical slugs.
///
/// Pure: holds only its threshold, so one resolver can be shared freely.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CampaignNameResolver {
    threshold: MatchThreshold,
}

impl CampaignNameResolver {
    /// Create resolver with the given threshold
    #[inline]
    #[must_use]
    pub fn new(threshold: MatchThreshold) -> Self {
        Self { threshold }
    }

    /// Resolver for joining research campaigns to spreadsheet data
    #[inline]
    #[must_use]
    pub fn campaign_to_model() -> Self {
        Self::new(MatchThreshold::CAMPAIGN_TO_MODEL)
    }

    /// Resolver for comparing template labels
    #[inline]
    #[must_use]
    pub fn label_to_label() -> Self {
        Self::new(MatchThreshold::LABEL_TO_LABEL)
    }

    /// Threshold in use
    #[inline]
    #[must_use]
    pub fn threshold(&self) -> MatchThreshold {
        self.threshold
    }

    /// Resolve `query_name` to the best candidate slug, if any clears the threshold.
    pub fn resolve<'c, I, S>(&self, query_name: &str, candidates: I) -> Option<&'c str>
    where
        I: IntoIterator<Item = &'c S>,
        S: AsRef<str> + ?Sized + 'c,
    {
        self.resolve_scored(query_name, candidates).map(|r| r.slug)
    }

    /// Like [`resolve`](Self::resolve), also reporting the score.
    ///
    /// The query is normalized with [`slugify`]; candidates are compared as
    /// given. An exact match returns immediately. Otherwise the first
    /// candidate reaching the maximum ratio is kept, and returned only if
    /// that ratio meets the threshold.
    pub fn resolve_scored<'c, I, S>(&self, query_name: &str, candidates: I) -> Option<Resolution<'c>>
    where
        I: IntoIterator<Item = &'c S>,
        S: AsRef<str> + ?Sized + 'c,
    {
        let query = slugify(query_name);
        let candidates: Vec<&'c str> = candidates.into_iter().map(|c| c.as_ref()).collect();

        if let Some(slug) = candidates.iter().copied().find(|c| *c == query) {
            return Some(Resolution {
                slug,
                score: 1.0,
                exact: true,
            });
        }

        let mut best: Option<Resolution<'c>> = None;
        for slug in candidates {
            let score = ratio(&query, slug);
            if best.map_or(true, |b| score > b.score) {
                best = Some(Resolution {
                    slug,
                    score,
                    exact: false,
                });
            }
        }

        match best {
            Some(found) if self.threshold.accepts(found.score) => {
                tracing::debug!(
                    query = %query,
                    candidate = found.slug,
                    score = found.score,
                    "fuzzy campaign match"
                );
                Some(found)
            }
            Some(near) => {
                tracing::debug!(
                    query = %query,
                    nearest = near.slug,
                    score = near.score,
                    threshold = self.threshold.value(),
                    "no campaign match above threshold"
                );
                None
            }
            None => None,
        }
    }
}

impl Default for CampaignNameResolver {
    fn default() -> Self {
        Self::campaign_to_model()
    }
}

/// Resolve `query_name` against `candidates` with an explicit threshold.
pub fn resolve<'c, S>(query_name: &str, candidates: &'c [S], threshold: MatchThreshold) -> Option<&'c str>
where
    S: AsRef<str>,
{
    CampaignNameResolver::new(threshold).resolve(query_name, candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn exact_slug_short_circuits() {
        let resolver = CampaignNameResolver::new(MatchThreshold::new(1.0).unwrap());
        let candidates = ["loyalty_rewards", "shift_coverage"];
        let found = resolver.resolve_scored("Loyalty Rewards", &candidates).unwrap();
        assert_eq!(found.slug, "loyalty_rewards");
        assert!(found.exact);
    }

    #[test]
    fn fuzzy_match_above_threshold() {
        let candidates = vec!["loyalty_rewards".to_string(), "shift_coverage".to_string()];
        let found = CampaignNameResolver::campaign_to_model().resolve("Loyalty Program", &candidates);
        assert_eq!(found, Some("loyalty_rewards"));
    }

    #[test]
    fn stricter_threshold_rejects_same_pair() {
        let candidates = ["loyalty_rewards"];
        assert_eq!(
            CampaignNameResolver::label_to_label().resolve("Loyalty Program", &candidates),
            None
        );
    }

    #[test]
    fn unrelated_name_has_no_match() {
        let candidates = ["loyalty_rewards"];
        for threshold in [MatchThreshold::CAMPAIGN_TO_MODEL, MatchThreshold::LABEL_TO_LABEL] {
            assert_eq!(resolve("totally_unrelated_xyz", &candidates, threshold), None);
        }
    }

    #[test]
    fn empty_candidates_never_match() {
        let candidates: [&str; 0] = [];
        assert_eq!(resolve("anything", &candidates, MatchThreshold::new(0.0).unwrap()), None);
    }

    #[test]
    fn tie_goes_to_first_candidate() {
        // both candidates differ from the query by one trailing character
        let candidates = ["abcx", "abcy"];
        let found = resolve("abcz", &candidates, MatchThreshold::new(0.5).unwrap());
        assert_eq!(found, Some("abcx"));
    }

    #[test]
    fn threshold_bounds_are_checked() {
        assert!(MatchThreshold::new(-0.1).is_err());
        assert!(MatchThreshold::new(1.1).is_err());
        assert!(MatchThreshold::new(f64::NAN).is_err());
        assert_eq!(MatchThreshold::new(0.55).unwrap(), MatchThreshold::CAMPAIGN_TO_MODEL);
    }

    #[test]
    fn default_thresholds_match_calling_contexts() {
        let t = MatchThresholds::default();
        assert_eq!(t.campaign_to_model.value(), 0.55);
        assert_eq!(t.label_to_label.value(), 0.8);
        assert_eq!(t.template_match.value(), 0.85);
    }
}

//! Template label-set comparison
//!
//! A workbook template is recognised by its row labels. Comparing the labels
//! of a scanned workbook against stored profiles tells the caller which known
//! layout (and therefore which column contract) the workbook follows.

use crate::resolver::MatchThreshold;
use crate::similarity::ratio;

/// Fraction of `template` labels that have a close counterpart in `config`.
///
/// Each template label is compared case-insensitively against every config
/// label; it counts as matched when its best ratio meets `label_threshold`.
/// Returns `0.0` when either side is empty.
#[must_use]
pub fn compare_label_sets<T, C>(template: &[T], config: &[C], label_threshold: MatchThreshold) -> f64
where
    T: AsRef<str>,
    C: AsRef<str>,
{
    if template.is_empty() || config.is_empty() {
        return 0.0;
    }

    let config: Vec<String> = config.iter().map(|c| c.as_ref().to_lowercase()).collect();

    let matched = template
        .iter()
        .filter(|label| {
            let label = label.as_ref().to_lowercase();
            let best = config
                .iter()
                .map(|c| ratio(&label, c))
                .fold(0.0_f64, f64::max);
            label_threshold.accepts(best)
        })
        .count();

    #[allow(clippy::cast_precision_loss)]
    let share = matched as f64 / template.len() as f64;
    share
}

/// Best profile for a scanned label set
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileMatch<'p> {
    /// Accepted profile name, if the best score met the match threshold
    pub name: Option<&'p str>,
    /// Highest score observed across all profiles
    pub score: f64,
}

/// Pick the stored profile whose labels best cover `labels`.
///
/// Profiles are scored with [`compare_label_sets`]. The highest score is
/// always reported; the profile name only when that score meets
/// `match_threshold`.
#[must_use]
pub fn best_matching_profile<'p, L, P>(
    labels: &[L],
    profiles: &'p [(P, Vec<String>)],
    label_threshold: MatchThreshold,
    match_threshold: MatchThreshold,
) -> ProfileMatch<'p>
where
    L: AsRef<str>,
    P: AsRef<str>,
{
    let mut best = ProfileMatch {
        name: None,
        score: 0.0,
    };

    for (name, profile_labels) in profiles {
        let score = compare_label_sets(labels, profile_labels, label_threshold);
        if score > best.score {
            best.score = score;
            if match_threshold.accepts(score) {
                best.name = Some(name.as_ref());
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn identical_sets_fully_match() {
        let set = ["Revenue", "Store Count", "Average Order Value"];
        assert_eq!(compare_label_sets(&set, &set, MatchThreshold::LABEL_TO_LABEL), 1.0);
    }

    #[test]
    fn comparison_ignores_case() {
        let template = ["REVENUE"];
        let config = ["revenue"];
        assert_eq!(compare_label_sets(&template, &config, MatchThreshold::LABEL_TO_LABEL), 1.0);
    }

    #[test]
    fn partial_overlap_is_fractional() {
        let template = ["Revenue", "Store Count", "Turnover Rate", "Fleet Size"];
        let config = ["Revenue", "Stores Count", "Turnover Rate %"];
        let score = compare_label_sets(&template, &config, MatchThreshold::LABEL_TO_LABEL);
        assert!((score - 0.75).abs() < 1e-9);
    }

    #[test]
    fn empty_sides_score_zero() {
        let empty: [&str; 0] = [];
        assert_eq!(compare_label_sets(&empty, &["Revenue"], MatchThreshold::LABEL_TO_LABEL), 0.0);
        assert_eq!(compare_label_sets(&["Revenue"], &empty, MatchThreshold::LABEL_TO_LABEL), 0.0);
    }

    #[test]
    fn best_profile_requires_match_threshold() {
        let scanned = ["Revenue", "Store Count", "Turnover Rate", "Fleet Size"];
        let profiles = vec![
            ("qsr", labels(&["Revenue", "Store Count", "Turnover Rate", "Fleet Size"])),
            ("manufacturing", labels(&["Revenue", "Plant Count"])),
        ];

        let found = best_matching_profile(
            &scanned,
            &profiles,
            MatchThreshold::LABEL_TO_LABEL,
            MatchThreshold::TEMPLATE_MATCH,
        );
        assert_eq!(found.name, Some("qsr"));
        assert_eq!(found.score, 1.0);

        let weak = best_matching_profile(
            &scanned,
            &profiles[1..],
            MatchThreshold::LABEL_TO_LABEL,
            MatchThreshold::TEMPLATE_MATCH,
        );
        assert_eq!(weak.name, None);
        assert!(weak.score > 0.0);
    }
}

//! Plain-text validation report
//!
//! ```text
//! ======================================================================
//! ASSUMPTION VALIDATION REPORT
//! ======================================================================
//!
//! FLAG | Loyalty Rewards: uplift_pct
//!   Source: WEB
//!   Value: 2.0
//!   ROPS: 4.0x (target: 10-30x)
//!   ROPS 4.0x outside 10-30x guardrail
//!   → Adjust value or cost assumption. Target ROPS: 10-30x
//!
//! ======================================================================
//! ```

use crate::config::GuardrailConfig;
use crate::result::ValidationResult;
use std::fmt::{self, Write as _};

const BANNER_WIDTH: usize = 70;
const TITLE: &str = "ASSUMPTION VALIDATION REPORT";

/// Renders results using the targets of a guardrail configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportFormatter<'a> {
    config: Option<&'a GuardrailConfig>,
}

impl<'a> ReportFormatter<'a> {
    /// Formatter quoting the targets of `config`
    #[must_use]
    pub fn new(config: &'a GuardrailConfig) -> Self {
        Self { config: Some(config) }
    }

    fn write_result(&self, out: &mut impl fmt::Write, result: &ValidationResult) -> fmt::Result {
        let defaults = GuardrailConfig::default();
        let config = self.config.unwrap_or(&defaults);

        writeln!(out, "{} | {}", result.status(), result.field_name)?;
        writeln!(out, "  Source: {}", result.source)?;
        writeln!(out, "  Value: {}", value_text(result.value))?;
        if let Some(rops) = result.rops {
            writeln!(
                out,
                "  ROPS: {rops:.1}x (target: {}-{}x)",
                config.rops_min, config.rops_max
            )?;
        }
        if let Some(pct) = result.accretion_pct {
            writeln!(
                out,
                "  Accretion: {pct:.1}% (ceiling: {}%)",
                config.accretion_ceiling_pct
            )?;
        }
        write!(out, "  {}", result.reason)?;
        if let Some(suggestion) = &result.suggestion {
            write!(out, "\n  → {suggestion}")?;
        }
        Ok(())
    }

    /// Render one result block
    #[must_use]
    pub fn render_result(&self, result: &ValidationResult) -> String {
        let mut out = String::new();
        // writing to a String cannot fail
        let _ = self.write_result(&mut out, result);
        out
    }

    /// Render the full banner-wrapped report
    #[must_use]
    pub fn render(&self, results: &[ValidationResult]) -> String {
        let rule = "=".repeat(BANNER_WIDTH);
        let mut out = String::new();
        let _ = writeln!(out, "{rule}\n{TITLE}\n{rule}");
        for result in results {
            out.push('\n');
            let _ = self.write_result(&mut out, result);
            out.push('\n');
        }
        let _ = write!(out, "\n{rule}");
        out
    }
}

/// Raw value as reports print it: whole numbers keep one decimal (`2.0`).
fn value_text(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ReportFormatter::default().write_result(f, self)
    }
}

/// Render a report with the default targets.
#[must_use]
pub fn render_report(results: &[ValidationResult]) -> String {
    ReportFormatter::default().render(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guardrails::AssumptionGuardrails;
    use crate::source::AssumptionSource;
    use pretty_assertions::assert_eq;

    #[test]
    fn flagged_block_lists_rops_and_suggestion() {
        let r = AssumptionGuardrails::default().validate(
            "Retention",
            2.0,
            AssumptionSource::Web,
            Some(200.0),
            Some(50.0),
        );
        assert_eq!(
            r.to_string(),
            "FLAG | Retention\n  Source: WEB\n  Value: 2.0\n  ROPS: 4.0x (target: 10-30x)\n  \
             ROPS 4.0x outside 10-30x guardrail\n  → Adjust value or cost assumption. Target ROPS: 10-30x"
        );
    }

    #[test]
    fn values_print_with_a_decimal_point() {
        assert_eq!(value_text(2.0), "2.0");
        assert_eq!(value_text(12_000.0), "12000.0");
        assert_eq!(value_text(-3.0), "-3.0");
        assert_eq!(value_text(4.5), "4.5");
        assert_eq!(value_text(0.125), "0.125");
        assert_eq!(value_text(f64::NAN), "NaN");
    }

    #[test]
    fn aggregate_block_shows_accretion() {
        let r = AssumptionGuardrails::default().validate_total(1_200_000.0, 10_000_000.0, &[AssumptionSource::Web]);
        let block = r.to_string();
        assert!(block.starts_with("ACCEPT | Total EBITDA Accretion\n  Source: MIXED"));
        assert!(block.contains("  Accretion: 12.0% (ceiling: 15%)"));
        assert!(!block.contains("→"));
    }

    #[test]
    fn report_is_banner_wrapped() {
        let r = AssumptionGuardrails::default().validate("Uplift", 5.0, AssumptionSource::Gong, None, None);
        let report = render_report(&[r]);
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[0], "=".repeat(70));
        assert_eq!(lines[1], "ASSUMPTION VALIDATION REPORT");
        assert_eq!(lines[4], "ACCEPT | Uplift");
        assert_eq!(lines.last().copied(), Some("=".repeat(70).as_str()));
    }

    #[test]
    fn empty_report_has_only_banners() {
        assert_eq!(render_report(&[]).lines().filter(|l| l.starts_with('=')).count(), 3);
    }
}

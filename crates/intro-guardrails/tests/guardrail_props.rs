//! Guardrail properties and the reference scenarios

use intro_guardrails::{
    Action, AssumptionGuardrails, AssumptionSource, AssumptionValidator, CampaignAssumptions, IndustryProfile,
    ResultSource, SourceMetadata,
};
use proptest::prelude::*;

fn any_f64() -> impl Strategy<Value = f64> {
    prop_oneof![
        -1.0e9..1.0e9f64,
        Just(0.0),
        Just(-1.0),
        Just(f64::INFINITY),
        Just(f64::NAN),
    ]
}

proptest! {
    #[test]
    fn prop_gong_always_valid(
        value in any_f64(),
        cost in proptest::option::of(any_f64()),
        incentive in proptest::option::of(any_f64()),
        manufacturing in any::<bool>(),
    ) {
        let industry = if manufacturing { IndustryProfile::Manufacturing } else { IndustryProfile::Qsr };
        let r = AssumptionGuardrails::new(industry).validate("field", value, AssumptionSource::Gong, cost, incentive);
        prop_assert!(r.valid);
        prop_assert_eq!(r.action, Action::Accept);
        prop_assert_eq!(r.rops, None);
        prop_assert!(r.suggestion.is_none());
    }

    #[test]
    fn prop_all_gong_total_always_valid(
        total in any_f64(),
        ebitda in any_f64(),
        count in 1usize..8,
    ) {
        let sources = vec![AssumptionSource::Gong; count];
        let r = AssumptionGuardrails::default().validate_total(total, ebitda, &sources);
        prop_assert!(r.valid);
        prop_assert_eq!(r.source, ResultSource::Gong);
    }

    #[test]
    fn prop_flags_always_carry_suggestion(
        cost in 0.0..100_000.0f64,
        incentive in 0.001..20_000.0f64,
        web in any::<bool>(),
    ) {
        let source = if web { AssumptionSource::Web } else { AssumptionSource::Manual };
        let r = AssumptionGuardrails::default().validate("field", cost, source, Some(cost), Some(incentive));
        prop_assert_eq!(r.valid, !r.is_flagged());
        prop_assert_eq!(r.suggestion.is_some(), r.is_flagged());
        prop_assert!(r.rops.is_some());
    }
}

#[test]
fn revenue_impact_units_drive_rops() {
    let g = AssumptionGuardrails::new(IndustryProfile::Qsr);

    // 12,000 of modeled benefit over a $0.50 incentive is 24,000x: far outside the band
    let r = g.validate("Campaign 2: Food Uplift %", 12.0, AssumptionSource::Web, Some(12_000.0), Some(0.50));
    assert_eq!(r.rops, Some(24_000.0));
    assert!(!r.valid);

    let r = g.validate("Campaign 2: Food Uplift %", 12.0, AssumptionSource::Web, Some(4_500.0), Some(0.25));
    assert_eq!(r.rops, Some(18_000.0));
    assert_eq!(r.action, Action::Flag);

    // per-unit benefit against per-unit incentive lands in range
    let r = g.validate("Campaign 2: Food Uplift %", 12.0, AssumptionSource::Web, Some(4.5), Some(0.25));
    assert_eq!(r.rops, Some(18.0));
    assert!(r.valid);
}

#[test]
fn aggregate_reference_scenarios() {
    let g = AssumptionGuardrails::default();
    let web = [AssumptionSource::Web, AssumptionSource::Web];

    let ok = g.validate_total(1_200_000.0, 10_000_000.0, &web);
    assert!(ok.valid);
    assert_eq!(ok.accretion_pct, Some(12.0));

    let over = g.validate_total(2_000_000.0, 10_000_000.0, &web);
    assert!(!over.valid);
    assert_eq!(over.action, Action::Flag);
    assert_eq!(over.accretion_pct, Some(20.0));
    assert!(over.suggestion.unwrap().contains("$1,500,000"));

    let gong = g.validate_total(5_000_000.0, 10_000_000.0, &[AssumptionSource::Gong; 2]);
    assert!(gong.valid);
    assert_eq!(gong.accretion_pct, Some(50.0));
    assert!(gong.reason.contains("bypassed"));
}

#[test]
fn batch_sources_feed_aggregate_bypass() {
    let validator = AssumptionValidator::for_industry("qsr").unwrap();

    let mut loyalty = CampaignAssumptions::new();
    loyalty.insert("uplift_pct".into(), SourceMetadata::new(5.0, AssumptionSource::Gong));
    let mut shifts = CampaignAssumptions::new();
    shifts.insert(
        "coverage_pct".into(),
        SourceMetadata::new(3.0, AssumptionSource::Gong).with_incentive_cost(0.01),
    );

    let sources: Vec<AssumptionSource> = [
        validator.validate_campaign("Loyalty Rewards", &loyalty),
        validator.validate_campaign("Shift Coverage", &shifts),
    ]
    .iter()
    .flat_map(|c| c.source_list())
    .collect();

    let total = validator.guardrails().validate_total(4_000_000.0, 10_000_000.0, &sources);
    assert!(total.valid);
}

#[test]
fn metadata_from_research_json() {
    let json = r#"{
        "uplift_pct": {"value": 5, "source": "web", "incentive_cost": 0.25},
        "visits": {"value": "TBD", "source": "GONG"},
        "retention": {"source": "manual", "incentive_cost": 50}
    }"#;
    let assumptions: CampaignAssumptions = serde_json::from_str(json).unwrap();
    let out = AssumptionValidator::default().validate_campaign("Loyalty Rewards", &assumptions);

    assert!(out.valid);
    let reasons: Vec<&str> = out.results.iter().map(|r| r.reason.as_str()).collect();
    assert_eq!(
        reasons,
        vec![
            "ROPS 20.0x within 10-30x range",
            "Gong-sourced assumption — accepted without validation",
            "No ROPS data available, accepting",
        ]
    );
}

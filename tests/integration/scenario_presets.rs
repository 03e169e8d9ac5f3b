use super::support::heavy_lifestyle;
use super::IntegrationHarness;
use anyhow::Result;
use carbontrack::calculator::{CalculationSettings, Category};
use carbontrack::scenario::ReductionAction;
use carbontrack::ReportingPeriod;
use std::collections::BTreeSet;

const EPS: f64 = 1e-6;

#[test]
fn simulation_compounds_within_category_and_leaves_history_alone() -> Result<()> {
    let harness = IntegrationHarness::new();
    let tracker = harness.tracker();
    let baseline = harness.record_on(&tracker, 0, &heavy_lifestyle());

    let actions = BTreeSet::from([ReductionAction::Carpool, ReductionAction::BikeWalkTwoDays]);
    let outcome = tracker
        .simulate_latest(&actions)?
        .expect("history has a latest record");

    let transport = baseline.categories.get(Category::Transportation);
    let simulated = outcome.simulated.categories.get(Category::Transportation);
    assert!((simulated - transport * 0.56).abs() < EPS);
    assert!((outcome.savings_kg - transport * 0.44).abs() < EPS);
    for category in [Category::Diet, Category::Electricity, Category::Waste] {
        assert!(
            (outcome.simulated.categories.get(category) - baseline.categories.get(category)).abs()
                < EPS
        );
    }

    assert_eq!(tracker.history().len()?, 1);
    let stored = tracker.history().latest()?.expect("stored record");
    assert!((stored.total - baseline.total).abs() < EPS);
    Ok(())
}

#[test]
fn every_action_lowers_the_heavy_lifestyle() -> Result<()> {
    let harness = IntegrationHarness::new();
    let tracker = harness.tracker();
    let baseline = harness.record_on(&tracker, 0, &heavy_lifestyle());
    for spec in ReductionAction::all() {
        let outcome = tracker
            .simulate_latest(&BTreeSet::from([spec.action]))?
            .expect("latest record");
        assert!(outcome.simulated.total < baseline.total, "{}", spec.action.as_str());
        assert!(outcome.savings_fraction > 0.0 && outcome.savings_fraction < 1.0);
    }
    Ok(())
}

#[test]
fn presets_show_large_savings() -> Result<()> {
    let harness = IntegrationHarness::new();
    let tracker = harness.tracker();
    let comparison = tracker.compare_presets("India")?;
    assert!((comparison.high.total - 11_452.0).abs() < EPS);
    assert!((comparison.low.total - 2_684.8).abs() < EPS);
    assert!((comparison.savings_kg - 8_767.2).abs() < EPS);
    assert!(comparison.savings_fraction > 0.75);
    assert!(tracker.history().is_empty()?);
    Ok(())
}

#[test]
fn presets_reject_unknown_country() {
    let harness = IntegrationHarness::new();
    let tracker = harness.tracker();
    assert!(tracker.compare_presets("Atlantis").is_err());
}

#[test]
fn daily_period_scales_every_category() -> Result<()> {
    let harness = IntegrationHarness::new();
    let annual = harness.tracker().preview(&heavy_lifestyle())?;
    let daily = harness
        .tracker_with(CalculationSettings {
            period: ReportingPeriod::Daily,
            ..CalculationSettings::default()
        })
        .preview(&heavy_lifestyle())?;

    assert_eq!(daily.period, ReportingPeriod::Daily);
    assert!((daily.total * 365.0 - annual.total).abs() < EPS);
    assert!((daily.annualized_total() - annual.total).abs() < EPS);
    Ok(())
}

use super::support::{heavy_lifestyle, light_lifestyle};
use super::IntegrationHarness;
use anyhow::Result;
use carbontrack::badges::BadgeId;
use carbontrack::stats::Trend;

#[test]
fn tracker_badge_arrives_with_tenth_calculation() -> Result<()> {
    let harness = IntegrationHarness::new();
    let tracker = harness.tracker();
    for day in 0..9 {
        harness.record_on(&tracker, day, &heavy_lifestyle());
    }
    assert_eq!(tracker.statistics()?.count, 9);
    assert!(!tracker.badges()?.contains(&BadgeId::Tracker));

    harness.record_on(&tracker, 9, &heavy_lifestyle());
    assert_eq!(tracker.statistics()?.count, 10);
    assert!(tracker.badges()?.contains(&BadgeId::Tracker));
    Ok(())
}

#[test]
fn switching_lifestyle_shows_improving_trend() -> Result<()> {
    let harness = IntegrationHarness::new();
    let tracker = harness.tracker();
    let first = harness.record_on(&tracker, 0, &heavy_lifestyle());
    harness.record_on(&tracker, 1, &heavy_lifestyle());
    harness.record_on(&tracker, 2, &heavy_lifestyle());
    let last = harness.record_on(&tracker, 3, &light_lifestyle());

    let stats = tracker.statistics()?;
    assert_eq!(stats.count, 4);
    assert_eq!(stats.trend, Trend::Improving);
    assert_eq!(stats.first_date, Some(first.timestamp));
    assert_eq!(stats.last_date, Some(last.timestamp));
    let minimum = stats.minimum.expect("minimum present");
    assert!((minimum - last.total).abs() < 1e-6);

    let badges = tracker.badges()?;
    for badge in [
        BadgeId::FirstStep,
        BadgeId::LowCarbonHero,
        BadgeId::ClimateChampion,
        BadgeId::Improving,
        BadgeId::GreenCommuter,
        BadgeId::PlantPowered,
        BadgeId::RecyclingPro,
    ] {
        assert!(badges.contains(&badge), "missing {badge:?}");
    }
    assert!(!badges.contains(&BadgeId::Tracker));
    Ok(())
}

#[test]
fn relapse_shows_worsening_trend() -> Result<()> {
    let harness = IntegrationHarness::new();
    let tracker = harness.tracker();
    harness.record_on(&tracker, 0, &light_lifestyle());
    harness.record_on(&tracker, 1, &light_lifestyle());
    harness.record_on(&tracker, 2, &heavy_lifestyle());

    assert_eq!(tracker.statistics()?.trend, Trend::Worsening);
    assert!(!tracker.badges()?.contains(&BadgeId::Improving));
    Ok(())
}

#[test]
fn clearing_history_resets_derived_views() -> Result<()> {
    let harness = IntegrationHarness::new();
    let tracker = harness.tracker();
    harness.record_on(&tracker, 0, &heavy_lifestyle());
    harness.record_on(&tracker, 1, &light_lifestyle());

    tracker.clear_history()?;
    assert!(tracker.history().list()?.is_empty());
    let stats = tracker.statistics()?;
    assert_eq!(stats.count, 0);
    assert!(stats.average.is_none());
    assert!(tracker.badges()?.is_empty());
    Ok(())
}

#[test]
fn recent_returns_newest_first() -> Result<()> {
    let harness = IntegrationHarness::new();
    let tracker = harness.tracker();
    for day in 0..5 {
        harness.record_on(&tracker, day, &light_lifestyle());
    }
    let recent = tracker.history().recent(3)?;
    assert_eq!(recent.len(), 3);
    assert!(recent.windows(2).all(|w| w[0].timestamp > w[1].timestamp));
    Ok(())
}

use super::support::{heavy_lifestyle, light_lifestyle};
use super::IntegrationHarness;
use anyhow::Result;
use carbontrack::badges::BadgeId;
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn goal_progress_tracks_latest_against_first_record() -> Result<()> {
    let harness = IntegrationHarness::new();
    let tracker = harness.tracker();
    tracker.goals().set_goal(2000.0, date(2026, 12, 31))?;

    assert!(tracker.goal_progress(date(2026, 6, 1))?.is_none());

    harness.record_on(&tracker, 0, &heavy_lifestyle());
    let progress = tracker
        .goal_progress(date(2026, 6, 1))?
        .expect("progress with history");
    assert!(!progress.achieved);
    assert_eq!(progress.progress_fraction, 0.0);
    assert_eq!(progress.days_remaining, 213);

    harness.record_on(&tracker, 1, &light_lifestyle());
    let dashboard = tracker.dashboard_on(date(2027, 1, 5))?;
    let progress = dashboard.goal_progress.expect("goal progress");
    assert!(progress.achieved);
    assert_eq!(progress.progress_fraction, 1.0);
    assert_eq!(progress.days_remaining, -5);
    assert!(dashboard.badges.contains(&BadgeId::ClimateChampion));
    assert_eq!(dashboard.goal.map(|g| g.target), Some(2000.0));
    Ok(())
}

#[test]
fn new_goal_supersedes_previous() -> Result<()> {
    let harness = IntegrationHarness::new();
    let tracker = harness.tracker();
    tracker.goals().set_goal(5000.0, date(2026, 6, 30))?;
    tracker.goals().set_goal(3000.0, date(2027, 6, 30))?;

    let active = tracker.goals().active_goal()?.expect("active goal");
    assert_eq!(active.target, 3000.0);
    assert_eq!(active.deadline, date(2027, 6, 30));

    tracker.goals().clear_goal()?;
    assert!(tracker.goals().active_goal()?.is_none());
    assert!(tracker.dashboard_on(date(2026, 1, 1))?.goal.is_none());
    Ok(())
}

#[test]
fn goals_survive_history_clear() -> Result<()> {
    let harness = IntegrationHarness::new();
    let tracker = harness.tracker();
    tracker.goals().set_goal(2500.0, date(2027, 1, 1))?;
    harness.record_on(&tracker, 0, &light_lifestyle());
    tracker.clear_history()?;
    assert!(tracker.goals().active_goal()?.is_some());
    Ok(())
}

#[test]
fn dashboard_reports_next_badges() -> Result<()> {
    let harness = IntegrationHarness::new();
    let tracker = harness.tracker();
    let heavy = harness.record_on(&tracker, 0, &heavy_lifestyle());
    let dashboard = tracker.dashboard_on(date(2026, 2, 1))?;
    assert_eq!(dashboard.next_badges.calculations_to_tracker, 9);
    let reduction = dashboard
        .next_badges
        .champion_reduction_kg
        .expect("heavy lifestyle is above the champion threshold");
    assert!((reduction - (heavy.total - 2000.0)).abs() < 1e-6);
    Ok(())
}

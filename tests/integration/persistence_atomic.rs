use super::support::{day_stamp, heavy_lifestyle, light_lifestyle};
use super::IntegrationHarness;
use anyhow::Result;
use carbontrack::{FootprintError, StateStore};
use serde_json::{json, Map, Value};
use std::fs;

#[test]
fn state_survives_reopening() -> Result<()> {
    let harness = IntegrationHarness::new();
    {
        let tracker = harness.tracker();
        harness.record_on(&tracker, 0, &heavy_lifestyle());
        harness.record_on(&tracker, 1, &light_lifestyle());
        let mut updates = Map::new();
        updates.insert("name".into(), json!("Asha"));
        tracker.user_settings().update(updates)?;
    }

    let reopened = harness.tracker();
    let history = reopened.history().list()?;
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].timestamp, day_stamp(0));
    assert_eq!(history[1].country, "India");
    assert_eq!(
        reopened.user_settings().get()?.get("name"),
        Some(&Value::from("Asha"))
    );
    Ok(())
}

#[test]
fn persisted_document_uses_category_names() -> Result<()> {
    let harness = IntegrationHarness::new();
    let tracker = harness.tracker();
    harness.record_on(&tracker, 0, &light_lifestyle());

    let raw = fs::read_to_string(harness.store().path())?;
    let doc: Value = serde_json::from_str(&raw)?;
    let record = &doc["calculations"][0];
    for key in ["Transportation", "Diet", "Electricity", "Waste"] {
        assert!(record["categories"][key].is_number(), "missing {key}");
    }
    assert_eq!(record["inputs"]["diet"], "Vegan");
    assert!(doc["goals"].as_array().is_some_and(Vec::is_empty));
    Ok(())
}

#[test]
fn corrupt_document_is_reported_and_left_untouched() {
    let harness = IntegrationHarness::new();
    let store = harness.store();
    fs::write(store.path(), "{ not json").unwrap();

    let tracker = harness.tracker();
    let err = tracker.submit(&light_lifestyle()).unwrap_err();
    assert!(matches!(err, FootprintError::Persistence { .. }));
    assert!(store.load().is_err());
    assert_eq!(fs::read_to_string(store.path()).unwrap(), "{ not json");
}

#[test]
fn out_of_order_append_is_rejected() -> Result<()> {
    let harness = IntegrationHarness::new();
    let tracker = harness.tracker();
    harness.record_on(&tracker, 5, &light_lifestyle());

    let stale = tracker
        .calculator()
        .calculate_at(&heavy_lifestyle(), day_stamp(2))?;
    let err = tracker.history().append(&stale).unwrap_err();
    assert!(matches!(err, FootprintError::Validation { .. }));
    assert_eq!(tracker.history().len()?, 1);
    Ok(())
}

#[test]
fn saves_leave_no_temporary_files() -> Result<()> {
    let harness = IntegrationHarness::new();
    let tracker = harness.tracker();
    for day in 0..3 {
        harness.record_on(&tracker, day, &light_lifestyle());
    }
    let entries: Vec<_> = fs::read_dir(harness.workspace_path())?
        .map(|entry| entry.map(|e| e.file_name()))
        .collect::<std::io::Result<_>>()?;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0], "carbon_history.json");
    Ok(())
}

use super::support::light_lifestyle;
use anyhow::Result;
use carbontrack::config::{self, WorkspacePaths};
use carbontrack::{ActivityInput, AppConfig, FootprintError, FootprintTracker, ReportingPeriod};
use std::fs;
use tempfile::TempDir;

const SMALL_TABLE: &str = r#"{
  "Testland": {
    "Transportation": { "Bicycle/Walk": 0.0, "Bus": 0.1 },
    "Diet": { "Vegan": 1000 },
    "Electricity": 0.5,
    "Waste": 1.0
  }
}"#;

#[test]
fn tracker_follows_saved_config() -> Result<()> {
    let tmp = TempDir::new()?;
    let paths = WorkspacePaths::new(tmp.path().to_path_buf());
    paths.ensure()?;

    let table_path = tmp.path().join("factors.json");
    fs::write(&table_path, SMALL_TABLE)?;

    let mut cfg = AppConfig::default();
    cfg.calculation.period = ReportingPeriod::Monthly;
    cfg.storage.history_file = "footprints.json".into();
    cfg.factors.table_path = Some(table_path);
    config::save_to(&paths.config_file(), &cfg)?;

    let loaded = config::load_from(&paths.config_file())?;
    assert_eq!(loaded, cfg);

    let tracker = FootprintTracker::from_config(&loaded, &paths)?;
    assert_eq!(tracker.factors().countries().collect::<Vec<_>>(), ["Testland"]);

    let input = ActivityInput::new("Testland", "Vegan")
        .with_transport("Bus", 10.0)
        .with_electricity(100.0);
    let result = tracker.submit(&input)?;
    assert_eq!(result.period, ReportingPeriod::Monthly);
    // (260 + 1000 + 600) / 12
    assert!((result.total - 155.0).abs() < 1e-9);
    assert!(paths.data_dir.join("footprints.json").exists());
    Ok(())
}

#[test]
fn builtin_countries_are_unknown_to_custom_table() -> Result<()> {
    let tmp = TempDir::new()?;
    let paths = WorkspacePaths::new(tmp.path().to_path_buf());
    let table_path = tmp.path().join("factors.json");
    fs::write(&table_path, SMALL_TABLE)?;
    let mut cfg = AppConfig::default();
    cfg.factors.table_path = Some(table_path);

    let tracker = FootprintTracker::from_config(&cfg, &paths)?;
    let err = tracker.preview(&light_lifestyle()).unwrap_err();
    assert!(matches!(err, FootprintError::UnknownCountry { .. }));
    Ok(())
}

#[test]
fn malformed_factor_table_fails_to_open() {
    let tmp = TempDir::new().unwrap();
    let paths = WorkspacePaths::new(tmp.path().to_path_buf());
    let table_path = tmp.path().join("factors.json");
    fs::write(
        &table_path,
        r#"{ "Testland": { "Transportation": { "Bus": -1 }, "Diet": {}, "Electricity": 0.5, "Waste": 1.0 } }"#,
    )
    .unwrap();
    let mut cfg = AppConfig::default();
    cfg.factors.table_path = Some(table_path);

    let err = FootprintTracker::from_config(&cfg, &paths).err().unwrap();
    assert!(format!("{err:#}").contains("Failed to load emission factors"));
}

#[test]
fn default_config_uses_builtin_table() -> Result<()> {
    let tmp = TempDir::new()?;
    let paths = WorkspacePaths::new(tmp.path().to_path_buf());
    let tracker = FootprintTracker::from_config(&AppConfig::default(), &paths)?;
    assert!(tracker.factors().countries().any(|c| c == "India"));
    assert_eq!(
        tracker.store().path(),
        paths.data_dir.join("carbon_history.json")
    );
    Ok(())
}

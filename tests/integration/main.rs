mod config_workspace;
mod goals_badges;
mod history_trend;
mod persistence_atomic;
mod scenario_presets;

pub use support::IntegrationHarness;

pub mod badges;
pub mod calculator;
pub mod config;
pub mod error;
pub mod factors;
pub mod goals;
pub mod scenario;
pub mod stats;
pub mod storage;
pub mod tracker;

// Re-export commonly used types for convenience.
pub use calculator::{
    ActivityInput, CalculationSettings, FootprintCalculator, FootprintResult, ReportingPeriod,
};
pub use config::AppConfig;
pub use error::{FootprintError, Result};
pub use factors::EmissionFactorTable;
pub use storage::{JsonFileStore, StateStore};
pub use tracker::{Dashboard, FootprintTracker};

use crate::badges::{self, BadgeId, NextBadgeProgress};
use crate::calculator::{
    compare_presets, ActivityInput, CalculationSettings, FootprintCalculator, FootprintResult,
    PresetComparison,
};
use crate::config::{self, AppConfig};
use crate::error::Result;
use crate::factors::EmissionFactorTable;
use crate::goals::{evaluate_progress, Goal, GoalProgress, GoalTracker};
use crate::scenario::{simulate, ReductionAction, SimulationOutcome};
use crate::stats::{compute_statistics, Statistics};
use crate::storage::{HistoryStore, JsonFileStore, SettingsStore, StateStore};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::collections::BTreeSet;

/// Everything derived from the stored history at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub latest: Option<FootprintResult>,
    pub statistics: Statistics,
    pub badges: BTreeSet<BadgeId>,
    pub next_badges: NextBadgeProgress,
    pub goal: Option<Goal>,
    pub goal_progress: Option<GoalProgress>,
}

/// Facade wiring calculation, history, statistics, badges and goals together.
pub struct FootprintTracker<S: StateStore = JsonFileStore> {
    factors: EmissionFactorTable,
    settings: CalculationSettings,
    store: S,
}

impl FootprintTracker<JsonFileStore> {
    /// Opens the tracker described by the workspace config.
    pub fn open() -> anyhow::Result<Self> {
        let paths = config::ensure_workspace_structure()?;
        let cfg = config::load_or_default()?;
        Self::from_config(&cfg, &paths)
    }

    pub fn from_config(cfg: &AppConfig, paths: &config::WorkspacePaths) -> anyhow::Result<Self> {
        let factors = cfg.load_factor_table()?;
        let store = cfg.history_store(paths);
        log::debug!("Using history file {}", store.path().display());
        Ok(Self::new(factors, cfg.calculation, store))
    }
}

impl<S: StateStore> FootprintTracker<S> {
    pub fn new(factors: EmissionFactorTable, settings: CalculationSettings, store: S) -> Self {
        Self {
            factors,
            settings,
            store,
        }
    }

    pub fn factors(&self) -> &EmissionFactorTable {
        &self.factors
    }

    pub fn calculation_settings(&self) -> &CalculationSettings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn calculator(&self) -> FootprintCalculator<'_> {
        FootprintCalculator::new(&self.factors, self.settings)
    }

    pub fn history(&self) -> HistoryStore<'_, S> {
        HistoryStore::new(&self.store)
    }

    pub fn goals(&self) -> GoalTracker<'_, S> {
        GoalTracker::new(&self.store)
    }

    pub fn user_settings(&self) -> SettingsStore<'_, S> {
        SettingsStore::new(&self.store)
    }

    /// Calculates without recording anything.
    pub fn preview(&self, input: &ActivityInput) -> Result<FootprintResult> {
        self.calculator().calculate(input)
    }

    /// Calculates, appends the result to history and returns it.
    pub fn submit(&self, input: &ActivityInput) -> Result<FootprintResult> {
        let result = self.calculator().calculate(input)?;
        self.history().append(&result)?;
        Ok(result)
    }

    pub fn statistics(&self) -> Result<Statistics> {
        Ok(compute_statistics(&self.history().list()?))
    }

    /// Earned badges; empty while there is no history.
    pub fn badges(&self) -> Result<BTreeSet<BadgeId>> {
        let history = self.history().list()?;
        let statistics = compute_statistics(&history);
        Ok(match history.last() {
            Some(latest) => badges::evaluate(&history, latest, &statistics),
            None => BTreeSet::new(),
        })
    }

    pub fn goal_progress(&self, today: NaiveDate) -> Result<Option<GoalProgress>> {
        let Some(goal) = self.goals().active_goal()? else {
            return Ok(None);
        };
        let history = self.history().list()?;
        Ok(history
            .last()
            .map(|latest| evaluate_progress(&goal, latest, history.first(), today)))
    }

    /// What-if on the latest stored footprint; `None` without history.
    pub fn simulate_latest(
        &self,
        actions: &BTreeSet<ReductionAction>,
    ) -> Result<Option<SimulationOutcome>> {
        Ok(self
            .history()
            .latest()?
            .map(|latest| simulate(&latest, actions)))
    }

    pub fn compare_presets(&self, country: &str) -> Result<PresetComparison> {
        compare_presets(&self.calculator(), country)
    }

    pub fn clear_history(&self) -> Result<()> {
        self.history().clear()
    }

    pub fn dashboard(&self) -> Result<Dashboard> {
        self.dashboard_on(Local::now().date_naive())
    }

    /// Recomputes every derived view from one snapshot of the stored state.
    pub fn dashboard_on(&self, today: NaiveDate) -> Result<Dashboard> {
        let state = self.store.load()?;
        let mut history = state.calculations;
        history.sort_by_key(|record| record.timestamp);
        let statistics = compute_statistics(&history);
        let latest = history.last().cloned();

        let badges = match &latest {
            Some(latest) => badges::evaluate(&history, latest, &statistics),
            None => BTreeSet::new(),
        };
        let next_badges = badges::next_badge_progress(latest.as_ref(), &statistics);
        let goal = state.goals.into_iter().rev().find(|goal| goal.active);
        let goal_progress = match (&goal, &latest) {
            (Some(goal), Some(latest)) => {
                Some(evaluate_progress(goal, latest, history.first(), today))
            }
            _ => None,
        };

        Ok(Dashboard {
            latest,
            statistics,
            badges,
            next_badges,
            goal,
            goal_progress,
        })
    }
}

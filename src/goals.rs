//! Reduction goal: one active annual target with a deadline.

use crate::calculator::FootprintResult;
use crate::error::{ensure_non_negative, Result};
use crate::storage::StateStore;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// Target annual footprint, kg CO2e.
    pub target: f64,
    pub deadline: NaiveDate,
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    /// How far the footprint has moved toward the target, in [0, 1].
    pub progress_fraction: f64,
    pub achieved: bool,
    /// Negative once the deadline has passed.
    pub days_remaining: i64,
    /// Reduction still needed, kg CO2e per year; zero once achieved.
    pub remaining_kg: f64,
}

/// Goal storage on top of the shared persisted document.
pub struct GoalTracker<'a, S: StateStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: StateStore + ?Sized> GoalTracker<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Replaces the active goal. Earlier goals are kept but marked inactive.
    pub fn set_goal(&self, target: f64, deadline: NaiveDate) -> Result<Goal> {
        ensure_non_negative("goal target", target)?;
        let goal = Goal {
            target,
            deadline,
            created: Utc::now(),
            active: true,
        };
        let mut state = self.store.load()?;
        for previous in state.goals.iter_mut() {
            previous.active = false;
        }
        state.goals.push(goal.clone());
        self.store.save(&state)?;
        log::info!("Goal set: {target:.0} kg CO2e by {deadline}");
        Ok(goal)
    }

    pub fn active_goal(&self) -> Result<Option<Goal>> {
        Ok(self
            .store
            .load()?
            .goals
            .into_iter()
            .rev()
            .find(|goal| goal.active))
    }

    /// Deactivates the active goal, returning it if there was one.
    pub fn clear_goal(&self) -> Result<Option<Goal>> {
        let mut state = self.store.load()?;
        let cleared = state.goals.iter().rev().find(|g| g.active).cloned();
        if cleared.is_some() {
            for goal in state.goals.iter_mut() {
                goal.active = false;
            }
            self.store.save(&state)?;
            log::info!("Active goal cleared");
        }
        Ok(cleared)
    }
}

/// Compares `latest` against `goal`.
///
/// `baseline` is the first recorded footprint. When it sits above the target,
/// progress is the share of the baseline-to-target gap already closed;
/// otherwise it falls back to `target / latest`.
pub fn evaluate_progress(
    goal: &Goal,
    latest: &FootprintResult,
    baseline: Option<&FootprintResult>,
    today: NaiveDate,
) -> GoalProgress {
    let current = latest.annualized_total();
    let achieved = current <= goal.target;
    let days_remaining = (goal.deadline - today).num_days();

    let progress_fraction = if achieved {
        1.0
    } else {
        match baseline.map(FootprintResult::annualized_total) {
            Some(start) if start > goal.target => {
                ((start - current) / (start - goal.target)).clamp(0.0, 1.0)
            }
            _ => (goal.target / current).clamp(0.0, 1.0),
        }
    };

    GoalProgress {
        progress_fraction,
        achieved,
        days_remaining,
        remaining_kg: (current - goal.target).max(0.0),
    }
}

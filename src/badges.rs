//! Achievement badges, re-derived from history on every evaluation.
//!
//! Nothing about badges is persisted: the earned set is a pure function of
//! the latest footprint, the full history and its statistics.

use crate::calculator::FootprintResult;
use crate::stats::{Statistics, Trend};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Annual footprint below which `low_carbon_hero` is earned, kg CO2e.
pub const LOW_CARBON_HERO_KG: f64 = 3_000.0;
/// Annual footprint below which `climate_champion` is earned, kg CO2e.
pub const CLIMATE_CHAMPION_KG: f64 = 2_000.0;
pub const TRACKER_CALCULATIONS: usize = 10;
pub const RECYCLING_PRO_RATE: f64 = 0.70;

/// Modes counted as eco-friendly commuting.
pub const ECO_FRIENDLY_MODES: &[&str] = &["Bicycle/Walk", "Metro/Train", "Bus", "Electric Vehicle"];
pub const PLANT_BASED_DIETS: &[&str] = &["Vegetarian", "Vegan"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeId {
    FirstStep,
    LowCarbonHero,
    ClimateChampion,
    Tracker,
    Improving,
    GreenCommuter,
    PlantPowered,
    RecyclingPro,
}

/// Display metadata for one badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BadgeDefinition {
    pub id: BadgeId,
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

pub const CATALOG: [BadgeDefinition; 8] = [
    BadgeDefinition {
        id: BadgeId::FirstStep,
        icon: "🎯",
        title: "First Step",
        description: "Completed first calculation",
    },
    BadgeDefinition {
        id: BadgeId::LowCarbonHero,
        icon: "🌟",
        title: "Low Carbon Hero",
        description: "Under 3 tonnes CO₂e",
    },
    BadgeDefinition {
        id: BadgeId::ClimateChampion,
        icon: "💚",
        title: "Climate Champion",
        description: "Under 2 tonnes CO₂e",
    },
    BadgeDefinition {
        id: BadgeId::Tracker,
        icon: "📊",
        title: "Tracker",
        description: "10 calculations completed",
    },
    BadgeDefinition {
        id: BadgeId::Improving,
        icon: "📉",
        title: "Improving",
        description: "Downward emissions trend",
    },
    BadgeDefinition {
        id: BadgeId::GreenCommuter,
        icon: "🚲",
        title: "Green Commuter",
        description: "Using eco-friendly transport",
    },
    BadgeDefinition {
        id: BadgeId::PlantPowered,
        icon: "🥗",
        title: "Plant Powered",
        description: "Vegetarian or Vegan diet",
    },
    BadgeDefinition {
        id: BadgeId::RecyclingPro,
        icon: "♻️",
        title: "Recycling Pro",
        description: "70%+ recycling rate",
    },
];

impl BadgeId {
    pub fn definition(&self) -> &'static BadgeDefinition {
        &CATALOG[*self as usize]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeId::FirstStep => "first_step",
            BadgeId::LowCarbonHero => "low_carbon_hero",
            BadgeId::ClimateChampion => "climate_champion",
            BadgeId::Tracker => "tracker",
            BadgeId::Improving => "improving",
            BadgeId::GreenCommuter => "green_commuter",
            BadgeId::PlantPowered => "plant_powered",
            BadgeId::RecyclingPro => "recycling_pro",
        }
    }
}

/// Badges earned given the latest footprint and the statistics of the full history.
/// The current rules read count and trend from `statistics` and ignore `history`.
pub fn evaluate(
    _history: &[FootprintResult],
    latest: &FootprintResult,
    statistics: &Statistics,
) -> BTreeSet<BadgeId> {
    let mut earned = BTreeSet::new();
    let annual = latest.annualized_total();
    let inputs = &latest.inputs;

    if statistics.count >= 1 {
        earned.insert(BadgeId::FirstStep);
    }
    if annual < LOW_CARBON_HERO_KG {
        earned.insert(BadgeId::LowCarbonHero);
    }
    if annual < CLIMATE_CHAMPION_KG {
        earned.insert(BadgeId::ClimateChampion);
    }
    if statistics.count >= TRACKER_CALCULATIONS {
        earned.insert(BadgeId::Tracker);
    }
    if statistics.trend == Trend::Improving {
        earned.insert(BadgeId::Improving);
    }
    if !inputs.transport.is_empty()
        && inputs
            .transport
            .iter()
            .all(|leg| ECO_FRIENDLY_MODES.contains(&leg.mode.as_str()))
    {
        earned.insert(BadgeId::GreenCommuter);
    }
    if PLANT_BASED_DIETS.contains(&inputs.diet.as_str()) {
        earned.insert(BadgeId::PlantPowered);
    }
    if inputs.recycling_rate >= RECYCLING_PRO_RATE {
        earned.insert(BadgeId::RecyclingPro);
    }
    earned
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BadgeStatus {
    pub badge: BadgeDefinition,
    pub earned: bool,
}

/// Every badge in catalog order with its earned flag.
pub fn badge_board(earned: &BTreeSet<BadgeId>) -> Vec<BadgeStatus> {
    CATALOG
        .iter()
        .map(|badge| BadgeStatus {
            badge: *badge,
            earned: earned.contains(&badge.id),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextBadgeProgress {
    /// Share of the calculations needed for `tracker`, capped at 1.
    pub tracker_fraction: f64,
    pub calculations_to_tracker: usize,
    /// Annual reduction still needed for `climate_champion`; `None` once earned.
    pub champion_reduction_kg: Option<f64>,
}

pub fn next_badge_progress(
    latest: Option<&FootprintResult>,
    statistics: &Statistics,
) -> NextBadgeProgress {
    let champion_reduction_kg = latest
        .map(FootprintResult::annualized_total)
        .filter(|annual| *annual >= CLIMATE_CHAMPION_KG)
        .map(|annual| annual - CLIMATE_CHAMPION_KG);
    NextBadgeProgress {
        tracker_fraction: (statistics.count as f64 / TRACKER_CALCULATIONS as f64).min(1.0),
        calculations_to_tracker: TRACKER_CALCULATIONS.saturating_sub(statistics.count),
        champion_reduction_kg,
    }
}

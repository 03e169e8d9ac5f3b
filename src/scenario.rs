//! What-if simulation of reduction actions on top of a calculated footprint.
//!
//! Actions on the same category compound on the part that is still left:
//! two actions of 30% and 20% leave 0.7 * 0.8 = 56% of the category.

use crate::calculator::{Category, FootprintResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReductionAction {
    BikeWalkTwoDays,
    Carpool,
    PublicTransport,
    LedBulbs,
    SolarPanels,
    EfficientAppliances,
    ReduceMeat,
    GoVegetarian,
    LocalFood,
    Compost,
    RecycleMore,
    ReduceWaste,
}

/// Static description of one action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionSpec {
    pub action: ReductionAction,
    pub category: Category,
    pub reduction: f64,
    pub description: &'static str,
}

const ACTIONS: [ActionSpec; 12] = [
    ActionSpec {
        action: ReductionAction::BikeWalkTwoDays,
        category: Category::Transportation,
        reduction: 0.20,
        description: "Bike or walk 2 days per week",
    },
    ActionSpec {
        action: ReductionAction::Carpool,
        category: Category::Transportation,
        reduction: 0.30,
        description: "Carpool 3 days per week",
    },
    ActionSpec {
        action: ReductionAction::PublicTransport,
        category: Category::Transportation,
        reduction: 0.60,
        description: "Switch to public transport",
    },
    ActionSpec {
        action: ReductionAction::LedBulbs,
        category: Category::Electricity,
        reduction: 0.15,
        description: "Switch to LED bulbs",
    },
    ActionSpec {
        action: ReductionAction::SolarPanels,
        category: Category::Electricity,
        reduction: 0.50,
        description: "Install solar panels",
    },
    ActionSpec {
        action: ReductionAction::EfficientAppliances,
        category: Category::Electricity,
        reduction: 0.20,
        description: "Use energy-efficient appliances",
    },
    ActionSpec {
        action: ReductionAction::ReduceMeat,
        category: Category::Diet,
        reduction: 0.25,
        description: "Halve meat consumption",
    },
    ActionSpec {
        action: ReductionAction::GoVegetarian,
        category: Category::Diet,
        reduction: 0.45,
        description: "Go vegetarian",
    },
    ActionSpec {
        action: ReductionAction::LocalFood,
        category: Category::Diet,
        reduction: 0.10,
        description: "Buy local food",
    },
    ActionSpec {
        action: ReductionAction::Compost,
        category: Category::Waste,
        reduction: 0.30,
        description: "Start composting",
    },
    ActionSpec {
        action: ReductionAction::RecycleMore,
        category: Category::Waste,
        reduction: 0.60,
        description: "Raise recycling to 80%",
    },
    ActionSpec {
        action: ReductionAction::ReduceWaste,
        category: Category::Waste,
        reduction: 0.25,
        description: "Produce 25% less waste",
    },
];

impl ReductionAction {
    pub fn all() -> impl Iterator<Item = &'static ActionSpec> {
        ACTIONS.iter()
    }

    pub fn spec(&self) -> &'static ActionSpec {
        // ACTIONS lists every variant exactly once.
        &ACTIONS[*self as usize]
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let wanted = raw.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        ACTIONS
            .iter()
            .map(|spec| spec.action)
            .find(|action| action.as_str() == wanted)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReductionAction::BikeWalkTwoDays => "bike_walk_two_days",
            ReductionAction::Carpool => "carpool",
            ReductionAction::PublicTransport => "public_transport",
            ReductionAction::LedBulbs => "led_bulbs",
            ReductionAction::SolarPanels => "solar_panels",
            ReductionAction::EfficientAppliances => "efficient_appliances",
            ReductionAction::ReduceMeat => "reduce_meat",
            ReductionAction::GoVegetarian => "go_vegetarian",
            ReductionAction::LocalFood => "local_food",
            ReductionAction::Compost => "compost",
            ReductionAction::RecycleMore => "recycle_more",
            ReductionAction::ReduceWaste => "reduce_waste",
        }
    }
}

/// Hypothetical footprint after applying `actions`. Never persisted.
pub fn apply_reductions(
    baseline: &FootprintResult,
    actions: &BTreeSet<ReductionAction>,
) -> FootprintResult {
    let mut categories = baseline.categories;
    for action in actions {
        let spec = action.spec();
        *categories.get_mut(spec.category) *= 1.0 - spec.reduction;
    }
    baseline.with_categories(categories)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    pub baseline_total: f64,
    pub simulated: FootprintResult,
    pub savings_kg: f64,
    pub savings_fraction: f64,
}

pub fn simulate(
    baseline: &FootprintResult,
    actions: &BTreeSet<ReductionAction>,
) -> SimulationOutcome {
    let simulated = apply_reductions(baseline, actions);
    let savings_kg = baseline.total - simulated.total;
    let savings_fraction = if baseline.total > 0.0 {
        savings_kg / baseline.total
    } else {
        0.0
    };
    SimulationOutcome {
        baseline_total: baseline.total,
        simulated,
        savings_kg,
        savings_fraction,
    }
}

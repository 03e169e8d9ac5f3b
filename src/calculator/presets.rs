//! Canned high- and low-carbon lifestyles, run through the regular calculator.

use super::{ActivityInput, FootprintCalculator, FootprintResult};
use crate::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    HighCarbon,
    LowCarbon,
}

impl Preset {
    pub fn label(&self) -> &'static str {
        match self {
            Preset::HighCarbon => "High Carbon",
            Preset::LowCarbon => "Low Carbon",
        }
    }

    /// Activity inputs describing the preset lifestyle in `country`.
    pub fn input(&self, country: &str) -> ActivityInput {
        match self {
            // 50 km each way by petrol car, heavy meat diet, little recycling.
            Preset::HighCarbon => ActivityInput::new(country, "High Meat Eater")
                .with_transport("Car (Petrol)", 100.0)
                .with_electricity(300.0)
                .with_waste(10.0, 0.2),
            Preset::LowCarbon => ActivityInput::new(country, "Vegetarian")
                .with_transport("Metro/Train", 20.0)
                .with_electricity(80.0)
                .with_waste(3.0, 0.8),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetComparison {
    pub high: FootprintResult,
    pub low: FootprintResult,
    pub savings_kg: f64,
    pub savings_fraction: f64,
}

pub fn compare_presets(
    calculator: &FootprintCalculator<'_>,
    country: &str,
) -> Result<PresetComparison> {
    let high = calculator.calculate(&Preset::HighCarbon.input(country))?;
    let low = calculator.calculate(&Preset::LowCarbon.input(country))?;
    let savings_kg = high.total - low.total;
    let savings_fraction = if high.total > 0.0 {
        savings_kg / high.total
    } else {
        0.0
    };
    Ok(PresetComparison {
        high,
        low,
        savings_kg,
        savings_fraction,
    })
}

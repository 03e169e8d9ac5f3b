//! Footprint calculation.
//!
//! Every stored emission value is kilograms of CO2e for the configured
//! [`ReportingPeriod`]. Inputs arrive in their natural units (km per
//! commuting day, kWh per month, kg of waste per week, annual diet factor)
//! and are normalized to the period before they are summed.

pub mod presets;

pub use presets::{compare_presets, Preset, PresetComparison};

use crate::error::{ensure_fraction, ensure_non_negative, FootprintError, Result};
use crate::factors::EmissionFactorTable;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const MONTHS_PER_YEAR: f64 = 12.0;
const WEEKS_PER_YEAR: f64 = 52.0;

/// Period every category is expressed in before summation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportingPeriod {
    Daily,
    Weekly,
    Monthly,
    #[default]
    Annual,
}

impl ReportingPeriod {
    pub fn occurrences_per_year(&self) -> f64 {
        match self {
            ReportingPeriod::Daily => 365.0,
            ReportingPeriod::Weekly => WEEKS_PER_YEAR,
            ReportingPeriod::Monthly => MONTHS_PER_YEAR,
            ReportingPeriod::Annual => 1.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportingPeriod::Daily => "daily",
            ReportingPeriod::Weekly => "weekly",
            ReportingPeriod::Monthly => "monthly",
            ReportingPeriod::Annual => "annual",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "daily" | "day" => Some(ReportingPeriod::Daily),
            "weekly" | "week" => Some(ReportingPeriod::Weekly),
            "monthly" | "month" => Some(ReportingPeriod::Monthly),
            "annual" | "yearly" | "year" => Some(ReportingPeriod::Annual),
            _ => None,
        }
    }
}

/// Calculation knobs persisted in the `[calculation]` config section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculationSettings {
    #[serde(default)]
    pub period: ReportingPeriod,
    /// Commuting days per year; transport legs are entered per commuting day.
    #[serde(default = "default_commute_days_per_year")]
    pub commute_days_per_year: f64,
}

impl Default for CalculationSettings {
    fn default() -> Self {
        Self {
            period: ReportingPeriod::default(),
            commute_days_per_year: default_commute_days_per_year(),
        }
    }
}

const fn default_commute_days_per_year() -> f64 {
    260.0
}

/// One transport line item: a mode and the km travelled with it per commuting day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportLeg {
    pub mode: String,
    pub daily_km: f64,
}

impl TransportLeg {
    pub fn new(mode: impl Into<String>, daily_km: f64) -> Self {
        Self {
            mode: mode.into(),
            daily_km,
        }
    }
}

/// User-entered lifestyle data for one calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityInput {
    pub country: String,
    #[serde(default)]
    pub transport: Vec<TransportLeg>,
    pub diet: String,
    #[serde(default)]
    pub monthly_electricity_kwh: f64,
    #[serde(default)]
    pub weekly_waste_kg: f64,
    /// Fraction of waste recycled or composted, in [0, 1].
    #[serde(default)]
    pub recycling_rate: f64,
}

impl ActivityInput {
    pub fn new(country: impl Into<String>, diet: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            transport: Vec::new(),
            diet: diet.into(),
            monthly_electricity_kwh: 0.0,
            weekly_waste_kg: 0.0,
            recycling_rate: 0.0,
        }
    }

    pub fn with_transport(mut self, mode: impl Into<String>, daily_km: f64) -> Self {
        self.transport.push(TransportLeg::new(mode, daily_km));
        self
    }

    pub fn with_electricity(mut self, monthly_kwh: f64) -> Self {
        self.monthly_electricity_kwh = monthly_kwh;
        self
    }

    pub fn with_waste(mut self, weekly_kg: f64, recycling_rate: f64) -> Self {
        self.weekly_waste_kg = weekly_kg;
        self.recycling_rate = recycling_rate;
        self
    }

    fn validate(&self) -> Result<()> {
        for leg in &self.transport {
            ensure_non_negative("transport distance", leg.daily_km)?;
        }
        ensure_non_negative("electricity usage", self.monthly_electricity_kwh)?;
        ensure_non_negative("waste mass", self.weekly_waste_kg)?;
        ensure_fraction("recycling rate", self.recycling_rate)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Transportation,
    Diet,
    Electricity,
    Waste,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Transportation,
        Category::Diet,
        Category::Electricity,
        Category::Waste,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Transportation => "Transportation",
            Category::Diet => "Diet",
            Category::Electricity => "Electricity",
            Category::Waste => "Waste",
        }
    }
}

/// Per-category emissions in kg CO2e.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryEmissions {
    #[serde(rename = "Transportation")]
    pub transportation: f64,
    #[serde(rename = "Diet")]
    pub diet: f64,
    #[serde(rename = "Electricity")]
    pub electricity: f64,
    #[serde(rename = "Waste")]
    pub waste: f64,
}

impl CategoryEmissions {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Transportation => self.transportation,
            Category::Diet => self.diet,
            Category::Electricity => self.electricity,
            Category::Waste => self.waste,
        }
    }

    pub fn get_mut(&mut self, category: Category) -> &mut f64 {
        match category {
            Category::Transportation => &mut self.transportation,
            Category::Diet => &mut self.diet,
            Category::Electricity => &mut self.electricity,
            Category::Waste => &mut self.waste,
        }
    }

    pub fn sum(&self) -> f64 {
        self.transportation + self.diet + self.electricity + self.waste
    }

    /// Fraction of the total contributed by each category; all zero for a zero total.
    pub fn shares(&self) -> Vec<(Category, f64)> {
        let total = self.sum();
        Category::ALL
            .iter()
            .map(|category| {
                let share = if total > 0.0 {
                    self.get(*category) / total
                } else {
                    0.0
                };
                (*category, share)
            })
            .collect()
    }
}

/// Outcome of one calculation. `total` is always the sum of `categories`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootprintResult {
    pub timestamp: DateTime<Utc>,
    pub country: String,
    #[serde(default)]
    pub period: ReportingPeriod,
    pub categories: CategoryEmissions,
    pub total: f64,
    pub inputs: ActivityInput,
}

impl FootprintResult {
    pub fn new(
        timestamp: DateTime<Utc>,
        period: ReportingPeriod,
        categories: CategoryEmissions,
        inputs: ActivityInput,
    ) -> Self {
        Self {
            timestamp,
            country: inputs.country.clone(),
            period,
            total: categories.sum(),
            categories,
            inputs,
        }
    }

    /// Copy with replaced category values and a recomputed total.
    pub fn with_categories(&self, categories: CategoryEmissions) -> Self {
        Self {
            categories,
            total: categories.sum(),
            ..self.clone()
        }
    }

    /// Total scaled to kg CO2e per year, whatever period it was computed for.
    pub fn annualized_total(&self) -> f64 {
        self.total * self.period.occurrences_per_year()
    }

    pub fn total_tonnes(&self) -> f64 {
        kg_to_tonnes(self.total)
    }
}

pub fn kg_to_tonnes(kg: f64) -> f64 {
    kg / 1000.0
}

/// Maps activity inputs to a [`FootprintResult`] using one factor table.
#[derive(Debug, Clone, Copy)]
pub struct FootprintCalculator<'a> {
    factors: &'a EmissionFactorTable,
    settings: CalculationSettings,
}

impl<'a> FootprintCalculator<'a> {
    pub fn new(factors: &'a EmissionFactorTable, settings: CalculationSettings) -> Self {
        Self { factors, settings }
    }

    pub fn settings(&self) -> &CalculationSettings {
        &self.settings
    }

    pub fn calculate(&self, input: &ActivityInput) -> Result<FootprintResult> {
        self.calculate_at(input, Utc::now())
    }

    /// Pure calculation stamped with a caller-provided timestamp.
    pub fn calculate_at(
        &self,
        input: &ActivityInput,
        timestamp: DateTime<Utc>,
    ) -> Result<FootprintResult> {
        input.validate()?;
        ensure_non_negative("commute days per year", self.settings.commute_days_per_year)?;

        let country = &input.country;
        let factors = self.factors.country(country)?;
        let period = self.settings.period.occurrences_per_year();

        let mut transport_per_day = 0.0;
        for leg in &input.transport {
            transport_per_day += leg.daily_km * self.factors.transport_factor(country, &leg.mode)?;
        }
        let diet_per_year = self.factors.diet_factor(country, &input.diet)?;
        let electricity_per_month = input.monthly_electricity_kwh * factors.electricity;
        let unrecycled_kg = input.weekly_waste_kg * (1.0 - input.recycling_rate);
        let waste_per_week = unrecycled_kg * factors.waste;

        let categories = CategoryEmissions {
            transportation: transport_per_day * self.settings.commute_days_per_year / period,
            diet: diet_per_year / period,
            electricity: electricity_per_month * MONTHS_PER_YEAR / period,
            waste: waste_per_week * WEEKS_PER_YEAR / period,
        };
        for category in Category::ALL {
            let value = categories.get(category);
            if !value.is_finite() {
                return Err(FootprintError::validation(
                    category.label(),
                    format!("emission overflowed (got {value})"),
                ));
            }
        }
        if !categories.sum().is_finite() {
            return Err(FootprintError::validation("total", "emission overflowed"));
        }

        Ok(FootprintResult::new(
            timestamp,
            self.settings.period,
            categories,
            input.clone(),
        ))
    }
}

//! Country-keyed emission factor tables.
//!
//! A table maps each country to its per-category coefficients:
//!   Transportation: kg CO2e per km, keyed by mode
//!   Diet:           kg CO2e per year, keyed by diet category
//!   Electricity:    kg CO2e per kWh
//!   Waste:          kg CO2e per kg of unrecycled waste
//!   CookingFuel:    optional, kg CO2e per unit of fuel
//!
//! Tables are validated once when loaded. A table that passes
//! [`EmissionFactorTable::from_json_str`] only fails later on genuine lookup
//! misses (unknown country, mode or diet category).

pub mod benchmarks;

pub use benchmarks::{compare_to_benchmarks, country_average_kg, BenchmarkComparison};

use crate::error::{FootprintError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const BUILTIN_TABLE: &str = include_str!("emission_factors.json");

/// Coefficients for a single country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CountryFactors {
    #[serde(rename = "Transportation")]
    pub transportation: BTreeMap<String, f64>,
    #[serde(rename = "Diet")]
    pub diet: BTreeMap<String, f64>,
    #[serde(rename = "Electricity")]
    pub electricity: f64,
    #[serde(rename = "Waste")]
    pub waste: f64,
    #[serde(
        rename = "CookingFuel",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub cooking_fuel: Option<BTreeMap<String, f64>>,
}

impl CountryFactors {
    pub fn transport_modes(&self) -> impl Iterator<Item = &str> {
        self.transportation.keys().map(String::as_str)
    }

    pub fn diet_categories(&self) -> impl Iterator<Item = &str> {
        self.diet.keys().map(String::as_str)
    }

    fn issues(&self, country: &str) -> Vec<String> {
        let mut issues = Vec::new();
        if self.transportation.is_empty() {
            issues.push(format!("{country}: Transportation has no modes"));
        }
        if self.diet.is_empty() {
            issues.push(format!("{country}: Diet has no categories"));
        }
        let mut check = |label: String, value: f64| {
            if !value.is_finite() || value < 0.0 {
                issues.push(format!("{label} must be a non-negative number (got {value})"));
            }
        };
        for (mode, value) in &self.transportation {
            check(format!("{country}.Transportation.{mode}"), *value);
        }
        for (category, value) in &self.diet {
            check(format!("{country}.Diet.{category}"), *value);
        }
        check(format!("{country}.Electricity"), self.electricity);
        check(format!("{country}.Waste"), self.waste);
        if let Some(fuels) = &self.cooking_fuel {
            for (fuel, value) in fuels {
                check(format!("{country}.CookingFuel.{fuel}"), *value);
            }
        }
        issues
    }
}

/// Immutable lookup of [`CountryFactors`] by country name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmissionFactorTable {
    countries: BTreeMap<String, CountryFactors>,
}

impl EmissionFactorTable {
    /// Builds a table and validates every coefficient, reporting all problems at once.
    pub fn new(countries: BTreeMap<String, CountryFactors>) -> Result<Self> {
        let mut issues = Vec::new();
        if countries.is_empty() {
            issues.push("table contains no countries".to_string());
        }
        for (country, factors) in &countries {
            if country.trim().is_empty() {
                issues.push("country name must not be empty".to_string());
            }
            issues.extend(factors.issues(country));
        }
        if !issues.is_empty() {
            return Err(FootprintError::MalformedFactorTable { issues });
        }
        Ok(Self { countries })
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let countries: BTreeMap<String, CountryFactors> =
            serde_json::from_str(raw).map_err(|err| FootprintError::MalformedFactorTable {
                issues: vec![err.to_string()],
            })?;
        Self::new(countries)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|err| FootprintError::persistence(path, err))?;
        let table = Self::from_json_str(&raw)?;
        log::info!(
            "Loaded emission factors for {} countries from {}",
            table.countries.len(),
            path.display()
        );
        Ok(table)
    }

    /// Table compiled into the crate (India, USA, UK, China, Australia).
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_TABLE)
    }

    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.countries.keys().map(String::as_str)
    }

    pub fn country(&self, country: &str) -> Result<&CountryFactors> {
        self.countries
            .get(country)
            .ok_or_else(|| FootprintError::UnknownCountry {
                country: country.to_string(),
            })
    }

    pub fn transport_factor(&self, country: &str, mode: &str) -> Result<f64> {
        lookup(country, "Transportation", &self.country(country)?.transportation, mode)
    }

    pub fn diet_factor(&self, country: &str, category: &str) -> Result<f64> {
        lookup(country, "Diet", &self.country(country)?.diet, category)
    }

    pub fn cooking_fuel_factor(&self, country: &str, fuel: &str) -> Result<f64> {
        let factors = self.country(country)?;
        match &factors.cooking_fuel {
            Some(fuels) => lookup(country, "CookingFuel", fuels, fuel),
            None => Err(FootprintError::UnknownFactor {
                country: country.to_string(),
                category: "CookingFuel".to_string(),
                key: fuel.to_string(),
            }),
        }
    }
}

fn lookup(country: &str, category: &str, map: &BTreeMap<String, f64>, key: &str) -> Result<f64> {
    map.get(key)
        .copied()
        .ok_or_else(|| FootprintError::UnknownFactor {
            country: country.to_string(),
            category: category.to_string(),
            key: key.to_string(),
        })
}

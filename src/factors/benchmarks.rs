use crate::calculator::FootprintResult;
use serde::{Deserialize, Serialize};

/// Global per-capita average, kg CO2e per year.
pub const GLOBAL_AVERAGE_KG: f64 = 4_700.0;

/// Per-capita level compatible with the 2050 climate target, kg CO2e per year.
pub const TARGET_2050_KG: f64 = 2_000.0;

const COUNTRY_AVERAGES_KG: &[(&str, f64)] = &[
    ("India", 1_900.0),
    ("USA", 15_500.0),
    ("UK", 5_500.0),
    ("China", 8_000.0),
    ("Australia", 15_400.0),
];

/// National per-capita average; countries without a published figure fall back to the global average.
pub fn country_average_kg(country: &str) -> f64 {
    COUNTRY_AVERAGES_KG
        .iter()
        .find(|(name, _)| *name == country)
        .map(|(_, kg)| *kg)
        .unwrap_or(GLOBAL_AVERAGE_KG)
}

/// Signed differences (footprint minus benchmark) for an annualized footprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkComparison {
    pub annual_total_kg: f64,
    pub country_average_kg: f64,
    pub vs_country_kg: f64,
    pub vs_global_kg: f64,
    pub vs_2050_target_kg: f64,
}

pub fn compare_to_benchmarks(result: &FootprintResult) -> BenchmarkComparison {
    let annual = result.annualized_total();
    let country_avg = country_average_kg(&result.country);
    BenchmarkComparison {
        annual_total_kg: annual,
        country_average_kg: country_avg,
        vs_country_kg: annual - country_avg,
        vs_global_kg: annual - GLOBAL_AVERAGE_KG,
        vs_2050_target_kg: annual - TARGET_2050_KG,
    }
}

//! Aggregate statistics and trend classification over stored calculations.
//!
//! Totals are compared annualized so histories that mix reporting periods
//! stay comparable.

use crate::calculator::FootprintResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Below this share of the average the latest footprint counts as improving.
pub const IMPROVING_RATIO: f64 = 0.95;
/// Above this share of the average the latest footprint counts as worsening.
pub const WORSENING_RATIO: f64 = 1.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Improving,
    #[default]
    Neutral,
    Worsening,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Improving => "improving",
            Trend::Neutral => "neutral",
            Trend::Worsening => "worsening",
        }
    }
}

/// Derived view of the history; the optional fields are `None` when `count == 0`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Statistics {
    pub count: usize,
    pub average: Option<f64>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub first_date: Option<DateTime<Utc>>,
    pub last_date: Option<DateTime<Utc>>,
    pub trend: Trend,
}

/// Thresholds are exclusive: exactly 0.95x or 1.05x of the average is neutral.
pub fn classify_trend(latest: f64, average: f64) -> Trend {
    if latest < IMPROVING_RATIO * average {
        Trend::Improving
    } else if latest > WORSENING_RATIO * average {
        Trend::Worsening
    } else {
        Trend::Neutral
    }
}

pub fn compute_statistics(history: &[FootprintResult]) -> Statistics {
    if history.is_empty() {
        return Statistics::default();
    }

    let mut ordered: Vec<&FootprintResult> = history.iter().collect();
    ordered.sort_by_key(|record| record.timestamp);
    let totals: Vec<f64> = ordered.iter().map(|r| r.annualized_total()).collect();

    let count = totals.len();
    let average = totals.iter().sum::<f64>() / count as f64;
    let minimum = totals.iter().copied().fold(f64::INFINITY, f64::min);
    let maximum = totals.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    // The average includes the latest record itself.
    let trend = match totals.last() {
        Some(latest) if count >= 2 => classify_trend(*latest, average),
        _ => Trend::Neutral,
    };

    Statistics {
        count,
        average: Some(average),
        minimum: Some(minimum),
        maximum: Some(maximum),
        first_date: ordered.first().map(|r| r.timestamp),
        last_date: ordered.last().map(|r| r.timestamp),
        trend,
    }
}

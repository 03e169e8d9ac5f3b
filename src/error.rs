//! Error type shared by the calculator, the stores and the derived views.
//!
//! Lookup misses, range violations and storage failures all surface through
//! [`FootprintError`] so callers can match on the kind instead of parsing
//! messages.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FootprintError {
    /// Numeric input out of range (negative, non-finite, rate outside [0, 1]).
    #[error("invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// Country is not a key of the emission factor table.
    #[error("no emission factors for country '{country}'")]
    UnknownCountry { country: String },

    /// Transport mode or diet category missing from the country's factors.
    #[error("no {category} factor '{key}' for {country}")]
    UnknownFactor {
        country: String,
        category: String,
        key: String,
    },

    /// Factor table failed structural validation; every issue is listed.
    #[error("malformed emission factor table: {}", issues.join("; "))]
    MalformedFactorTable { issues: Vec<String> },

    /// Reading or writing the persisted state failed.
    #[error("persistence error at {}: {message}", path.display())]
    Persistence { path: PathBuf, message: String },
}

impl FootprintError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        FootprintError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn persistence(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        FootprintError::Persistence {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FootprintError>;

/// Rejects negative and non-finite quantities.
pub(crate) fn ensure_non_negative(field: &str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(FootprintError::validation(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(FootprintError::validation(
            field,
            format!("must not be negative (got {value})"),
        ));
    }
    Ok(value)
}

/// Rejects fractions outside the closed unit interval.
pub(crate) fn ensure_fraction(field: &str, value: f64) -> Result<f64> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(FootprintError::validation(
            field,
            format!("must be between 0 and 1 (got {value})"),
        ));
    }
    Ok(value)
}

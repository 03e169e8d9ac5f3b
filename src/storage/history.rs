use super::StateStore;
use crate::calculator::{Category, FootprintResult};
use crate::error::{FootprintError, Result};

const TOTAL_TOLERANCE: f64 = 1e-9;

/// Append-only log of calculations kept in the persisted document.
pub struct HistoryStore<'a, S: StateStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: StateStore + ?Sized> HistoryStore<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Appends `result` verbatim.
    ///
    /// Rejects results whose total disagrees with their categories and
    /// results older than the latest stored record, so storage order stays
    /// chronological.
    pub fn append(&self, result: &FootprintResult) -> Result<()> {
        check_result(result)?;
        let mut state = self.store.load()?;
        if let Some(last) = state.calculations.iter().map(|c| c.timestamp).max() {
            if result.timestamp < last {
                return Err(FootprintError::validation(
                    "timestamp",
                    format!(
                        "{} precedes the latest stored calculation ({last})",
                        result.timestamp
                    ),
                ));
            }
        }
        state.calculations.push(result.clone());
        self.store.save(&state)?;
        log::info!(
            "Recorded {:.2} kg CO2e for {} ({} calculations stored)",
            result.total,
            result.country,
            state.calculations.len()
        );
        Ok(())
    }

    /// All calculations, oldest first.
    pub fn list(&self) -> Result<Vec<FootprintResult>> {
        let mut calculations = self.store.load()?.calculations;
        calculations.sort_by_key(|c| c.timestamp);
        Ok(calculations)
    }

    /// Up to `limit` calculations, most recent first.
    pub fn recent(&self, limit: usize) -> Result<Vec<FootprintResult>> {
        let mut calculations = self.list()?;
        calculations.reverse();
        calculations.truncate(limit);
        Ok(calculations)
    }

    pub fn latest(&self) -> Result<Option<FootprintResult>> {
        Ok(self.list()?.pop())
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.store.load()?.calculations.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Drops every calculation. Goals and settings are kept.
    pub fn clear(&self) -> Result<()> {
        let mut state = self.store.load()?;
        let dropped = state.calculations.len();
        state.calculations.clear();
        self.store.save(&state)?;
        log::info!("Cleared {dropped} stored calculations");
        Ok(())
    }
}

fn check_result(result: &FootprintResult) -> Result<()> {
    for category in Category::ALL {
        let value = result.categories.get(category);
        if !value.is_finite() || value < 0.0 {
            return Err(FootprintError::validation(
                category.label(),
                format!("emission must be a non-negative number (got {value})"),
            ));
        }
    }
    if (result.total - result.categories.sum()).abs() > TOTAL_TOLERANCE {
        return Err(FootprintError::validation(
            "total",
            "does not match the sum of its categories",
        ));
    }
    Ok(())
}

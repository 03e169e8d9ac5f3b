use super::StateStore;
use crate::error::Result;
use serde_json::{Map, Value};

/// Free-form user settings kept next to history and goals.
pub struct SettingsStore<'a, S: StateStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: StateStore + ?Sized> SettingsStore<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub fn get(&self) -> Result<Map<String, Value>> {
        Ok(self.store.load()?.settings)
    }

    /// Merges `updates` into the stored settings; existing keys are overwritten.
    pub fn update(&self, updates: Map<String, Value>) -> Result<Map<String, Value>> {
        let mut state = self.store.load()?;
        state.settings.extend(updates);
        self.store.save(&state)?;
        Ok(state.settings)
    }
}

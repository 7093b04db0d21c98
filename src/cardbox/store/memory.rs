use super::SlotStore;
use crate::error::{CardboxError, Result};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// In-memory slot store.
///
/// Uses `RefCell` for interior mutability since cardbox is single-threaded.
/// Counts writes so tests can assert that a rejected operation never touched
/// the slot.
#[derive(Default)]
pub struct MemSlots {
    slots: RefCell<HashMap<String, String>>,
    writes: Cell<usize>,
    simulate_write_error: Cell<bool>,
}

impl MemSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store with `key` already holding `value`.
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::default();
        store
            .slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }

    /// Number of successful `set` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }
}

impl SlotStore for MemSlots {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(CardboxError::Store("Simulated write error".to_string()));
        }
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

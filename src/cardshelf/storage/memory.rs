use super::{validate_key, KeyValueStore};
use crate::error::{CardsError, Result};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// In-memory key-value store for testing.
///
/// Uses `RefCell` for interior mutability since the app is single-threaded. Counts
/// successful writes so tests can assert that an operation did (or did not) persist.
#[derive(Default)]
pub struct MemoryKv {
    entries: RefCell<HashMap<String, String>>,
    writes: Cell<usize>,
    simulate_write_error: Cell<bool>,
    simulate_read_error: Cell<bool>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `set` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    pub fn set_simulate_read_error(&self, simulate: bool) {
        self.simulate_read_error.set(simulate);
    }
}

impl KeyValueStore for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        if self.simulate_read_error.get() {
            return Err(CardsError::Store("Simulated read error".to_string()));
        }
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        if self.simulate_write_error.get() {
            return Err(CardsError::Store("Simulated write error".to_string()));
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_only_successful_writes() {
        let kv = MemoryKv::new();
        kv.set("a", "1").unwrap();
        kv.set_simulate_write_error(true);
        assert!(kv.set("a", "2").is_err());
        assert_eq!(kv.write_count(), 1);
        assert_eq!(kv.get("a").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn missing_key_is_none() {
        assert_eq!(MemoryKv::new().get("nope").unwrap(), None);
    }
}

//! In-memory variable store.

use std::collections::HashMap;

use attest_application::ports::VariableStore;
use serde_json::Value;

/// HashMap-backed variable store for single-process test sessions.
#[derive(Debug, Clone, Default)]
pub struct InMemoryVariableStore {
    values: HashMap<String, Value>,
}

impl InMemoryVariableStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing has been stored yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl VariableStore for InMemoryVariableStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }
}

//! Session variable store port

/// Port for the host's session-scoped key-value variable store.
///
/// Values written here outlive a single validation run and are readable by
/// later test steps in the same session. Writes are last-write-wins; the
/// host invokes validations sequentially, so no locking is required.
pub trait VariableStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<serde_json::Value>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: serde_json::Value);
}

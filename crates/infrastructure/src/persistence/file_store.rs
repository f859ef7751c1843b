//! JSON-file-backed variable store.
//!
//! Variables are kept as one flat JSON object so a session can resume
//! after a restart and values stay greppable:
//!
//! ```text
//! {
//!   "order_id": 3,
//!   "user_id": 42
//! }
//! ```

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use attest_application::ports::VariableStore;
use serde_json::Value;
use thiserror::Error;

/// Errors from loading or persisting the variable file.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the variable file failed.
    #[error("failed to access variable file: {0}")]
    Io(#[from] std::io::Error),

    /// The variable file does not contain a JSON object.
    #[error("variable file is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// File-backed variable store scoped to a test session.
///
/// Writes go through to disk immediately, so a value saved by one test
/// step is durable before the next step starts. A write failure is logged
/// and otherwise swallowed, keeping the store port infallible; hosts that
/// must observe persistence errors can call [`FileVariableStore::flush`].
#[derive(Debug)]
pub struct FileVariableStore {
    path: PathBuf,
    values: BTreeMap<String, Value>,
}

impl FileVariableStore {
    /// Opens the store at `path`, loading any existing variables.
    ///
    /// A missing or empty file yields an empty store.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or does not
    /// parse as a JSON object.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, values })
    }

    /// Returns the path the store persists to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes all variables to disk as pretty-printed JSON.
    ///
    /// Keys are written in sorted order so reruns produce stable files.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn flush(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut content = serde_json::to_string_pretty(&self.values)?;
        content.push('\n');
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl VariableStore for FileVariableStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
        if let Err(e) = self.flush() {
            tracing::error!("failed to persist variable '{key}': {e}");
        }
    }
}

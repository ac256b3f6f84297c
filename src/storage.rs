//! Persistent key-value store seam.
//!
//! SYSTEM CONTEXT
//! ==============
//! The page persists exactly one value (the display mode) in a synchronous,
//! page-scoped store that survives reloads. In the browser that is
//! `window.localStorage` (see `browser::LocalStore`); natively it is
//! [`MemoryStore`].
//!
//! TRADE-OFFS
//! ==========
//! Methods take `&self` because the browser store is a shared handle with
//! interior mutability; the in-memory store mirrors that with a `RefCell`.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::ErrorCode;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("write rejected for key {key}: {reason}")]
    Rejected { key: String, reason: String },
}

impl ErrorCode for StoreError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Unavailable(_) => "E_STORE_UNAVAILABLE",
            Self::Rejected { .. } => "E_STORE_REJECTED",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// Synchronous string key-value store that survives page reloads.
pub trait KeyValueStore {
    /// Read the value stored under `key`, or `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backing store cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the write is refused.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

// =============================================================================
// MEMORY STORE
// =============================================================================

/// In-memory store for tests and headless hosts. Contents die with the value.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
    read_only: bool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with a single entry.
    #[must_use]
    pub fn with_item(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.items.borrow_mut().insert(key.to_owned(), value.to_owned());
        store
    }

    /// Store that serves reads but refuses every write, like a full quota.
    #[must_use]
    pub fn read_only() -> Self {
        Self { items: RefCell::default(), read_only: true }
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    fn refuse(&self, key: &str) -> Result<(), StoreError> {
        if self.read_only {
            return Err(StoreError::Rejected { key: key.to_owned(), reason: "store is read-only".to_owned() });
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.refuse(key)?;
        self.items.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

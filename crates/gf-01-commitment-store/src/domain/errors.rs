//! # Error Types
//!
//! Backend errors and the errors a store handle surfaces to its callers.

use crate::adapters::lock::LockError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from a key/value backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KVStoreError {
    /// I/O error during read/write.
    #[error("KV store I/O error: {message}")]
    IOError { message: String },
    /// Data corruption in the store.
    #[error("KV store corruption: {message}")]
    CorruptionError { message: String },
}

/// Errors from the commitment store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The durable medium could not be initialized.
    #[error("store unavailable at {}: {reason}", path.display())]
    StoreUnavailable { path: PathBuf, reason: String },

    /// Another process holds the data directory.
    #[error("store unavailable: {0}")]
    Locked(#[from] LockError),

    /// A backend read or write failed after open.
    #[error("store backend failure: {0}")]
    Backend(#[from] KVStoreError),

    /// A thread panicked while holding the node cache.
    #[error("node cache lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    /// Whether the error means the backing medium could not be opened.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            StoreError::StoreUnavailable { .. } | StoreError::Locked(_)
        )
    }
}

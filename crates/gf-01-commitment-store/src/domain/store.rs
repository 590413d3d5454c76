//! # Store Handle
//!
//! `CommitmentStore::open` hands out a `StoreHandle` that owns everything it
//! touches: its node cache and, in durable mode, the backend and the data
//! directory lock. Closing consumes the handle, so nothing can be written
//! through it afterwards.

use crate::adapters::file::FileBackedKVStore;
use crate::adapters::lock::DatabaseLock;
use crate::domain::config::{DurableConfig, StoreBackend, StoreMode};
use crate::domain::errors::StoreError;
use crate::domain::schema;
use crate::ports::database::TrieDatabase;
use crate::ports::outbound::{FlushBatch, KeyValueStore};
use shared_types::Hash;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Opens store handles.
pub struct CommitmentStore;

impl CommitmentStore {
    /// Open a handle in the requested mode.
    ///
    /// Durable mode fails with `StoreUnavailable` when the data directory
    /// can not be locked or the backend can not be opened.
    pub fn open(mode: &StoreMode) -> Result<StoreHandle, StoreError> {
        match mode {
            StoreMode::Ephemeral => Ok(Self::open_ephemeral()),
            StoreMode::Durable(config) => Self::open_durable(config),
        }
    }

    /// Open an in-memory handle. Never fails.
    pub fn open_ephemeral() -> StoreHandle {
        tracing::trace!("[gf-01] opened ephemeral store");
        StoreHandle {
            cache: RwLock::new(HashMap::new()),
            durable: None,
        }
    }

    fn open_durable(config: &DurableConfig) -> Result<StoreHandle, StoreError> {
        let lock = DatabaseLock::acquire(&config.data_dir)?;
        let (backend, location) = open_backend(config)?;

        tracing::debug!(
            "[gf-01] opened durable store ({}) at {}",
            config.backend,
            location.display()
        );

        Ok(StoreHandle {
            cache: RwLock::new(HashMap::new()),
            durable: Some(DurableBacking {
                backend,
                location,
                _lock: lock,
            }),
        })
    }
}

fn open_backend(config: &DurableConfig) -> Result<(Box<dyn KeyValueStore>, PathBuf), StoreError> {
    match config.backend {
        StoreBackend::File => {
            let path = config.chaindata_file();
            let store = FileBackedKVStore::open(&path, config.sync_writes).map_err(|e| {
                StoreError::StoreUnavailable {
                    path: path.clone(),
                    reason: e.to_string(),
                }
            })?;
            Ok((Box::new(store), path))
        }
        #[cfg(feature = "rocksdb")]
        StoreBackend::RocksDb => {
            use crate::adapters::rocksdb_adapter::{RocksDbConfig, RocksDbStore};
            let path = config.chaindata_dir();
            let store = RocksDbStore::open(RocksDbConfig::new(&path, config.sync_writes))
                .map_err(|e| StoreError::StoreUnavailable {
                    path: path.clone(),
                    reason: e.to_string(),
                })?;
            Ok((Box::new(store), path))
        }
    }
}

struct DurableBacking {
    backend: Box<dyn KeyValueStore>,
    location: PathBuf,
    // Held for the lifetime of the handle; released on drop.
    _lock: DatabaseLock,
}

/// What a handle did when it was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseSummary {
    pub durable: bool,
    /// Entries written to the backend.
    pub flushed: usize,
    /// Entries dropped with the cache.
    pub discarded: usize,
}

/// An open commitment store.
pub struct StoreHandle {
    cache: RwLock<HashMap<Vec<u8>, Vec<u8>>>,
    durable: Option<DurableBacking>,
}

impl StoreHandle {
    pub fn is_durable(&self) -> bool {
        self.durable.is_some()
    }

    /// Backend location for durable handles.
    pub fn location(&self) -> Option<&Path> {
        self.durable.as_ref().map(|d| d.location.as_path())
    }

    /// Buffer a write. Durable handles persist it on `close`.
    pub fn put(&self, key: Vec<u8>, value: Vec<u8>) -> Result<(), StoreError> {
        let mut cache = self.cache.write().map_err(|_| StoreError::LockPoisoned)?;
        cache.insert(key, value);
        Ok(())
    }

    /// Read through the cache, then the backend.
    pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        {
            let cache = self.cache.read().map_err(|_| StoreError::LockPoisoned)?;
            if let Some(value) = cache.get(key) {
                return Ok(Some(value.clone()));
            }
        }
        match &self.durable {
            Some(durable) => Ok(durable.backend.get(key)?),
            None => Ok(None),
        }
    }

    /// Number of buffered writes not yet flushed.
    pub fn pending_writes(&self) -> Result<usize, StoreError> {
        let cache = self.cache.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(cache.len())
    }

    /// Close the handle. Durable handles flush every buffered write in one
    /// atomic batch; once this returns `Ok`, all of it can be read back by
    /// reopening the same directory. Ephemeral handles drop their contents.
    pub fn close(self) -> Result<CloseSummary, StoreError> {
        let cache = self
            .cache
            .into_inner()
            .map_err(|_| StoreError::LockPoisoned)?;

        match self.durable {
            Some(mut durable) => {
                let batch = FlushBatch::new(cache);
                let flushed = batch.len();
                durable.backend.write_batch(batch)?;
                tracing::debug!(
                    "[gf-01] flushed {} entries to {}",
                    flushed,
                    durable.location.display()
                );
                Ok(CloseSummary {
                    durable: true,
                    flushed,
                    discarded: 0,
                })
            }
            None => Ok(CloseSummary {
                durable: false,
                flushed: 0,
                discarded: cache.len(),
            }),
        }
    }

    /// Release the handle without flushing anything.
    pub fn discard(self) -> CloseSummary {
        let discarded = match self.cache.into_inner() {
            Ok(cache) => cache.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        };
        if let Some(durable) = &self.durable {
            tracing::debug!(
                "[gf-01] discarded {} buffered entries for {}",
                discarded,
                durable.location.display()
            );
        }
        CloseSummary {
            durable: self.durable.is_some(),
            flushed: 0,
            discarded,
        }
    }
}

impl TrieDatabase for StoreHandle {
    fn get_node(&self, hash: &Hash) -> Result<Option<Vec<u8>>, StoreError> {
        self.get(&schema::node_key(hash))
    }

    fn put_node(&self, hash: Hash, data: Vec<u8>) -> Result<(), StoreError> {
        self.put(schema::node_key(&hash), data)
    }

    fn batch_put(&self, nodes: Vec<(Hash, Vec<u8>)>) -> Result<(), StoreError> {
        let mut cache = self.cache.write().map_err(|_| StoreError::LockPoisoned)?;
        for (hash, data) in nodes {
            cache.insert(schema::node_key(&hash), data);
        }
        Ok(())
    }

    fn put_preimage(&self, hash: Hash, preimage: Vec<u8>) -> Result<(), StoreError> {
        self.put(schema::preimage_key(&hash), preimage)
    }

    fn put_code(&self, code_hash: Hash, code: Vec<u8>) -> Result<(), StoreError> {
        self.put(schema::code_key(&code_hash), code)
    }
}

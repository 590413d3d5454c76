//! # Outbound Ports (Driven Ports)
//!
//! The interface a durable backend implements. A backend is only written to
//! once per handle, when the handle closes, so it needs point reads and one
//! all-or-nothing batch write.
//!
//! Production: `FileBackedKVStore`, `RocksDbStore` (feature `rocksdb`).

use crate::domain::errors::KVStoreError;

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError>;

    /// Apply every entry of `batch`, or none of them.
    fn write_batch(&mut self, batch: FlushBatch) -> Result<(), KVStoreError>;
}

/// Buffered writes of one handle, sorted by key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlushBatch {
    entries: Vec<(Vec<u8>, Vec<u8>)>,
}

impl FlushBatch {
    pub fn new(entries: impl IntoIterator<Item = (Vec<u8>, Vec<u8>)>) -> Self {
        let mut entries: Vec<_> = entries.into_iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<(Vec<u8>, Vec<u8>)> {
        self.entries
    }
}

//! # RocksDB Storage Adapter
//!
//! RocksDB implementation of the KeyValueStore trait, enabled with the
//! `rocksdb` feature.
//!
//! The whole flush of a handle goes through one `WriteBatch`. Tables use
//! Snappy compression and bloom filters.

use crate::domain::errors::KVStoreError;
use crate::ports::outbound::{FlushBatch, KeyValueStore};
use ::rocksdb::{Options, WriteBatch, WriteOptions, DB};
use std::path::PathBuf;

/// RocksDB configuration.
#[derive(Debug, Clone)]
pub struct RocksDbConfig {
    /// Path to the database directory
    pub path: PathBuf,
    /// Block cache size in bytes (default: 64MB)
    pub block_cache_size: usize,
    /// Write buffer size in bytes (default: 16MB)
    pub write_buffer_size: usize,
    /// fsync after each write
    pub sync_writes: bool,
}

impl RocksDbConfig {
    pub fn new(path: impl Into<PathBuf>, sync_writes: bool) -> Self {
        Self {
            path: path.into(),
            block_cache_size: 64 * 1024 * 1024,
            write_buffer_size: 16 * 1024 * 1024,
            sync_writes,
        }
    }

    /// Create config for testing (smaller buffers, no sync)
    pub fn for_testing(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            block_cache_size: 8 * 1024 * 1024,
            write_buffer_size: 4 * 1024 * 1024,
            sync_writes: false,
        }
    }
}

/// RocksDB-backed key-value store.
pub struct RocksDbStore {
    db: DB,
    config: RocksDbConfig,
}

impl RocksDbStore {
    /// Open or create a RocksDB database
    pub fn open(config: RocksDbConfig) -> Result<Self, KVStoreError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.set_write_buffer_size(config.write_buffer_size);
        opts.set_compression_type(::rocksdb::DBCompressionType::Snappy);

        let mut block_opts = ::rocksdb::BlockBasedOptions::default();
        block_opts.set_bloom_filter(10.0, false);
        block_opts.set_block_cache(&::rocksdb::Cache::new_lru_cache(config.block_cache_size));
        opts.set_block_based_table_factory(&block_opts);

        let db = DB::open(&opts, &config.path).map_err(|e| KVStoreError::IOError {
            message: format!("Failed to open RocksDB: {}", e),
        })?;

        Ok(Self { db, config })
    }

    fn write_options(&self) -> WriteOptions {
        let mut write_opts = WriteOptions::default();
        write_opts.set_sync(self.config.sync_writes);
        write_opts
    }
}

impl KeyValueStore for RocksDbStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        self.db.get(key).map_err(|e| KVStoreError::IOError {
            message: format!("RocksDB get failed: {}", e),
        })
    }

    fn write_batch(&mut self, batch: FlushBatch) -> Result<(), KVStoreError> {
        let mut write = WriteBatch::default();
        for (key, value) in batch.into_entries() {
            write.put(&key, &value);
        }

        self.db
            .write_opt(write, &self.write_options())
            .map_err(|e| KVStoreError::IOError {
                message: format!("RocksDB batch write failed: {}", e),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_batch_write_and_reopen() {
        let dir = tempdir().unwrap();
        let config = RocksDbConfig::for_testing(dir.path().join("db"));

        let mut store = RocksDbStore::open(config.clone()).unwrap();
        store
            .write_batch(FlushBatch::new(vec![
                (b"c1".to_vec(), b"code".to_vec()),
                (b"c2".to_vec(), b"more".to_vec()),
            ]))
            .unwrap();
        drop(store);

        let store = RocksDbStore::open(config).unwrap();
        assert_eq!(store.get(b"c1").unwrap(), Some(b"code".to_vec()));
        assert_eq!(store.get(b"c2").unwrap(), Some(b"more".to_vec()));
        assert_eq!(store.get(b"c3").unwrap(), None);
    }
}

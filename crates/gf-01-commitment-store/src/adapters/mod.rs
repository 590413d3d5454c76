//! Durable backends and the data-directory lock.

pub mod file;
pub mod lock;
#[cfg(feature = "rocksdb")]
pub mod rocksdb_adapter;

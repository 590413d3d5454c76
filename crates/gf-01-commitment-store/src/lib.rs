//! # GF-01 Commitment Store
//!
//! Addressable byte store with a node-cache layer, used by the state
//! commitment builder and the genesis service.
//!
//! ## Modes
//!
//! - **Ephemeral**: writes live in the handle's cache and vanish on close.
//!   Opening can not fail.
//! - **Durable**: writes are buffered in the cache and flushed to a backing
//!   key/value store in one atomic batch on close. The data directory is
//!   guarded by a `LOCK` file for the lifetime of the handle.
//!
//! Every `open` returns an independent handle. Two handles never share
//! mutable state, which keeps concurrent genesis constructions isolated.
//!
//! ## Key Schema
//!
//! Durable keys follow the layout used by Ethereum clients (see
//! [`domain::schema`]), so a committed genesis can be inspected with
//! standard tooling.

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::file::FileBackedKVStore;
pub use adapters::lock::{DatabaseLock, LockError};
#[cfg(feature = "rocksdb")]
pub use adapters::rocksdb_adapter::{RocksDbConfig, RocksDbStore};
pub use domain::config::{DurableConfig, StoreBackend, StoreMode};
pub use domain::errors::{KVStoreError, StoreError};
pub use domain::schema;
pub use domain::store::{CloseSummary, CommitmentStore, StoreHandle};
pub use ports::database::TrieDatabase;
pub use ports::outbound::{FlushBatch, KeyValueStore};

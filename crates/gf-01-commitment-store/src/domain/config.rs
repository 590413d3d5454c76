//! Store modes and durable backend configuration.

use std::fmt;
use std::path::PathBuf;

/// Default directory for durable commitments.
pub const DEFAULT_DATA_DIR: &str = "./data/genesis";

/// How a store handle keeps what is written to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreMode {
    /// In-memory only; contents are discarded when the handle closes.
    Ephemeral,
    /// Flushed to a backing store on close.
    Durable(DurableConfig),
}

impl StoreMode {
    pub fn is_durable(&self) -> bool {
        matches!(self, StoreMode::Durable(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            StoreMode::Ephemeral => "ephemeral",
            StoreMode::Durable(_) => "durable",
        }
    }
}

/// Durable backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    /// Single length-prefixed binary file. No native build requirements.
    #[default]
    File,
    /// RocksDB database directory.
    #[cfg(feature = "rocksdb")]
    RocksDb,
}

impl StoreBackend {
    /// Parse a backend name as used in environment configuration.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "file" => Some(StoreBackend::File),
            #[cfg(feature = "rocksdb")]
            "rocksdb" => Some(StoreBackend::RocksDb),
            _ => None,
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::File => write!(f, "file"),
            #[cfg(feature = "rocksdb")]
            StoreBackend::RocksDb => write!(f, "rocksdb"),
        }
    }
}

/// Location and behaviour of a durable store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurableConfig {
    /// Directory holding the backing store and its `LOCK` file.
    pub data_dir: PathBuf,
    pub backend: StoreBackend,
    /// fsync the backing store on flush.
    pub sync_writes: bool,
}

impl Default for DurableConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            backend: StoreBackend::default(),
            sync_writes: true,
        }
    }
}

impl DurableConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }

    /// Config for tests (no fsync).
    pub fn for_testing(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            backend: StoreBackend::File,
            sync_writes: false,
        }
    }

    pub fn with_backend(mut self, backend: StoreBackend) -> Self {
        self.backend = backend;
        self
    }

    /// Path of the file-backed store inside the data directory.
    pub fn chaindata_file(&self) -> PathBuf {
        self.data_dir.join("chaindata.bin")
    }

    /// Path of the RocksDB directory inside the data directory.
    pub fn chaindata_dir(&self) -> PathBuf {
        self.data_dir.join("chaindata")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_names() {
        assert_eq!(StoreBackend::from_name("file"), Some(StoreBackend::File));
        assert_eq!(StoreBackend::from_name(" FILE "), Some(StoreBackend::File));
        assert_eq!(StoreBackend::from_name("leveldb"), None);
        assert_eq!(StoreBackend::File.to_string(), "file");
    }

    #[test]
    fn test_mode_labels() {
        assert_eq!(StoreMode::Ephemeral.label(), "ephemeral");
        let durable = StoreMode::Durable(DurableConfig::new("/tmp/x"));
        assert!(durable.is_durable());
        assert_eq!(durable.label(), "durable");
    }
}

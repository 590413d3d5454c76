//! # File-Backed Store
//!
//! Persists the whole key space to one binary file. Every write rewrites the
//! file through a temp file and a rename, so a crash leaves either the old
//! or the new contents on disk.
//!
//! Format: `[key_len:u32 LE][key][value_len:u32 LE][value]...`

use crate::domain::errors::KVStoreError;
use crate::ports::outbound::{FlushBatch, KeyValueStore};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct FileBackedKVStore {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
    path: PathBuf,
    sync_writes: bool,
}

fn io_error(context: &str, path: &Path, e: std::io::Error) -> KVStoreError {
    KVStoreError::IOError {
        message: format!("{context} {}: {e}", path.display()),
    }
}

impl FileBackedKVStore {
    /// Open the store at `path`, loading existing contents. A missing file is
    /// an empty store; a truncated or unreadable file is an error.
    pub fn open<P: AsRef<Path>>(path: P, sync_writes: bool) -> Result<Self, KVStoreError> {
        let path = path.as_ref().to_path_buf();

        let data = match std::fs::read(&path) {
            Ok(bytes) => {
                let data = Self::decode(&bytes)?;
                tracing::debug!(
                    "[gf-01] loaded {} keys from {} ({} bytes)",
                    data.len(),
                    path.display(),
                    bytes.len()
                );
                data
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("[gf-01] no existing store file at {}", path.display());
                BTreeMap::new()
            }
            Err(e) => return Err(io_error("failed to read", &path, e)),
        };

        Ok(Self {
            data,
            path,
            sync_writes,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn decode(bytes: &[u8]) -> Result<BTreeMap<Vec<u8>, Vec<u8>>, KVStoreError> {
        let mut data = BTreeMap::new();
        let mut cursor = 0;

        let take = |len: usize, cursor: &mut usize| -> Result<Vec<u8>, KVStoreError> {
            let end = cursor
                .checked_add(len)
                .filter(|end| *end <= bytes.len())
                .ok_or_else(|| KVStoreError::CorruptionError {
                    message: format!("record truncated at offset {}", *cursor),
                })?;
            let chunk = bytes[*cursor..end].to_vec();
            *cursor = end;
            Ok(chunk)
        };

        while cursor < bytes.len() {
            let key_len = read_len(&take(4, &mut cursor)?);
            let key = take(key_len, &mut cursor)?;
            let value_len = read_len(&take(4, &mut cursor)?);
            let value = take(value_len, &mut cursor)?;
            data.insert(key, value);
        }

        Ok(data)
    }

    fn save_to_file(&self) -> Result<(), KVStoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| io_error("failed to create", parent, e))?;
        }

        let mut bytes = Vec::new();
        for (key, value) in &self.data {
            bytes.extend_from_slice(&(key.len() as u32).to_le_bytes());
            bytes.extend_from_slice(key);
            bytes.extend_from_slice(&(value.len() as u32).to_le_bytes());
            bytes.extend_from_slice(value);
        }

        let temp_path = self.path.with_extension("tmp");
        let mut file = std::fs::File::create(&temp_path)
            .map_err(|e| io_error("failed to create", &temp_path, e))?;
        file.write_all(&bytes)
            .map_err(|e| io_error("failed to write", &temp_path, e))?;
        if self.sync_writes {
            file.sync_all()
                .map_err(|e| io_error("failed to sync", &temp_path, e))?;
        }

        std::fs::rename(&temp_path, &self.path)
            .map_err(|e| io_error("failed to replace", &self.path, e))?;

        Ok(())
    }
}

fn read_len(bytes: &[u8]) -> usize {
    let mut raw = [0u8; 4];
    raw.copy_from_slice(bytes);
    u32::from_le_bytes(raw) as usize
}

impl KeyValueStore for FileBackedKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn write_batch(&mut self, batch: FlushBatch) -> Result<(), KVStoreError> {
        let previous = self.data.clone();
        self.data.extend(batch.into_entries());
        if let Err(e) = self.save_to_file() {
            // Nothing reached disk; keep memory consistent with it.
            self.data = previous;
            return Err(e);
        }
        Ok(())
    }
}

//! # File Lock
//!
//! Uses `fs2` for cross-platform file locking (flock on Unix, LockFile on
//! Windows). A durable store handle holds the lock on its data directory
//! until it is closed or dropped.

use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from data directory locking.
#[derive(Debug, Error)]
pub enum LockError {
    /// The directory or lock file could not be created.
    #[error("failed to create lock file {}: {source}", path.display())]
    CreateFailed { path: PathBuf, source: io::Error },

    /// Another handle or process holds the lock.
    #[error("data directory already in use{} ({})", pid.map(|p| format!(" by process {p}")).unwrap_or_default(), path.display())]
    AlreadyLocked { pid: Option<u32>, path: PathBuf },

    /// Failed to record our PID in the lock file.
    #[error("failed to write PID to lock file: {0}")]
    WriteFailed(io::Error),
}

/// Exclusive lock on a data directory. Released on drop.
#[derive(Debug)]
pub struct DatabaseLock {
    file: File,
    path: PathBuf,
}

impl DatabaseLock {
    const LOCK_FILE: &'static str = "LOCK";

    /// Try to acquire the lock without waiting.
    pub fn acquire(data_dir: &Path) -> Result<Self, LockError> {
        std::fs::create_dir_all(data_dir).map_err(|source| LockError::CreateFailed {
            path: data_dir.to_path_buf(),
            source,
        })?;

        let lock_path = data_dir.join(Self::LOCK_FILE);
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|source| LockError::CreateFailed {
                path: lock_path.clone(),
                source,
            })?;

        if file.try_lock_exclusive().is_err() {
            return Err(LockError::AlreadyLocked {
                pid: Self::read_existing_pid(&lock_path),
                path: lock_path,
            });
        }

        let mut locked = file;
        locked.set_len(0).map_err(LockError::WriteFailed)?;
        writeln!(locked, "{}", std::process::id()).map_err(LockError::WriteFailed)?;
        locked.sync_all().map_err(LockError::WriteFailed)?;

        Ok(Self {
            file: locked,
            path: lock_path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_existing_pid(path: &Path) -> Option<u32> {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|s| s.trim().parse().ok())
    }
}

impl Drop for DatabaseLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
        let _ = std::fs::remove_file(&self.path);
    }
}

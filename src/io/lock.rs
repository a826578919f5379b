//! Lock file management for single-instance enforcement.
//!
//! An exclusive advisory lock (`flock`) on a file in the runtime directory marks
//! the one running background instance. The kernel drops the lock when its
//! holder dies, so a crashed instance never blocks the next one.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::File;
use std::io::{Seek, SeekFrom, Write};
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};

use crate::common::constants::LOCK_FILE_NAME;

const MAX_ACQUIRE_ATTEMPTS: usize = 3;

/// An acquired lock file. The lock is held for as long as this value lives.
pub struct LockFile {
    pub(crate) file: File,
    path: PathBuf,
}

impl LockFile {
    /// Try to take the exclusive lock at `path` without blocking.
    ///
    /// Returns `Ok(None)` when another process holds it. A lock won on a file
    /// that a releasing holder unlinked in the meantime does not count; the
    /// attempt is repeated on the file now at `path`.
    pub fn try_acquire(path: &Path) -> Result<Option<Self>> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create lock directory {}", parent.display()))?;
        }

        for _ in 0..MAX_ACQUIRE_ATTEMPTS {
            // Open without truncating so a held lock's contents survive the attempt
            let file = std::fs::OpenOptions::new()
                .read(true)
                .write(true)
                .create(true)
                .truncate(false)
                .open(path)
                .with_context(|| format!("Failed to open lock file {}", path.display()))?;

            if file.try_lock_exclusive().is_err() {
                return Ok(None);
            }

            if is_same_file(&file, path) {
                return Ok(Some(Self {
                    file,
                    path: path.to_path_buf(),
                }));
            }
        }

        anyhow::bail!(
            "Lock file {} kept being replaced while acquiring it",
            path.display()
        )
    }

    /// Replace the lock file's contents.
    pub fn write(&mut self, contents: &str) -> Result<()> {
        self.file.set_len(0)?;
        self.file.seek(SeekFrom::Start(0))?;
        self.file.write_all(contents.as_bytes())?;
        self.file.flush()?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the lock file and release the lock.
    ///
    /// The file is removed while still locked so a waiting process always
    /// locks a fresh file.
    pub fn release(self) -> Result<()> {
        let removed = std::fs::remove_file(&self.path);
        let unlocked = FileExt::unlock(&self.file);
        removed.with_context(|| format!("Failed to remove lock file {}", self.path.display()))?;
        unlocked.context("Failed to release lock")?;
        Ok(())
    }
}

/// Whether `file` is still the file linked at `path`.
fn is_same_file(file: &File, path: &Path) -> bool {
    match (file.metadata(), std::fs::metadata(path)) {
        (Ok(held), Ok(current)) => held.dev() == current.dev() && held.ino() == current.ino(),
        _ => false,
    }
}

/// Path of the lock file marking the running instance.
///
/// `$XDG_RUNTIME_DIR/autotheme.lock`, or `/tmp/autotheme.lock` without a runtime dir.
pub fn get_main_lock_path() -> PathBuf {
    let runtime_dir = std::env::var("XDG_RUNTIME_DIR")
        .ok()
        .filter(|dir| !dir.is_empty())
        .unwrap_or_else(|| "/tmp".to_string());
    PathBuf::from(runtime_dir).join(LOCK_FILE_NAME)
}

//! Shared helpers for path display, atomic file replacement and process waits.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::common::constants::PROCESS_POLL_INTERVAL_MS;

/// Render a path for display, replacing the home directory with `~`.
pub fn private_path(path: &Path) -> String {
    if let Some(home) = dirs::home_dir()
        && let Ok(stripped) = path.strip_prefix(&home)
    {
        return format!("~/{}", stripped.display());
    }
    path.display().to_string()
}

/// Replace `path` with `contents` atomically.
///
/// The data is written to a temporary file in the same directory and renamed
/// over the target, so a concurrent reader sees either the old or the new file.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    std::fs::create_dir_all(&parent)
        .with_context(|| format!("Failed to create directory {}", private_path(&parent)))?;

    let mut temp = tempfile::NamedTempFile::new_in(&parent)
        .with_context(|| format!("Failed to create temporary file in {}", private_path(&parent)))?;
    temp.write_all(contents.as_bytes())
        .context("Failed to write temporary file")?;
    temp.as_file()
        .sync_all()
        .context("Failed to flush temporary file")?;
    temp.persist(path)
        .with_context(|| format!("Failed to replace {}", private_path(path)))?;

    Ok(())
}

/// Poll `condition` every 100ms until it holds or `timeout_ms` elapses.
///
/// Returns whether the condition was met.
pub fn wait_until(timeout_ms: u64, mut condition: impl FnMut() -> bool) -> bool {
    let max_attempts = timeout_ms / PROCESS_POLL_INTERVAL_MS;
    for _ in 0..=max_attempts {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(PROCESS_POLL_INTERVAL_MS));
    }
    false
}

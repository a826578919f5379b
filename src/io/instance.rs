//! High-level instance management for autotheme processes.
//!
//! This module coordinates the background instance through its lock file:
//! detecting a running instance, signalling it, and spawning a new one. It
//! builds on top of the low-level lock file operations in `io::lock`.

use anyhow::{Context, Result};
use nix::errno::Errno;
use nix::sys::signal::{Signal, kill};
use nix::unistd::Pid;
use std::path::{Path, PathBuf};

use crate::common::constants::*;
use crate::common::utils::{private_path, wait_until};
use crate::io::lock::{self, LockFile};

/// Information about a running autotheme instance.
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceInfo {
    /// Process ID of the instance
    pub pid: u32,
    /// Custom config directory if set
    pub config_dir: Option<PathBuf>,
}

impl InstanceInfo {
    /// Describe the current process.
    pub fn current() -> Self {
        Self {
            pid: std::process::id(),
            config_dir: crate::config::get_custom_config_dir(),
        }
    }

    /// Parse instance info from lock file contents.
    ///
    /// Lock file format:
    /// - Line 1: PID
    /// - Line 2: Config directory (optional, empty if default)
    pub fn from_lock_contents(contents: &str) -> Result<Self> {
        let lines: Vec<&str> = contents.trim_end_matches('\n').lines().collect();

        if lines.is_empty() || lines[0].trim().is_empty() {
            anyhow::bail!("Lock file is empty");
        }

        if lines.len() > 2 {
            anyhow::bail!("Invalid lock file format (expected 1-2 lines)");
        }

        let pid = lines[0]
            .trim()
            .parse::<u32>()
            .context("Invalid PID format in lock file")?;

        let config_dir = lines
            .get(1)
            .filter(|line| !line.is_empty())
            .map(PathBuf::from);

        Ok(InstanceInfo { pid, config_dir })
    }

    /// Serialize instance info to lock file format.
    pub fn to_lock_contents(&self) -> String {
        match &self.config_dir {
            Some(config_dir) => format!("{}\n{}\n", self.pid, config_dir.display()),
            None => format!("{}\n", self.pid),
        }
    }
}

/// Outcome of trying to become the single running instance.
pub enum InstanceLock {
    /// This process now owns the lock.
    Acquired(LockFile),
    /// Another live instance owns it; `None` when it has not written its PID yet.
    AlreadyRunning(Option<InstanceInfo>),
}

/// Read the instance described by the lock file at `lock_path`, if its process is alive.
pub fn read_running_instance(lock_path: &Path) -> Result<Option<InstanceInfo>> {
    let lock_content = match std::fs::read_to_string(lock_path) {
        Ok(content) => content,
        Err(_) => return Ok(None), // No lock file means no instance running
    };

    let info = match InstanceInfo::from_lock_contents(&lock_content) {
        Ok(info) => info,
        Err(_) => return Ok(None),
    };

    if is_instance_running(info.pid) {
        Ok(Some(info))
    } else {
        Ok(None) // Process is dead, treat as no instance running
    }
}

/// Get information about the currently running autotheme instance.
///
/// Also adopts the instance's config directory for this process, so commands
/// like `reload` and `configure` edit the file the instance reads.
pub fn get_running_instance() -> Result<Option<InstanceInfo>> {
    let info = read_running_instance(&lock::get_main_lock_path())?;

    if let Some(config_dir) = info.as_ref().and_then(|info| info.config_dir.as_ref()) {
        // Ignore the error if --config already set it
        let _ = crate::config::set_config_dir(Some(config_dir.display().to_string()));
    }

    Ok(info)
}

/// Check if a process with the given PID is still running.
pub fn is_instance_running(pid: u32) -> bool {
    let Ok(raw) = i32::try_from(pid) else {
        return false;
    };
    if raw <= 0 {
        return false;
    }

    // Signal 0 only checks for existence; EPERM still means the process exists
    match kill(Pid::from_raw(raw), None) {
        Ok(()) => true,
        Err(Errno::EPERM) => true,
        Err(_) => false,
    }
}

fn signal_instance(pid: u32, signal: Signal) -> Result<()> {
    let raw = i32::try_from(pid).context("PID out of range")?;
    kill(Pid::from_raw(raw), signal)
        .map_err(|e| anyhow::anyhow!("Failed to send {signal} to process {pid}: {e}"))
}

/// Terminate an autotheme instance by sending SIGTERM.
pub fn terminate_instance(pid: u32) -> Result<()> {
    signal_instance(pid, Signal::SIGTERM)
}

/// Send a reload signal (SIGUSR2) to a running instance.
pub fn send_reload_signal(pid: u32) -> Result<()> {
    signal_instance(pid, Signal::SIGUSR2)
}

/// Wait up to `timeout_ms` for `pid` to exit. Returns whether it did.
pub fn wait_for_exit(pid: u32, timeout_ms: u64) -> bool {
    wait_until(timeout_ms, || !is_instance_running(pid))
}

/// Take the instance lock at `lock_path` and record `info` in it.
///
/// Whoever holds the flock is the running instance, whatever the file says:
/// the kernel drops the lock when its holder dies, so contents left behind by
/// a dead process are simply overwritten. When the lock is held, the holder
/// may not have written its PID yet; it is reported as unknown in that case.
pub fn acquire_instance_lock(lock_path: &Path, info: &InstanceInfo) -> Result<InstanceLock> {
    if let Some(mut lock) = LockFile::try_acquire(lock_path)? {
        lock.write(&info.to_lock_contents())?;
        return Ok(InstanceLock::Acquired(lock));
    }

    let mut holder = None;
    wait_until(LOCK_CONTENTS_TIMEOUT_MS, || {
        holder = std::fs::read_to_string(lock_path)
            .ok()
            .and_then(|contents| InstanceInfo::from_lock_contents(&contents).ok());
        holder.is_some()
    });

    Ok(InstanceLock::AlreadyRunning(holder))
}

/// Ensure single instance enforcement for the current process.
pub fn ensure_single_instance() -> Result<InstanceLock> {
    acquire_instance_lock(&lock::get_main_lock_path(), &InstanceInfo::current())
}

/// Path of the log file that background instances write to.
///
/// `$XDG_STATE_HOME/autotheme/autotheme.log`, falling back to the cache directory.
pub fn get_log_path() -> Result<PathBuf> {
    let base = dirs::state_dir()
        .or_else(dirs::cache_dir)
        .context("Could not determine state directory")?;
    Ok(base.join(APP_NAME).join(LOG_FILE_NAME))
}

/// Spawn `autotheme run` detached from the terminal.
///
/// The child gets its own process group, a null stdin, and its output appended
/// to the log file. Waits until the child holds the lock and returns its PID.
pub fn spawn_background_instance(debug_enabled: bool) -> Result<u32> {
    use std::os::unix::process::CommandExt;
    use std::process::{Command, Stdio};

    let current_exe = std::env::current_exe().context("Failed to get current executable path")?;

    let log_path = get_log_path()?;
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", private_path(parent)))?;
    }
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", private_path(&log_path)))?;
    let log_stderr = log_file
        .try_clone()
        .context("Failed to duplicate log file handle")?;

    let mut command = Command::new(&current_exe);
    command.arg("run");
    if let Some(config_dir) = crate::config::get_custom_config_dir() {
        command.arg("--config").arg(config_dir);
    }
    if debug_enabled {
        command.arg("--debug");
    }

    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::from(log_file))
        .stderr(Stdio::from(log_stderr))
        .process_group(0)
        .spawn()
        .context("Failed to spawn background autotheme process")?;

    let pid = child.id();
    if debug_enabled {
        log_debug!("Spawned {} run (PID {pid})", private_path(&current_exe));
    }

    let lock_path = lock::get_main_lock_path();
    let mut exited = None;
    let started = wait_until(START_TIMEOUT_MS, || {
        if let Ok(Some(status)) = child.try_wait() {
            exited = Some(status);
            return true;
        }
        matches!(read_running_instance(&lock_path), Ok(Some(info)) if info.pid == pid)
    });

    if let Some(status) = exited {
        anyhow::bail!(
            "Background process exited early ({status}), see {}",
            private_path(&log_path)
        );
    }
    if !started {
        anyhow::bail!(
            "Background process did not start within {}s, see {}",
            START_TIMEOUT_MS / 1000,
            private_path(&log_path)
        );
    }

    Ok(pid)
}

//! Implementation of the start command.
//!
//! Launches `autotheme run` in the background unless an instance already holds
//! the lock.

use anyhow::Result;

use crate::common::utils::private_path;
use crate::io::instance::{get_log_path, get_running_instance, spawn_background_instance};

/// Spawn the background instance and report where it logs.
pub(crate) fn start_background(debug_enabled: bool) -> Result<()> {
    let pid = spawn_background_instance(debug_enabled)?;

    log_block_start!("autotheme started in background (PID: {})", pid);
    if let Ok(log_path) = get_log_path() {
        log_indented!("Log: {}", private_path(&log_path));
    }
    log_end!();
    Ok(())
}

/// Handle the start command.
pub fn handle_start_command(debug_enabled: bool) -> Result<()> {
    log_version!();

    if let Some(info) = get_running_instance()? {
        log_block_start!("Already running in background. Consider using 'restart'.");
        log_indented!("PID: {}", info.pid);
        log_end!();
        return Ok(());
    }

    start_background(debug_enabled)
}

/// Display detailed help for the start command (help subcommand)
pub fn display_help() {
    log_version!();
    log_block_start!("start - Run autotheme in the background");
    log_block_start!("Usage: autotheme start");
    log_block_start!("Description:");
    log_indented!("Starts 'autotheme run' detached from the terminal. Its output");
    log_indented!("is appended to autotheme.log in the XDG state directory.");
    log_indented!("Does nothing if an instance is already running.");
    log_end!();
}

//! Implementation of the restart command.
//!
//! Stops the background instance if one is running, then starts a new one
//! with the current binary and configuration directory.

use anyhow::{Context, Result};

use super::stop::{StopResult, stop_running};

/// Handle the restart command.
pub fn handle_restart_command(debug_enabled: bool) -> Result<()> {
    log_version!();

    restart_with(
        || stop_running(debug_enabled),
        || super::start::start_background(debug_enabled),
    )
}

/// Stop, then start only once the previous instance is gone.
fn restart_with<S, T>(stop: S, start: T) -> Result<()>
where
    S: FnOnce() -> Result<StopResult>,
    T: FnOnce() -> Result<()>,
{
    match stop().context("Failed to stop the running instance")? {
        StopResult::StillRunning => {
            anyhow::bail!("Previous instance is still shutting down, not starting a new one")
        }
        StopResult::NoInstanceRunning => {
            log_block_start!("No running instance, starting a new one");
        }
        StopResult::Stopped => {}
    }

    start()
}

/// Display detailed help for the restart command (help subcommand)
pub fn display_help() {
    log_version!();
    log_block_start!("restart - Restart the background instance");
    log_block_start!("Usage: autotheme restart");
    log_block_start!("Description:");
    log_indented!("Stops the running instance (if any) and starts a new");
    log_indented!("one in the background. Use this after upgrading the binary.");
    log_indented!("Configuration edits do not need a restart; see 'reload'.");
    log_end!();
}

//! Implementation of the reload command.
//!
//! Sends SIGUSR2 to the running instance, which re-reads its configuration
//! and re-applies the active profile immediately instead of waiting for the
//! next poll.

use anyhow::{Context, Result};

use crate::io::instance::{get_running_instance, send_reload_signal};

/// Handle the reload command.
pub fn handle_reload_command(debug_enabled: bool) -> Result<()> {
    log_version!();

    let Some(info) = get_running_instance()? else {
        log_error_exit!("autotheme isn't running");
        return Ok(());
    };

    send_reload_signal(info.pid)
        .with_context(|| format!("Failed to signal instance (PID: {})", info.pid))?;

    if debug_enabled {
        log_pipe!();
        log_debug!("SIGUSR2 sent to process {}", info.pid);
    }
    log_block_start!("Reload requested (PID: {})", info.pid);
    log_indented!("The active profile will be re-applied now");
    log_end!();

    Ok(())
}

/// Display detailed help for the reload command (help subcommand)
pub fn display_help() {
    log_version!();
    log_block_start!("reload - Re-apply the active profile now");
    log_block_start!("Usage: autotheme reload");
    log_block_start!("Description:");
    log_indented!("Signals the running instance to re-read its configuration");
    log_indented!("and apply the current mode's themes immediately.");
    log_pipe!();
    log_indented!("Edits are picked up within 30 seconds anyway; reload is");
    log_indented!("useful after changing themes by hand in the Themes panel.");
    log_end!();
}

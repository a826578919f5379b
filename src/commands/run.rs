//! Implementation of the run command: the poll loop in the foreground.

use anyhow::Result;

use crate::AutoTheme;

/// Handle the run command.
pub fn handle_run_command(debug_enabled: bool) -> Result<()> {
    AutoTheme::new(debug_enabled).run()
}

/// Display detailed help for the run command (help subcommand)
pub fn display_help() {
    log_version!();
    log_block_start!("run - Run autotheme in the foreground");
    log_block_start!("Usage: autotheme run");
    log_block_start!("Description:");
    log_indented!("Applies the light or dark profile for the current time,");
    log_indented!("then checks again every 30 seconds. The configuration file");
    log_indented!("is re-read on every check, so edits apply without a restart.");
    log_pipe!();
    log_indented!("Creates the default configuration on first use.");
    log_indented!("Only one instance can run at a time.");
    log_block_start!("Signals:");
    log_indented!("SIGUSR2                  Re-apply the active profile now");
    log_indented!("SIGTERM, SIGINT, SIGHUP  Shut down");
    log_end!();
}

//! Help command implementation for autotheme.
//!
//! This module provides a dispatcher for the help command that shows
//! command-specific help or general help based on the arguments provided.

use anyhow::Result;

/// Show brief usage for a command (used for error messages)
pub fn show_command_usage(command: &str) {
    match command {
        "autostart" => log_block_start!("Usage: autotheme autostart on|off"),
        "status" => log_block_start!("Usage: autotheme status [--json]"),
        "help" => log_block_start!("Usage: autotheme help [COMMAND]"),
        "install" | "uninstall" | "run" | "start" | "stop" | "restart" | "reload"
        | "configure" => log_block_start!("Usage: autotheme {}", command),
        _ => log_block_start!("Usage: autotheme [OPTIONS] <COMMAND>"),
    }
}

/// Run the help command (dispatcher)
///
/// # Arguments
/// * `command` - Optional command name to get help for (None = general help)
pub fn run_help_command(command: Option<&str>) -> Result<()> {
    match command {
        None => display_general_help(),
        Some("install") => super::install::display_help(),
        Some("uninstall") => super::install::display_uninstall_help(),
        Some("autostart") => super::autostart::display_help(),
        Some("run") => super::run::display_help(),
        Some("start") => super::start::display_help(),
        Some("stop") => super::stop::display_help(),
        Some("restart") => super::restart::display_help(),
        Some("reload") => super::reload::display_help(),
        Some("status") => super::status::display_help(),
        Some("configure") => super::configure::display_help(),
        Some("help") => display_help_help(),
        Some(unknown) => {
            log_warning_standalone!("Unknown command: {}", unknown);
            display_general_help();
        }
    }
    Ok(())
}

/// Display general help focused on commands (for the help command)
fn display_general_help() {
    log_version!();
    log_block_start!("Available Commands:");
    log_indented!("install            Copy autotheme to ~/.local/bin");
    log_indented!("uninstall          Remove the installed copy");
    log_indented!("autostart on|off   Start at login or stop doing so");
    log_indented!("run                Switch themes in the foreground");
    log_indented!("start              Switch themes in the background");
    log_indented!("stop               Stop the background instance");
    log_indented!("restart            Restart the background instance");
    log_indented!("reload             Re-apply the active profile now");
    log_indented!("status [--json]    Show the current mode and instance");
    log_indented!("configure          Edit times and themes interactively");
    log_indented!("help [COMMAND]     Show detailed help for a command");
    log_pipe!();
    log_info!("Use 'autotheme help <command>' to see detailed help for a specific command.");
    log_indented!("Use 'autotheme --help' to see all options and general usage.");
    log_end!();
}

/// Display help for the help command itself
fn display_help_help() {
    log_version!();
    log_block_start!("help - Display help information");
    log_block_start!("Usage: autotheme help [COMMAND]");
    log_block_start!("Arguments:");
    log_indented!("COMMAND  Optional command to get help for");
    log_indented!("         If omitted, shows general help");
    log_block_start!("Examples:");
    log_indented!("# Show general help");
    log_indented!("autotheme help");
    log_pipe!();
    log_indented!("# Show help for specific commands");
    log_indented!("autotheme help configure");
    log_indented!("autotheme help autostart");
    log_end!();
}

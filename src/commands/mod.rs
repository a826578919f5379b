//! Command-line command handlers for autotheme.
//!
//! Each subcommand lives in its own submodule. Handlers return `Ok(())` for
//! informational outcomes such as "already running" so the process exits 0;
//! only real failures propagate as errors.

pub mod autostart;
pub mod configure;
pub mod help;
pub mod install;
pub mod reload;
pub mod restart;
pub mod run;
pub mod start;
pub mod status;
pub mod stop;

use anyhow::Result;

use crate::args::Command;

/// Run `command` with the global `--debug` flag.
pub fn dispatch(command: Command, debug_enabled: bool) -> Result<()> {
    match command {
        Command::Install => install::handle_install_command(),
        Command::Uninstall => install::handle_uninstall_command(),
        Command::Autostart { enabled } => autostart::handle_autostart_command(enabled),
        Command::Run => run::handle_run_command(debug_enabled),
        Command::Start => start::handle_start_command(debug_enabled),
        Command::Stop => stop::handle_stop_command(debug_enabled),
        Command::Restart => restart::handle_restart_command(debug_enabled),
        Command::Reload => reload::handle_reload_command(debug_enabled),
        Command::Status { json } => status::handle_status_command(json, debug_enabled),
        Command::Configure => configure::handle_configure_command(debug_enabled),
        Command::Help { topic } => help::run_help_command(topic.as_deref()),
    }
}

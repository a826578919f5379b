//! Main application entry point.
//!
//! Parses the command line, applies the global options, and hands the chosen
//! subcommand to `commands::dispatch`. Exit status is 0 for every recognized
//! command that completes (including informational outcomes such as
//! "already running"), and 1 for usage errors or failed commands.

use std::io::IsTerminal;

use autotheme::args::{self, CliAction, ParsedArgs};
use autotheme::common::constants::{EXIT_FAILURE, EXIT_SUCCESS};
use autotheme::logger::Log;
use autotheme::{commands, config};
use autotheme::{log_block_start, log_end, log_error_exit, log_pipe, log_warning};

fn main() {
    // Background instances write to a log file; stamp each line there
    if !std::io::stdout().is_terminal() {
        Log::set_timestamps(true);
    }

    let parsed_args = ParsedArgs::from_env();

    let code = match parsed_args.action {
        CliAction::ShowVersion => {
            args::display_version_info();
            EXIT_SUCCESS
        }
        CliAction::ShowHelp => {
            args::display_help();
            EXIT_SUCCESS
        }
        CliAction::ShowHelpDueToError => {
            args::display_help();
            EXIT_FAILURE
        }
        CliAction::ShowCommandUsageDueToError { command, error } => {
            log_warning!("{}", error);
            commands::help::show_command_usage(&command);
            log_pipe!();
            log_block_start!("For more information, try: autotheme help {}", command);
            log_end!();
            EXIT_FAILURE
        }
        CliAction::Command {
            command,
            debug_enabled,
            config_dir,
        } => run_command(command, debug_enabled, config_dir),
    };

    std::process::exit(code);
}

fn run_command(command: args::Command, debug_enabled: bool, config_dir: Option<String>) -> i32 {
    if debug_enabled {
        Log::set_debug(true);
    }

    if config_dir.is_some()
        && let Err(e) = config::set_config_dir(config_dir)
    {
        log_error_exit!("Invalid --config directory: {:#}", e);
        return EXIT_FAILURE;
    }

    match commands::dispatch(command, debug_enabled) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            log_error_exit!("{:#}", e);
            EXIT_FAILURE
        }
    }
}

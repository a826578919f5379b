//! Implementation of the stop command.
//!
//! This command cleanly terminates a running autotheme instance by sending
//! SIGTERM and waiting for the process to release its lock.

use anyhow::{Context, Result};

use crate::common::constants::*;
use crate::io::instance::{get_running_instance, terminate_instance, wait_for_exit};

/// Result of a stop command operation.
#[derive(Debug, PartialEq)]
pub enum StopResult {
    /// The instance exited after SIGTERM
    Stopped,
    /// No running instance found
    NoInstanceRunning,
    /// SIGTERM was delivered but the process was still alive at the timeout
    StillRunning,
}

/// Signal `pid` and wait for it to go away.
pub(crate) fn stop_instance(pid: u32, debug_enabled: bool) -> Result<StopResult> {
    terminate_instance(pid)?;
    if debug_enabled {
        log_pipe!();
        log_debug!("SIGTERM sent to process {}", pid);
    }

    if wait_for_exit(pid, STOP_TIMEOUT_MS) {
        Ok(StopResult::Stopped)
    } else {
        Ok(StopResult::StillRunning)
    }
}

/// Stop the running instance, if any, reporting progress.
pub(crate) fn stop_running(debug_enabled: bool) -> Result<StopResult> {
    let Some(info) = get_running_instance()? else {
        return Ok(StopResult::NoInstanceRunning);
    };

    log_block_start!("Stopping autotheme instance (PID: {})...", info.pid);
    let result = stop_instance(info.pid, debug_enabled)?;

    match result {
        StopResult::Stopped => {
            log_pipe!();
            log_info!("Process terminated successfully");
        }
        StopResult::StillRunning => {
            log_pipe!();
            log_warning!("Process did not terminate within the expected time");
            log_indented!(
                "The termination signal was sent, but the process may still be shutting down"
            );
        }
        StopResult::NoInstanceRunning => {}
    }

    Ok(result)
}

/// Handle the stop command to terminate a running autotheme instance.
pub fn handle_stop_command(debug_enabled: bool) -> Result<()> {
    log_version!();

    match stop_running(debug_enabled).context("Failed to terminate instance")? {
        StopResult::NoInstanceRunning => log_error_exit!("autotheme isn't running"),
        StopResult::Stopped | StopResult::StillRunning => log_end!(),
    }
    Ok(())
}

/// Display usage help for the stop command (--help flag)
pub fn show_usage() {
    log_version!();
    log_block_start!("Usage: autotheme stop");
    log_block_start!("Description:");
    log_indented!("Cleanly terminate the running autotheme instance");
    log_pipe!();
    log_info!("For detailed help with examples, try: autotheme help stop");
    log_end!();
}

/// Display detailed help for the stop command (help subcommand)
pub fn display_help() {
    log_version!();
    log_block_start!("stop - Cleanly terminate running autotheme instance");
    log_block_start!("Usage: autotheme stop");
    log_block_start!("Description:");
    log_indented!("Sends SIGTERM to the running instance and waits up to");
    log_indented!("3 seconds for it to exit and release its lock file.");
    log_indented!("The current theme stays applied.");
    log_block_start!("Examples:");
    log_indented!("# Stop the background instance");
    log_indented!("autotheme stop");
    log_end!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::Command;

    #[test]
    fn test_stop_instance_terminates_child() {
        let mut child = Command::new("sleep").arg("30").spawn().unwrap();
        let pid = child.id();

        // Reap in the background so the PID disappears once killed
        let reaper = std::thread::spawn(move || child.wait());

        assert_eq!(stop_instance(pid, false).unwrap(), StopResult::Stopped);
        reaper.join().unwrap().unwrap();
    }

    #[test]
    fn test_signal_failure_is_an_error() {
        let error = stop_instance(999_999_999, false).unwrap_err();
        assert!(error.to_string().contains("999999999"));
        assert!(crate::io::instance::send_reload_signal(999_999_999).is_err());
    }
}

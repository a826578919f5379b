//! Implementation of the configure command.
//!
//! Walks through the dark period boundaries and every light and dark setting,
//! showing the current value in brackets. An empty answer keeps it, `unset`
//! clears a theme setting, and invalid input is asked again. The result is
//! written atomically and a running instance is told to apply it.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use crate::config::{self, Config, Setting, validation::validate_setting_value};
use crate::core::boundary::TimeBoundary;
use crate::core::mode::Mode;
use crate::io::instance::{get_running_instance, send_reload_signal};

/// Word that clears a theme setting.
const UNSET_KEYWORD: &str = "unset";

/// Ask for every value, starting from `current`, and return the edited configuration.
///
/// Fails only when reading or writing the terminal fails, or input ends early.
pub fn prompt_config<R, W>(current: &Config, input: &mut R, output: &mut W) -> Result<Config>
where
    R: BufRead,
    W: Write,
{
    let mut config = current.clone();

    config.time.start = prompt_time(input, output, "Start time (HH:MM)", config.time.start)?;
    config.time.end = prompt_time(input, output, "End time (HH:MM)", config.time.end)?;

    for mode in [Mode::Light, Mode::Dark] {
        for setting in Setting::ALL {
            let label = format!("[{}] {}", mode.display_name(), setting.display_name());
            let value = prompt_theme(
                input,
                output,
                &label,
                setting,
                config.profile(mode).get(setting),
            )?;
            config.profile_mut(mode).set(setting, value);
        }
    }

    Ok(config)
}

/// Read one trimmed line, failing at end of input.
fn read_answer<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    let read = input.read_line(&mut line).context("Failed to read input")?;
    if read == 0 {
        anyhow::bail!("Input ended before configuration was complete");
    }
    Ok(line.trim().to_string())
}

fn prompt_time<R, W>(
    input: &mut R,
    output: &mut W,
    label: &str,
    current: TimeBoundary,
) -> Result<TimeBoundary>
where
    R: BufRead,
    W: Write,
{
    loop {
        write!(output, "{label} [{current}]: ")?;
        output.flush()?;

        let answer = read_answer(input)?;
        if answer.is_empty() {
            return Ok(current);
        }
        match answer.parse::<TimeBoundary>() {
            Ok(time) => return Ok(time),
            Err(e) => writeln!(output, "  {e}")?,
        }
    }
}

fn prompt_theme<R, W>(
    input: &mut R,
    output: &mut W,
    label: &str,
    setting: Setting,
    current: Option<&str>,
) -> Result<Option<String>>
where
    R: BufRead,
    W: Write,
{
    loop {
        write!(output, "{label} [{}]: ", current.unwrap_or(UNSET_KEYWORD))?;
        output.flush()?;

        let answer = read_answer(input)?;
        if answer.is_empty() {
            return Ok(current.map(str::to_string));
        }
        if answer.eq_ignore_ascii_case(UNSET_KEYWORD) {
            return Ok(None);
        }
        match validate_setting_value(setting, &answer) {
            Ok(()) => return Ok(Some(answer)),
            Err(e) => writeln!(output, "  {e}")?,
        }
    }
}

/// Handle the configure command.
pub fn handle_configure_command(debug_enabled: bool) -> Result<()> {
    log_version!();

    // Adopts the running instance's config directory
    let running = get_running_instance()?;

    let config_path = config::get_config_path()?;
    let current = config::load()?;
    current.log_config();

    log_block_start!("Press Enter to keep a value, type '{UNSET_KEYWORD}' to leave a setting alone");
    log_end!();

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();
    let updated = prompt_config(&current, &mut input, &mut output)?;

    if updated == current {
        log_block_start!("No changes");
        log_end!();
        return Ok(());
    }

    config::save_config(&config_path, &updated)?;
    log_block_start!(
        "Saved configuration to {}",
        crate::common::utils::private_path(&config_path)
    );

    if updated.time.start == updated.time.end {
        log_pipe!();
        log_warning!("Dark period start and end are equal ({})", updated.time.start);
        log_indented!("The dark profile will stay active around the clock");
    }

    if let Some(info) = running {
        match send_reload_signal(info.pid) {
            Ok(()) => {
                if debug_enabled {
                    log_debug!("SIGUSR2 sent to process {}", info.pid);
                }
                log_indented!("Running instance notified (PID: {})", info.pid);
            }
            Err(e) => {
                log_pipe!();
                log_warning!("Failed to notify running instance: {e}");
                log_indented!("Changes will still be picked up within 30 seconds");
            }
        }
    }
    log_end!();

    Ok(())
}

/// Display detailed help for the configure command (help subcommand)
pub fn display_help() {
    log_version!();
    log_block_start!("configure - Interactively edit the configuration");
    log_block_start!("Usage: autotheme configure");
    log_block_start!("Description:");
    log_indented!("Prompts for the dark period start and end, then for the");
    log_indented!("light and dark theme of every setting.");
    log_pipe!();
    log_indented!("Enter          keep the value shown in brackets");
    log_indented!("unset          leave that setting alone when switching");
    log_indented!("HH:MM / name   set a new value");
    log_pipe!();
    log_indented!("The file is rewritten atomically and a running instance");
    log_indented!("applies the result immediately.");
    log_end!();
}

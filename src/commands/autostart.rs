//! Implementation of the autostart command.
//!
//! Writes or removes an XDG autostart entry that launches `autotheme run`
//! from the installed binary when the desktop session starts.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::common::constants::AUTOSTART_FILE_NAME;
use crate::common::utils::{private_path, write_atomic};

/// `~/.config/autostart/autotheme.desktop`
pub fn get_autostart_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("Could not determine config directory")?;
    Ok(config_dir.join("autostart").join(AUTOSTART_FILE_NAME))
}

/// Contents of the desktop entry launching `exec_path run`.
pub fn desktop_entry(exec_path: &Path) -> String {
    format!(
        "[Desktop Entry]\n\
         Version=1.0\n\
         Name=Automatic Theme\n\
         Exec={} run\n\
         Type=Application\n\
         Categories=Utility;\n\
         X-GNOME-Autostart-enabled=true\n",
        exec_path.display()
    )
}

/// Create or remove the entry at `path`. Returns whether anything changed.
pub fn set_autostart(path: &Path, exec_path: &Path, enabled: bool) -> Result<bool> {
    if enabled {
        let content = desktop_entry(exec_path);
        if std::fs::read_to_string(path).is_ok_and(|existing| existing == content) {
            return Ok(false);
        }
        write_atomic(path, &content)?;
        Ok(true)
    } else if path.exists() {
        std::fs::remove_file(path)
            .with_context(|| format!("Failed to remove {}", private_path(path)))?;
        Ok(true)
    } else {
        Ok(false)
    }
}

/// Handle the autostart command.
pub fn handle_autostart_command(enabled: bool) -> Result<()> {
    log_version!();

    let path = get_autostart_path()?;
    let exec_path = super::install::get_install_path()?;

    let changed = set_autostart(&path, &exec_path, enabled)?;

    match (enabled, changed) {
        (true, true) => log_block_start!("Autostart enabled: {}", private_path(&path)),
        (true, false) => log_block_start!("Autostart is already enabled"),
        (false, true) => log_block_start!("Autostart disabled"),
        (false, false) => log_block_start!("Autostart is already disabled"),
    }

    if enabled && !exec_path.exists() {
        log_pipe!();
        log_warning!("{} does not exist yet", private_path(&exec_path));
        log_indented!("Run 'autotheme install' so the entry has something to launch");
    }
    log_end!();

    Ok(())
}

/// Display detailed help for the autostart command (help subcommand)
pub fn display_help() {
    log_version!();
    log_block_start!("autostart - Start autotheme at login");
    log_block_start!("Usage: autotheme autostart on|off");
    log_block_start!("Description:");
    log_indented!("'on' writes ~/.config/autostart/autotheme.desktop, which runs");
    log_indented!("the installed binary when the desktop session starts.");
    log_indented!("'off' removes that file.");
    log_end!();
}

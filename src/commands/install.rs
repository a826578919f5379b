//! Implementation of the install and uninstall commands.
//!
//! Installation copies the running binary to `~/.local/bin/autotheme` so the
//! autostart entry has a stable path to launch.

use anyhow::{Context, Result};
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use crate::common::constants::APP_NAME;
use crate::common::utils::private_path;

/// Where `install` puts the binary.
pub fn get_install_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".local").join("bin").join(APP_NAME))
}

/// Copy `source` to `target` with mode 755, replacing any previous file atomically.
///
/// Writing to a temporary file first avoids "text file busy" when the old
/// binary is currently running.
pub fn install_binary(source: &Path, target: &Path) -> Result<()> {
    let parent = target
        .parent()
        .context("Install path has no parent directory")?;
    std::fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create {}", private_path(parent)))?;

    let mut input = std::fs::File::open(source)
        .with_context(|| format!("Failed to open {}", private_path(source)))?;
    let mut temp = tempfile::NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create temporary file in {}", private_path(parent)))?;

    std::io::copy(&mut input, temp.as_file_mut()).context("Failed to copy binary")?;
    temp.as_file_mut().flush()?;
    temp.as_file()
        .set_permissions(std::fs::Permissions::from_mode(0o755))
        .context("Failed to make binary executable")?;
    temp.persist(target)
        .with_context(|| format!("Failed to install to {}", private_path(target)))?;

    Ok(())
}

/// Handle the install command.
pub fn handle_install_command() -> Result<()> {
    log_version!();

    let source = std::env::current_exe().context("Failed to get current executable path")?;
    let target = get_install_path()?;

    if source == target {
        log_block_start!("Already running the installed binary");
        log_indented!("{}", private_path(&target));
        log_end!();
        return Ok(());
    }

    install_binary(&source, &target)?;

    log_block_start!("Installed to {}", private_path(&target));
    if let Some(bin_dir) = target.parent()
        && !is_on_path(bin_dir)
    {
        log_pipe!();
        log_warning!("{} is not on your PATH", private_path(bin_dir));
    }
    log_indented!("Enable starting at login with: autotheme autostart on");
    log_end!();

    Ok(())
}

/// Handle the uninstall command.
pub fn handle_uninstall_command() -> Result<()> {
    log_version!();

    let target = get_install_path()?;
    if target.exists() {
        std::fs::remove_file(&target)
            .with_context(|| format!("Failed to remove {}", private_path(&target)))?;
        log_block_start!("Removed {}", private_path(&target));
    } else {
        log_block_start!("autotheme isn't installed");
    }

    if super::autostart::get_autostart_path().is_ok_and(|path| path.exists()) {
        log_indented!("The autostart entry still exists; remove it with: autotheme autostart off");
    }
    log_end!();

    Ok(())
}

fn is_on_path(dir: &Path) -> bool {
    std::env::var_os("PATH")
        .map(|paths| std::env::split_paths(&paths).any(|p| p == dir))
        .unwrap_or(false)
}

/// Display detailed help for the install command (help subcommand)
pub fn display_help() {
    log_version!();
    log_block_start!("install - Install autotheme for the current user");
    log_block_start!("Usage: autotheme install");
    log_block_start!("Description:");
    log_indented!("Copies the running binary to ~/.local/bin/autotheme");
    log_indented!("and marks it executable. Re-running replaces the old copy.");
    log_end!();
}

/// Display detailed help for the uninstall command (help subcommand)
pub fn display_uninstall_help() {
    log_version!();
    log_block_start!("uninstall - Remove the installed binary");
    log_block_start!("Usage: autotheme uninstall");
    log_block_start!("Description:");
    log_indented!("Deletes ~/.local/bin/autotheme if present.");
    log_indented!("The configuration and autostart entry are left in place.");
    log_end!();
}

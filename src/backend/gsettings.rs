//! Cinnamon theme control through the `gsettings` command-line tool.

use anyhow::Result;
use std::io::ErrorKind;
use std::process::Command;

use super::{ApplyError, ThemeApplier};
use crate::config::Setting;

const GSETTINGS: &str = "gsettings";

/// The gsettings schema and key behind each Cinnamon appearance setting.
pub fn schema_key(setting: Setting) -> (&'static str, &'static str) {
    match setting {
        Setting::MousePointer => ("org.cinnamon.desktop.interface", "cursor-theme"),
        Setting::Applications => ("org.cinnamon.desktop.interface", "gtk-theme"),
        Setting::Icons => ("org.cinnamon.desktop.interface", "icon-theme"),
        Setting::Desktop => ("org.cinnamon.theme", "name"),
        Setting::WindowBorders => ("org.cinnamon.desktop.wm.preferences", "theme"),
    }
}

pub struct GsettingsApplier {
    debug_enabled: bool,
}

impl GsettingsApplier {
    /// Create the applier, failing early when `gsettings` cannot be run.
    pub fn new(debug_enabled: bool) -> Result<Self> {
        verify_gsettings_installed()?;
        Ok(Self { debug_enabled })
    }
}

impl ThemeApplier for GsettingsApplier {
    fn apply(&mut self, setting: Setting, theme: &str) -> Result<(), ApplyError> {
        let (schema, key) = schema_key(setting);

        if self.debug_enabled {
            log_debug!("{GSETTINGS} set {schema} {key} {theme:?}");
        }

        let output = Command::new(GSETTINGS)
            .args(["set", schema, key, theme])
            .output()
            .map_err(|e| command_error(setting, e))?;

        if output.status.success() {
            Ok(())
        } else {
            Err(ApplyError::CommandFailed {
                setting,
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }

    fn backend_name(&self) -> &'static str {
        "gsettings"
    }
}

/// Read the theme currently configured for `setting`.
pub fn read_setting(setting: Setting) -> Result<String, ApplyError> {
    let (schema, key) = schema_key(setting);

    let output = Command::new(GSETTINGS)
        .args(["get", schema, key])
        .output()
        .map_err(|e| command_error(setting, e))?;

    if !output.status.success() {
        return Err(ApplyError::CommandFailed {
            setting,
            status: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(unquote_gvariant(String::from_utf8_lossy(&output.stdout).trim()))
}

/// Strip the single quotes gsettings prints around string values.
fn unquote_gvariant(raw: &str) -> String {
    raw.strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .map(|s| s.replace("\\'", "'"))
        .unwrap_or_else(|| raw.to_string())
}

fn command_error(setting: Setting, error: std::io::Error) -> ApplyError {
    if error.kind() == ErrorKind::NotFound {
        ApplyError::CommandMissing { command: GSETTINGS }
    } else {
        ApplyError::Io {
            setting,
            source: error,
        }
    }
}

/// Verify that gsettings is installed and runnable.
pub fn verify_gsettings_installed() -> Result<()> {
    match Command::new(GSETTINGS).arg("--version").output() {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if !version.is_empty() {
                log_decorated!("Found gsettings {version}");
            }
            Ok(())
        }
        Ok(output) => anyhow::bail!(
            "gsettings --version exited with {}",
            output
                .status
                .code()
                .map_or_else(|| "a signal".to_string(), |c| format!("code {c}"))
        ),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            anyhow::bail!("gsettings is not installed on the system")
        }
        Err(e) => Err(anyhow::Error::new(e).context("Failed to run gsettings")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_setting_has_a_distinct_key() {
        let mut seen = std::collections::HashSet::new();
        for setting in Setting::ALL {
            assert!(seen.insert(schema_key(setting)), "{setting} reuses a key");
        }
    }

    #[test]
    fn test_desktop_uses_cinnamon_theme_schema() {
        assert_eq!(schema_key(Setting::Desktop), ("org.cinnamon.theme", "name"));
        assert_eq!(
            schema_key(Setting::WindowBorders),
            ("org.cinnamon.desktop.wm.preferences", "theme")
        );
    }

    #[test]
    fn test_unquote_gvariant() {
        assert_eq!(unquote_gvariant("'Mint-Y-Blue'"), "Mint-Y-Blue");
        assert_eq!(unquote_gvariant("'It\\'s'"), "It's");
        assert_eq!(unquote_gvariant("plain"), "plain");
    }
}

//! Configuration file building and default config creation.
//!
//! Renders a `Config` into a commented, aligned TOML file. Used both for the
//! default file created on first run and for rewrites by `autotheme configure`.

use anyhow::{Context, Result};
use std::path::Path;

use super::validation::validate_config;
use super::{Config, Setting, ThemeProfile};
use crate::common::utils::{private_path, write_atomic};

/// Create the default config file at `path`.
pub fn create_default_config(path: &Path) -> Result<()> {
    let content = render_config(&Config::default());

    write_atomic(path, &content).with_context(|| {
        format!("Failed to write default config to {}", private_path(path))
    })?;

    log_block_start!("Created default configuration");
    log_indented!("{}", private_path(path));

    Ok(())
}

/// Validate `config` and atomically replace the file at `path` with it.
pub fn save_config(path: &Path, config: &Config) -> Result<()> {
    validate_config(config)?;

    write_atomic(path, &render_config(config))
        .with_context(|| format!("Failed to save configuration to {}", private_path(path)))
}

/// Render the full configuration file for `config`.
pub fn render_config(config: &Config) -> String {
    let builder = ConfigBuilder::new()
        .add_table("Dark period", "time")
        .add_setting(
            "start",
            &quote(&config.time.start.to_string()),
            "Dark profile starts at this time (HH:MM)",
        )
        .add_setting(
            "end",
            &quote(&config.time.end.to_string()),
            "Light profile returns at this time (HH:MM)",
        );

    let builder = add_profile(builder, "Light themes", "light", &config.light);
    let builder = add_profile(builder, "Dark themes", "dark", &config.dark);

    let mut content = builder.build();
    content.push('\n');
    content
}

fn add_profile(
    mut builder: ConfigBuilder,
    title: &str,
    table: &str,
    profile: &ThemeProfile,
) -> ConfigBuilder {
    builder = builder.add_table(title, table);
    for setting in Setting::ALL {
        builder = match profile.get(setting) {
            Some(theme) => builder.add_setting(
                setting.key(),
                &quote(theme),
                &format!("{} theme", setting.display_name()),
            ),
            None => builder.add_unset(
                setting.key(),
                &format!("{} left unchanged", setting.display_name()),
            ),
        };
    }
    builder
}

/// Quote a value as a TOML basic string.
fn quote(value: &str) -> String {
    toml::Value::String(value.to_string()).to_string()
}

/// Builder for creating dynamically-aligned configuration files.
///
/// This builder maintains proper comment alignment by calculating the maximum
/// width of all setting lines and applying consistent padding, so long theme
/// names never break the layout.
struct ConfigBuilder {
    entries: Vec<ConfigEntry>,
}

#[derive(Clone)]
struct ConfigEntry {
    content: String,
    entry_type: EntryType,
}

#[derive(Clone)]
enum EntryType {
    Table,
    Setting { line: String, comment: String },
}

impl ConfigBuilder {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn add_table(mut self, title: &str, table: &str) -> Self {
        self.entries.push(ConfigEntry {
            content: format!("#[{title}]\n[{table}]"),
            entry_type: EntryType::Table,
        });
        self
    }

    fn add_setting(mut self, key: &str, value: &str, comment: &str) -> Self {
        let line = format!("{key} = {value}");
        self.entries.push(ConfigEntry {
            content: line.clone(),
            entry_type: EntryType::Setting {
                line,
                comment: format!("# {comment}"),
            },
        });
        self
    }

    /// A commented-out key, so the file still documents every setting.
    fn add_unset(mut self, key: &str, comment: &str) -> Self {
        let line = format!("# {key} = \"\"");
        self.entries.push(ConfigEntry {
            content: line.clone(),
            entry_type: EntryType::Setting {
                line,
                comment: format!("# {comment}"),
            },
        });
        self
    }

    fn build(self) -> String {
        // Calculate the maximum width of all setting lines for alignment
        let max_width = self
            .entries
            .iter()
            .filter_map(|entry| match &entry.entry_type {
                EntryType::Setting { line, .. } => Some(line.chars().count()),
                EntryType::Table => None,
            })
            .max()
            .unwrap_or(0)
            + 1; // +1 for one space between setting and comment

        let mut result = Vec::new();
        let mut first_table = true;

        for entry in self.entries {
            match entry.entry_type {
                EntryType::Table => {
                    if !first_table {
                        result.push(String::new()); // Empty line before new table
                    }
                    result.push(entry.content);
                    first_table = false;
                }
                EntryType::Setting { line, comment } => {
                    let padding = " ".repeat(max_width - line.chars().count());
                    result.push(format!("{line}{padding}{comment}"));
                }
            }
        }

        result.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rendered_default_parses_back() {
        let rendered = render_config(&Config::default());
        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_comments_are_aligned() {
        let rendered = render_config(&Config::default());
        let columns: Vec<usize> = rendered
            .lines()
            .filter(|line| line.contains(" = "))
            .map(|line| line.rfind(" # ").unwrap())
            .collect();
        assert!(columns.windows(2).all(|w| w[0] == w[1]), "{rendered}");
    }

    #[test]
    fn test_unset_settings_are_commented_out() {
        let rendered = render_config(&Config::default());
        assert!(rendered.contains("# window_borders = \"\""));
        assert!(rendered.contains("[time]\nstart = \"22:00\""));
    }

    #[test]
    fn test_theme_names_are_escaped() {
        let mut config = Config::default();
        config.light.icons = Some("Odd \"Quoted\" Theme".to_string());
        let parsed: Config = toml::from_str(&render_config(&config)).unwrap();
        assert_eq!(parsed.light.icons.as_deref(), Some("Odd \"Quoted\" Theme"));
    }
}

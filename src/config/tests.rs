use super::loading::load_or_create;
use super::validation::{validate_config, validate_theme_name};
use super::*;
use crate::common::constants::test_constants::*;
use serial_test::serial;
use std::fs;
use tempfile::tempdir;

fn create_test_config(start: &str, end: &str, light: &str, dark: &str) -> Config {
    let profile = |theme: &str| ThemeProfile {
        mouse_pointer: Some("DMZ-White".to_string()),
        applications: Some(theme.to_string()),
        icons: Some(theme.to_string()),
        desktop: Some(theme.to_string()),
        window_borders: None,
    };

    Config {
        time: PeriodConfig {
            start: start.parse().unwrap(),
            end: end.parse().unwrap(),
        },
        light: profile(light),
        dark: profile(dark),
    }
}

#[test]
#[serial]
fn test_config_load_default_creation() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("autotheme").join("autotheme.toml");

    // Save and restore XDG_CONFIG_HOME
    let original = std::env::var("XDG_CONFIG_HOME").ok();
    unsafe {
        std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());
    }

    // First load should create default config
    let result = load();

    // Restore original
    unsafe {
        match original {
            Some(val) => std::env::set_var("XDG_CONFIG_HOME", val),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
    }

    if let Err(e) = &result {
        eprintln!("load() failed: {:?}", e);
    }
    assert_eq!(result.unwrap(), Config::default());
    assert!(config_path.exists());
}

#[test]
fn test_load_or_create_keeps_existing_file() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("autotheme.toml");
    let custom = create_test_config(
        TEST_SAME_DAY_START,
        TEST_SAME_DAY_END,
        TEST_LIGHT_THEME,
        TEST_DARK_THEME,
    );
    save_config(&path, &custom).unwrap();

    assert_eq!(load_or_create(&path).unwrap(), custom);
}

#[test]
fn test_default_values() {
    let config = Config::default();
    assert_eq!(config.time.start.to_string(), "22:00");
    assert_eq!(config.time.end.to_string(), "09:00");
    assert_eq!(config.light.applications.as_deref(), Some("Mint-Y-Blue"));
    assert_eq!(config.dark.applications.as_deref(), Some("Mint-Y-Dark-Blue"));
    assert_eq!(config.dark.icons.as_deref(), Some("Mint-Y-Blue"));
    assert_eq!(config.light.window_borders, None);
    assert!(validate_config(&config).is_ok());
}

#[test]
fn test_config_toml_parsing() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("autotheme.toml");
    fs::write(
        &path,
        r#"
[time]
start = "7:30"
end = "19:45"

[light]
applications = "Adwaita"
window_borders = "Adwaita"

[dark]
applications = "Adwaita-dark"
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.time.start.to_string(), "07:30");
    assert_eq!(config.time.end.to_string(), "19:45");
    assert_eq!(config.light.get(Setting::WindowBorders), Some("Adwaita"));
    assert_eq!(config.light.get(Setting::Icons), None);
    assert_eq!(config.dark.get(Setting::Applications), Some("Adwaita-dark"));
    assert_eq!(config.dark.get(Setting::MousePointer), None);
}

#[test]
fn test_missing_profile_tables_mean_unset() {
    let config: Config = toml::from_str("[time]\nstart = \"22:00\"\nend = \"09:00\"\n").unwrap();
    assert!(config.light.is_empty());
    assert!(config.dark.is_empty());
}

#[test]
fn test_config_malformed_toml() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("autotheme.toml");

    fs::write(&path, "[time\nstart = ").unwrap();
    assert!(load_from_path(&path).is_err());

    fs::write(&path, "[time]\nstart = \"25:00\"\nend = \"09:00\"\n").unwrap();
    assert!(load_from_path(&path).is_err());

    fs::write(&path, "[time]\nstart = \"22:00\"\n").unwrap();
    assert!(load_from_path(&path).is_err());

    fs::write(
        &path,
        "[time]\nstart = \"22:00\"\nend = \"09:00\"\n[light]\nwallpaper = \"x\"\n",
    )
    .unwrap();
    assert!(load_from_path(&path).is_err());
}

#[test]
fn test_load_from_missing_path_is_error() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("missing.toml");
    assert!(load_from_path(&path).is_err());
    assert!(!path.exists());
}

#[test]
fn test_config_validation_identical_times() {
    let config = create_test_config("12:00", "12:00", TEST_LIGHT_THEME, TEST_DARK_THEME);
    assert!(validate_config(&config).is_ok());
}

#[test]
fn test_config_validation_rejects_bad_theme_names() {
    let mut config = Config::default();
    config.dark.icons = Some("".to_string());
    let err = validate_config(&config).unwrap_err();
    assert!(err.to_string().contains("dark.icons"), "{err}");

    let mut config = Config::default();
    config.light.desktop = Some("--reset".to_string());
    assert!(validate_config(&config).is_err());

    let mut config = Config::default();
    config.light.applications = Some("Mint\nY".to_string());
    assert!(validate_config(&config).is_err());
}

#[test]
fn test_theme_name_rules() {
    assert!(validate_theme_name("Mint-Y-Dark-Blue").is_ok());
    assert!(validate_theme_name("Theme With Spaces").is_ok());
    assert!(validate_theme_name("   ").is_err());
    assert!(validate_theme_name("-x").is_err());
    assert!(validate_theme_name("tab\there").is_err());
}

#[test]
fn test_save_config_rejects_invalid_and_leaves_file() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("autotheme.toml");
    save_config(&path, &Config::default()).unwrap();
    let before = fs::read_to_string(&path).unwrap();

    let mut bad = Config::default();
    bad.light.icons = Some(String::new());
    assert!(save_config(&path, &bad).is_err());
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn test_profile_accessors() {
    let mut config = Config::default();
    config
        .profile_mut(Mode::Dark)
        .set(Setting::WindowBorders, Some("Mint-Y-Dark".to_string()));
    config.profile_mut(Mode::Light).set(Setting::MousePointer, None);

    let dark: Vec<_> = config.profile(Mode::Dark).entries().map(|(s, _)| s).collect();
    assert_eq!(dark, Setting::ALL.to_vec());

    let light: Vec<_> = config.profile(Mode::Light).entries().map(|(s, _)| s).collect();
    assert_eq!(
        light,
        vec![Setting::Applications, Setting::Icons, Setting::Desktop]
    );
}

#[test]
fn test_setting_keys_round_trip_through_toml() {
    let mut profile = ThemeProfile::default();
    for setting in Setting::ALL {
        profile.set(setting, Some(setting.key().to_uppercase()));
    }
    let rendered = toml::to_string(&profile).unwrap();
    for setting in Setting::ALL {
        assert!(rendered.contains(&format!("{} = ", setting.key())), "{rendered}");
    }
}

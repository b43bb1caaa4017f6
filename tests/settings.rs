#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::time::Duration;

use toast::config::Settings;
use toast::error::{ConfigError, Error};
use toast::types::{Placement, SurfacePolicy};

fn write_config(contents: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("toast-{}.toml", uuid::Uuid::new_v4()));
    std::fs::write(&path, contents).expect("write temp config");
    path
}

#[test]
fn default_settings_snapshot() {
    let json = serde_json::to_string_pretty(&Settings::default()).unwrap();
    insta::assert_snapshot!("default_settings", json);
}

#[test]
fn file_values_are_loaded() {
    let path = write_config(
        r#"
[toast]
default_duration = "5s"
placement = "middle"
surface_policy = "key"

[style]
font_size = 16.0
screen_padding = { top = 8.0, left = 8.0, bottom = 8.0, right = 8.0 }

[animation]
show_duration = "100ms"
"#,
    );
    let settings = Settings::from_env_and_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(settings.default_duration, Duration::from_secs(5));
    assert_eq!(settings.default_placement, Placement::Middle);
    assert_eq!(settings.surface_policy, SurfacePolicy::Key);
    assert!((settings.text.font_size - 16.0).abs() < f64::EPSILON);
    assert!((settings.screen_padding.top - 8.0).abs() < f64::EPSILON);
    assert_eq!(settings.show.duration, Duration::from_millis(100));
    assert_eq!(settings.hide, Settings::default().hide);
}

#[test]
fn invalid_file_values_are_reported_by_field() {
    let path = write_config(
        r#"
[style]
corner_radius = -2.0
"#,
    );
    let result = Settings::from_env_and_file(&path);
    std::fs::remove_file(&path).ok();

    match result {
        Err(Error::Config(ConfigError::InvalidField { field, .. })) => {
            assert_eq!(field, "style.corner_radius");
        }
        other => panic!("expected an invalid field error, got {other:?}"),
    }
}

#[test]
fn malformed_duration_is_a_parse_error() {
    let path = write_config(
        r#"
[toast]
default_duration = "whenever"
"#,
    );
    let result = Settings::from_env_and_file(&path);
    std::fs::remove_file(&path).ok();

    assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
}

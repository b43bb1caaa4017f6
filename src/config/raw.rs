use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use serde_with::serde_as;

use crate::Result;
use crate::animation::Transition;
use crate::error::ConfigError;
use crate::types::{Color, EdgeInsets, Placement, SurfacePolicy};

use super::defaults::{
    default_background, default_content_padding, default_corner_radius, default_duration,
    default_font_size, default_placement, default_screen_padding, default_surface_policy,
    default_tap_to_dismiss, default_text_color, default_transition_duration,
};
use super::env::{env_bool, env_duration, env_parse, env_string};
use super::{HumantimeDuration, Settings, TextStyle};

pub(super) fn load(path: impl AsRef<Path>) -> std::result::Result<RawConfig, ConfigError> {
    let path = path.as_ref();
    if let Err(source) = std::fs::metadata(path) {
        if source.kind() != ErrorKind::NotFound {
            return Err(ConfigError::FileRead {
                path: path.to_path_buf(),
                source,
            });
        }
    }

    ::config::Config::builder()
        .add_source(::config::File::from(path).required(false))
        .add_source(
            ::config::Environment::with_prefix("TOAST")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .map_err(|err| ConfigError::Other(err.to_string()))?
        .try_deserialize()
        .map_err(|err| ConfigError::Parse(err.to_string()))
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct RawConfig {
    #[serde(default)]
    pub(super) toast: RawToast,
    #[serde(default)]
    pub(super) style: RawStyle,
    #[serde(default)]
    pub(super) animation: RawAnimation,
}

#[serde_as]
#[derive(Debug, Deserialize)]
pub(super) struct RawToast {
    #[serde(default = "default_duration")]
    #[serde_as(as = "HumantimeDuration")]
    pub(super) default_duration: Duration,
    #[serde(default = "default_placement")]
    pub(super) placement: String,
    #[serde(default = "default_tap_to_dismiss")]
    pub(super) tap_to_dismiss: bool,
    #[serde(default = "default_surface_policy")]
    pub(super) surface_policy: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawStyle {
    #[serde(default = "default_font_size")]
    pub(super) font_size: f64,
    #[serde(default = "default_text_color")]
    pub(super) text_color: Color,
    #[serde(default = "default_background")]
    pub(super) background: Color,
    #[serde(default = "default_corner_radius")]
    pub(super) corner_radius: f64,
    #[serde(default = "default_content_padding")]
    pub(super) content_padding: EdgeInsets,
    #[serde(default = "default_screen_padding")]
    pub(super) screen_padding: EdgeInsets,
}

#[serde_as]
#[derive(Debug, Deserialize)]
pub(super) struct RawAnimation {
    #[serde(default = "default_transition_duration")]
    #[serde_as(as = "HumantimeDuration")]
    pub(super) show_duration: Duration,
    #[serde(default = "default_transition_duration")]
    #[serde_as(as = "HumantimeDuration")]
    pub(super) hide_duration: Duration,
    #[serde(default = "default_transition_duration")]
    #[serde_as(as = "HumantimeDuration")]
    pub(super) fling_duration: Duration,
}

impl RawConfig {
    pub(super) fn apply_env_overrides(&mut self) -> std::result::Result<(), ConfigError> {
        if let Some(duration) = env_duration("TOAST_DEFAULT_DURATION")? {
            self.toast.default_duration = duration;
        }
        if let Some(placement) = env_string("TOAST_PLACEMENT")? {
            self.toast.placement = placement;
        }
        if let Some(tap) = env_bool("TOAST_TAP_TO_DISMISS")? {
            self.toast.tap_to_dismiss = tap;
        }
        if let Some(policy) = env_string("TOAST_SURFACE_POLICY")? {
            self.toast.surface_policy = policy;
        }
        if let Some(show) = env_duration("TOAST_SHOW_DURATION")? {
            self.animation.show_duration = show;
        }
        if let Some(hide) = env_duration("TOAST_HIDE_DURATION")? {
            self.animation.hide_duration = hide;
        }
        if let Some(size) = env_parse::<f64>("TOAST_FONT_SIZE")? {
            self.style.font_size = size;
        }
        if let Some(radius) = env_parse::<f64>("TOAST_CORNER_RADIUS")? {
            self.style.corner_radius = radius;
        }
        Ok(())
    }

    pub(super) fn validate_and_build(self) -> Result<Settings> {
        let default_placement =
            Placement::from_str(&self.toast.placement).map_err(|message| {
                ConfigError::InvalidField {
                    field: "toast.placement",
                    message,
                }
            })?;
        let surface_policy =
            SurfacePolicy::from_str(&self.toast.surface_policy).map_err(|message| {
                ConfigError::InvalidField {
                    field: "toast.surface_policy",
                    message,
                }
            })?;

        if !self.style.font_size.is_finite() || self.style.font_size <= 0.0 {
            return Err(ConfigError::InvalidField {
                field: "style.font_size",
                message: format!("expected a positive size, got {}", self.style.font_size),
            }
            .into());
        }
        if !self.style.corner_radius.is_finite() || self.style.corner_radius < 0.0 {
            return Err(ConfigError::InvalidField {
                field: "style.corner_radius",
                message: format!(
                    "expected a non-negative radius, got {}",
                    self.style.corner_radius
                ),
            }
            .into());
        }
        for (field, color) in [
            ("style.text_color", self.style.text_color),
            ("style.background", self.style.background),
        ] {
            if !color.is_valid() {
                return Err(ConfigError::InvalidField {
                    field,
                    message: "color components must be within 0.0..=1.0".to_string(),
                }
                .into());
            }
        }
        for (field, insets) in [
            ("style.content_padding", self.style.content_padding),
            ("style.screen_padding", self.style.screen_padding),
        ] {
            if !insets.is_valid() {
                return Err(ConfigError::InvalidField {
                    field,
                    message: "insets must be finite and non-negative".to_string(),
                }
                .into());
            }
        }

        Ok(Settings {
            default_duration: self.toast.default_duration,
            default_placement,
            text: TextStyle {
                font_size: self.style.font_size,
                color: self.style.text_color,
            },
            background: self.style.background,
            corner_radius: self.style.corner_radius,
            content_padding: self.style.content_padding,
            screen_padding: self.style.screen_padding,
            show: Transition::pop_in(self.animation.show_duration),
            hide: Transition::fade_out(self.animation.hide_duration),
            fling: Transition::fling(self.animation.fling_duration),
            tap_to_dismiss: self.toast.tap_to_dismiss,
            surface_policy,
        })
    }
}

impl Default for RawToast {
    fn default() -> Self {
        Self {
            default_duration: default_duration(),
            placement: default_placement(),
            tap_to_dismiss: default_tap_to_dismiss(),
            surface_policy: default_surface_policy(),
        }
    }
}

impl Default for RawStyle {
    fn default() -> Self {
        Self {
            font_size: default_font_size(),
            text_color: default_text_color(),
            background: default_background(),
            corner_radius: default_corner_radius(),
            content_padding: default_content_padding(),
            screen_padding: default_screen_padding(),
        }
    }
}

impl Default for RawAnimation {
    fn default() -> Self {
        Self {
            show_duration: default_transition_duration(),
            hide_duration: default_transition_duration(),
            fling_duration: default_transition_duration(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RawConfig;
    use crate::config::Settings;
    use crate::error::{ConfigError, Error};
    use crate::types::{Color, Placement, SurfacePolicy};
    use std::time::Duration;

    fn parse(toml: &str) -> RawConfig {
        let built = ::config::Config::builder()
            .add_source(::config::File::from_str(toml, ::config::FileFormat::Toml))
            .build();
        match built.and_then(::config::Config::try_deserialize) {
            Ok(raw) => raw,
            Err(err) => panic!("sample toml should deserialize: {err}"),
        }
    }

    fn invalid_field(result: crate::Result<Settings>) -> &'static str {
        match result {
            Err(Error::Config(ConfigError::InvalidField { field, .. })) => field,
            other => panic!("expected an invalid field error, got {other:?}"),
        }
    }

    #[test]
    fn empty_file_yields_default_settings() {
        let settings = match parse("").validate_and_build() {
            Ok(settings) => settings,
            Err(err) => panic!("defaults should validate: {err}"),
        };
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn sections_override_defaults() {
        let raw = parse(
            r#"
            [toast]
            default_duration = "1s 500ms"
            placement = "top"
            surface_policy = "key"
            tap_to_dismiss = false

            [style]
            corner_radius = 10.0
            background = { red = 0.2, green = 0.2, blue = 0.2, alpha = 0.9 }

            [animation]
            hide_duration = "400ms"
            "#,
        );
        let settings = match raw.validate_and_build() {
            Ok(settings) => settings,
            Err(err) => panic!("sample should validate: {err}"),
        };
        assert_eq!(settings.default_duration, Duration::from_millis(1_500));
        assert_eq!(settings.default_placement, Placement::Top);
        assert_eq!(settings.surface_policy, SurfacePolicy::Key);
        assert!(!settings.tap_to_dismiss);
        assert_eq!(settings.background, Color::rgba(0.2, 0.2, 0.2, 0.9));
        assert_eq!(settings.hide.duration, Duration::from_millis(400));
        assert_eq!(settings.show.duration, Duration::from_millis(250));
    }

    #[test]
    fn unknown_placement_is_rejected() {
        let mut raw = RawConfig::default();
        raw.toast.placement = "sideways".to_string();
        assert_eq!(invalid_field(raw.validate_and_build()), "toast.placement");
    }

    #[test]
    fn out_of_range_color_is_rejected() {
        let mut raw = RawConfig::default();
        raw.style.background = Color::rgba(0.0, 0.0, 0.0, 2.0);
        assert_eq!(invalid_field(raw.validate_and_build()), "style.background");
    }

    #[test]
    fn non_positive_font_size_is_rejected() {
        let mut raw = RawConfig::default();
        raw.style.font_size = 0.0;
        assert_eq!(invalid_field(raw.validate_and_build()), "style.font_size");
    }

    #[test]
    fn missing_file_is_not_an_error() {
        assert!(super::load("/definitely/not/here/toast.toml").is_ok());
    }
}

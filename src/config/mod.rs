use std::path::Path;
use std::time::Duration;

use ::serde::Serialize;
use serde_with::serde_as;

use crate::Result;
use crate::animation::{HideProfile, Transition};
use crate::error::Error as ToastError;
use crate::types::{Color, EdgeInsets, Placement, SurfacePolicy};

mod defaults;
mod env;
mod raw;
mod serde;

pub(crate) use self::serde::HumantimeDuration;

/// Process-wide toast configuration.
///
/// The scheduler reads it each time a toast starts showing, so changes made
/// with `ToastScheduler::configure` apply to every toast shown afterwards,
/// including those already waiting in the queue.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    #[serde_as(as = "HumantimeDuration")]
    pub default_duration: Duration,
    pub default_placement: Placement,
    pub text: TextStyle,
    pub background: Color,
    pub corner_radius: f64,
    pub content_padding: EdgeInsets,
    pub screen_padding: EdgeInsets,
    pub show: Transition,
    pub hide: Transition,
    pub fling: Transition,
    pub tap_to_dismiss: bool,
    pub surface_policy: SurfacePolicy,
}

/// Styling applied to plain-text content and to styled runs that leave a
/// property unset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextStyle {
    pub font_size: f64,
    pub color: Color,
}

impl Settings {
    /// Load settings from an optional TOML file and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read or parsed,
    /// when environment overrides are malformed, or when the resulting values
    /// fail validation.
    pub fn from_env_and_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut raw = raw::load(path).map_err(ToastError::from)?;
        raw.apply_env_overrides().map_err(ToastError::from)?;
        raw.validate_and_build()
    }

    #[must_use]
    pub const fn hide_transition(&self, profile: HideProfile) -> Transition {
        match profile {
            HideProfile::Plain => self.hide,
            HideProfile::Fling => self.fling,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_duration: defaults::default_duration(),
            default_placement: Placement::default(),
            text: TextStyle {
                font_size: defaults::default_font_size(),
                color: defaults::default_text_color(),
            },
            background: defaults::default_background(),
            corner_radius: defaults::default_corner_radius(),
            content_padding: defaults::default_content_padding(),
            screen_padding: defaults::default_screen_padding(),
            show: Transition::pop_in(defaults::default_transition_duration()),
            hide: Transition::fade_out(defaults::default_transition_duration()),
            fling: Transition::fling(defaults::default_transition_duration()),
            tap_to_dismiss: defaults::default_tap_to_dismiss(),
            surface_policy: SurfacePolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Settings;
    use crate::animation::HideProfile;
    use std::time::Duration;

    #[test]
    fn defaults_follow_the_classic_toast_look() {
        let settings = Settings::default();
        assert_eq!(settings.default_duration, Duration::from_secs(3));
        assert!(settings.tap_to_dismiss);
        assert!((settings.background.alpha - 0.66).abs() < f64::EPSILON);
        assert!((settings.corner_radius - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn hide_profile_selects_transition() {
        let settings = Settings::default();
        assert_eq!(settings.hide_transition(HideProfile::Plain), settings.hide);
        assert_eq!(settings.hide_transition(HideProfile::Fling), settings.fling);
    }
}

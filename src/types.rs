use std::fmt::{self, Display};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Vertical anchor of a toast inside the surface's safe content area.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    Top,
    Middle,
    #[default]
    Bottom,
}

impl Placement {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Middle => "middle",
            Self::Bottom => "bottom",
        }
    }
}

impl Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Placement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "top" => Ok(Self::Top),
            "middle" | "center" | "centre" => Ok(Self::Middle),
            "bottom" => Ok(Self::Bottom),
            other => Err(format!("unknown placement: {other}")),
        }
    }
}

/// Named display durations.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationPreset {
    Short,
    Medium,
    Long,
}

impl DurationPreset {
    #[must_use]
    pub const fn as_duration(self) -> Duration {
        match self {
            Self::Short => Duration::from_secs(1),
            Self::Medium => Duration::from_secs(3),
            Self::Long => Duration::from_secs(5),
        }
    }
}

impl From<DurationPreset> for Duration {
    fn from(preset: DurationPreset) -> Self {
        preset.as_duration()
    }
}

impl FromStr for DurationPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "short" => Ok(Self::Short),
            "medium" => Ok(Self::Medium),
            "long" => Ok(Self::Long),
            other => Err(format!("unknown duration preset: {other}")),
        }
    }
}

/// How the target surface is picked when a request does not name one.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfacePolicy {
    /// The most recently ordered-front, visible, full-screen surface.
    #[default]
    Topmost,
    /// The designated key surface.
    Key,
}

impl SurfacePolicy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Topmost => "topmost",
            Self::Key => "key",
        }
    }
}

impl Display for SurfacePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SurfacePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "topmost" | "top" => Ok(Self::Topmost),
            "key" => Ok(Self::Key),
            other => Err(format!("unknown surface policy: {other}")),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct EdgeInsets {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl EdgeInsets {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    #[must_use]
    pub const fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    pub(crate) fn is_valid(&self) -> bool {
        [self.top, self.left, self.bottom, self.right]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
    }
}

/// RGBA color with components in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }

    pub(crate) fn is_valid(&self) -> bool {
        [self.red, self.green, self.blue, self.alpha]
            .iter()
            .all(|c| (0.0..=1.0).contains(c))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn mid_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    #[must_use]
    pub fn mid_y(&self) -> f64 {
        self.y + self.height / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::{Color, DurationPreset, EdgeInsets, Placement, SurfacePolicy};
    use std::str::FromStr;
    use std::time::Duration;

    #[test]
    fn placement_from_str_accepts_variants() {
        assert_eq!(Placement::from_str("TOP"), Ok(Placement::Top));
        assert_eq!(Placement::from_str("center"), Ok(Placement::Middle));
        assert_eq!(Placement::from_str("bottom"), Ok(Placement::Bottom));
        assert!(Placement::from_str("left").is_err());
    }

    #[test]
    fn presets_match_named_durations() {
        assert_eq!(DurationPreset::Short.as_duration(), Duration::from_secs(1));
        assert_eq!(Duration::from(DurationPreset::Medium), Duration::from_secs(3));
        assert_eq!(DurationPreset::from_str("long"), Ok(DurationPreset::Long));
    }

    #[test]
    fn surface_policy_round_trips_through_display() {
        for policy in [SurfacePolicy::Topmost, SurfacePolicy::Key] {
            assert_eq!(SurfacePolicy::from_str(&policy.to_string()), Ok(policy));
        }
    }

    #[test]
    fn validity_checks_reject_out_of_range_values() {
        assert!(!Color::rgba(0.0, 0.0, 0.0, 1.5).is_valid());
        assert!(Color::BLACK.with_alpha(0.66).is_valid());
        assert!(!EdgeInsets::new(-1.0, 0.0, 0.0, 0.0).is_valid());
        assert!(!EdgeInsets::new(f64::NAN, 0.0, 0.0, 0.0).is_valid());
        assert!(EdgeInsets::ZERO.is_valid());
    }
}

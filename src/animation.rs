//! Visual transitions handed to the presenter's animation runner.

use std::f64::consts::PI;
use std::time::Duration;

use serde::Serialize;
use serde_with::serde_as;

use crate::config::HumantimeDuration;

const DEFAULT_TRANSITION: Duration = Duration::from_millis(250);

/// Animatable properties of a toast view.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct VisualState {
    pub alpha: f64,
    pub scale: f64,
    /// Radians, clockwise positive.
    pub rotation: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl VisualState {
    pub const IDENTITY: Self = Self {
        alpha: 1.0,
        scale: 1.0,
        rotation: 0.0,
        offset_x: 0.0,
        offset_y: 0.0,
    };

    #[must_use]
    pub const fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }

    #[must_use]
    pub const fn with_scale(self, scale: f64) -> Self {
        Self { scale, ..self }
    }
}

impl Default for VisualState {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A timed change from a pre-state to a target state.
///
/// `from: None` animates from whatever the view currently shows.
#[serde_as]
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Transition {
    #[serde_as(as = "HumantimeDuration")]
    pub duration: Duration,
    pub from: Option<VisualState>,
    pub to: VisualState,
}

impl Transition {
    /// Fade in while shrinking from a slight zoom.
    #[must_use]
    pub const fn pop_in(duration: Duration) -> Self {
        Self {
            duration,
            from: Some(VisualState::IDENTITY.with_alpha(0.0).with_scale(1.125)),
            to: VisualState::IDENTITY,
        }
    }

    /// Plain fade out from the resting state.
    #[must_use]
    pub const fn fade_out(duration: Duration) -> Self {
        Self {
            duration,
            from: Some(VisualState::IDENTITY),
            to: VisualState::IDENTITY.with_alpha(0.0),
        }
    }

    /// Thrown away: shrink, drift down-left, tilt and fade from wherever the
    /// view currently is.
    #[must_use]
    pub const fn fling(duration: Duration) -> Self {
        Self {
            duration,
            from: None,
            to: VisualState {
                alpha: 0.0,
                scale: 0.75,
                rotation: -PI / 4.0,
                offset_x: -24.0,
                offset_y: 160.0,
            },
        }
    }
}

impl Default for Transition {
    fn default() -> Self {
        Self::pop_in(DEFAULT_TRANSITION)
    }
}

/// Which hide transition a dismissal uses.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HideProfile {
    /// Timeout and programmatic dismissal.
    Plain,
    /// Tap-to-dismiss.
    Fling,
}

pub(crate) const fn default_duration() -> Duration {
    DEFAULT_TRANSITION
}

#[cfg(test)]
mod tests {
    use super::{Transition, VisualState};
    use std::time::Duration;

    #[test]
    fn pop_in_starts_transparent_and_enlarged() {
        let t = Transition::pop_in(Duration::from_millis(250));
        let from = t.from.unwrap_or(VisualState::IDENTITY);
        assert!(from.alpha.abs() < f64::EPSILON);
        assert!((from.scale - 1.125).abs() < f64::EPSILON);
        assert_eq!(t.to, VisualState::IDENTITY);
    }

    #[test]
    fn fling_animates_from_current_state() {
        let t = Transition::fling(Duration::from_millis(250));
        assert!(t.from.is_none());
        assert!(t.to.rotation < 0.0);
        assert!(t.to.offset_y > 0.0);
    }
}

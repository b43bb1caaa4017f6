use std::time::Duration;

use crate::animation;
use crate::types::{Color, EdgeInsets};

pub(super) const fn default_duration() -> Duration {
    Duration::from_secs(3)
}

pub(super) fn default_placement() -> String {
    "bottom".to_string()
}

pub(super) fn default_surface_policy() -> String {
    "topmost".to_string()
}

pub(super) const fn default_tap_to_dismiss() -> bool {
    true
}

pub(super) const fn default_font_size() -> f64 {
    14.0
}

pub(super) const fn default_text_color() -> Color {
    Color::WHITE
}

pub(super) const fn default_background() -> Color {
    Color::BLACK.with_alpha(0.66)
}

pub(super) const fn default_corner_radius() -> f64 {
    6.0
}

pub(super) const fn default_content_padding() -> EdgeInsets {
    EdgeInsets::new(4.0, 8.0, 4.0, 8.0)
}

pub(super) const fn default_screen_padding() -> EdgeInsets {
    EdgeInsets::new(24.0, 12.0, 16.0, 12.0)
}

pub(super) const fn default_transition_duration() -> Duration {
    animation::default_duration()
}

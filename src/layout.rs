//! Symbolic placement of a toast box on its surface.
//!
//! The scheduler only builds the constraint set; hosts with a real layout
//! engine translate it into their own constraints. [`ToastLayout::solve`]
//! is a straightforward solver for hosts without one.

use crate::types::{EdgeInsets, Placement, Rect, Size};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VerticalAnchor {
    /// Box top pinned this far below the surface top.
    Top(f64),
    /// Box centered vertically.
    Center,
    /// Box bottom pinned this far above the surface bottom.
    Bottom(f64),
}

/// Constraints for one toast box.
///
/// Horizontally the box is centered and kept at least `min_leading` /
/// `min_trailing` away from the surface edges. Vertically it follows
/// `anchor` and never crosses `top_limit` / `bottom_limit`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToastLayout {
    pub placement: Placement,
    pub anchor: VerticalAnchor,
    pub content_padding: EdgeInsets,
    pub min_leading: f64,
    pub min_trailing: f64,
    pub top_limit: f64,
    pub bottom_limit: f64,
}

impl ToastLayout {
    #[must_use]
    pub fn new(
        placement: Placement,
        screen_padding: EdgeInsets,
        safe_area: EdgeInsets,
        content_padding: EdgeInsets,
    ) -> Self {
        let top_limit = safe_area.top + screen_padding.top;
        let bottom_limit = safe_area.bottom + screen_padding.bottom;
        let anchor = match placement {
            Placement::Top => VerticalAnchor::Top(top_limit),
            Placement::Middle => VerticalAnchor::Center,
            Placement::Bottom => VerticalAnchor::Bottom(bottom_limit),
        };
        Self {
            placement,
            anchor,
            content_padding,
            min_leading: screen_padding.left,
            min_trailing: screen_padding.right,
            top_limit,
            bottom_limit,
        }
    }

    /// Frame of the box for `content` (the measured text size) on a surface
    /// with the given `bounds`. Non-finite insets give a meaningless frame but
    /// never panic.
    #[must_use]
    pub fn solve(&self, bounds: Rect, content: Size) -> Rect {
        let pad = self.content_padding;
        let half = bounds.width / 2.0;
        let max_width = (2.0 * (half - self.min_leading).min(half - self.min_trailing)).max(0.0);
        let width = (content.width + pad.left + pad.right).min(max_width);

        let max_height = (bounds.height - self.top_limit - self.bottom_limit).max(0.0);
        let height = (content.height + pad.top + pad.bottom).min(max_height);

        let min_y = bounds.y + self.top_limit;
        let max_y = bounds.max_y() - self.bottom_limit - height;
        let y = match self.anchor {
            VerticalAnchor::Top(offset) => bounds.y + offset,
            VerticalAnchor::Bottom(offset) => bounds.max_y() - offset - height,
            VerticalAnchor::Center => (bounds.mid_y() - height / 2.0).min(max_y).max(min_y),
        };

        Rect::new(bounds.mid_x() - width / 2.0, y, width, height)
    }
}

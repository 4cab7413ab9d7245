//! Anchored menu coordinates
//!
//! The menu is rendered as a top-level `position: fixed` overlay, so every
//! value here is an absolute offset from a viewport edge. Nothing depends on
//! scrolling ancestors and no transform-based centering is used.

use std::fmt::Write;

use crate::geometry::{Rect, Viewport};
use crate::placement::{Alignment, Placement, Side};

/// Default gap between trigger and menu on the primary axis, in pixels
pub const DEFAULT_OFFSET: f64 = 8.0;

/// Distance kept between a clamped menu and the viewport edge, in pixels
pub const VIEWPORT_MARGIN: f64 = 8.0;

/// Stacking order of the overlay menu
pub const MENU_Z_INDEX: u32 = 1000;

/// Sparse edge offsets for the menu.
///
/// Exactly one vertical field (`top` or `bottom`) and one horizontal field
/// (`left` or `right`) are populated for a computed position.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    pub top: Option<f64>,
    pub left: Option<f64>,
    pub right: Option<f64>,
    pub bottom: Option<f64>,
}

impl Position {
    /// True until the first successful computation.
    pub fn is_empty(&self) -> bool {
        self.top.is_none() && self.left.is_none() && self.right.is_none() && self.bottom.is_none()
    }

    /// The rectangle the menu occupies once these offsets are applied.
    ///
    /// Unset axes fall back to the viewport origin, matching how a fixed
    /// element with no offsets on that axis is laid out.
    pub fn resolve(&self, menu: Rect, viewport: Viewport) -> Rect {
        let left = match (self.left, self.right) {
            (Some(left), _) => left,
            (None, Some(right)) => viewport.width - right - menu.width,
            (None, None) => 0.0,
        };
        let top = match (self.top, self.bottom) {
            (Some(top), _) => top,
            (None, Some(bottom)) => viewport.height - bottom - menu.height,
            (None, None) => 0.0,
        };
        Rect::new(top, left, menu.width, menu.height)
    }

    /// Inline style for the overlay menu.
    ///
    /// An empty position renders the menu transparent so its first measured
    /// frame does not flash at the viewport origin.
    pub fn to_style(&self) -> String {
        let mut style = format!("position: fixed; z-index: {MENU_Z_INDEX};");
        for (name, value) in [
            ("top", self.top),
            ("left", self.left),
            ("right", self.right),
            ("bottom", self.bottom),
        ] {
            if let Some(value) = value {
                let _ = write!(style, " {name}: {value}px;");
            }
        }
        if self.is_empty() {
            style.push_str(" opacity: 0;");
        }
        style
    }
}

/// Compute the menu position for `placement`, clamped to the viewport with the
/// default 8px margin.
pub fn compute_position(
    trigger: Rect,
    menu: Rect,
    viewport: Viewport,
    placement: Placement,
    offset: f64,
) -> Position {
    compute_position_with_margin(trigger, menu, viewport, placement, offset, VIEWPORT_MARGIN)
}

/// Compute the menu position for `placement`, clamped to the viewport with a
/// custom margin.
pub fn compute_position_with_margin(
    trigger: Rect,
    menu: Rect,
    viewport: Viewport,
    placement: Placement,
    offset: f64,
    margin: f64,
) -> Position {
    let mut position = anchor(trigger, menu, viewport, placement, offset);
    clamp(&mut position, menu, viewport, margin);
    position
}

/// Unclamped anchor for `placement`.
fn anchor(
    trigger: Rect,
    menu: Rect,
    viewport: Viewport,
    placement: Placement,
    offset: f64,
) -> Position {
    let mut position = Position::default();
    let alignment = placement.alignment();

    match placement.side() {
        Side::Top => position.bottom = Some(viewport.height - trigger.top + offset),
        Side::Bottom => position.top = Some(trigger.bottom() + offset),
        Side::Left | Side::Right => match alignment {
            Alignment::Center => {
                position.top = Some(trigger.top + (trigger.height - menu.height) / 2.0)
            }
            Alignment::Start => position.top = Some(trigger.top),
            Alignment::End => position.bottom = Some(viewport.height - trigger.bottom()),
        },
    }

    match placement.side() {
        Side::Left => position.right = Some(viewport.width - trigger.left + offset),
        Side::Right => position.left = Some(trigger.right() + offset),
        Side::Top | Side::Bottom => match alignment {
            Alignment::Center => {
                position.left = Some(trigger.left + (trigger.width - menu.width) / 2.0)
            }
            Alignment::Start => position.left = Some(trigger.left),
            Alignment::End => position.right = Some(viewport.width - trigger.right()),
        },
    }

    position
}

/// Pin each populated edge so the menu stays inside the viewport.
///
/// A negative value is pinned to `margin`; a value that pushes the menu past
/// the opposite edge is pinned so the far side sits `margin` inside.
fn clamp(position: &mut Position, menu: Rect, viewport: Viewport, margin: f64) {
    if let Some(left) = position.left.as_mut() {
        *left = clamp_edge(*left, menu.width, viewport.width, margin);
    }
    if let Some(right) = position.right.as_mut() {
        *right = clamp_edge(*right, menu.width, viewport.width, margin);
    }
    if let Some(top) = position.top.as_mut() {
        *top = clamp_edge(*top, menu.height, viewport.height, margin);
    }
    if let Some(bottom) = position.bottom.as_mut() {
        *bottom = clamp_edge(*bottom, menu.height, viewport.height, margin);
    }
}

fn clamp_edge(value: f64, extent: f64, available: f64, margin: f64) -> f64 {
    if value < 0.0 {
        margin
    } else if value + extent > available {
        available - extent - margin
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trigger() -> Rect {
        Rect::new(100.0, 100.0, 50.0, 20.0)
    }

    fn menu() -> Rect {
        Rect::sized(120.0, 80.0)
    }

    fn viewport() -> Viewport {
        Viewport::new(800.0, 600.0)
    }

    fn compute(placement: Placement) -> Position {
        compute_position(trigger(), menu(), viewport(), placement, DEFAULT_OFFSET)
    }

    #[test]
    fn test_bottom_start() {
        assert_eq!(
            compute(Placement::BottomStart),
            Position {
                top: Some(128.0),
                left: Some(100.0),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_top_end() {
        assert_eq!(
            compute(Placement::TopEnd),
            Position {
                bottom: Some(508.0),
                right: Some(650.0),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_bottom_centered() {
        // 100 + (50 - 120) / 2 = 65
        let position = compute(Placement::Bottom);
        assert_eq!(position.top, Some(128.0));
        assert_eq!(position.left, Some(65.0));
    }

    #[test]
    fn test_left_placements() {
        // 800 - 100 + 8 = 708 leaves no room for 120px, so it is pinned
        let centered = compute(Placement::Left);
        assert_eq!(centered.top, Some(70.0));
        assert_eq!(centered.right, Some(800.0 - 120.0 - 8.0));

        let start = compute(Placement::LeftStart);
        assert_eq!(start.top, Some(100.0));

        let end = compute(Placement::LeftEnd);
        assert_eq!(end.bottom, Some(480.0));
        assert_eq!(end.top, None);
    }

    #[test]
    fn test_right_start() {
        let position = compute(Placement::RightStart);
        assert_eq!(position.left, Some(158.0));
        assert_eq!(position.top, Some(100.0));
    }

    #[test]
    fn test_never_populates_all_four() {
        for placement in Placement::ALL {
            let p = compute(placement);
            assert!(p.top.is_some() ^ p.bottom.is_some(), "{placement}");
            assert!(p.left.is_some() ^ p.right.is_some(), "{placement}");
        }
    }

    #[test]
    fn test_negative_left_pins_to_margin() {
        let trigger = Rect::new(100.0, 10.0, 20.0, 20.0);
        let position = compute_position(
            trigger,
            menu(),
            viewport(),
            Placement::Bottom,
            DEFAULT_OFFSET,
        );
        assert_eq!(position.left, Some(VIEWPORT_MARGIN));
    }

    #[test]
    fn test_right_overflow_pins_inside() {
        let trigger = Rect::new(100.0, 760.0, 30.0, 20.0);
        let position = compute_position(
            trigger,
            menu(),
            viewport(),
            Placement::BottomStart,
            DEFAULT_OFFSET,
        );
        assert_eq!(position.left, Some(800.0 - 120.0 - 8.0));
    }

    #[test]
    fn test_bottom_overflow_pins_inside() {
        let trigger = Rect::new(570.0, 100.0, 50.0, 20.0);
        let position = compute_position(
            trigger,
            menu(),
            viewport(),
            Placement::BottomStart,
            DEFAULT_OFFSET,
        );
        assert_eq!(position.top, Some(600.0 - 80.0 - 8.0));
    }

    #[test]
    fn test_end_aligned_near_left_edge_stays_inside() {
        // right = 800 - 40 = 760; 760 + 120 > 800
        let trigger = Rect::new(100.0, 10.0, 30.0, 20.0);
        let position = compute_position(
            trigger,
            menu(),
            viewport(),
            Placement::BottomEnd,
            DEFAULT_OFFSET,
        );
        assert_eq!(position.right, Some(800.0 - 120.0 - 8.0));
        assert!(position.resolve(menu(), viewport()).is_within(viewport()));
    }

    #[test]
    fn test_custom_margin() {
        let trigger = Rect::new(100.0, 10.0, 20.0, 20.0);
        let position = compute_position_with_margin(
            trigger,
            menu(),
            viewport(),
            Placement::Bottom,
            DEFAULT_OFFSET,
            16.0,
        );
        assert_eq!(position.left, Some(16.0));
    }

    #[test]
    fn test_resolve_from_far_edges() {
        let rect = compute(Placement::TopEnd).resolve(menu(), viewport());
        assert_eq!(rect, Rect::new(12.0, 30.0, 120.0, 80.0));
    }

    #[test]
    fn test_style() {
        assert_eq!(
            compute(Placement::BottomStart).to_style(),
            "position: fixed; z-index: 1000; top: 128px; left: 100px;"
        );
        assert_eq!(
            Position::default().to_style(),
            "position: fixed; z-index: 1000; opacity: 0;"
        );
    }
}

// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Anchor-preserving move and resize of an axis-aligned box.
//!
//! Every function here is pure: it takes the box as it was when the drag
//! started plus the cumulative pointer offset, and returns the candidate box.
//! Nothing is read back from the page mid-drag, so a frame never depends on
//! the previous frame's rounding.

use kurbo::{Point, Rect, Size, Vec2};

use crate::handle::Handle;
use crate::modifiers::Modifiers;

/// Default minimum width and height of a resized box, in pixels.
pub const MIN_SIZE: Size = Size::new(20.0, 20.0);

/// Moves `start` by `offset`.
#[must_use]
pub fn move_rect(start: Rect, offset: Vec2) -> Rect {
    start + offset
}

/// Resizes `start` by dragging `handle` by `offset`.
///
/// - Without modifiers the opposite handle stays where it is. Dragging past
///   it flips the box to the other side rather than inverting it.
/// - Shift keeps the aspect ratio of `start`; the axis that moved further
///   relative to its own length decides the size. On an edge handle the
///   other dimension follows and stays centered.
/// - Ctrl, Alt or Meta keeps the center of `start` fixed and grows both sides.
///
/// Neither side ever ends up smaller than `min`; with Shift the floor is
/// applied without breaking the aspect ratio.
///
/// ```
/// use kurbo::{Rect, Vec2};
/// use stagehand_handles::{Handle, MIN_SIZE, Modifiers, resize_rect};
///
/// let start = Rect::new(100.0, 100.0, 200.0, 150.0);
/// let out = resize_rect(start, Handle::Se, Vec2::new(30.0, 10.0), Modifiers::empty(), MIN_SIZE);
/// assert_eq!(out, Rect::new(100.0, 100.0, 230.0, 160.0));
/// ```
#[must_use]
pub fn resize_rect(
    start: Rect,
    handle: Handle,
    offset: Vec2,
    modifiers: Modifiers,
    min: Size,
) -> Rect {
    let (fx, fy) = handle.anchor();
    let moves_x = fx != 0.5;
    let moves_y = fy != 0.5;
    let pointer = handle.point_on(start) + offset;
    let fixed = handle.opposite().point_on(start);
    let center = start.center();
    let from_center = modifiers.from_center();

    let span = |moves: bool, p: f64, fixed: f64, center: f64, current: f64| {
        if !moves {
            current
        } else if from_center {
            2.0 * (p - center).abs()
        } else {
            (p - fixed).abs()
        }
    };
    let mut w = span(moves_x, pointer.x, fixed.x, center.x, start.width());
    let mut h = span(moves_y, pointer.y, fixed.y, center.y, start.height());

    let (w0, h0) = (start.width(), start.height());
    if modifiers.keeps_aspect() && w0 > 0.0 && h0 > 0.0 {
        let ratio = w0 / h0;
        match (moves_x, moves_y) {
            (true, true) if w / w0 >= h / h0 => h = w / ratio,
            (true, true) => w = h * ratio,
            (true, false) => h = w / ratio,
            (false, true) => w = h * ratio,
            (false, false) => {}
        }
        if w < min.width || h < min.height {
            if w > 0.0 && h > 0.0 {
                let k = (min.width / w).max(min.height / h);
                w *= k;
                h *= k;
            } else {
                w = min.width.max(min.height * ratio);
                h = w / ratio;
            }
        }
    } else {
        w = w.max(min.width);
        h = h.max(min.height);
    }

    let x0 = if moves_x && !from_center {
        origin_beside(fixed.x, pointer.x, fx, w)
    } else {
        center.x - w * 0.5
    };
    let y0 = if moves_y && !from_center {
        origin_beside(fixed.y, pointer.y, fy, h)
    } else {
        center.y - h * 0.5
    };
    Rect::from_origin_size(Point::new(x0, y0), Size::new(w, h))
}

/// Start of a span of length `len` that has `fixed` at one end and extends
/// toward `pointer`; `fraction` is the dragged handle's side on this axis.
fn origin_beside(fixed: f64, pointer: f64, fraction: f64, len: f64) -> f64 {
    let toward_positive = if pointer == fixed {
        fraction > 0.5
    } else {
        pointer > fixed
    };
    if toward_positive { fixed } else { fixed - len }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: Rect = Rect::new(100.0, 100.0, 200.0, 150.0);

    fn resize(handle: Handle, dx: f64, dy: f64, modifiers: Modifiers) -> Rect {
        resize_rect(START, handle, Vec2::new(dx, dy), modifiers, MIN_SIZE)
    }

    #[test]
    fn move_translates_without_resizing() {
        let out = move_rect(START, Vec2::new(-30.0, 12.5));
        assert_eq!(out, Rect::new(70.0, 112.5, 170.0, 162.5), "moved");
    }

    #[test]
    fn nw_drag_keeps_se_fixed() {
        let out = resize(Handle::Nw, 20.0, -10.0, Modifiers::empty());
        assert_eq!(out, Rect::new(120.0, 90.0, 200.0, 150.0), "se corner fixed");
    }

    #[test]
    fn edge_drag_changes_one_axis() {
        let out = resize(Handle::E, 40.0, 999.0, Modifiers::empty());
        assert_eq!(out, Rect::new(100.0, 100.0, 240.0, 150.0), "only width");
        let out = resize(Handle::N, 999.0, -20.0, Modifiers::empty());
        assert_eq!(out, Rect::new(100.0, 80.0, 200.0, 150.0), "only height");
    }

    #[test]
    fn dragging_past_the_anchor_flips() {
        let out = resize(Handle::E, -150.0, 0.0, Modifiers::empty());
        assert_eq!(out, Rect::new(50.0, 100.0, 100.0, 150.0), "flipped to the left");
    }

    #[test]
    fn shift_on_corner_uses_dominant_axis() {
        // Width grows by 50%, height by 20%: width wins.
        let out = resize(Handle::Se, 50.0, 10.0, Modifiers::SHIFT);
        assert_eq!(out, Rect::new(100.0, 100.0, 250.0, 175.0), "ratio 2:1 kept");
    }

    #[test]
    fn shift_on_edge_centers_perpendicular_axis() {
        let out = resize(Handle::E, 100.0, 0.0, Modifiers::SHIFT);
        assert_eq!(out, Rect::new(100.0, 75.0, 300.0, 175.0), "height follows, centered");
    }

    #[test]
    fn ctrl_keeps_center() {
        let out = resize(Handle::Se, 10.0, 5.0, Modifiers::CTRL);
        assert_eq!(out.center(), START.center(), "center fixed");
        assert_eq!(out.size(), Size::new(120.0, 60.0), "both sides grow");
    }

    #[test]
    fn shift_alt_keeps_center_and_ratio() {
        let out = resize(Handle::Nw, -25.0, 0.0, Modifiers::SHIFT | Modifiers::ALT);
        assert_eq!(out.center(), START.center(), "center fixed");
        assert_eq!(out.size(), Size::new(150.0, 75.0), "2:1 kept");
    }

    #[test]
    fn floor_applies_under_every_modifier() {
        for modifiers in [
            Modifiers::empty(),
            Modifiers::SHIFT,
            Modifiers::CTRL,
            Modifiers::SHIFT | Modifiers::ALT,
        ] {
            for handle in Handle::ALL {
                let p = handle.point_on(START);
                let c = START.center();
                // Drag the handle straight onto the center.
                let out = resize(handle, c.x - p.x, c.y - p.y, modifiers);
                assert!(
                    out.width() >= MIN_SIZE.width - 1e-9 && out.height() >= MIN_SIZE.height - 1e-9,
                    "{handle:?} {modifiers:?} gave {out:?}"
                );
            }
        }
    }

    #[test]
    fn floor_with_shift_keeps_ratio() {
        let out = resize(Handle::Se, -95.0, -48.0, Modifiers::SHIFT);
        assert_eq!(out.size(), Size::new(40.0, 20.0), "scaled up to the floor at 2:1");
        assert_eq!(out.origin(), START.origin(), "nw still fixed");
    }
}

// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size};

/// One of the eight resize handles around a bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Handle {
    /// Top-left corner.
    Nw,
    /// Top edge midpoint.
    N,
    /// Top-right corner.
    Ne,
    /// Right edge midpoint.
    E,
    /// Bottom-right corner.
    Se,
    /// Bottom edge midpoint.
    S,
    /// Bottom-left corner.
    Sw,
    /// Left edge midpoint.
    W,
}

impl Handle {
    /// All handles, clockwise from the top-left corner.
    pub const ALL: [Self; 8] = [
        Self::Nw,
        Self::N,
        Self::Ne,
        Self::E,
        Self::Se,
        Self::S,
        Self::Sw,
        Self::W,
    ];

    /// Position on the box as fractions of its width and height.
    #[must_use]
    pub const fn anchor(self) -> (f64, f64) {
        match self {
            Self::Nw => (0.0, 0.0),
            Self::N => (0.5, 0.0),
            Self::Ne => (1.0, 0.0),
            Self::E => (1.0, 0.5),
            Self::Se => (1.0, 1.0),
            Self::S => (0.5, 1.0),
            Self::Sw => (0.0, 1.0),
            Self::W => (0.0, 0.5),
        }
    }

    /// The handle diagonally (or directly) across the box.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Nw => Self::Se,
            Self::N => Self::S,
            Self::Ne => Self::Sw,
            Self::E => Self::W,
            Self::Se => Self::Nw,
            Self::S => Self::N,
            Self::Sw => Self::Ne,
            Self::W => Self::E,
        }
    }

    /// Returns `true` for the four corner handles.
    #[must_use]
    pub const fn is_corner(self) -> bool {
        matches!(self, Self::Nw | Self::Ne | Self::Se | Self::Sw)
    }

    /// Short lowercase name (`"nw"`, `"e"`, ...).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Nw => "nw",
            Self::N => "n",
            Self::Ne => "ne",
            Self::E => "e",
            Self::Se => "se",
            Self::S => "s",
            Self::Sw => "sw",
            Self::W => "w",
        }
    }

    /// CSS cursor to show while hovering the handle.
    #[must_use]
    pub const fn cursor(self) -> &'static str {
        match self {
            Self::Nw | Self::Se => "nwse-resize",
            Self::Ne | Self::Sw => "nesw-resize",
            Self::N | Self::S => "ns-resize",
            Self::E | Self::W => "ew-resize",
        }
    }

    /// Where this handle sits on `rect`.
    #[must_use]
    pub fn point_on(self, rect: Rect) -> Point {
        let (fx, fy) = self.anchor();
        Point::new(
            rect.x0 + fx * rect.width(),
            rect.y0 + fy * rect.height(),
        )
    }

    /// The square hit area of this handle, `size` wide and centered on it.
    #[must_use]
    pub fn rect(self, bounds: Rect, size: f64) -> Rect {
        Rect::from_center_size(self.point_on(bounds), Size::new(size, size))
    }
}

/// What a pointer landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HitTarget {
    /// A resize handle.
    Handle(Handle),
    /// The inside of the box, which moves it.
    Body,
}

/// Finds what `point` hits on a box with handles `handle_size` wide.
///
/// Corners win over edges, and handles win over the body, so the small
/// corner squares stay reachable on tiny boxes.
///
/// ```
/// use kurbo::{Point, Rect};
/// use stagehand_handles::{Handle, HitTarget, hit_test};
///
/// let bounds = Rect::new(100.0, 100.0, 200.0, 150.0);
/// assert_eq!(hit_test(bounds, Point::new(201.0, 149.0), 10.0), Some(HitTarget::Handle(Handle::Se)));
/// assert_eq!(hit_test(bounds, Point::new(150.0, 120.0), 10.0), Some(HitTarget::Body));
/// assert_eq!(hit_test(bounds, Point::new(10.0, 10.0), 10.0), None);
/// ```
#[must_use]
pub fn hit_test(bounds: Rect, point: Point, handle_size: f64) -> Option<HitTarget> {
    let corners = Handle::ALL.into_iter().filter(|h| h.is_corner());
    let edges = Handle::ALL.into_iter().filter(|h| !h.is_corner());
    corners
        .chain(edges)
        .find(|h| h.rect(bounds, handle_size).contains(point))
        .map(HitTarget::Handle)
        .or_else(|| bounds.contains(point).then_some(HitTarget::Body))
}

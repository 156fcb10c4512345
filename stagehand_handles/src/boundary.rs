// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Rect, Size};

/// Default tolerance, in pixels, by which a box may overhang its container.
pub const BOUNDARY_MARGIN: f64 = 10.0;

/// Keeps dragged boxes inside their container, give or take a margin.
///
/// Candidates are accepted or rejected whole; a rejected frame is simply
/// skipped and the previous accepted frame stays on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Boundary {
    /// Size of the container, whose origin is the coordinate origin.
    pub container: Size,
    /// How far an edge may overhang the container.
    pub margin: f64,
}

impl Boundary {
    /// A boundary for `container` with the given overhang margin.
    #[must_use]
    pub fn new(container: Size, margin: f64) -> Self {
        Self { container, margin }
    }

    /// Whether `candidate` may replace `start` as the box of the current drag.
    ///
    /// Each edge must lie within the container plus the margin. An edge that
    /// was already outside when the drag started may stay outside, as long as
    /// it does not move further out, so an element placed off-stage can still
    /// be dragged back in.
    #[must_use]
    pub fn admits(&self, start: Rect, candidate: Rect) -> bool {
        let lo = -self.margin;
        let hi_x = self.container.width + self.margin;
        let hi_y = self.container.height + self.margin;
        let low_ok = |was: f64, now: f64| now >= lo || now >= was;
        let high_ok = |was: f64, now: f64, hi: f64| now <= hi || now <= was;
        low_ok(start.x0, candidate.x0)
            && low_ok(start.y0, candidate.y0)
            && high_ok(start.x1, candidate.x1, hi_x)
            && high_ok(start.y1, candidate.y1, hi_y)
    }
}

// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The on-screen bounding box.
//!
//! [`BoundingBoxView`] owns no business logic. It measures the element as the
//! page currently draws it, lays out the box and its eight handles, and hands
//! that layout to an [`OverlaySink`] to draw.

use kurbo::{Point, Rect};
use stagehand_handles::{Handle, HitTarget, hit_test};
use stagehand_units::{LayoutSource, rect_from_element};

/// The geometry of the overlay, in the containing block's pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayLayout {
    /// The box around the element.
    pub container: Rect,
    /// Every handle with its square, in [`Handle::ALL`] order.
    pub handles: [(Handle, Rect); 8],
    /// Whether the overlay is shown.
    pub visible: bool,
}

impl OverlayLayout {
    /// Lays out a visible overlay around `container`.
    #[must_use]
    pub fn around(container: Rect, handle_size: f64) -> Self {
        Self {
            container,
            handles: Handle::ALL.map(|h| (h, h.rect(container, handle_size))),
            visible: true,
        }
    }

    /// The square of `handle`.
    #[must_use]
    pub fn handle_rect(&self, handle: Handle) -> Rect {
        self.handles
            .iter()
            .find_map(|&(h, r)| (h == handle).then_some(r))
            .unwrap_or(Rect::ZERO)
    }
}

/// Draws the overlay.
pub trait OverlaySink {
    /// Shows, moves or hides the overlay.
    fn render(&mut self, layout: &OverlayLayout);
}

/// The bounding box of one edit session.
#[derive(Clone, Debug)]
pub struct BoundingBoxView {
    handle_size: f64,
    layout: Option<OverlayLayout>,
}

impl BoundingBoxView {
    /// Creates a view that has not been drawn yet.
    #[must_use]
    pub fn new(handle_size: f64) -> Self {
        Self {
            handle_size,
            layout: None,
        }
    }

    /// Re-measures `element` and redraws.
    ///
    /// When the element has no layout the previous overlay stays as it was.
    pub fn sync<L: LayoutSource + ?Sized>(
        &mut self,
        element: &L,
        sink: Option<&mut (dyn OverlaySink + 'static)>,
    ) -> Option<&OverlayLayout> {
        let rect = rect_from_element(element)?.to_rect();
        let layout = OverlayLayout::around(rect, self.handle_size);
        if let Some(sink) = sink {
            sink.render(&layout);
        }
        self.layout = Some(layout);
        self.layout.as_ref()
    }

    /// Hides the overlay for good.
    pub fn discard(&mut self, sink: Option<&mut (dyn OverlaySink + 'static)>) {
        if let Some(mut layout) = self.layout.take() {
            layout.visible = false;
            if let Some(sink) = sink {
                sink.render(&layout);
            }
        }
    }

    /// The last drawn layout.
    #[must_use]
    pub fn layout(&self) -> Option<&OverlayLayout> {
        self.layout.as_ref()
    }

    /// Whether the overlay is on screen.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.layout.is_some_and(|l| l.visible)
    }

    /// What is under `point` in the last drawn layout.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Option<HitTarget> {
        let layout = self.layout.as_ref()?;
        hit_test(layout.container, point, self.handle_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Option<Rect>);

    impl LayoutSource for Fixed {
        fn bounding_rect(&self) -> Option<Rect> {
            self.0
        }

        fn parent_rect(&self) -> Option<Rect> {
            Some(Rect::new(50.0, 50.0, 1050.0, 850.0))
        }
    }

    #[derive(Default)]
    struct Frames(Vec<OverlayLayout>);

    impl OverlaySink for Frames {
        fn render(&mut self, layout: &OverlayLayout) {
            self.0.push(*layout);
        }
    }

    #[test]
    fn sync_lays_out_parent_relative_handles() {
        let mut view = BoundingBoxView::new(10.0);
        let mut frames = Frames::default();
        let element = Fixed(Some(Rect::new(275.0, 550.0, 525.0, 750.0)));
        view.sync(&element, Some(&mut frames));
        let layout = view.layout().unwrap();
        assert_eq!(layout.container, Rect::new(225.0, 500.0, 475.0, 700.0), "relative");
        assert_eq!(
            layout.handle_rect(Handle::Se),
            Rect::new(470.0, 695.0, 480.0, 705.0),
            "se square centered on the corner"
        );
        assert_eq!(frames.0.len(), 1, "drawn once");
        assert!(view.is_visible(), "visible");
    }

    #[test]
    fn missing_layout_keeps_the_last_overlay() {
        let mut view = BoundingBoxView::new(10.0);
        view.sync(&Fixed(Some(Rect::new(60.0, 60.0, 160.0, 160.0))), None);
        let before = *view.layout().unwrap();
        assert!(view.sync(&Fixed(None), None).is_none(), "nothing measured");
        assert_eq!(view.layout(), Some(&before), "unchanged");
    }

    #[test]
    fn discard_hides_and_forgets() {
        let mut view = BoundingBoxView::new(10.0);
        let mut frames = Frames::default();
        view.sync(&Fixed(Some(Rect::new(60.0, 60.0, 160.0, 160.0))), Some(&mut frames));
        view.discard(Some(&mut frames));
        assert!(!frames.0[1].visible, "hidden frame sent");
        assert!(!view.is_visible(), "gone");
        assert_eq!(view.hit_test(Point::new(50.0, 50.0)), None, "nothing to hit");
    }

    #[test]
    fn hit_test_uses_drawn_layout() {
        let mut view = BoundingBoxView::new(10.0);
        view.sync(&Fixed(Some(Rect::new(60.0, 60.0, 160.0, 160.0))), None);
        assert_eq!(view.hit_test(Point::new(50.0, 50.0)), Some(HitTarget::Body), "body");
        assert_eq!(
            view.hit_test(Point::new(111.0, 10.0)),
            Some(HitTarget::Handle(Handle::Ne)),
            "corner"
        );
        assert_eq!(view.hit_test(Point::new(300.0, 300.0)), None, "outside");
    }
}

// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A page without a browser.
//!
//! [`HeadlessElement`] lays itself out from its declared style the way a
//! browser lays out an absolutely positioned box: `left`/`top`/`width`/`height`
//! resolve against the containing block ([`HeadlessStage`]), then the
//! `transform` is applied about the box's center. It is enough to drive the
//! controller in tests and demos, and to check that what the controller writes
//! renders where it should.
//!
//! ```
//! use kurbo::Rect;
//! use stagehand_session::headless::{HeadlessElement, HeadlessStage};
//! use stagehand_transform::StyleSnapshot;
//!
//! let stage = HeadlessStage::new(Rect::new(0.0, 0.0, 1000.0, 800.0));
//! let element = HeadlessElement::new(
//!     &stage,
//!     StyleSnapshot {
//!         position: "absolute".into(),
//!         left: "35%".into(),
//!         top: "75%".into(),
//!         width: "25%".into(),
//!         height: "25%".into(),
//!         transform: "translate(-50%, -50%)".into(),
//!         ..StyleSnapshot::default()
//!     },
//! );
//! assert_eq!(element.rendered_rect(), Rect::new(225.0, 500.0, 475.0, 700.0));
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use kurbo::{Affine, Point, Rect, Size};
use stagehand_transform::{CssTransform, StylePatch, StyleSnapshot, StyleTarget};
use stagehand_units::{Length, LayoutSource};

use crate::host::{CharacterPlacement, CharacterSink, HostElement};
use crate::view::{OverlayLayout, OverlaySink};

/// The containing block of headless elements.
#[derive(Debug)]
pub struct HeadlessStage {
    rect: Cell<Rect>,
}

impl HeadlessStage {
    /// A stage covering `rect` of the viewport.
    #[must_use]
    pub fn new(rect: Rect) -> Rc<Self> {
        Rc::new(Self {
            rect: Cell::new(rect),
        })
    }

    /// The stage's rectangle in the viewport.
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect.get()
    }

    /// Resizes the stage, keeping its origin.
    pub fn resize(&self, size: Size) {
        self.rect
            .set(Rect::from_origin_size(self.rect.get().origin(), size));
    }
}

/// An absolutely positioned element on a [`HeadlessStage`].
#[derive(Debug)]
pub struct HeadlessElement {
    stage: Rc<HeadlessStage>,
    style: RefCell<StyleSnapshot>,
    connected: Cell<bool>,
    writes: RefCell<Vec<StylePatch>>,
}

impl HeadlessElement {
    /// Places an element with `style` on `stage`.
    #[must_use]
    pub fn new(stage: &Rc<HeadlessStage>, style: StyleSnapshot) -> Rc<Self> {
        Rc::new(Self {
            stage: Rc::clone(stage),
            style: RefCell::new(style),
            connected: Cell::new(true),
            writes: RefCell::new(Vec::new()),
        })
    }

    /// The current declared style.
    #[must_use]
    pub fn style(&self) -> StyleSnapshot {
        self.style.borrow().clone()
    }

    /// Every style write so far, oldest first.
    #[must_use]
    pub fn writes(&self) -> Vec<StylePatch> {
        self.writes.borrow().clone()
    }

    /// Removes the element from the page.
    pub fn detach(&self) {
        self.connected.set(false);
    }

    /// The untransformed layout box, relative to the stage.
    #[must_use]
    pub fn layout_box(&self) -> Rect {
        let parent = self.stage.rect().size();
        let style = self.style.borrow();
        let resolve = |text: &str, reference: f64| {
            Length::parse(text).map_or(0.0, |l| l.to_pixels(reference))
        };
        Rect::from_origin_size(
            Point::new(
                resolve(&style.left, parent.width),
                resolve(&style.top, parent.height),
            ),
            Size::new(
                resolve(&style.width, parent.width),
                resolve(&style.height, parent.height),
            ),
        )
    }

    /// The bounding box of the transformed element, relative to the stage.
    #[must_use]
    pub fn rendered_rect(&self) -> Rect {
        let layout = self.layout_box();
        let size = layout.size();
        let transform =
            CssTransform::parse(&self.style.borrow().transform).unwrap_or(CssTransform::IDENTITY);
        let center = layout.center() + transform.translation_px(size);
        // `scale(..) rotate(..)` rotates first, then stretches along the page axes.
        let affine = Affine::translate(center.to_vec2())
            * Affine::scale_non_uniform(transform.scale_x, transform.scale_y)
            * Affine::rotate(transform.rotation.to_radians());
        affine.transform_rect_bbox(Rect::from_center_size(Point::ZERO, size))
    }
}

impl LayoutSource for HeadlessElement {
    fn bounding_rect(&self) -> Option<Rect> {
        self.connected
            .get()
            .then(|| self.rendered_rect() + self.stage.rect().origin().to_vec2())
    }

    fn parent_rect(&self) -> Option<Rect> {
        self.connected.get().then(|| self.stage.rect())
    }
}

impl StyleTarget for HeadlessElement {
    fn write_style(&self, patch: &StylePatch) {
        patch.apply(&mut self.style.borrow_mut());
        self.writes.borrow_mut().push(patch.clone());
    }
}

impl HostElement for HeadlessElement {
    fn declared_style(&self) -> StyleSnapshot {
        self.style()
    }

    fn layout_size(&self) -> Option<Size> {
        self.connected.get().then(|| self.layout_box().size())
    }

    fn is_connected(&self) -> bool {
        self.connected.get()
    }
}

/// A sink that keeps everything it is sent.
///
/// Clones share the same record, so one clone can be handed to the
/// controller and another kept to look at.
#[derive(Debug)]
pub struct Recorder<T> {
    items: Rc<RefCell<Vec<T>>>,
}

impl<T> Default for Recorder<T> {
    fn default() -> Self {
        Self {
            items: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl<T> Clone for Recorder<T> {
    fn clone(&self) -> Self {
        Self {
            items: Rc::clone(&self.items),
        }
    }
}

impl<T: Clone> Recorder<T> {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far.
    #[must_use]
    pub fn items(&self) -> Vec<T> {
        self.items.borrow().clone()
    }

    /// The most recent item.
    #[must_use]
    pub fn last(&self) -> Option<T> {
        self.items.borrow().last().cloned()
    }

    /// Number of recorded items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    /// Returns `true` if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl CharacterSink for Recorder<CharacterPlacement> {
    fn sync(&mut self, placement: CharacterPlacement) {
        self.items.borrow_mut().push(placement);
    }
}

impl OverlaySink for Recorder<OverlayLayout> {
    fn render(&mut self, layout: &OverlayLayout) {
        self.items.borrow_mut().push(*layout);
    }
}

// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag state for bounding-box manipulation: which operation, which pointer,
//! and the box as it was when the drag began.
//!
//! ## Usage
//!
//! 1) On pointer down over a hit target, call [`DragState::start`] with the
//!    pointer id, its position and the box at that moment.
//! 2) On each move, call [`DragState::update`]. It returns the cumulative
//!    offset once the pointer has travelled past the threshold, and `None`
//!    for other pointers or while still inside the threshold.
//! 3) Feed the drag to [`DragState::candidate`] to get the box for this frame.
//! 4) End the drag with [`DragState::end`], which tells you whether it ever
//!    moved far enough to count as an edit.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Rect, Vec2};
//! use stagehand_handles::{DragState, HitTarget, Handle, MIN_SIZE, Modifiers};
//!
//! let mut drag = DragState::default();
//! let bounds = Rect::new(100.0, 100.0, 200.0, 150.0);
//!
//! drag.start(HitTarget::Handle(Handle::Se), 1, Point::new(200.0, 150.0), bounds, Modifiers::empty());
//! assert!(drag.is_dragging());
//!
//! // A 2px wobble is not a drag yet.
//! assert_eq!(drag.update(1, Point::new(202.0, 150.0), 3.0), None);
//!
//! let offset = drag.update(1, Point::new(230.0, 160.0), 3.0).unwrap();
//! assert_eq!(offset, Vec2::new(30.0, 10.0));
//! assert_eq!(drag.candidate(MIN_SIZE), Some(Rect::new(100.0, 100.0, 230.0, 160.0)));
//!
//! assert!(drag.end(), "the drag moved the box");
//! ```

use kurbo::{Point, Rect, Size, Vec2};

use crate::handle::{Handle, HitTarget};
use crate::modifiers::Modifiers;
use crate::resize::{move_rect, resize_rect};

/// Default distance, in pixels, a pointer must travel before a press becomes a drag.
pub const DRAG_THRESHOLD: f64 = 3.0;

/// What a drag does to the box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DragOperation {
    /// Translate the whole box.
    Move,
    /// Resize from a corner handle.
    CornerResize(Handle),
    /// Resize from an edge handle.
    EdgeResize(Handle),
}

impl DragOperation {
    /// The operation started by pressing on `target`.
    #[must_use]
    pub fn for_target(target: HitTarget) -> Self {
        match target {
            HitTarget::Body => Self::Move,
            HitTarget::Handle(h) if h.is_corner() => Self::CornerResize(h),
            HitTarget::Handle(h) => Self::EdgeResize(h),
        }
    }

    /// The dragged handle, if this is a resize.
    #[must_use]
    pub fn handle(self) -> Option<Handle> {
        match self {
            Self::Move => None,
            Self::CornerResize(h) | Self::EdgeResize(h) => Some(h),
        }
    }
}

/// Tracks one pointer drag on a bounding box.
#[derive(Debug, Clone, Default, Copy)]
pub struct DragState {
    /// Operation of the active drag.
    pub operation: Option<DragOperation>,
    /// Pointer that started the drag; other pointers are ignored.
    pub pointer_id: Option<u64>,
    /// Start position of the drag operation.
    pub start_pos: Option<Point>,
    /// Last recorded pointer position during drag.
    pub last_pos: Option<Point>,
    /// The box when the drag started.
    pub start_rect: Rect,
    /// Modifier keys currently held.
    pub modifiers: Modifiers,
    /// Whether the pointer has crossed the drag threshold.
    pub engaged: bool,
}

impl DragState {
    /// Start tracking a new drag operation from the given position.
    pub fn start(
        &mut self,
        target: HitTarget,
        pointer_id: u64,
        pos: Point,
        start_rect: Rect,
        modifiers: Modifiers,
    ) {
        *self = Self {
            operation: Some(DragOperation::for_target(target)),
            pointer_id: Some(pointer_id),
            start_pos: Some(pos),
            last_pos: Some(pos),
            start_rect,
            modifiers,
            engaged: false,
        };
    }

    /// Whether events from `pointer_id` belong to this drag.
    #[must_use]
    pub fn accepts(&self, pointer_id: u64) -> bool {
        self.pointer_id == Some(pointer_id)
    }

    /// Record a pointer move, returning the total offset from the start position.
    ///
    /// Returns `None` when no drag is active, when the event is from another
    /// pointer, or while the pointer is still within `threshold` of where it
    /// went down. Once crossed, the threshold no longer applies.
    pub fn update(&mut self, pointer_id: u64, pos: Point, threshold: f64) -> Option<Vec2> {
        let start = self.start_pos?;
        if !self.accepts(pointer_id) {
            return None;
        }
        self.last_pos = Some(pos);
        let offset = pos - start;
        if !self.engaged && offset.hypot2() < threshold * threshold {
            return None;
        }
        self.engaged = true;
        Some(offset)
    }

    /// Get total offset from drag start position to the last recorded one.
    #[must_use]
    pub fn total_offset(&self) -> Option<Vec2> {
        Some(self.last_pos? - self.start_pos?)
    }

    /// Replace the held modifiers, e.g. when Shift is pressed mid-drag.
    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }

    /// The box for the current pointer position and modifiers.
    ///
    /// `None` until the drag is engaged.
    #[must_use]
    pub fn candidate(&self, min: Size) -> Option<Rect> {
        if !self.engaged {
            return None;
        }
        let offset = self.total_offset()?;
        Some(match self.operation? {
            DragOperation::Move => move_rect(self.start_rect, offset),
            DragOperation::CornerResize(h) | DragOperation::EdgeResize(h) => {
                resize_rect(self.start_rect, h, offset, self.modifiers, min)
            }
        })
    }

    /// End the current drag operation and reset state.
    ///
    /// Returns `true` if the drag had crossed the threshold.
    pub fn end(&mut self) -> bool {
        let engaged = self.engaged;
        *self = Self::default();
        engaged
    }

    /// Returns `true` while a drag operation is active
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.start_pos.is_some()
    }
}

// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer and keyboard input for the live session.
//!
//! Pointer positions are in the containing block's pixels, the same space
//! the overlay is laid out in. Handlers never fail: problems are logged and
//! reported through [`EventOutcome`], and an event either applies one whole
//! frame or writes nothing.

use kurbo::{Point, Rect, Vec2};
use stagehand_handles::{Boundary, DragOperation, HitTarget, Modifiers, NudgeDirection};
use stagehand_transform::Placement;
use tracing::{debug, trace, warn};

use crate::controller::{CommitOutcome, EditSessionController};
use crate::error::SessionError;
use crate::host::HostElement;

/// What an input event did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventOutcome {
    /// Not for the editor: no session, another pointer, or an unbound key.
    Ignored,
    /// Consumed without changing the element.
    Handled,
    /// A new frame was written to the element.
    Applied,
    /// The frame would leave the container and was skipped.
    Rejected,
    /// The session was committed.
    Committed,
    /// The element had left the page; the session was abandoned.
    Aborted,
}

/// A key, as far as the editor cares.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyInput {
    /// An arrow key.
    Arrow(NudgeDirection),
    /// Escape.
    Escape,
    /// Shift, Alt, Control or Meta on its own.
    Modifier,
    /// Anything else.
    Other,
}

#[cfg(feature = "ui_events_adapter")]
impl From<&ui_events::keyboard::Key> for KeyInput {
    fn from(key: &ui_events::keyboard::Key) -> Self {
        use ui_events::keyboard::{Key, NamedKey};
        if let Some(direction) = NudgeDirection::from_key(key) {
            return Self::Arrow(direction);
        }
        match key {
            Key::Named(NamedKey::Escape) => Self::Escape,
            Key::Named(
                NamedKey::Shift | NamedKey::Alt | NamedKey::Control | NamedKey::Meta,
            ) => Self::Modifier,
            _ => Self::Other,
        }
    }
}

impl<E: HostElement> EditSessionController<E> {
    /// A pointer went down at `position`.
    ///
    /// On a handle or the body this starts a drag; anywhere else it commits
    /// the session. While a drag is running, other pointers are ignored.
    pub fn handle_pointer_down(
        &mut self,
        pointer_id: u64,
        position: Point,
        modifiers: Modifiers,
    ) -> EventOutcome {
        if let Err(error) = self.live_element() {
            return outcome_of(error);
        }
        let Some(session) = self.session.as_mut() else {
            return EventOutcome::Ignored;
        };
        if session.drag.is_dragging() {
            trace!(pointer_id, "second pointer ignored during drag");
            return EventOutcome::Ignored;
        }
        let region = self.hit_region.as_deref();
        let target = session.view.hit_test(position).filter(|target| match target {
            HitTarget::Body => region.is_none_or(|r| r.contains_point(position)),
            HitTarget::Handle(_) => true,
        });
        let Some(target) = target else {
            debug!(?position, "pointer down outside the box");
            return self.finish();
        };
        session.drag_start = session.placement;
        session.modifiers = modifiers;
        let start_rect = session.placement.visual_rect();
        session
            .drag
            .start(target, pointer_id, position, start_rect, modifiers);
        trace!(?target, pointer_id, "drag armed");
        EventOutcome::Handled
    }

    /// The pointer moved.
    ///
    /// Nothing is written until the pointer has left the drag threshold.
    pub fn handle_pointer_move(
        &mut self,
        pointer_id: u64,
        position: Point,
        modifiers: Modifiers,
    ) -> EventOutcome {
        let threshold = self.config.drag_threshold;
        let Some(session) = self.session.as_mut() else {
            return EventOutcome::Ignored;
        };
        if !session.drag.accepts(pointer_id) {
            return EventOutcome::Ignored;
        }
        session.modifiers = modifiers;
        session.drag.set_modifiers(modifiers);
        if session.drag.update(pointer_id, position, threshold).is_none() {
            return EventOutcome::Handled;
        }
        self.drag_frame()
    }

    /// The pointer was released, ending the drag at `position`.
    pub fn handle_pointer_up(
        &mut self,
        pointer_id: u64,
        position: Point,
        modifiers: Modifiers,
    ) -> EventOutcome {
        let Some(session) = self.session.as_ref() else {
            return EventOutcome::Ignored;
        };
        if !session.drag.accepts(pointer_id) {
            return EventOutcome::Ignored;
        }
        let outcome = if session.drag.last_pos == Some(position) {
            EventOutcome::Handled
        } else {
            self.handle_pointer_move(pointer_id, position, modifiers)
        };
        if let Some(session) = self.session.as_mut() {
            let moved = session.drag.end();
            debug!(moved, revision = session.revision, "drag ended");
        }
        match outcome {
            EventOutcome::Rejected | EventOutcome::Ignored => EventOutcome::Handled,
            other => other,
        }
    }

    /// The pointer was taken away, e.g. by the system. The last accepted
    /// frame stays.
    pub fn handle_pointer_cancel(&mut self, pointer_id: u64) -> EventOutcome {
        let Some(session) = self.session.as_mut() else {
            return EventOutcome::Ignored;
        };
        if !session.drag.accepts(pointer_id) {
            return EventOutcome::Ignored;
        }
        session.drag.end();
        debug!(pointer_id, "drag cancelled");
        EventOutcome::Handled
    }

    /// A key went down with `modifiers` held (including the key itself, if
    /// it is a modifier).
    ///
    /// Arrows nudge the box when no drag is running, Escape commits, and a
    /// change of modifiers re-evaluates the current drag frame.
    pub fn handle_key_down(&mut self, key: KeyInput, modifiers: Modifiers) -> EventOutcome {
        if self.session.is_none() {
            return EventOutcome::Ignored;
        }
        match key {
            KeyInput::Escape => self.finish(),
            KeyInput::Arrow(direction) => self.nudge(direction, modifiers),
            KeyInput::Modifier | KeyInput::Other => self.remodify(modifiers),
        }
    }

    /// A key was released; `modifiers` are those still held.
    pub fn handle_key_up(&mut self, _key: KeyInput, modifiers: Modifiers) -> EventOutcome {
        if self.session.is_none() {
            return EventOutcome::Ignored;
        }
        self.remodify(modifiers)
    }

    fn finish(&mut self) -> EventOutcome {
        match self.end_active() {
            Some(CommitOutcome::Committed { .. }) => EventOutcome::Committed,
            Some(CommitOutcome::Aborted) => EventOutcome::Aborted,
            None => EventOutcome::Ignored,
        }
    }

    fn remodify(&mut self, modifiers: Modifiers) -> EventOutcome {
        let Some(session) = self.session.as_mut() else {
            return EventOutcome::Ignored;
        };
        let changed = session.modifiers != modifiers;
        session.modifiers = modifiers;
        if !session.drag.is_dragging() || !changed {
            return EventOutcome::Ignored;
        }
        session.drag.set_modifiers(modifiers);
        if !session.drag.engaged {
            return EventOutcome::Handled;
        }
        self.drag_frame()
    }

    fn nudge(&mut self, direction: NudgeDirection, modifiers: Modifiers) -> EventOutcome {
        let offset = self.config.nudge.offset(direction, modifiers);
        let Some(session) = self.session.as_mut() else {
            return EventOutcome::Ignored;
        };
        session.modifiers = modifiers;
        if session.drag.is_dragging() {
            return EventOutcome::Handled;
        }
        let current = session.placement;
        self.admit_and_apply(current.visual_rect(), current.translated(offset))
    }

    /// Computes and applies the frame for the current drag state.
    fn drag_frame(&mut self) -> EventOutcome {
        let min = self.config.min_box();
        let Some(session) = self.session.as_ref() else {
            return EventOutcome::Ignored;
        };
        let start = session.drag_start;
        let start_rect = session.drag.start_rect;
        let Some(candidate) = session.drag.candidate(start.min_visual_size(min)) else {
            return EventOutcome::Handled;
        };
        let Some(operation) = session.drag.operation else {
            return EventOutcome::Ignored;
        };
        let offset = session.drag.total_offset().unwrap_or(Vec2::ZERO);
        let Some(next) = (match operation {
            DragOperation::Move => Some(start.translated(offset)),
            DragOperation::CornerResize(_) | DragOperation::EdgeResize(_) => {
                start.fitted(candidate)
            }
        }) else {
            if self.geometry_warning.trip() {
                warn!("element has no layout size; resize skipped");
            }
            return EventOutcome::Rejected;
        };
        self.admit_and_apply(start_rect, next)
    }

    /// Applies `next` if its box stays inside the container relative to
    /// `start_rect`.
    fn admit_and_apply(&mut self, start_rect: Rect, next: Placement) -> EventOutcome {
        let element = match self.live_element() {
            Ok(element) => element,
            Err(error) => return outcome_of(error),
        };
        let Some(container) = element
            .parent_rect()
            .map(|r| r.size())
            .filter(|s| s.width > 0.0 && s.height > 0.0)
        else {
            if self.geometry_warning.trip() {
                warn!("containing block has no size; frame skipped");
            }
            return EventOutcome::Rejected;
        };
        let boundary = Boundary::new(container, self.config.boundary_margin);
        let candidate = next.visual_rect();
        if !boundary.admits(start_rect, candidate) {
            trace!(?candidate, "frame leaves the container; skipped");
            return EventOutcome::Rejected;
        }
        match self.apply(next) {
            Ok(()) => {
                self.geometry_warning.rearm();
                EventOutcome::Applied
            }
            Err(error) => outcome_of(error),
        }
    }
}

fn outcome_of(error: SessionError) -> EventOutcome {
    match error {
        SessionError::Detached => EventOutcome::Aborted,
        _ => EventOutcome::Ignored,
    }
}

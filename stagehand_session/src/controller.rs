// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The edit session state machine.
//!
//! A controller is either idle or editing exactly one element. Selecting an
//! element snapshots its declared style without writing anything, so the
//! element does not move. Edits then happen in pixels relative to the
//! containing block. Committing converts the result back into the units the
//! page used and writes it in one step.

use std::rc::{Rc, Weak};

use kurbo::Size;
use serde::Serialize;
use stagehand_handles::{DragState, Modifiers};
use stagehand_transform::{
    Placement, StylePatch, StyleSnapshot, SwapMode, TransformDelta, TransformModel,
};
use stagehand_units::{Length, UnitSystem, rect_from_element};
use tracing::{debug, info, warn};

use crate::config::EditorConfig;
use crate::error::SessionError;
use crate::events::SessionEvent;
use crate::host::{CharacterPlacement, CharacterSink, HostElement, SkeletonHitTest};
use crate::ready::HostMode;
use crate::view::{BoundingBoxView, OverlaySink};

/// Identifies one edit session of a controller.
///
/// Handles are never reused, so a handle kept past its session's end is
/// reliably reported as stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SessionHandle(u64);

impl SessionHandle {
    /// The session's number within its controller.
    #[must_use]
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Whether a session is live.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EditState {
    /// Not editing; the element shows its committed style.
    Idle,
    /// Editing in pixel space.
    Editing,
}

/// A snapshot of a session for display.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    /// Current state.
    pub state: EditState,
    /// The pixel model while editing, the committed model afterwards.
    pub transform: TransformModel,
    /// Whether the bounding box is on screen.
    pub visible: bool,
}

/// Result of ending a session.
#[derive(Clone, Debug, PartialEq)]
pub enum CommitOutcome {
    /// The element's style was written back.
    Committed {
        /// The committed placement, in `unit`.
        transform: TransformModel,
        /// The unit system the page uses for this element.
        unit: UnitSystem,
        /// The declared style that was written.
        style: StyleSnapshot,
    },
    /// The element left the page before the commit; nothing was written.
    Aborted,
}

/// Logs a condition once until it clears.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct WarnLatch(bool);

impl WarnLatch {
    /// Returns `true` the first time this is called since the last re-arm.
    pub(crate) fn trip(&mut self) -> bool {
        !std::mem::replace(&mut self.0, true)
    }

    pub(crate) fn rearm(&mut self) {
        self.0 = false;
    }
}

#[derive(Debug)]
pub(crate) struct ActiveSession<E> {
    pub(crate) handle: SessionHandle,
    pub(crate) element: Weak<E>,
    /// Declared style at selection time.
    pub(crate) original: StyleSnapshot,
    /// Layout size at selection time.
    pub(crate) original_size: Size,
    pub(crate) placement: Placement,
    pub(crate) view: BoundingBoxView,
    pub(crate) drag: DragState,
    /// Placement when the current drag started.
    pub(crate) drag_start: Placement,
    pub(crate) modifiers: Modifiers,
    /// Number of edits applied so far.
    pub(crate) revision: u64,
}

/// Drives edit sessions for elements of type `E`.
///
/// One controller serves a whole page and is passed around by reference. It
/// holds elements weakly; the page owns them.
pub struct EditSessionController<E: HostElement> {
    pub(crate) config: EditorConfig,
    character: Option<Box<dyn CharacterSink>>,
    pub(crate) overlay: Option<Box<dyn OverlaySink>>,
    pub(crate) hit_region: Option<Box<dyn SkeletonHitTest>>,
    pub(crate) session: Option<ActiveSession<E>>,
    last_ended: Option<(SessionHandle, TransformModel)>,
    next_id: u64,
    events: Vec<SessionEvent>,
    pub(crate) geometry_warning: WarnLatch,
    sink_warning: WarnLatch,
}

impl<E: HostElement> core::fmt::Debug for EditSessionController<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EditSessionController")
            .field("config", &self.config)
            .field("character", &self.character.is_some())
            .field("overlay", &self.overlay.is_some())
            .field("hit_region", &self.hit_region.is_some())
            .field("session", &self.session.as_ref().map(|s| s.handle))
            .field("last_ended", &self.last_ended)
            .field("next_id", &self.next_id)
            .field("events", &self.events.len())
            .field("geometry_warning", &self.geometry_warning)
            .field("sink_warning", &self.sink_warning)
            .finish()
    }
}

impl<E: HostElement> Default for EditSessionController<E> {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl<E: HostElement> EditSessionController<E> {
    /// Creates an idle controller with no sinks attached.
    #[must_use]
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            character: None,
            overlay: None,
            hit_region: None,
            session: None,
            last_ended: None,
            next_id: 0,
            events: Vec::new(),
            geometry_warning: WarnLatch::default(),
            sink_warning: WarnLatch::default(),
        }
    }

    /// Sends the character's placement to `sink` after every edit.
    #[must_use]
    pub fn with_character_sink(mut self, sink: impl CharacterSink + 'static) -> Self {
        self.character = Some(Box::new(sink));
        self
    }

    /// Draws the bounding box through `sink`.
    #[must_use]
    pub fn with_overlay(mut self, sink: impl OverlaySink + 'static) -> Self {
        self.overlay = Some(Box::new(sink));
        self
    }

    /// Only counts presses on the drawn character as grabbing the box body.
    #[must_use]
    pub fn with_hit_region(mut self, region: impl SkeletonHitTest + 'static) -> Self {
        self.hit_region = Some(Box::new(region));
        self
    }

    /// Attaches the character host found by
    /// [`wait_for_host`](crate::wait_for_host), if any.
    pub fn set_host_mode(&mut self, mode: HostMode) {
        self.character = mode.into_sink();
    }

    /// The settings this controller runs with.
    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Whether a session is live.
    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.session.is_some()
    }

    /// The live session, if any.
    #[must_use]
    pub fn active_handle(&self) -> Option<SessionHandle> {
        self.session.as_ref().map(|s| s.handle)
    }

    /// Starts editing `element`.
    ///
    /// Any session on another element is committed first. Selecting the
    /// element that is already being edited returns the live handle and
    /// changes nothing. Nothing is written to `element`: it keeps rendering
    /// exactly where it was.
    pub fn select(&mut self, element: &Rc<E>) -> Result<SessionHandle, SessionError> {
        if let Some(session) = &self.session {
            if session.element.as_ptr() == Rc::as_ptr(element) {
                return Ok(session.handle);
            }
            self.end_active();
        }
        if !element.is_connected() {
            return Err(SessionError::Detached);
        }
        let rendered = rect_from_element(&**element).ok_or(SessionError::DegenerateGeometry)?;
        let layout_size = element
            .layout_size()
            .ok_or(SessionError::DegenerateGeometry)?;

        let original = element.declared_style();
        let placement = Placement::capture(
            &original,
            layout_size,
            rendered.to_rect(),
            self.config.swap_mode,
        );
        let handle = SessionHandle(self.next_id);
        self.next_id += 1;

        let mut view = BoundingBoxView::new(self.config.handle_size);
        view.sync(&**element, self.overlay.as_deref_mut());
        self.sink_warning.rearm();
        sync_character(&mut self.character, &mut self.sink_warning, &placement);

        debug!(
            handle = handle.id(),
            x = placement.model.x(),
            y = placement.model.y(),
            unit = ?original.position_unit(),
            "edit session started"
        );
        self.events.push(SessionEvent::Started {
            handle,
            transform: placement.model,
        });
        self.session = Some(ActiveSession {
            handle,
            element: Rc::downgrade(element),
            original,
            original_size: layout_size,
            placement,
            view,
            drag: DragState::default(),
            drag_start: placement,
            modifiers: Modifiers::empty(),
            revision: 0,
        });
        Ok(handle)
    }

    /// Applies `delta` to the live session and redraws.
    ///
    /// Returns the new pixel model.
    pub fn manipulate(
        &mut self,
        handle: SessionHandle,
        delta: TransformDelta,
    ) -> Result<TransformModel, SessionError> {
        let session = self.live_session(handle)?;
        let mut placement = session.placement;
        placement.model = placement.model.delta(&delta);
        self.apply(placement)?;
        Ok(placement.model)
    }

    /// Ends the session and writes the element's style back in its original
    /// units.
    ///
    /// If the element was detached meanwhile this returns
    /// [`CommitOutcome::Aborted`] rather than an error.
    pub fn commit(&mut self, handle: SessionHandle) -> Result<CommitOutcome, SessionError> {
        self.live_session(handle)?;
        self.end_active().ok_or(SessionError::NoActiveSession)
    }

    /// Commits whatever session is live, as a click outside the box does.
    pub fn deselect_or_click_outside(&mut self) -> Option<CommitOutcome> {
        self.end_active()
    }

    /// The state of the session `handle`.
    ///
    /// The most recently ended session reports [`EditState::Idle`] with its
    /// committed model.
    pub fn get_state(&self, handle: SessionHandle) -> Result<SessionState, SessionError> {
        if let Some(session) = self.session.as_ref().filter(|s| s.handle == handle) {
            return Ok(SessionState {
                state: EditState::Editing,
                transform: session.placement.model,
                visible: session.view.is_visible(),
            });
        }
        match self.last_ended {
            Some((ended, transform)) if ended == handle => Ok(SessionState {
                state: EditState::Idle,
                transform,
                visible: false,
            }),
            _ => Err(SessionError::StaleHandle { handle }),
        }
    }

    /// Number of edits applied in the live session `handle`.
    pub fn revision(&self, handle: SessionHandle) -> Result<u64, SessionError> {
        Ok(self.live_session(handle)?.revision)
    }

    /// Re-measures the element after a layout change outside the editor,
    /// such as the container being resized, and redraws the box.
    pub fn sync_layout(&mut self) {
        let Ok(element) = self.live_element() else {
            return;
        };
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if !session.drag.is_dragging() {
            if let (Some(size), Some(rect)) = (element.layout_size(), rect_from_element(&*element))
            {
                session.placement = session.placement.relaid(size, rect.to_rect());
            }
        }
        session.view.sync(&*element, self.overlay.as_deref_mut());
    }

    /// Takes the notifications collected since the last call.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    fn live_session(&self, handle: SessionHandle) -> Result<&ActiveSession<E>, SessionError> {
        match &self.session {
            None => Err(SessionError::NoActiveSession),
            Some(s) if s.handle != handle => Err(SessionError::StaleHandle { handle }),
            Some(s) => Ok(s),
        }
    }

    /// The element of the live session, aborting the session if it is gone.
    pub(crate) fn live_element(&mut self) -> Result<Rc<E>, SessionError> {
        let session = self.session.as_ref().ok_or(SessionError::NoActiveSession)?;
        match live(&session.element) {
            Some(element) => Ok(element),
            None => {
                self.end_active();
                Err(SessionError::Detached)
            }
        }
    }

    /// Writes `placement` to the element as one style write and redraws.
    pub(crate) fn apply(&mut self, placement: Placement) -> Result<(), SessionError> {
        let element = self.live_element()?;
        let session = self.session.as_mut().ok_or(SessionError::NoActiveSession)?;
        placement.model.apply_to(&*element, &placement.frame);
        session.placement = placement;
        session.revision += 1;
        session.view.sync(&*element, self.overlay.as_deref_mut());
        sync_character(&mut self.character, &mut self.sink_warning, &placement);
        self.events.push(SessionEvent::Updated {
            handle: session.handle,
            revision: session.revision,
            transform: placement.model,
        });
        Ok(())
    }

    /// Ends the live session, if any.
    pub(crate) fn end_active(&mut self) -> Option<CommitOutcome> {
        let mut session = self.session.take()?;
        session.view.discard(self.overlay.as_deref_mut());
        let handle = session.handle;

        let Some(element) = live(&session.element) else {
            info!(handle = handle.id(), "element left the page; edit session abandoned");
            self.last_ended = None;
            self.events.push(SessionEvent::Aborted { handle });
            return Some(CommitOutcome::Aborted);
        };

        let parent = element.parent_rect().map_or(Size::ZERO, |r| r.size());
        let style = if session.revision == 0 {
            session.original.clone()
        } else {
            committed_style(&session, parent, &mut self.geometry_warning)
        };
        element.write_style(&StylePatch::restore(&style));

        let unit = style.position_unit();
        let transform = TransformModel::extract_from(&style, parent);
        debug!(
            handle = handle.id(),
            revisions = session.revision,
            left = %style.left,
            top = %style.top,
            "edit session committed"
        );
        self.last_ended = Some((handle, transform));
        self.events.push(SessionEvent::Ended {
            handle,
            style: style.clone(),
        });
        Some(CommitOutcome::Committed {
            transform,
            unit,
            style,
        })
    }
}

fn live<E: HostElement>(element: &Weak<E>) -> Option<Rc<E>> {
    element.upgrade().filter(|e| e.is_connected())
}

/// Writes each pixel value in the unit its declared text uses, resolved
/// against that axis of the containing block.
///
/// Each axis keeps its own unit, so `left: 100px; top: 50%` stays mixed.
/// Text that is not a length counts as pixels. Returns `false` if an axis kept
/// its previous text because the containing block has no size on that axis.
fn write_declared_units(
    axes: [(&mut String, &str, f64, f64); 2],
    latch: &mut WarnLatch,
    what: &str,
) -> bool {
    let mut converted = true;
    for (slot, declared, px, reference) in axes {
        let unit = Length::parse(declared).map_or(UnitSystem::Pixel, |l| l.unit);
        match Length::px(px).to_unit(unit, reference) {
            Ok(length) => *slot = length.to_string(),
            Err(error) => {
                converted = false;
                if latch.trip() {
                    warn!(%error, what, "containing block has no size; keeping the previous value");
                }
            }
        }
    }
    converted
}

fn sync_character(
    sink: &mut Option<Box<dyn CharacterSink>>,
    latch: &mut WarnLatch,
    placement: &Placement,
) {
    let Some(sink) = sink else {
        if latch.trip() {
            warn!("no character host attached; skeleton sync skipped");
        }
        return;
    };
    let center = placement.visual_rect().center();
    let (scale_x, scale_y) = placement.model.scale();
    sink.sync(CharacterPlacement {
        x: center.x,
        y: center.y,
        scale_x,
        scale_y,
    });
}

/// The declared style that renders `session`'s placement, in the units of its
/// original style.
///
/// Properties the session did not change are copied verbatim. A property that
/// cannot be converted because the containing block has no size keeps its
/// original text.
fn committed_style<E>(
    session: &ActiveSession<E>,
    parent: Size,
    latch: &mut WarnLatch,
) -> StyleSnapshot {
    let original = &session.original;
    let placement = &session.placement;
    let model = placement.model;
    let mut style = original.clone();
    let mut degenerate = !write_declared_units(
        [
            (&mut style.left, original.left.as_str(), model.x(), parent.width),
            (&mut style.top, original.top.as_str(), model.y(), parent.height),
        ],
        latch,
        "position",
    );

    let size = placement.frame.size();
    let resized = (size.width - session.original_size.width).abs() > 1e-9
        || (size.height - session.original_size.height).abs() > 1e-9;
    if placement.frame.mode() == SwapMode::LayoutBox && resized {
        degenerate |= !write_declared_units(
            [
                (&mut style.width, original.width.as_str(), size.width, parent.width),
                (&mut style.height, original.height.as_str(), size.height, parent.height),
            ],
            latch,
            "size",
        );
    }

    if placement.frame.transform_changed(&model) {
        style.transform = placement.frame.transform_for(&model).to_css();
    }
    if placement.frame.z_index_changed(&model) {
        style.z_index = model.z_index().to_string();
    }
    if !degenerate {
        latch.rearm();
    }
    style
}

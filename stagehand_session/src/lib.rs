// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=stagehand_session --heading-base-level=0

//! Stagehand Session: edit a character's placement on a live page.
//!
//! An [`EditSessionController`] takes one page element at a time through
//! `Idle → Editing → Idle`:
//!
//! - [`select`](EditSessionController::select) snapshots the element's
//!   declared style and switches to a pixel model of where it is drawn. Nothing
//!   is written, so the element does not move.
//! - Pointer and key handlers ([`handle_pointer_down`] and friends) drag,
//!   resize and nudge the box. Every accepted frame is one style write; frames
//!   that would leave the container are skipped.
//! - [`commit`](EditSessionController::commit) converts the result back to the
//!   units the page used (percent stays percent) against the container's
//!   current size and writes it once.
//!
//! The page plugs in through traits: [`HostElement`] for the element,
//! [`OverlaySink`] to draw the box, [`CharacterSink`] to keep the skeleton
//! renderer in step, and optionally [`SkeletonHitTest`] to grab only the
//! drawn character. [`wait_for_host`] waits for the renderer with a timeout.
//! [`headless`] implements the element side without a browser.
//!
//! [`handle_pointer_down`]: EditSessionController::handle_pointer_down
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use stagehand_handles::Modifiers;
//! use stagehand_session::headless::{HeadlessElement, HeadlessStage};
//! use stagehand_session::{CommitOutcome, EditSessionController, EditorConfig};
//! use stagehand_transform::StyleSnapshot;
//!
//! let stage = HeadlessStage::new(Rect::new(0.0, 0.0, 1000.0, 800.0));
//! let hero = HeadlessElement::new(&stage, StyleSnapshot {
//!     position: "absolute".into(),
//!     left: "35%".into(),
//!     top: "75%".into(),
//!     width: "25%".into(),
//!     height: "25%".into(),
//!     transform: "translate(-50%, -50%)".into(),
//!     ..StyleSnapshot::default()
//! });
//!
//! let mut editor = EditSessionController::new(EditorConfig::default());
//! let session = editor.select(&hero).unwrap();
//! assert!(hero.writes().is_empty(), "selecting writes nothing");
//!
//! // Drag the body 50px to the right.
//! editor.handle_pointer_down(1, Point::new(300.0, 600.0), Modifiers::empty());
//! editor.handle_pointer_move(1, Point::new(350.0, 600.0), Modifiers::empty());
//! editor.handle_pointer_up(1, Point::new(350.0, 600.0), Modifiers::empty());
//!
//! let CommitOutcome::Committed { style, .. } = editor.commit(session).unwrap() else {
//!     unreachable!()
//! };
//! assert_eq!(style.left, "40%");
//! assert_eq!(style.top, "75%");
//! ```
//!
//! ## Features
//!
//! - `ui_events_adapter`: convert `ui-events` keys into [`KeyInput`].

mod config;
mod controller;
mod error;
mod events;
pub mod headless;
mod host;
mod interaction;
mod persist;
mod ready;
mod view;

pub use config::{ConfigError, EditorConfig, HANDLE_SIZE, HOST_READY_TIMEOUT};
pub use controller::{CommitOutcome, EditSessionController, EditState, SessionHandle, SessionState};
pub use error::{PersistError, SessionError};
pub use events::SessionEvent;
pub use host::{CharacterPlacement, CharacterSink, HostElement, SkeletonHitTest};
pub use interaction::{EventOutcome, KeyInput};
pub use persist::{
    MemoryStore, PositionStore, STORAGE_PREFIX, SavedPosition, clear_position, load_position,
    save_position, storage_key,
};
pub use ready::{HostMode, wait_for_host};
pub use view::{BoundingBoxView, OverlayLayout, OverlaySink};

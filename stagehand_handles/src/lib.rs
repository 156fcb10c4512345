// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=stagehand_handles --heading-base-level=0

//! Stagehand Handles: the geometry of dragging a bounding box around.
//!
//! This crate turns pointer input on a box with eight resize handles into
//! candidate boxes. It knows nothing about pages, styles or sessions; it works
//! on Kurbo rectangles in whatever pixel space the caller uses (Stagehand uses
//! coordinates relative to the element's containing block).
//!
//! - [`Handle`] and [`hit_test`]: which handle, or the body, is under a point.
//! - [`DragState`]: pointer-down to pointer-up tracking, with a drag threshold
//!   and a single active pointer.
//! - [`resize_rect`] and [`move_rect`]: anchor-preserving resize driven by
//!   [`Modifiers`] (Shift locks the aspect ratio, Ctrl/Alt/Meta keeps the center).
//!   Results never shrink below a minimum size, [`MIN_SIZE`] by default.
//! - [`Boundary`]: rejects candidates that leave the container.
//! - [`NudgeSteps`]: arrow-key step sizes.
//!
//! All math starts from the box as it was at drag start plus the cumulative
//! pointer offset; no frame depends on the one before it.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use stagehand_handles::{Boundary, DragState, HitTarget, Handle, MIN_SIZE, Modifiers, hit_test};
//! use kurbo::Size;
//!
//! let bounds = Rect::new(100.0, 100.0, 200.0, 150.0);
//! let stage = Boundary::new(Size::new(400.0, 300.0), 10.0);
//!
//! let down = Point::new(100.0, 100.0);
//! let target = hit_test(bounds, down, 10.0).unwrap();
//! assert_eq!(target, HitTarget::Handle(Handle::Nw));
//!
//! let mut drag = DragState::default();
//! drag.start(target, 1, down, bounds, Modifiers::CTRL);
//! drag.update(1, Point::new(90.0, 95.0), 3.0);
//! let candidate = drag.candidate(MIN_SIZE).unwrap();
//! // Ctrl keeps the center where it was.
//! assert_eq!(candidate.center(), bounds.center());
//! assert!(stage.admits(bounds, candidate));
//! ```
//!
//! ## Features
//!
//! - `ui_events_adapter`: convert `ui-events` keyboard modifiers and arrow
//!   keys into [`Modifiers`] and [`NudgeDirection`].
//! - `serde`: derive `Serialize`/`Deserialize` for [`NudgeSteps`].
//!
//! This crate is `no_std`.

#![no_std]

#[cfg(feature = "ui_events_adapter")]
mod adapter;
mod boundary;
pub mod drag;
mod handle;
mod modifiers;
mod nudge;
mod resize;

pub use boundary::{BOUNDARY_MARGIN, Boundary};
pub use drag::{DRAG_THRESHOLD, DragOperation, DragState};
pub use handle::{Handle, HitTarget, hit_test};
pub use modifiers::Modifiers;
pub use nudge::{NudgeDirection, NudgeSteps};
pub use resize::{MIN_SIZE, move_rect, resize_rect};

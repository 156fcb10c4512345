// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=stagehand_transform --heading-base-level=0

//! Stagehand Transform: one model for where an editable character sits.
//!
//! A page element that a character is drawn into carries its placement in
//! several overlapping places: `left`/`top` (often in percent), its size and a
//! CSS `transform`. This crate folds those into a single typed
//! [`TransformModel`] and back:
//!
//! - [`TransformModel::extract_from`] reads a declared [`StyleSnapshot`].
//!   It never fails; unparseable transforms are logged and ignored.
//! - [`TransformModel::delta`] applies a [`TransformDelta`] (additive position
//!   and rotation, multiplicative scale, clamped at [`MIN_SCALE`]).
//! - [`CssTransform`] parses and composes `transform` text in the fixed order
//!   `translate(..) scale(..) rotate(..)`.
//! - [`EditFrame`] and [`Placement`] describe the edit-time pixel geometry, so
//!   a model can be turned into the box the user sees and a box the user drags
//!   out can be turned back into a model.
//! - [`TransformModel::apply_to`] writes the edit-time style to any
//!   [`StyleTarget`] as one [`StylePatch`].
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use stagehand_transform::{Placement, StyleSnapshot, SwapMode};
//!
//! let style = StyleSnapshot {
//!     left: "35%".into(),
//!     top: "75%".into(),
//!     width: "25%".into(),
//!     height: "25%".into(),
//!     transform: "translate(-50%, -50%)".into(),
//!     ..StyleSnapshot::default()
//! };
//! // In a 1000x800 container the element renders centered on (350, 600).
//! let rendered = Rect::new(225.0, 500.0, 475.0, 700.0);
//! let placement = Placement::capture(&style, Size::new(250.0, 200.0), rendered, SwapMode::Transform);
//! assert_eq!((placement.model.x(), placement.model.y()), (350.0, 600.0));
//! assert_eq!(placement.visual_rect(), rendered);
//!
//! // Drag the box out to 350x250, keeping its top-left corner.
//! let grown = placement.fitted(Rect::new(225.0, 500.0, 575.0, 750.0)).unwrap();
//! assert_eq!(grown.model.scale(), (1.4, 1.25));
//! ```
//!
//! ## Features
//!
//! - `serde`: derive `Serialize`/`Deserialize` for the model, style snapshot
//!   and swap mode.
//!
//! This crate is `no_std` (with `alloc`).

#![no_std]

extern crate alloc;

mod css;
mod frame;
mod model;
mod style;

pub use css::{CssTransform, TransformParseError};
pub use frame::{EditFrame, Placement, SwapMode};
pub use model::{FRONT_Z_INDEX, MIN_SCALE, TransformDelta, TransformModel};
pub use style::{StylePatch, StyleSnapshot, StyleTarget};

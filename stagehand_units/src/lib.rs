// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=stagehand_units --heading-base-level=0

//! Stagehand Units: percent and pixel coordinates for editable page elements.
//!
//! A character placed on a page is usually laid out in percentages of its
//! container (`left: 35%`) while an editor wants to reason in pixels. This
//! crate is the pure, stateless conversion layer between the two:
//!
//! - [`percent_to_pixel`] and [`pixel_to_percent`] convert a single value
//!   against a reference dimension. The latter fails closed with
//!   [`ConversionError`] when the reference is degenerate.
//! - [`Length`] parses and prints CSS lengths (`35%`, `350px`).
//! - [`BoundsRect`] is a rectangle tagged with its [`UnitSystem`].
//! - [`rect_from_element`] reads live geometry from any [`LayoutSource`] and
//!   returns it relative to the element's containing block.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Size;
//! use stagehand_units::{BoundsRect, UnitSystem, percent_to_pixel, pixel_to_percent};
//!
//! let x = percent_to_pixel(35.0, 1000.0);
//! assert_eq!(x, 350.0);
//! assert_eq!(pixel_to_percent(x, 1000.0).unwrap(), 35.0);
//!
//! let pct = BoundsRect { x: 35.0, y: 75.0, width: 25.0, height: 25.0, unit: UnitSystem::Percent };
//! let px = pct.to_pixels(Size::new(1000.0, 800.0));
//! assert_eq!((px.x, px.y, px.width, px.height), (350.0, 600.0, 250.0, 200.0));
//! ```
//!
//! Round trips are accurate to floating-point precision, not exact: for a
//! positive reference `R`, `pixel_to_percent(percent_to_pixel(v, R), R)` is
//! within `1e-6 * R` of `v`.
//!
//! This crate is `no_std` (with `alloc`).

#![no_std]

extern crate alloc;

mod bounds;
mod convert;
mod length;

pub use bounds::{BoundsRect, LayoutSource, parent_relative, rect_from_element};
pub use convert::{ConversionError, percent_to_pixel, pixel_to_percent};
pub use length::{Length, ParseLengthError, UnitSystem};

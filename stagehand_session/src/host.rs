// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! What the editor needs from the page it runs in.
//!
//! The controller never owns page state. It reads layout through
//! [`LayoutSource`], writes styles through [`StyleTarget`], and pushes the
//! character's placement to a write-only [`CharacterSink`].

use kurbo::{Point, Size};
use serde::Serialize;
use stagehand_transform::{StyleSnapshot, StyleTarget};
use stagehand_units::LayoutSource;

/// A page element that can be edited.
pub trait HostElement: LayoutSource + StyleTarget {
    /// The element's declared (inline) positioning style.
    fn declared_style(&self) -> StyleSnapshot;

    /// The untransformed size of the element's layout box, in pixels.
    ///
    /// `None` when the element is not laid out.
    fn layout_size(&self) -> Option<Size>;

    /// Whether the element is still attached to the page.
    fn is_connected(&self) -> bool;
}

/// Where the character is drawn, in the containing block's pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterPlacement {
    /// Horizontal position of the visual center.
    pub x: f64,
    /// Vertical position of the visual center.
    pub y: f64,
    /// Horizontal scale.
    pub scale_x: f64,
    /// Vertical scale.
    pub scale_y: f64,
}

/// Receives the character's placement after every applied edit.
///
/// This is write-only: the editor never reads skeleton state back.
pub trait CharacterSink {
    /// Moves the skeleton to `placement`.
    fn sync(&mut self, placement: CharacterPlacement);
}

/// Narrows the move region from the whole box to the drawn character.
pub trait SkeletonHitTest {
    /// Whether `point`, in the containing block's pixels, is on the character.
    fn contains_point(&self, point: Point) -> bool;
}

impl<F: Fn(Point) -> bool> SkeletonHitTest for F {
    fn contains_point(&self, point: Point) -> bool {
        self(point)
    }
}

// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declared style records read from and written to a host element.

use alloc::string::String;

use stagehand_units::{Length, UnitSystem};

/// The declared positioning style of an element, as CSS text.
///
/// An empty string means the property is not set. This is both the snapshot
/// taken when editing starts and the record produced on commit.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct StyleSnapshot {
    /// `position`.
    pub position: String,
    /// `left`.
    pub left: String,
    /// `top`.
    pub top: String,
    /// `width`.
    pub width: String,
    /// `height`.
    pub height: String,
    /// `transform`.
    pub transform: String,
    /// `z-index`.
    pub z_index: String,
}

impl StyleSnapshot {
    /// The unit system the page uses for this element's position.
    ///
    /// Taken from `left`; anything that is not a percentage counts as pixels.
    #[must_use]
    pub fn position_unit(&self) -> UnitSystem {
        Length::parse(&self.left).map_or(UnitSystem::Pixel, |l| l.unit)
    }

    /// Parses `z-index`, treating `auto` and unset as `None`.
    #[must_use]
    pub fn z_index_value(&self) -> Option<i32> {
        self.z_index.trim().parse().ok()
    }
}

/// A set of property writes applied to an element in a single step.
///
/// `None` leaves a property alone; `Some("")` clears it.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct StylePatch {
    /// `position`.
    pub position: Option<String>,
    /// `left`.
    pub left: Option<String>,
    /// `top`.
    pub top: Option<String>,
    /// `width`.
    pub width: Option<String>,
    /// `height`.
    pub height: Option<String>,
    /// `transform`.
    pub transform: Option<String>,
    /// `z-index`.
    pub z_index: Option<String>,
}

impl StylePatch {
    /// A patch that writes every property of `snapshot` back verbatim.
    #[must_use]
    pub fn restore(snapshot: &StyleSnapshot) -> Self {
        Self {
            position: Some(snapshot.position.clone()),
            left: Some(snapshot.left.clone()),
            top: Some(snapshot.top.clone()),
            width: Some(snapshot.width.clone()),
            height: Some(snapshot.height.clone()),
            transform: Some(snapshot.transform.clone()),
            z_index: Some(snapshot.z_index.clone()),
        }
    }

    /// Returns `true` if the patch writes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Applies the patch to a snapshot, as a host would to its element.
    pub fn apply(&self, style: &mut StyleSnapshot) {
        let fields = [
            (&self.position, &mut style.position),
            (&self.left, &mut style.left),
            (&self.top, &mut style.top),
            (&self.width, &mut style.width),
            (&self.height, &mut style.height),
            (&self.transform, &mut style.transform),
            (&self.z_index, &mut style.z_index),
        ];
        for (write, slot) in fields {
            if let Some(value) = write {
                slot.clone_from(value);
            }
        }
    }
}

/// Something whose inline style can be written.
///
/// Implementations must apply the whole patch before the next layout read,
/// so an element is never observed half-updated.
pub trait StyleTarget {
    /// Writes every `Some` property of `patch`.
    fn write_style(&self, patch: &StylePatch);
}

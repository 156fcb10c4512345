// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Rect, Size};

use crate::convert::{ConversionError, percent_to_pixel, pixel_to_percent};
use crate::length::UnitSystem;

/// Read access to an element's live layout geometry.
///
/// Both rectangles are in the same space (typically viewport pixels). The
/// parent rectangle is the element's containing block, i.e. the padding box
/// of its offset parent, so that `left`/`top` are measured from its origin.
pub trait LayoutSource {
    /// The element's rendered bounding box, or `None` when it is not laid out.
    fn bounding_rect(&self) -> Option<Rect>;

    /// The containing block's rectangle, or `None` when there is none.
    fn parent_rect(&self) -> Option<Rect>;
}

/// An axis-aligned rectangle tagged with the unit system of its numbers.
///
/// This is always a derived view of a placement and is never persisted.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundsRect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
    /// Unit of all four numbers.
    pub unit: UnitSystem,
}

impl BoundsRect {
    /// Wraps a pixel rectangle.
    #[must_use]
    pub fn from_pixels(rect: Rect) -> Self {
        Self {
            x: rect.x0,
            y: rect.y0,
            width: rect.width(),
            height: rect.height(),
            unit: UnitSystem::Pixel,
        }
    }

    /// The raw numbers as a Kurbo rectangle, whatever the unit.
    #[must_use]
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Resolves this rectangle to pixels against a reference size.
    ///
    /// Horizontal values use the reference width, vertical values its height.
    #[must_use]
    pub fn to_pixels(&self, reference: Size) -> Self {
        match self.unit {
            UnitSystem::Pixel => *self,
            UnitSystem::Percent => Self {
                x: percent_to_pixel(self.x, reference.width),
                y: percent_to_pixel(self.y, reference.height),
                width: percent_to_pixel(self.width, reference.width),
                height: percent_to_pixel(self.height, reference.height),
                unit: UnitSystem::Pixel,
            },
        }
    }

    /// Expresses this rectangle as percentages of a reference size.
    pub fn to_percent(&self, reference: Size) -> Result<Self, ConversionError> {
        let px = self.to_pixels(reference);
        Ok(Self {
            x: pixel_to_percent(px.x, reference.width)?,
            y: pixel_to_percent(px.y, reference.height)?,
            width: pixel_to_percent(px.width, reference.width)?,
            height: pixel_to_percent(px.height, reference.height)?,
            unit: UnitSystem::Percent,
        })
    }
}

/// Re-expresses `rect` relative to the origin of `parent`.
#[must_use]
pub fn parent_relative(rect: Rect, parent: Rect) -> Rect {
    rect - parent.origin().to_vec2()
}

/// Reads the element's live rendered rectangle in parent-relative pixels.
///
/// Returns `None` when the element or its containing block has no layout.
pub fn rect_from_element<L: LayoutSource + ?Sized>(element: &L) -> Option<BoundsRect> {
    let rect = element.bounding_rect()?;
    let parent = element.parent_rect()?;
    Some(BoundsRect::from_pixels(parent_relative(rect, parent)))
}

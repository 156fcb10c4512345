// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Size, Vec2};
use stagehand_units::{ConversionError, Length, UnitSystem};
use tracing::{debug, warn};

use crate::css::CssTransform;
use crate::frame::EditFrame;
use crate::style::{StyleSnapshot, StyleTarget};

/// Smallest scale factor a model may hold.
pub const MIN_SCALE: f64 = 0.1;

/// `z-index` given to a freshly dropped character so it lands on top.
pub const FRONT_Z_INDEX: i32 = 9999;

/// Where an editable element sits and how it is scaled and rotated.
///
/// `x`/`y` are the element's layout anchor (its `left`/`top`) relative to the
/// containing block, in [`TransformModel::unit`]. Scale factors are clamped to
/// [`MIN_SCALE`] by every constructor and mutator.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TransformModel {
    x: f64,
    y: f64,
    scale_x: f64,
    scale_y: f64,
    rotation: f64,
    z_index: i32,
    unit: UnitSystem,
}

impl Default for TransformModel {
    fn default() -> Self {
        Self::new(Point::ZERO, UnitSystem::Pixel)
    }
}

/// A relative change to a [`TransformModel`].
///
/// Position and rotation are additive; scale is multiplicative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformDelta {
    /// Added to `x`.
    pub dx: f64,
    /// Added to `y`.
    pub dy: f64,
    /// Multiplies `scale_x`.
    pub scale_x: f64,
    /// Multiplies `scale_y`.
    pub scale_y: f64,
    /// Added to `rotation`, in degrees.
    pub rotation: f64,
    /// Replaces `z_index` when set.
    pub z_index: Option<i32>,
}

impl Default for TransformDelta {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl TransformDelta {
    /// A delta that changes nothing.
    pub const IDENTITY: Self = Self {
        dx: 0.0,
        dy: 0.0,
        scale_x: 1.0,
        scale_y: 1.0,
        rotation: 0.0,
        z_index: None,
    };

    /// Moves by `offset`.
    #[must_use]
    pub fn translate(offset: Vec2) -> Self {
        Self {
            dx: offset.x,
            dy: offset.y,
            ..Self::IDENTITY
        }
    }

    /// Scales by the given factors.
    #[must_use]
    pub fn scale(scale_x: f64, scale_y: f64) -> Self {
        Self {
            scale_x,
            scale_y,
            ..Self::IDENTITY
        }
    }

    /// Rotates by `degrees`.
    #[must_use]
    pub fn rotate(degrees: f64) -> Self {
        Self {
            rotation: degrees,
            ..Self::IDENTITY
        }
    }
}

impl TransformModel {
    /// A model at `position` with unit scale, no rotation and `z_index` 0.
    #[must_use]
    pub fn new(position: Point, unit: UnitSystem) -> Self {
        Self {
            x: position.x,
            y: position.y,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0.0,
            z_index: 0,
            unit,
        }
    }

    /// The placement of a character dropped onto the stage at `point` (pixels).
    #[must_use]
    pub fn dropped_at(point: Point) -> Self {
        Self::new(point, UnitSystem::Pixel).with_z_index(FRONT_Z_INDEX)
    }

    /// Builder form of [`TransformModel::set_scale`].
    #[must_use]
    pub fn with_scale(mut self, scale_x: f64, scale_y: f64) -> Self {
        self.set_scale(scale_x, scale_y);
        self
    }

    /// Builder form of [`TransformModel::set_rotation`].
    #[must_use]
    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    /// Builder form of [`TransformModel::set_z_index`].
    #[must_use]
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Horizontal position.
    #[must_use]
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Vertical position.
    #[must_use]
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Position as a point.
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Moves to `position` without changing units.
    pub fn set_position(&mut self, position: Point) {
        self.x = position.x;
        self.y = position.y;
    }

    /// Scale factors as `(scale_x, scale_y)`.
    #[must_use]
    pub fn scale(&self) -> (f64, f64) {
        (self.scale_x, self.scale_y)
    }

    /// Sets both scale factors, clamping each to at least [`MIN_SCALE`].
    ///
    /// Non-finite factors are treated as [`MIN_SCALE`].
    pub fn set_scale(&mut self, scale_x: f64, scale_y: f64) {
        self.scale_x = clamp_scale(scale_x);
        self.scale_y = clamp_scale(scale_y);
    }

    /// Rotation in degrees, unbounded.
    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Rotation wrapped into `[0, 360)` for display.
    #[must_use]
    pub fn display_rotation(&self) -> f64 {
        let r = self.rotation % 360.0;
        if r < 0.0 { r + 360.0 } else { r }
    }

    /// Sets the rotation in degrees.
    pub fn set_rotation(&mut self, degrees: f64) {
        self.rotation = degrees;
    }

    /// Stacking order.
    #[must_use]
    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    /// Sets the stacking order.
    pub fn set_z_index(&mut self, z_index: i32) {
        self.z_index = z_index;
    }

    /// Unit system of `x`/`y`.
    #[must_use]
    pub fn unit(&self) -> UnitSystem {
        self.unit
    }

    /// Applies a relative change.
    ///
    /// ```
    /// use kurbo::Point;
    /// use stagehand_transform::{TransformDelta, TransformModel};
    /// use stagehand_units::UnitSystem;
    ///
    /// let model = TransformModel::new(Point::new(10.0, 20.0), UnitSystem::Pixel);
    /// let moved = model.delta(&TransformDelta {
    ///     dx: 5.0,
    ///     scale_x: 0.01,
    ///     ..TransformDelta::IDENTITY
    /// });
    /// assert_eq!(moved.x(), 15.0);
    /// // Scale never collapses.
    /// assert_eq!(moved.scale(), (0.1, 1.0));
    /// ```
    #[must_use]
    pub fn delta(&self, delta: &TransformDelta) -> Self {
        let mut out = *self;
        out.x += delta.dx;
        out.y += delta.dy;
        out.set_scale(self.scale_x * delta.scale_x, self.scale_y * delta.scale_y);
        out.rotation += delta.rotation;
        if let Some(z) = delta.z_index {
            out.z_index = z;
        }
        out
    }

    /// Re-expresses the position in `unit`, against the containing block's size.
    ///
    /// Converting into percent fails when the reference is degenerate.
    pub fn to_unit(&self, unit: UnitSystem, parent: Size) -> Result<Self, ConversionError> {
        if unit == self.unit {
            return Ok(*self);
        }
        let x = Length {
            value: self.x,
            unit: self.unit,
        }
        .to_unit(unit, parent.width)?;
        let y = Length {
            value: self.y,
            unit: self.unit,
        }
        .to_unit(unit, parent.height)?;
        Ok(Self {
            x: x.value,
            y: y.value,
            unit,
            ..*self
        })
    }

    /// Builds a model from an element's declared style.
    ///
    /// The unit system follows `left` and `top` is converted into it. A
    /// transform that cannot be parsed is logged and treated as the identity;
    /// an unset or keyword position reads as zero. This never fails.
    #[must_use]
    pub fn extract_from(style: &StyleSnapshot, parent: Size) -> Self {
        let css = match CssTransform::parse(&style.transform) {
            Ok(css) => css,
            Err(error) => {
                warn!(%error, transform = %style.transform, "ignoring unparseable transform");
                CssTransform::IDENTITY
            }
        };
        let unit = style.position_unit();
        let x = axis_value(&style.left, unit, parent.width);
        let y = axis_value(&style.top, unit, parent.height);
        Self {
            x,
            y,
            scale_x: clamp_scale(css.scale_x),
            scale_y: clamp_scale(css.scale_y),
            rotation: css.rotation,
            z_index: style.z_index_value().unwrap_or(0),
            unit,
        }
    }

    /// Writes this model to `target` in the edit-time pixel representation.
    ///
    /// All properties go out in a single [`StyleTarget::write_style`] call.
    pub fn apply_to<T: StyleTarget + ?Sized>(&self, target: &T, frame: &EditFrame) {
        target.write_style(&frame.edit_patch(self));
    }
}

fn clamp_scale(scale: f64) -> f64 {
    if scale.is_finite() {
        scale.max(MIN_SCALE)
    } else {
        MIN_SCALE
    }
}

/// Reads one axis of a declared position, in `unit`.
fn axis_value(text: &str, unit: UnitSystem, reference: f64) -> f64 {
    let Ok(length) = Length::parse(text) else {
        debug!(value = text, "position not set; reading as zero");
        return 0.0;
    };
    match length.to_unit(unit, reference) {
        Ok(length) => length.value,
        Err(error) => {
            warn!(%error, value = text, "cannot convert position; reading as zero");
            0.0
        }
    }
}

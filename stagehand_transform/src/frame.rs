// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edit-time geometry: how a pixel [`TransformModel`] maps to what is on screen.
//!
//! CSS places an element's layout box at `left`/`top`, moves it by its
//! `translate` (percentages resolve against the box's own size) and scales and
//! rotates it about its center. An [`EditFrame`] captures the parts of that
//! pipeline that stay fixed during an edit, so the unrotated visual box of any
//! candidate model can be computed, and inverted, without touching the page.

use alloc::string::ToString;

use kurbo::{Point, Rect, Size, Vec2};
use stagehand_units::{Length, UnitSystem};
use tracing::warn;

use crate::css::CssTransform;
use crate::model::{MIN_SCALE, TransformModel};
use crate::style::{StylePatch, StyleSnapshot};

/// How size changes are written while editing.
///
/// The same element can be edited either way; the mode only decides which
/// properties carry the size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SwapMode {
    /// Resizing changes the CSS scale. `width` and `height` are never written.
    #[default]
    Transform,
    /// Resizing changes `width` and `height`. The transform is only rewritten
    /// when the scale or rotation itself is edited.
    LayoutBox,
}

/// The fixed part of an element's geometry during one edit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EditFrame {
    size: Size,
    base: CssTransform,
    base_z_index: Option<i32>,
    mode: SwapMode,
}

impl EditFrame {
    /// Creates a frame for a layout box of `size` with transform `base`.
    #[must_use]
    pub fn new(size: Size, base: CssTransform, mode: SwapMode) -> Self {
        Self {
            size,
            base,
            base_z_index: None,
            mode,
        }
    }

    /// Records the declared `z-index` so an unchanged one is not rewritten.
    #[must_use]
    pub fn with_base_z_index(mut self, z_index: Option<i32>) -> Self {
        self.base_z_index = z_index;
        self
    }

    /// Untransformed layout size in pixels.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// The transform the element had when editing started.
    #[must_use]
    pub fn base(&self) -> &CssTransform {
        &self.base
    }

    /// How size changes are written.
    #[must_use]
    pub fn mode(&self) -> SwapMode {
        self.mode
    }

    /// The base translation resolved to pixels for the current layout size.
    #[must_use]
    pub fn translation(&self) -> Vec2 {
        self.base.translation_px(self.size)
    }

    /// The unrotated visual box of `model`, in parent-relative pixels.
    #[must_use]
    pub fn visual_rect(&self, model: &TransformModel) -> Rect {
        debug_assert_eq!(model.unit(), UnitSystem::Pixel, "edit frames work in pixels");
        let (sx, sy) = model.scale();
        let center = model.position() + self.size.to_vec2() * 0.5 + self.translation();
        Rect::from_center_size(center, Size::new(self.size.width * sx, self.size.height * sy))
    }

    /// The layout anchor that puts the visual center at `center`.
    #[must_use]
    pub fn position_for_center(&self, center: Point) -> Point {
        center - self.size.to_vec2() * 0.5 - self.translation()
    }

    /// The transform to write for `model`: the base translation followed by
    /// the model's scale and rotation.
    #[must_use]
    pub fn transform_for(&self, model: &TransformModel) -> CssTransform {
        let (scale_x, scale_y) = model.scale();
        CssTransform {
            scale_x,
            scale_y,
            rotation: model.rotation(),
            ..self.base
        }
    }

    /// Whether `model` has a different scale or rotation than the base transform.
    #[must_use]
    pub fn transform_changed(&self, model: &TransformModel) -> bool {
        const EPSILON: f64 = 1e-9;
        let (sx, sy) = model.scale();
        (sx - self.base.scale_x).abs() > EPSILON
            || (sy - self.base.scale_y).abs() > EPSILON
            || (model.rotation() - self.base.rotation).abs() > EPSILON
    }

    /// Whether `model` stacks differently than the declared `z-index`.
    #[must_use]
    pub fn z_index_changed(&self, model: &TransformModel) -> bool {
        model.z_index() != self.base_z_index.unwrap_or(0)
    }

    /// The edit-time pixel style for `model`.
    #[must_use]
    pub fn edit_patch(&self, model: &TransformModel) -> StylePatch {
        let (width, height) = match self.mode {
            SwapMode::Transform => (None, None),
            SwapMode::LayoutBox => (
                Some(Length::px(self.size.width).to_string()),
                Some(Length::px(self.size.height).to_string()),
            ),
        };
        let transform = match self.mode {
            SwapMode::LayoutBox if !self.transform_changed(model) => None,
            _ => Some(self.transform_for(model).to_css()),
        };
        StylePatch {
            position: Some("absolute".to_string()),
            left: Some(Length::px(model.x()).to_string()),
            top: Some(Length::px(model.y()).to_string()),
            width,
            height,
            transform,
            z_index: self
                .z_index_changed(model)
                .then(|| model.z_index().to_string()),
        }
    }
}

/// A pixel model together with the frame it is drawn in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Position, scale, rotation and stacking.
    pub model: TransformModel,
    /// Layout size and base transform.
    pub frame: EditFrame,
}

impl Placement {
    /// Captures an element as it is currently rendered.
    ///
    /// `rendered` is the element's live bounding box relative to its containing
    /// block and `layout_size` its untransformed size. The returned model is in
    /// pixels and reproduces `rendered` exactly (for unrotated elements), so
    /// switching to it moves nothing on screen.
    #[must_use]
    pub fn capture(
        style: &StyleSnapshot,
        layout_size: Size,
        rendered: Rect,
        mode: SwapMode,
    ) -> Self {
        let base = CssTransform::parse(&style.transform).unwrap_or_else(|error| {
            warn!(%error, transform = %style.transform, "editing as if untransformed");
            CssTransform::IDENTITY
        });
        let frame =
            EditFrame::new(layout_size, base, mode).with_base_z_index(style.z_index_value());
        let mut model = TransformModel::new(Point::ZERO, UnitSystem::Pixel)
            .with_scale(base.scale_x, base.scale_y)
            .with_rotation(base.rotation)
            .with_z_index(style.z_index_value().unwrap_or(0));
        // Rotation about the center keeps the bounding box centered.
        model.set_position(frame.position_for_center(rendered.center()));
        Self { model, frame }
    }

    /// The same placement after the page laid the element out again, e.g.
    /// because its container was resized.
    ///
    /// Scale, rotation, stacking and the base transform are kept; the layout
    /// size is replaced and the anchor re-derived from `rendered`.
    #[must_use]
    pub fn relaid(&self, layout_size: Size, rendered: Rect) -> Self {
        let mut out = *self;
        out.frame.size = layout_size;
        out.model
            .set_position(out.frame.position_for_center(rendered.center()));
        out
    }

    /// The unrotated visual box in parent-relative pixels.
    #[must_use]
    pub fn visual_rect(&self) -> Rect {
        self.frame.visual_rect(&self.model)
    }

    /// The same placement moved by `offset`.
    #[must_use]
    pub fn translated(&self, offset: Vec2) -> Self {
        let mut out = *self;
        out.model.set_position(self.model.position() + offset);
        out
    }

    /// The placement whose visual box is `target`.
    ///
    /// In [`SwapMode::Transform`] the scale absorbs the new size; in
    /// [`SwapMode::LayoutBox`] the layout size does. Returns `None` when the
    /// layout size is degenerate and no scale can reach `target`.
    #[must_use]
    pub fn fitted(&self, target: Rect) -> Option<Self> {
        let mut out = *self;
        match self.frame.mode {
            SwapMode::Transform => {
                let size = self.frame.size;
                if !(size.width > 0.0 && size.height > 0.0) {
                    return None;
                }
                out.model
                    .set_scale(target.width() / size.width, target.height() / size.height);
            }
            SwapMode::LayoutBox => {
                let (sx, sy) = self.model.scale();
                out.frame.size = Size::new(target.width() / sx, target.height() / sy);
            }
        }
        out.model
            .set_position(out.frame.position_for_center(target.center()));
        Some(out)
    }

    /// The smallest visual size a resize may produce.
    ///
    /// At least `floor`, and in [`SwapMode::Transform`] never below what
    /// [`MIN_SCALE`] allows, so a fitted box always matches its target.
    #[must_use]
    pub fn min_visual_size(&self, floor: Size) -> Size {
        match self.frame.mode {
            SwapMode::Transform => Size::new(
                floor.width.max(self.frame.size.width * MIN_SCALE),
                floor.height.max(self.frame.size.height * MIN_SCALE),
            ),
            SwapMode::LayoutBox => floor,
        }
    }

    /// The edit-time pixel style for this placement.
    #[must_use]
    pub fn edit_patch(&self) -> StylePatch {
        self.frame.edit_patch(&self.model)
    }
}

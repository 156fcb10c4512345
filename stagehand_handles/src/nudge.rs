// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Vec2;

use crate::modifiers::Modifiers;

/// Arrow-key direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NudgeDirection {
    /// Arrow left.
    Left,
    /// Arrow right.
    Right,
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
}

impl NudgeDirection {
    /// Unit vector in screen coordinates (y grows downward).
    #[must_use]
    pub const fn unit(self) -> Vec2 {
        match self {
            Self::Left => Vec2::new(-1.0, 0.0),
            Self::Right => Vec2::new(1.0, 0.0),
            Self::Up => Vec2::new(0.0, -1.0),
            Self::Down => Vec2::new(0.0, 1.0),
        }
    }
}

/// Keyboard nudge distances, in the session's current unit (pixels).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NudgeSteps {
    /// Plain arrow key.
    pub default: f64,
    /// With Shift.
    pub coarse: f64,
    /// With Ctrl or Meta.
    pub fine: f64,
}

impl Default for NudgeSteps {
    fn default() -> Self {
        Self {
            default: 1.0,
            coarse: 10.0,
            fine: 0.1,
        }
    }
}

impl NudgeSteps {
    /// Step size for the held modifiers. Ctrl/Meta win over Shift.
    #[must_use]
    pub fn step(&self, modifiers: Modifiers) -> f64 {
        if modifiers.intersects(Modifiers::CTRL.union(Modifiers::META)) {
            self.fine
        } else if modifiers.contains(Modifiers::SHIFT) {
            self.coarse
        } else {
            self.default
        }
    }

    /// Offset for one key press.
    #[must_use]
    pub fn offset(&self, direction: NudgeDirection, modifiers: Modifiers) -> Vec2 {
        direction.unit() * self.step(modifiers)
    }
}

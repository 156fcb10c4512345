// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use bitflags::bitflags;

bitflags! {
    /// Modifier keys held during a drag or key press.
    ///
    /// During a resize, Shift locks the aspect ratio and Ctrl, Alt or Meta
    /// keeps the center fixed; the two combine. Meta stands in for Ctrl on
    /// macOS, as it does for nudging.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT = 1 << 0;
        /// Alt / Option.
        const ALT = 1 << 1;
        /// Control.
        const CTRL = 1 << 2;
        /// Meta / Command.
        const META = 1 << 3;
    }
}

impl Modifiers {
    /// Whether a resize should keep the drag-start aspect ratio.
    #[must_use]
    pub fn keeps_aspect(self) -> bool {
        self.contains(Self::SHIFT)
    }

    /// Whether a resize should keep the box center fixed.
    #[must_use]
    pub fn from_center(self) -> bool {
        self.intersects(Self::CTRL | Self::ALT | Self::META)
    }
}

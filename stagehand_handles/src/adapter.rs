// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversions from `ui-events` keyboard types.

use ui_events::keyboard::{Key, Modifiers as KeyModifiers, NamedKey};

use crate::modifiers::Modifiers;
use crate::nudge::NudgeDirection;

impl From<KeyModifiers> for Modifiers {
    fn from(m: KeyModifiers) -> Self {
        let mut out = Self::empty();
        out.set(Self::SHIFT, m.contains(KeyModifiers::SHIFT));
        out.set(Self::ALT, m.contains(KeyModifiers::ALT));
        out.set(Self::CTRL, m.contains(KeyModifiers::CONTROL));
        out.set(Self::META, m.contains(KeyModifiers::META));
        out
    }
}

impl NudgeDirection {
    /// The nudge direction of an arrow key, if `key` is one.
    #[must_use]
    pub fn from_key(key: &Key) -> Option<Self> {
        match key {
            Key::Named(NamedKey::ArrowLeft) => Some(Self::Left),
            Key::Named(NamedKey::ArrowRight) => Some(Self::Right),
            Key::Named(NamedKey::ArrowUp) => Some(Self::Up),
            Key::Named(NamedKey::ArrowDown) => Some(Self::Down),
            _ => None,
        }
    }
}

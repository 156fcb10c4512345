// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use serde::Serialize;
use stagehand_transform::{StyleSnapshot, TransformModel};

use crate::controller::SessionHandle;

/// Notifications for panels that show the numbers behind the box.
///
/// Collected by the controller and handed out by
/// [`EditSessionController::drain_events`](crate::EditSessionController::drain_events).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SessionEvent {
    /// Editing started; `transform` is the pixel model.
    Started {
        /// The new session.
        handle: SessionHandle,
        /// Placement at selection time.
        transform: TransformModel,
    },
    /// An edit was applied to the element.
    Updated {
        /// The session.
        handle: SessionHandle,
        /// Counts applied edits within the session.
        revision: u64,
        /// Placement after the edit.
        transform: TransformModel,
    },
    /// Editing ended and the style was written back.
    Ended {
        /// The finished session.
        handle: SessionHandle,
        /// The committed declared style.
        style: StyleSnapshot,
    },
    /// The element went away mid-session; nothing was written.
    Aborted {
        /// The abandoned session.
        handle: SessionHandle,
    },
}

impl SessionEvent {
    /// The session this event is about.
    #[must_use]
    pub fn handle(&self) -> SessionHandle {
        match self {
            Self::Started { handle, .. }
            | Self::Updated { handle, .. }
            | Self::Ended { handle, .. }
            | Self::Aborted { handle } => *handle,
        }
    }
}

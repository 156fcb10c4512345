// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::controller::SessionHandle;

/// Error returned by the session API when a call's precondition does not hold.
///
/// Pointer and key handlers never return these; they log and report an
/// [`EventOutcome`](crate::EventOutcome) instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// No element is being edited.
    #[error("no edit session is active")]
    NoActiveSession,
    /// The handle belongs to a session that has already ended.
    #[error("session {handle:?} has ended")]
    StaleHandle {
        /// The handle that was passed in.
        handle: SessionHandle,
    },
    /// The element is no longer attached to the page.
    #[error("the element is not attached to the page")]
    Detached,
    /// The element or its containing block has no usable layout.
    #[error("the element has no usable layout geometry")]
    DegenerateGeometry,
}

/// Error returned when a saved position cannot be written.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// Serializing the record failed.
    #[error("could not encode saved position: {0}")]
    Encode(#[from] serde_json::Error),
}

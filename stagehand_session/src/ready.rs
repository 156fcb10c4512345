// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waiting for the character host.
//!
//! The skeleton renderer usually comes up after the page. Rather than polling
//! for it, the host hands over a future that resolves to the renderer's sink;
//! if it does not resolve in time the editor runs without skeleton sync.

use core::future::Future;
use core::time::Duration;

use tracing::{info, warn};

use crate::host::CharacterSink;

/// Whether edits reach a skeleton renderer.
pub enum HostMode {
    /// The renderer is up and receives every placement.
    Attached(Box<dyn CharacterSink>),
    /// No renderer; the box is edited on its own.
    Standalone,
}

impl core::fmt::Debug for HostMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Attached(_) => f.write_str("Attached"),
            Self::Standalone => f.write_str("Standalone"),
        }
    }
}

impl HostMode {
    /// Whether a renderer is attached.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        matches!(self, Self::Attached(_))
    }

    /// The renderer's sink, if attached.
    #[must_use]
    pub fn into_sink(self) -> Option<Box<dyn CharacterSink>> {
        match self {
            Self::Attached(sink) => Some(sink),
            Self::Standalone => None,
        }
    }
}

/// Waits up to `timeout` for `ready` to yield the character sink.
///
/// ```
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// use core::time::Duration;
/// use stagehand_session::{CharacterPlacement, CharacterSink, wait_for_host};
///
/// struct Renderer;
/// impl CharacterSink for Renderer {
///     fn sync(&mut self, _: CharacterPlacement) {}
/// }
///
/// let mode = wait_for_host(async { Renderer }, Duration::from_millis(10)).await;
/// assert!(mode.is_attached());
/// # }
/// ```
pub async fn wait_for_host<F, S>(ready: F, timeout: Duration) -> HostMode
where
    F: Future<Output = S>,
    S: CharacterSink + 'static,
{
    match tokio::time::timeout(timeout, ready).await {
        Ok(sink) => {
            info!("character host attached");
            HostMode::Attached(Box::new(sink))
        }
        Err(_) => {
            warn!(?timeout, "character host not ready; editing without skeleton sync");
            HostMode::Standalone
        }
    }
}

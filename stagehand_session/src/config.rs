// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Editor settings.

use core::time::Duration;

use kurbo::Size;
use serde::{Deserialize, Serialize};
use stagehand_handles::{BOUNDARY_MARGIN, DRAG_THRESHOLD, MIN_SIZE, NudgeSteps};
use stagehand_transform::SwapMode;

/// Default side length of a resize handle, in pixels.
pub const HANDLE_SIZE: f64 = 10.0;

/// Default time to wait for the character host before editing standalone.
pub const HOST_READY_TIMEOUT: Duration = Duration::from_secs(5);

/// Error returned by [`EditorConfig::from_json_str`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The text is not a valid settings document.
    #[error("invalid editor settings: {0}")]
    Json(#[from] serde_json::Error),
    /// A setting is out of range.
    #[error("`{field}` must be {expected}, got {value}")]
    OutOfRange {
        /// Name of the setting.
        field: &'static str,
        /// What the setting must be.
        expected: &'static str,
        /// The rejected value.
        value: f64,
    },
}

/// Tunables of the bounding-box editor.
///
/// Every field has a default, so a settings document only needs the values it
/// changes:
///
/// ```
/// use stagehand_session::EditorConfig;
/// use stagehand_transform::SwapMode;
///
/// let config = EditorConfig::from_json_str(r#"{ "swapMode": "layout_box", "nudge": { "coarse": 5 } }"#).unwrap();
/// assert_eq!(config.swap_mode, SwapMode::LayoutBox);
/// assert_eq!(config.nudge.coarse, 5.0);
/// assert_eq!(config.nudge.default, 1.0);
/// assert_eq!(config.min_size, 20.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Smallest width and height a resize may produce, in pixels.
    pub min_size: f64,
    /// How far a dragged box may overhang its container, in pixels.
    pub boundary_margin: f64,
    /// Distance a pointer must travel before a press becomes a drag.
    pub drag_threshold: f64,
    /// Arrow-key step sizes.
    pub nudge: NudgeSteps,
    /// Side length of the resize handles.
    pub handle_size: f64,
    /// Which properties carry a resize.
    pub swap_mode: SwapMode,
    /// Milliseconds to wait for the character host.
    pub host_ready_timeout_ms: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_size: MIN_SIZE.width,
            boundary_margin: BOUNDARY_MARGIN,
            drag_threshold: DRAG_THRESHOLD,
            nudge: NudgeSteps::default(),
            handle_size: HANDLE_SIZE,
            swap_mode: SwapMode::default(),
            host_ready_timeout_ms: 5_000,
        }
    }
}

impl EditorConfig {
    /// Parses and validates a JSON settings document.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every setting is in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("minSize", self.min_size),
            ("handleSize", self.handle_size),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::OutOfRange {
                    field,
                    expected: "positive",
                    value,
                });
            }
        }
        let non_negative = [
            ("boundaryMargin", self.boundary_margin),
            ("dragThreshold", self.drag_threshold),
            ("nudge.default", self.nudge.default),
            ("nudge.coarse", self.nudge.coarse),
            ("nudge.fine", self.nudge.fine),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::OutOfRange {
                    field,
                    expected: "zero or more",
                    value,
                });
            }
        }
        Ok(())
    }

    /// The resize floor as a size.
    #[must_use]
    pub fn min_box(&self) -> Size {
        Size::new(self.min_size, self.min_size)
    }

    /// How long to wait for the character host.
    #[must_use]
    pub fn host_ready_timeout(&self) -> Duration {
        Duration::from_millis(self.host_ready_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_interaction_constants() {
        let config = EditorConfig::default();
        assert_eq!(config.min_box(), MIN_SIZE, "20px floor");
        assert_eq!(config.boundary_margin, 10.0, "margin");
        assert_eq!(config.drag_threshold, 3.0, "threshold");
        assert_eq!(config.host_ready_timeout(), HOST_READY_TIMEOUT, "timeout");
        assert_eq!(config.swap_mode, SwapMode::Transform, "scale carries resizes");
    }

    #[test]
    fn empty_document_is_the_default() {
        let config = EditorConfig::from_json_str("{}").unwrap();
        assert_eq!(config, EditorConfig::default(), "all defaulted");
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let err = EditorConfig::from_json_str(r#"{ "minSize": 0 }"#).unwrap_err();
        assert!(
            matches!(err, ConfigError::OutOfRange { field: "minSize", .. }),
            "{err}"
        );
        let err = EditorConfig::from_json_str(r#"{ "nudge": { "fine": -1 } }"#).unwrap_err();
        assert!(
            matches!(err, ConfigError::OutOfRange { field: "nudge.fine", .. }),
            "{err}"
        );
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = EditorConfig::from_json_str("{ minSize: 1 }").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)), "{err}");
    }
}

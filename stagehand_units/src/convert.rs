// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Error returned when a value cannot be expressed as a percentage.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ConversionError {
    /// The reference dimension was zero, negative or not finite.
    #[error("cannot express a percentage of reference dimension {reference}")]
    DivisionByZero {
        /// The offending reference dimension.
        reference: f64,
    },
}

/// Converts a percentage of `reference` into pixels.
///
/// `percent_to_pixel(35.0, 1000.0) == 350.0`.
#[must_use]
pub fn percent_to_pixel(value: f64, reference: f64) -> f64 {
    value / 100.0 * reference
}

/// Converts pixels into a percentage of `reference`.
///
/// Fails with [`ConversionError::DivisionByZero`] when `reference` is not a
/// positive finite number; callers keep their previous value in that case.
pub fn pixel_to_percent(value: f64, reference: f64) -> Result<f64, ConversionError> {
    if !(reference.is_finite() && reference > 0.0) {
        return Err(ConversionError::DivisionByZero { reference });
    }
    Ok(value / reference * 100.0)
}

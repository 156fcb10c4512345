// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

use crate::convert::{ConversionError, percent_to_pixel, pixel_to_percent};

/// Coordinate space a position or size is expressed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum UnitSystem {
    /// Percentage of a reference dimension, usually the offset parent's.
    Percent,
    /// CSS pixels.
    #[default]
    Pixel,
}

impl UnitSystem {
    /// CSS suffix written after a value in this unit.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Percent => "%",
            Self::Pixel => "px",
        }
    }
}

/// Error returned by [`Length::parse`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseLengthError {
    /// The input was empty or whitespace.
    #[error("empty length")]
    Empty,
    /// The input used a keyword (`auto`) or a unit other than `%` and `px`.
    #[error("unsupported length `{0}`")]
    Unsupported(String),
    /// The numeric part could not be parsed as a finite number.
    #[error("invalid number in length `{0}`")]
    InvalidNumber(String),
}

/// A single CSS length in either percent or pixels.
///
/// ```
/// use stagehand_units::{Length, UnitSystem};
///
/// let left = Length::parse("35%").unwrap();
/// assert_eq!(left.unit, UnitSystem::Percent);
/// assert_eq!(left.to_pixels(1000.0), 350.0);
/// assert_eq!(Length::px(350.0).to_string(), "350px");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Length {
    /// Numeric value in `unit`.
    pub value: f64,
    /// Unit of `value`.
    pub unit: UnitSystem,
}

impl Length {
    /// Zero pixels.
    pub const ZERO: Self = Self::px(0.0);

    /// A length in pixels.
    #[must_use]
    pub const fn px(value: f64) -> Self {
        Self {
            value,
            unit: UnitSystem::Pixel,
        }
    }

    /// A length in percent.
    #[must_use]
    pub const fn percent(value: f64) -> Self {
        Self {
            value,
            unit: UnitSystem::Percent,
        }
    }

    /// Parses CSS text such as `35%`, `350px`, `-12.5px` or a unitless `0`.
    pub fn parse(text: &str) -> Result<Self, ParseLengthError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ParseLengthError::Empty);
        }
        let (number, unit) = if let Some(number) = text.strip_suffix('%') {
            (number, UnitSystem::Percent)
        } else if let Some(number) = text.strip_suffix("px") {
            (number, UnitSystem::Pixel)
        } else {
            // CSS allows a bare zero without a unit.
            return match text.parse::<f64>() {
                Ok(value) if value == 0.0 => Ok(Self::ZERO),
                _ => Err(ParseLengthError::Unsupported(text.to_string())),
            };
        };
        match number.trim_end().parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Self { value, unit }),
            _ => Err(ParseLengthError::InvalidNumber(text.to_string())),
        }
    }

    /// Resolves this length to pixels against `reference`.
    ///
    /// Percent lengths resolve to `value / 100 * reference`; pixel lengths are
    /// returned unchanged.
    #[must_use]
    pub fn to_pixels(self, reference: f64) -> f64 {
        match self.unit {
            UnitSystem::Percent => percent_to_pixel(self.value, reference),
            UnitSystem::Pixel => self.value,
        }
    }

    /// Re-expresses this length in `unit` against `reference`.
    ///
    /// Converting into percent fails when the reference is zero, negative or
    /// not finite.
    pub fn to_unit(self, unit: UnitSystem, reference: f64) -> Result<Self, ConversionError> {
        if unit == self.unit {
            return Ok(self);
        }
        let pixels = self.to_pixels(reference);
        match unit {
            UnitSystem::Pixel => Ok(Self::px(pixels)),
            UnitSystem::Percent => pixel_to_percent(pixels, reference).map(Self::percent),
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Avoid printing `-0px`.
        let value = if self.value == 0.0 { 0.0 } else { self.value };
        write!(f, "{value}{}", self.unit.suffix())
    }
}

impl FromStr for Length {
    type Err = ParseLengthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

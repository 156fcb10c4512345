// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parsing and composing the subset of CSS `transform` values an editor writes.
//!
//! Only transforms that decompose into *translate, then scale, then rotate*
//! are accepted. That is the order Stagehand composes in, and it is the order
//! in which position math stays linear in screen pixels.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `sqrt` and `atan2`
use kurbo::{Size, Vec2};
use stagehand_units::Length;

/// Error returned by [`CssTransform::parse`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransformParseError {
    /// The text is not a sequence of `name(args)` functions.
    #[error("malformed transform `{0}`")]
    Malformed(String),
    /// A function other than translate, scale, rotate or matrix.
    #[error("unsupported transform function `{0}`")]
    UnsupportedFunction(String),
    /// A function had the wrong number or kind of arguments.
    #[error("invalid arguments to `{0}`")]
    InvalidArguments(String),
    /// The functions are valid CSS but do not reduce to translate/scale/rotate.
    #[error("transform cannot be reduced to translate, scale and rotate: {0}")]
    NotDecomposable(&'static str),
}

/// A transform reduced to `translate(..) scale(..) rotate(..)`.
///
/// Translation lengths may be percentages, which CSS resolves against the
/// element's own (untransformed) size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CssTransform {
    /// Horizontal translation.
    pub translate_x: Length,
    /// Vertical translation.
    pub translate_y: Length,
    /// Horizontal scale factor.
    pub scale_x: f64,
    /// Vertical scale factor.
    pub scale_y: f64,
    /// Rotation in degrees, clockwise.
    pub rotation: f64,
}

impl Default for CssTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl CssTransform {
    /// The `none` transform.
    pub const IDENTITY: Self = Self {
        translate_x: Length::ZERO,
        translate_y: Length::ZERO,
        scale_x: 1.0,
        scale_y: 1.0,
        rotation: 0.0,
    };

    /// Parses a CSS `transform` value.
    ///
    /// Accepts `none`, `translate`, `translateX`, `translateY`, `scale`,
    /// `scaleX`, `scaleY`, `rotate` (in `deg`, `rad`, `grad` or `turn`) and a
    /// lone `matrix(a, b, c, d, e, f)` without skew or reflection.
    ///
    /// ```
    /// use stagehand_transform::CssTransform;
    /// use stagehand_units::Length;
    ///
    /// let t = CssTransform::parse("translate(-50%, -50%) scale(1.5) rotate(90deg)").unwrap();
    /// assert_eq!(t.translate_x, Length::percent(-50.0));
    /// assert_eq!((t.scale_x, t.scale_y, t.rotation), (1.5, 1.5, 90.0));
    /// ```
    pub fn parse(text: &str) -> Result<Self, TransformParseError> {
        let text = text.trim();
        if text.is_empty() || text == "none" {
            return Ok(Self::IDENTITY);
        }
        let mut functions = Vec::new();
        let mut rest = text;
        while !rest.is_empty() {
            let malformed = || TransformParseError::Malformed(text.to_string());
            let open = rest.find('(').ok_or_else(malformed)?;
            let close = rest.find(')').filter(|&c| c > open).ok_or_else(malformed)?;
            let name = rest[..open].trim();
            if name.is_empty() || name.contains(char::is_whitespace) {
                return Err(malformed());
            }
            let args: Vec<&str> = rest[open + 1..close].split(',').map(str::trim).collect();
            functions.push((name, args));
            rest = rest[close + 1..].trim_start();
        }

        if let [("matrix", args)] = functions.as_slice() {
            let m = numbers::<6>("matrix", args)?;
            return Self::from_matrix(m);
        }

        let mut out = Self::IDENTITY;
        for (name, args) in &functions {
            match *name {
                "translate" => {
                    let (x, y) = match args.as_slice() {
                        [x] => (length(name, x)?, Length::ZERO),
                        [x, y] => (length(name, x)?, length(name, y)?),
                        _ => return Err(invalid(name)),
                    };
                    out.push_translate(x, y)?;
                }
                "translateX" => {
                    let [x] = args.as_slice() else {
                        return Err(invalid(name));
                    };
                    out.push_translate(length(name, x)?, Length::ZERO)?;
                }
                "translateY" => {
                    let [y] = args.as_slice() else {
                        return Err(invalid(name));
                    };
                    out.push_translate(Length::ZERO, length(name, y)?)?;
                }
                "scale" => {
                    let (sx, sy) = match args.as_slice() {
                        [s] => {
                            let s = number(name, s)?;
                            (s, s)
                        }
                        [sx, sy] => (number(name, sx)?, number(name, sy)?),
                        _ => return Err(invalid(name)),
                    };
                    out.push_scale(sx, sy)?;
                }
                "scaleX" => {
                    let [sx] = numbers::<1>(name, args)?;
                    out.push_scale(sx, 1.0)?;
                }
                "scaleY" => {
                    let [sy] = numbers::<1>(name, args)?;
                    out.push_scale(1.0, sy)?;
                }
                "rotate" | "rotateZ" => {
                    let [angle] = args.as_slice() else {
                        return Err(invalid(name));
                    };
                    out.push_rotation(degrees(name, angle)?);
                }
                "matrix" => {
                    return Err(TransformParseError::NotDecomposable(
                        "matrix mixed with other functions",
                    ));
                }
                other => {
                    return Err(TransformParseError::UnsupportedFunction(other.to_string()));
                }
            }
        }
        Ok(out)
    }

    /// Decomposes `matrix(a, b, c, d, e, f)` as `scale(..) rotate(..)`.
    ///
    /// Scaling after the rotation stretches the rows of the linear part, so
    /// the scale factors are the row lengths and the rotation is read from
    /// the first row.
    fn from_matrix([a, b, c, d, e, f]: [f64; 6]) -> Result<Self, TransformParseError> {
        let scale_x = (a * a + c * c).sqrt();
        let scale_y = (b * b + d * d).sqrt();
        let det = a * d - b * c;
        if scale_x == 0.0 || scale_y == 0.0 || det <= 0.0 {
            return Err(TransformParseError::NotDecomposable(
                "matrix is degenerate or reflects",
            ));
        }
        // Rows of a pure scale+rotate are orthogonal.
        if (a * b + c * d).abs() > 1e-9 * scale_x * scale_y {
            return Err(TransformParseError::NotDecomposable("matrix has skew"));
        }
        Ok(Self {
            translate_x: Length::px(e),
            translate_y: Length::px(f),
            scale_x,
            scale_y,
            rotation: (-c).atan2(a).to_degrees(),
        })
    }

    fn push_translate(&mut self, x: Length, y: Length) -> Result<(), TransformParseError> {
        // A translate after rotate would move along rotated axes.
        if self.rotation != 0.0 {
            return Err(TransformParseError::NotDecomposable("translate after rotate"));
        }
        let x = Length {
            value: x.value * self.scale_x,
            ..x
        };
        let y = Length {
            value: y.value * self.scale_y,
            ..y
        };
        self.translate_x = add_lengths(self.translate_x, x)?;
        self.translate_y = add_lengths(self.translate_y, y)?;
        Ok(())
    }

    fn push_scale(&mut self, sx: f64, sy: f64) -> Result<(), TransformParseError> {
        // Non-uniform scale after a rotation would skew.
        if self.rotation != 0.0 && sx != sy {
            return Err(TransformParseError::NotDecomposable(
                "non-uniform scale after rotate",
            ));
        }
        self.scale_x *= sx;
        self.scale_y *= sy;
        Ok(())
    }

    fn push_rotation(&mut self, degrees: f64) {
        self.rotation += degrees;
    }

    /// Returns `true` if this transform has no visible effect.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.translate_x.value == 0.0
            && self.translate_y.value == 0.0
            && self.scale_x == 1.0
            && self.scale_y == 1.0
            && self.rotation == 0.0
    }

    /// Resolves the translation to pixels for an element of the given size.
    #[must_use]
    pub fn translation_px(&self, size: Size) -> Vec2 {
        Vec2::new(
            self.translate_x.to_pixels(size.width),
            self.translate_y.to_pixels(size.height),
        )
    }

    /// Composes CSS text in the fixed order `translate scale rotate`.
    ///
    /// Identity parts are omitted; the identity transform is `none`.
    #[must_use]
    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CssTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_identity() {
            return f.write_str("none");
        }
        let mut sep = "";
        if self.translate_x.value != 0.0 || self.translate_y.value != 0.0 {
            write!(f, "translate({}, {})", self.translate_x, self.translate_y)?;
            sep = " ";
        }
        if self.scale_x != 1.0 || self.scale_y != 1.0 {
            if self.scale_x == self.scale_y {
                write!(f, "{sep}scale({})", self.scale_x)?;
            } else {
                write!(f, "{sep}scale({}, {})", self.scale_x, self.scale_y)?;
            }
            sep = " ";
        }
        if self.rotation != 0.0 {
            write!(f, "{sep}rotate({}deg)", self.rotation)?;
        }
        Ok(())
    }
}

fn invalid(name: &str) -> TransformParseError {
    TransformParseError::InvalidArguments(name.to_string())
}

fn number(name: &str, text: &str) -> Result<f64, TransformParseError> {
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(invalid(name)),
    }
}

fn numbers<const N: usize>(name: &str, args: &[&str]) -> Result<[f64; N], TransformParseError> {
    if args.len() != N {
        return Err(invalid(name));
    }
    let mut out = [0.0; N];
    for (slot, text) in out.iter_mut().zip(args) {
        *slot = number(name, text)?;
    }
    Ok(out)
}

fn length(name: &str, text: &str) -> Result<Length, TransformParseError> {
    Length::parse(text).map_err(|_| invalid(name))
}

fn degrees(name: &str, text: &str) -> Result<f64, TransformParseError> {
    const UNITS: [(&str, f64); 4] = [
        ("deg", 1.0),
        ("grad", 0.9),
        ("rad", 180.0 / core::f64::consts::PI),
        ("turn", 360.0),
    ];
    if text == "0" {
        return Ok(0.0);
    }
    // `grad` is checked before `rad`, which it ends with.
    for (suffix, factor) in UNITS {
        if let Some(value) = text.strip_suffix(suffix) {
            return number(name, value).map(|v| v * factor);
        }
    }
    Err(invalid(name))
}

fn add_lengths(a: Length, b: Length) -> Result<Length, TransformParseError> {
    if b.value == 0.0 {
        Ok(a)
    } else if a.value == 0.0 || a.unit == b.unit {
        Ok(Length {
            value: a.value + b.value,
            unit: b.unit,
        })
    } else {
        Err(TransformParseError::NotDecomposable(
            "translation mixes percent and pixels on one axis",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use kurbo::Affine;

    #[test]
    fn none_and_empty_are_identity() {
        assert_eq!(CssTransform::parse("none"), Ok(CssTransform::IDENTITY), "none");
        assert_eq!(CssTransform::parse("  "), Ok(CssTransform::IDENTITY), "empty");
        assert_eq!(CssTransform::IDENTITY.to_css(), "none", "identity prints none");
    }

    #[test]
    fn parses_canonical_sequence() {
        let t = CssTransform::parse("translate(-50%, -50%) scale(1.4, 1.25) rotate(30deg)").unwrap();
        assert_eq!(t.translate_x, Length::percent(-50.0), "x translate");
        assert_eq!(t.translate_y, Length::percent(-50.0), "y translate");
        assert_eq!((t.scale_x, t.scale_y), (1.4, 1.25), "scale");
        assert_eq!(t.rotation, 30.0, "rotation");
    }

    #[test]
    fn composes_in_fixed_order_and_omits_identity_parts() {
        let t = CssTransform {
            translate_x: Length::percent(-50.0),
            translate_y: Length::percent(-50.0),
            scale_x: 1.4,
            scale_y: 1.25,
            rotation: 0.0,
        };
        assert_eq!(t.to_css(), "translate(-50%, -50%) scale(1.4, 1.25)", "no rotate");
        let t = CssTransform {
            scale_x: 2.0,
            scale_y: 2.0,
            rotation: -15.0,
            ..CssTransform::IDENTITY
        };
        assert_eq!(t.to_css(), "scale(2) rotate(-15deg)", "uniform scale, no translate");
    }

    #[test]
    fn composed_text_parses_back() {
        let t = CssTransform {
            translate_x: Length::px(12.5),
            translate_y: Length::percent(-50.0),
            scale_x: 0.5,
            scale_y: 3.0,
            rotation: 45.0,
        };
        assert_eq!(CssTransform::parse(&t.to_css()), Ok(t), "round trip");
    }

    #[test]
    fn single_axis_functions_accumulate() {
        let t = CssTransform::parse("translateX(10px) translateY(-50%) scaleX(2) scaleY(3)").unwrap();
        assert_eq!(t.translate_x, Length::px(10.0), "translateX");
        assert_eq!(t.translate_y, Length::percent(-50.0), "translateY");
        assert_eq!((t.scale_x, t.scale_y), (2.0, 3.0), "per-axis scale");
    }

    #[test]
    fn translate_after_scale_is_scaled() {
        let t = CssTransform::parse("scale(2) translate(10px, 5px)").unwrap();
        assert_eq!(t.translate_x, Length::px(20.0), "x scaled");
        assert_eq!(t.translate_y, Length::px(10.0), "y scaled");
    }

    #[test]
    fn angle_units() {
        let turn = CssTransform::parse("rotate(0.25turn)").unwrap();
        assert_eq!(turn.rotation, 90.0, "turn");
        let grad = CssTransform::parse("rotate(100grad)").unwrap();
        assert!((grad.rotation - 90.0).abs() < 1e-9, "grad");
        let rad = CssTransform::parse("rotate(3.141592653589793rad)").unwrap();
        assert!((rad.rotation - 180.0).abs() < 1e-9, "rad");
    }

    #[test]
    fn matrix_decomposes_scale_and_rotation() {
        // scale(2) rotate(90deg) translate by (30, 40).
        let t = CssTransform::parse("matrix(0, 2, -2, 0, 30, 40)").unwrap();
        assert!((t.scale_x - 2.0).abs() < 1e-12, "scale x");
        assert!((t.scale_y - 2.0).abs() < 1e-12, "scale y");
        assert!((t.rotation - 90.0).abs() < 1e-12, "rotation");
        assert_eq!(t.translate_x, Length::px(30.0), "e");
        assert_eq!(t.translate_y, Length::px(40.0), "f");
    }

    /// `scale(sx, sy) rotate(deg)` as the `matrix(..)` a browser reports.
    fn matrix_of(linear: Affine) -> String {
        let [a, b, c, d, e, f] = linear.as_coeffs();
        format!("matrix({a}, {b}, {c}, {d}, {e}, {f})")
    }

    #[test]
    fn matrix_with_non_uniform_scale_keeps_each_axis() {
        let t = CssTransform::parse("matrix(0, 1, -2, 0, 0, 0)").unwrap();
        assert!((t.scale_x - 2.0).abs() < 1e-12, "x stretched: {t:?}");
        assert!((t.scale_y - 1.0).abs() < 1e-12, "y untouched: {t:?}");
        assert!((t.rotation - 90.0).abs() < 1e-12, "quarter turn: {t:?}");

        for (sx, sy, deg) in [(2.0, 1.0, 90.0), (1.5, 0.5, 30.0), (0.8, 1.25, -60.0)] {
            let linear = Affine::scale_non_uniform(sx, sy) * Affine::rotate(f64::to_radians(deg));
            let t = CssTransform::parse(&matrix_of(linear)).unwrap();
            assert!(
                (t.scale_x - sx).abs() < 1e-9 && (t.scale_y - sy).abs() < 1e-9,
                "scale({sx}, {sy}) rotate({deg}deg) read back as {t:?}"
            );
            assert!((t.rotation - deg).abs() < 1e-9, "rotate({deg}deg) read back as {t:?}");
        }
    }

    #[test]
    fn rotate_then_stretch_is_skew() {
        // A quarter turn swaps the axes, so `rotate(90deg) scale(2, 1)` survives.
        assert!(
            matches!(
                CssTransform::parse("matrix(0, 2, -1, 0, 0, 0)"),
                Ok(CssTransform { scale_x, scale_y, .. }) if scale_x == 1.0 && scale_y == 2.0
            ),
            "a quarter turn is still scale then rotate"
        );
        let skewed = Affine::rotate(f64::to_radians(30.0)) * Affine::scale_non_uniform(2.0, 1.0);
        assert!(
            matches!(
                CssTransform::parse(&matrix_of(skewed)),
                Err(TransformParseError::NotDecomposable(_))
            ),
            "rotate(30deg) scale(2, 1) has no scale then rotate form"
        );
    }

    #[test]
    fn rejects_what_cannot_be_decomposed() {
        assert!(
            matches!(
                CssTransform::parse("matrix(1, 0, 0.5, 1, 0, 0)"),
                Err(TransformParseError::NotDecomposable(_))
            ),
            "skew"
        );
        assert!(
            matches!(
                CssTransform::parse("rotate(10deg) translate(5px, 0px)"),
                Err(TransformParseError::NotDecomposable(_))
            ),
            "translate after rotate"
        );
        assert!(
            matches!(
                CssTransform::parse("translate(10px, 0px) translate(-50%, 0px)"),
                Err(TransformParseError::NotDecomposable(_))
            ),
            "mixed units"
        );
        assert!(
            matches!(
                CssTransform::parse("skewX(10deg)"),
                Err(TransformParseError::UnsupportedFunction(_))
            ),
            "skew function"
        );
        assert!(
            matches!(
                CssTransform::parse("translate(10px"),
                Err(TransformParseError::Malformed(_))
            ),
            "unbalanced"
        );
        assert!(
            matches!(
                CssTransform::parse("rotate(45)"),
                Err(TransformParseError::InvalidArguments(_))
            ),
            "unitless angle"
        );
    }

    #[test]
    fn translation_resolves_against_own_size() {
        let t = CssTransform::parse("translate(-50%, 10px)").unwrap();
        assert_eq!(
            t.translation_px(Size::new(250.0, 200.0)),
            Vec2::new(-125.0, 10.0),
            "percent of own width"
        );
    }
}

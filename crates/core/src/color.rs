//! Color value types for tonekit.
//!
//! [`Oklch`] is the structured value every palette color is built from. It is
//! serialized to the CSS `oklch(...)` form only at the presentation boundary,
//! and that form is a contract: lightness is written as a percentage even
//! though it is stored as a 0..1 fraction.
//!
//! [`Rgba`] and [`Hsl`] are the device-space display forms. The OKLCH to sRGB
//! transform is delegated to the `palette` crate; out-of-gamut colors are
//! clipped by clamping in sRGB.

use crate::error::StudioError;
use palette::FromColor;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Chroma that CSS maps to `100%` inside `oklch()`.
pub const CHROMA_PERCENT_REFERENCE: f64 = 0.4;

/// Below this chroma a color is achromatic and its hue is reported as 0.
const ACHROMATIC_EPSILON: f64 = 1e-4;

/// OKLCH color with straight alpha.
///
/// `l` is a 0..1 fraction, `c` is chroma (0..0.4 for the sliders), `h` is
/// degrees. No component is validated: NaN or out-of-range values survive
/// until they reach a converter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklch {
    pub l: f64,
    pub c: f64,
    pub h: f64,
    pub alpha: f64,
}

/// 8-bit sRGB color with a 0..1 alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

/// HSL color; `s` and `l` are 0..1 fractions, `h` is degrees in [0, 360).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
    pub a: f64,
}

/// Rounds `x` to `places` decimals and folds `-0.0` into `0.0`.
pub(crate) fn round_to(x: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (x * factor).round() / factor + 0.0
}

/// Alpha usable for output: finite and in [0, 1], opaque otherwise.
fn output_alpha(a: f64) -> f64 {
    if a.is_finite() {
        a.clamp(0.0, 1.0)
    } else {
        1.0
    }
}

/// Normalizes a hue angle to [0, 360).
pub fn normalize_hue(h: f64) -> f64 {
    let h = h.rem_euclid(360.0) + 0.0;
    // rem_euclid can round up to exactly 360 for tiny negative input
    if h >= 360.0 {
        0.0
    } else {
        h
    }
}

fn unit_to_u8(x: f64) -> u8 {
    (x.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl Oklch {
    /// Creates an opaque OKLCH color.
    pub const fn new(l: f64, c: f64, h: f64) -> Self {
        Self {
            l,
            c,
            h,
            alpha: 1.0,
        }
    }

    /// Returns the same color with the given alpha.
    pub const fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }

    /// True when lightness, chroma and hue are all finite.
    pub fn is_finite(&self) -> bool {
        self.l.is_finite() && self.c.is_finite() && self.h.is_finite()
    }

    /// Rounds components to the precision of the serialized form:
    /// `l` and `c` to 3 decimals, `h` to 1, alpha to 3.
    ///
    /// The color cache keys on exactly these values, so two colors with the
    /// same quantized form always serialize identically.
    pub fn quantized(self) -> Self {
        Self {
            l: round_to(self.l, 3),
            c: round_to(self.c, 3),
            h: round_to(self.h, 1),
            alpha: round_to(self.alpha, 3),
        }
    }

    /// Gamut-clipped sRGB via the `palette` transform.
    fn to_srgb(self) -> palette::Srgb<f64> {
        palette::Srgb::from_color(palette::Oklch::new(self.l, self.c, self.h))
    }

    /// Converts to 8-bit RGBA.
    ///
    /// Non-finite input yields black with the input alpha.
    pub fn to_rgba(self) -> Rgba {
        let a = output_alpha(self.alpha);
        if !self.is_finite() {
            return Rgba::new(0, 0, 0, a);
        }
        let rgb = self.to_srgb();
        Rgba::new(
            unit_to_u8(rgb.red),
            unit_to_u8(rgb.green),
            unit_to_u8(rgb.blue),
            a,
        )
    }

    /// Converts to HSL, derived from the 8-bit sRGB channels.
    ///
    /// Non-finite input yields `{h: 0, s: 0, l: 0}` with the input alpha.
    pub fn to_hsl(self) -> Hsl {
        if !self.is_finite() {
            return Hsl {
                h: 0.0,
                s: 0.0,
                l: 0.0,
                a: output_alpha(self.alpha),
            };
        }
        self.to_rgba().to_hsl()
    }

    /// Converts to a `"#rrggbb"` hex string (alpha is dropped).
    pub fn to_hex(self) -> String {
        self.to_rgba().to_hex()
    }
}

impl fmt::Display for Oklch {
    /// Writes `oklch(<L*100>% <C> <H>)`, with ` / <alpha>` when translucent.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let q = self.quantized();
        write!(f, "oklch({}% {} {}", round_to(q.l * 100.0, 1), q.c, q.h)?;
        if q.alpha < 1.0 {
            write!(f, " / {}", q.alpha)?;
        }
        f.write_str(")")
    }
}

impl FromStr for Oklch {
    type Err = StudioError;

    /// Parses a CSS `oklch()` string.
    ///
    /// Lightness may be a percentage or a fraction, chroma a number or a
    /// percentage of 0.4, hue a number with an optional `deg` suffix. The
    /// hue is normalized into [0, 360).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || StudioError::InvalidColor(s.to_string());
        let lower = s.trim().to_ascii_lowercase();
        let inner = lower
            .strip_prefix("oklch(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(invalid)?;

        let (channels, alpha) = match inner.split_once('/') {
            Some((channels, alpha)) => (channels, Some(alpha.trim())),
            None => (inner, None),
        };
        let parts: Vec<&str> = channels.split_whitespace().collect();
        let [l, c, h] = parts.as_slice() else {
            return Err(invalid());
        };

        let l = parse_component(l, 1.0).ok_or_else(invalid)?;
        let c = parse_component(c, CHROMA_PERCENT_REFERENCE).ok_or_else(invalid)?;
        let h = parse_hue(h).ok_or_else(invalid)?;
        let alpha = match alpha {
            Some(a) => parse_component(a, 1.0).ok_or_else(invalid)?,
            None => 1.0,
        };
        Ok(Oklch { l, c, h, alpha })
    }
}

/// Parses a number or percentage; `none` reads as zero.
fn parse_component(token: &str, percent_reference: f64) -> Option<f64> {
    if token == "none" {
        return Some(0.0);
    }
    let value = match token.strip_suffix('%') {
        Some(pct) => pct.parse::<f64>().ok()? / 100.0 * percent_reference,
        None => token.parse::<f64>().ok()?,
    };
    value.is_finite().then_some(value)
}

fn parse_hue(token: &str) -> Option<f64> {
    if token == "none" {
        return Some(0.0);
    }
    let degrees = token.strip_suffix("deg").unwrap_or(token);
    let h = degrees.parse::<f64>().ok()?;
    h.is_finite().then(|| normalize_hue(h))
}

impl Serialize for Oklch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Oklch {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa` (the `#` is optional, case
    /// insensitive).
    pub fn from_hex(hex: &str) -> Result<Rgba, StudioError> {
        let digits = hex.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        if !digits.chars().all(|ch| ch.is_ascii_hexdigit()) {
            return Err(StudioError::InvalidColor(format!(
                "invalid hex digits in {hex:?}"
            )));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|e| StudioError::InvalidColor(format!("invalid hex channel: {e}")))
        };
        match digits.len() {
            3 => {
                let short = |i: usize| channel(i..i + 1).map(|v| v * 17);
                Ok(Rgba::new(short(0)?, short(1)?, short(2)?, 1.0))
            }
            6 => Ok(Rgba::new(channel(0..2)?, channel(2..4)?, channel(4..6)?, 1.0)),
            8 => Ok(Rgba::new(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                round_to(f64::from(channel(6..8)?) / 255.0, 3),
            )),
            n => Err(StudioError::InvalidColor(format!(
                "expected 3, 6 or 8 hex digits, got {n}"
            ))),
        }
    }

    /// Formats as `"#rrggbb"`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Formats the `"r, g, b"` triplet used by the `*-rgb` CSS variables.
    pub fn triplet(self) -> String {
        format!("{}, {}, {}", self.r, self.g, self.b)
    }

    fn to_srgb(self) -> palette::Srgb<f64> {
        palette::Srgb::new(
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }

    /// Converts to HSL; grays get hue 0.
    pub fn to_hsl(self) -> Hsl {
        let hsl: palette::Hsl<palette::encoding::Srgb, f64> = palette::Hsl::from_color(self.to_srgb());
        let h = if hsl.saturation < ACHROMATIC_EPSILON {
            0.0
        } else {
            normalize_hue(hsl.hue.into_degrees())
        };
        Hsl {
            h,
            s: hsl.saturation,
            l: hsl.lightness,
            a: output_alpha(self.a),
        }
    }

    /// Converts to OKLCH; achromatic colors get hue 0.
    pub fn to_oklch(self) -> Oklch {
        let lch: palette::Oklch<f64> = palette::Oklch::from_color(self.to_srgb());
        let h = if lch.chroma < ACHROMATIC_EPSILON {
            0.0
        } else {
            normalize_hue(lch.hue.into_degrees())
        };
        Oklch {
            l: lch.l,
            c: lch.chroma,
            h,
            alpha: self.a,
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({}, {}, {}, {})",
            self.r,
            self.g,
            self.b,
            round_to(self.a, 3)
        )
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let h = round_to(self.h, 1);
        let s = round_to(self.s * 100.0, 1);
        let l = round_to(self.l * 100.0, 1);
        if self.a < 1.0 {
            write!(f, "hsla({h}, {s}%, {l}%, {})", round_to(self.a, 3))
        } else {
            write!(f, "hsl({h}, {s}%, {l}%)")
        }
    }
}

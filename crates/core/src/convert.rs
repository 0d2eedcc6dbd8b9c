//! Display-format conversion for single colors.
//!
//! The string converters never fail: input that cannot be parsed is handed
//! back unchanged, so one bad swatch never blocks the rest of a palette.
//! They accept CSS `oklch()` strings and hex colors.

use crate::color::{Oklch, Rgba};
use crate::config::MAX_CHROMA;
use crate::error::StudioError;
use std::fmt;
use std::str::FromStr;

/// Display formats offered for a swatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorFormat {
    Oklch,
    Hex,
    Rgba,
    Hsl,
}

impl ColorFormat {
    pub const ALL: [ColorFormat; 4] = [
        ColorFormat::Oklch,
        ColorFormat::Hex,
        ColorFormat::Rgba,
        ColorFormat::Hsl,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ColorFormat::Oklch => "oklch",
            ColorFormat::Hex => "hex",
            ColorFormat::Rgba => "rgba",
            ColorFormat::Hsl => "hsl",
        }
    }
}

impl fmt::Display for ColorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorFormat {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "oklch" => Ok(ColorFormat::Oklch),
            "hex" => Ok(ColorFormat::Hex),
            "rgb" | "rgba" => Ok(ColorFormat::Rgba),
            "hsl" | "hsla" => Ok(ColorFormat::Hsl),
            _ => Err(StudioError::UnknownFormat(s.to_string())),
        }
    }
}

/// Parses a CSS `oklch()` string, or `None` if it is malformed.
pub fn parse_oklch(value: &str) -> Option<Oklch> {
    value.parse().ok()
}

/// Parses an `oklch()` string or a hex color into OKLCH.
pub fn parse_color(value: &str) -> Option<Oklch> {
    let trimmed = value.trim();
    if trimmed.starts_with('#') {
        return Rgba::from_hex(trimmed).ok().map(Rgba::to_oklch);
    }
    parse_oklch(trimmed)
}

/// Parses either input form straight to 8-bit RGBA; hex input skips the
/// OKLCH detour so it converts back to itself exactly.
pub(crate) fn parse_rgba(value: &str) -> Option<Rgba> {
    let trimmed = value.trim();
    if trimmed.starts_with('#') {
        return Rgba::from_hex(trimmed).ok();
    }
    parse_oklch(trimmed).map(Oklch::to_rgba)
}

fn convert_or_echo(value: &str, render: impl FnOnce(Rgba) -> String) -> String {
    match parse_rgba(value) {
        Some(rgba) => render(rgba),
        None => {
            log::debug!("cannot parse color {value:?}, returning it unchanged");
            value.to_string()
        }
    }
}

/// Converts to `"#rrggbb"`, or returns `value` unchanged if unparseable.
pub fn to_hex(value: &str) -> String {
    convert_or_echo(value, Rgba::to_hex)
}

/// Converts to `"rgba(r, g, b, a)"`, or returns `value` unchanged if unparseable.
pub fn to_rgba(value: &str) -> String {
    convert_or_echo(value, |rgba| rgba.to_string())
}

/// Converts to `"hsl(h, s%, l%)"`, or returns `value` unchanged if unparseable.
pub fn to_hsl(value: &str) -> String {
    convert_or_echo(value, |rgba| rgba.to_hsl().to_string())
}

/// Normalizes to the `oklch()` form, or returns `value` unchanged if unparseable.
pub fn to_oklch(value: &str) -> String {
    match parse_color(value) {
        Some(color) => color.to_string(),
        None => {
            log::debug!("cannot parse color {value:?}, returning it unchanged");
            value.to_string()
        }
    }
}

/// Converts `value` to the requested display format.
pub fn convert(value: &str, format: ColorFormat) -> String {
    match format {
        ColorFormat::Oklch => to_oklch(value),
        ColorFormat::Hex => to_hex(value),
        ColorFormat::Rgba => to_rgba(value),
        ColorFormat::Hsl => to_hsl(value),
    }
}

/// Converts a picked hex color to OKLCH for the reverse picker flow.
///
/// Chroma is clamped to the slider range [0, 0.4]; the hue is in [0, 360)
/// and is 0 for grays.
pub fn oklch_from_hex(hex: &str) -> Option<Oklch> {
    let color = Rgba::from_hex(hex).ok()?.to_oklch();
    Some(Oklch {
        c: color.c.clamp(0.0, MAX_CHROMA),
        ..color
    })
}

//! Generation input: the `(hue, chroma, isLight)` triple behind a palette.

use crate::color::{normalize_hue, round_to};
use crate::convert::oklch_from_hex;
use crate::params::{param_bool, param_f64};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Upper end of the supported chroma range.
pub const MAX_CHROMA: f64 = 0.4;

pub const DEFAULT_HUE: f64 = 265.0;
pub const DEFAULT_CHROMA: f64 = 0.1;

/// Palette generation input.
///
/// `hue` is expected in [0, 360) and `chroma` in [0, 0.4], but nothing here
/// enforces it: the generator accepts any value and callers clamp with
/// [`ColorConfig::clamped`] where they need to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorConfig {
    pub hue: f64,
    pub chroma: f64,
    #[serde(default)]
    pub is_light: bool,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HUE, DEFAULT_CHROMA, false)
    }
}

impl ColorConfig {
    pub const fn new(hue: f64, chroma: f64, is_light: bool) -> Self {
        Self {
            hue,
            chroma,
            is_light,
        }
    }

    /// Wraps hue into [0, 360) and clamps chroma to [0, 0.4].
    /// Non-finite hue and NaN chroma become 0.
    pub fn clamped(self) -> Self {
        let hue = if self.hue.is_finite() {
            normalize_hue(self.hue)
        } else {
            0.0
        };
        let chroma = if self.chroma.is_nan() {
            0.0
        } else {
            self.chroma.clamp(0.0, MAX_CHROMA)
        };
        Self { hue, chroma, ..self }
    }

    /// Reads a config from a JSON object (`hue`, `chroma`, `isLight`),
    /// falling back to the defaults for missing or mistyped keys.
    pub fn from_json(params: &Value) -> Self {
        let defaults = Self::default();
        Self {
            hue: param_f64(params, "hue", defaults.hue),
            chroma: param_f64(params, "chroma", defaults.chroma),
            is_light: param_bool(params, "isLight", defaults.is_light),
        }
    }

    /// Slider values for a picked hex color (reverse picker flow).
    ///
    /// Hue is rounded to 0.1 degree and chroma to 3 decimals, the slider
    /// resolution. Returns `None` if `hex` is not a hex color.
    pub fn from_hex(hex: &str, is_light: bool) -> Option<Self> {
        let color = oklch_from_hex(hex)?;
        Some(Self::new(
            normalize_hue(round_to(color.h, 1)),
            round_to(color.c, 3),
            is_light,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_is_dark_blue() {
        let config = ColorConfig::default();
        assert_eq!(config, ColorConfig::new(265.0, 0.1, false));
    }

    #[test]
    fn clamped_wraps_hue_and_limits_chroma() {
        let config = ColorConfig::new(-30.0, 0.9, true).clamped();
        assert_eq!(config, ColorConfig::new(330.0, 0.4, true));

        let config = ColorConfig::new(720.5, -0.2, false).clamped();
        assert!((config.hue - 0.5).abs() < 1e-9);
        assert_eq!(config.chroma, 0.0);
    }

    #[test]
    fn clamped_replaces_nan() {
        let config = ColorConfig::new(f64::NAN, f64::NAN, false).clamped();
        assert_eq!(config, ColorConfig::new(0.0, 0.0, false));
    }

    #[test]
    fn from_json_reads_keys_with_defaults() {
        let config = ColorConfig::from_json(&json!({"hue": 120, "isLight": true}));
        assert_eq!(config, ColorConfig::new(120.0, DEFAULT_CHROMA, true));

        let config = ColorConfig::from_json(&json!({"chroma": "lots"}));
        assert_eq!(config, ColorConfig::default());
    }

    #[test]
    fn serde_uses_camel_case() {
        let json = serde_json::to_value(ColorConfig::new(10.0, 0.2, true)).unwrap();
        assert_eq!(json, json!({"hue": 10.0, "chroma": 0.2, "isLight": true}));

        let config: ColorConfig = serde_json::from_value(json!({"hue": 5, "chroma": 0})).unwrap();
        assert_eq!(config, ColorConfig::new(5.0, 0.0, false));
    }

    #[test]
    fn from_hex_derives_slider_values() {
        let config = ColorConfig::from_hex("#ff0000", true).unwrap();
        assert!((config.hue - 29.2).abs() < 0.15, "hue = {}", config.hue);
        assert!((config.chroma - 0.258).abs() < 0.002, "chroma = {}", config.chroma);
        assert!(config.is_light);
    }

    #[test]
    fn from_hex_rejects_non_hex() {
        assert!(ColorConfig::from_hex("oklch(50% 0.1 10)", false).is_none());
        assert!(ColorConfig::from_hex("#12345", false).is_none());
    }
}

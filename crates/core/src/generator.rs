//! Palette generation from `(hue, chroma, isLight)`.
//!
//! Action colors use a color triad (base hue, +120, +240). Alert colors use
//! fixed hues so red still means danger whatever the theme hue is. The two
//! themes share this structure and differ only in lightness tokens and in
//! how much chroma the main text color keeps.

use crate::cache::FifoCache;
use crate::color::{normalize_hue, round_to};
use crate::config::ColorConfig;
use crate::palette::ColorPalette;

/// Hue rotation of the secondary action color.
pub const SECONDARY_HUE_OFFSET: f64 = 120.0;
/// Hue rotation of the tertiary action color.
pub const TERTIARY_HUE_OFFSET: f64 = 240.0;

pub const DANGER_HUE: f64 = 30.0;
pub const WARNING_HUE: f64 = 100.0;
pub const SUCCESS_HUE: f64 = 160.0;
pub const INFO_HUE: f64 = 260.0;

/// Text never gets more chroma than this (except light-theme body text).
pub const TEXT_CHROMA_CAP: f64 = 0.1;
/// Minimum chroma of action colors.
pub const ACTION_CHROMA_FLOOR: f64 = 0.1;
/// Minimum chroma of alert colors.
pub const ALERT_CHROMA_FLOOR: f64 = 0.05;

/// Lightness design tokens of one theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeTokens {
    /// bg-dark, bg, bg-light
    pub backgrounds: [f64; 3],
    /// text, text-muted
    pub text: [f64; 2],
    /// highlight, border, border-muted
    pub borders: [f64; 3],
    pub action: f64,
    pub alert: f64,
    /// Body text keeps the full base chroma instead of the capped one.
    pub full_chroma_text: bool,
}

pub const DARK_TOKENS: ThemeTokens = ThemeTokens {
    backgrounds: [0.10, 0.15, 0.20],
    text: [0.96, 0.76],
    borders: [0.50, 0.40, 0.30],
    action: 0.76,
    alert: 0.70,
    full_chroma_text: false,
};

pub const LIGHT_TOKENS: ThemeTokens = ThemeTokens {
    backgrounds: [0.92, 0.96, 1.00],
    text: [0.15, 0.40],
    borders: [1.00, 0.60, 0.70],
    action: 0.40,
    alert: 0.50,
    full_chroma_text: true,
};

impl ThemeTokens {
    pub fn for_theme(is_light: bool) -> &'static ThemeTokens {
        if is_light {
            &LIGHT_TOKENS
        } else {
            &DARK_TOKENS
        }
    }
}

// NaN passes through both helpers, unlike f64::min / f64::max.
fn at_most(value: f64, cap: f64) -> f64 {
    if value > cap {
        cap
    } else {
        value
    }
}

fn at_least(value: f64, floor: f64) -> f64 {
    if value < floor {
        floor
    } else {
        value
    }
}

/// Chroma variants derived from the base chroma, rounded to 3 decimals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChromaScale {
    pub base: f64,
    pub background: f64,
    pub text: f64,
    pub action: f64,
    pub alert: f64,
}

impl ChromaScale {
    pub fn new(chroma: f64) -> Self {
        Self {
            base: round_to(chroma, 3),
            background: round_to(chroma * 0.5, 3),
            text: round_to(at_most(chroma, TEXT_CHROMA_CAP), 3),
            action: round_to(at_least(chroma, ACTION_CHROMA_FLOOR), 3),
            alert: round_to(at_least(chroma, ALERT_CHROMA_FLOOR), 3),
        }
    }
}

/// Generates the full palette for `config`, memoizing every color in `cache`.
///
/// Never fails. Inputs are not validated: out-of-range values produce a
/// deterministic (possibly out-of-gamut) palette, and NaN ends up in the
/// affected strings.
pub fn generate_palette(config: &ColorConfig, cache: &mut FifoCache<String>) -> ColorPalette {
    let hue = config.hue;
    let hue_secondary = normalize_hue(hue + SECONDARY_HUE_OFFSET);
    let hue_tertiary = normalize_hue(hue + TERTIARY_HUE_OFFSET);
    let chroma = ChromaScale::new(config.chroma);
    let tokens = ThemeTokens::for_theme(config.is_light);

    let text_chroma = if tokens.full_chroma_text {
        chroma.base
    } else {
        chroma.text
    };
    let [bg_dark, bg, bg_light] = tokens.backgrounds;
    let [text, text_muted] = tokens.text;
    let [highlight, border, border_muted] = tokens.borders;

    let mut color = |l: f64, c: f64, h: f64| cache.oklch(l, c, h);

    // same order as PaletteKey::ALL
    let colors = [
        color(bg_dark, chroma.background, hue),
        color(bg, chroma.background, hue),
        color(bg_light, chroma.background, hue),
        color(text, text_chroma, hue),
        color(text_muted, chroma.text, hue),
        color(highlight, chroma.background, hue),
        color(border, chroma.background, hue),
        color(border_muted, chroma.background, hue),
        color(tokens.action, chroma.action, hue),
        color(tokens.action, chroma.action, hue_secondary),
        color(tokens.action, chroma.action, hue_tertiary),
        color(tokens.alert, chroma.alert, DANGER_HUE),
        color(tokens.alert, chroma.alert, WARNING_HUE),
        color(tokens.alert, chroma.alert, SUCCESS_HUE),
        color(tokens.alert, chroma.alert, INFO_HUE),
    ];

    log::trace!(
        "generated palette for hue {hue}, chroma {}, light {}",
        config.chroma,
        config.is_light
    );
    ColorPalette::from_array(colors)
}

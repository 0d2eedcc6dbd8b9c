//! CSS custom properties for live theming.

use crate::color::Rgba;
use crate::convert::parse_rgba;
use crate::palette::{ColorPalette, PaletteKey};
use std::fmt::Write;

/// Palette colors that also get an `r, g, b` companion variable, for use in
/// `rgba(var(--x-rgb), alpha)` declarations.
pub const RGB_COMPANIONS: [PaletteKey; 4] = [
    PaletteKey::BgLight,
    PaletteKey::Bg,
    PaletteKey::Border,
    PaletteKey::Text,
];

/// Opacity of the card border.
pub const CARD_BORDER_ALPHA: f64 = 0.5;

const BLACK: Rgba = Rgba::new(0, 0, 0, 1.0);

/// Ordered list of `(name, value)` custom properties; names carry no `--`.
#[derive(Debug, Clone, PartialEq)]
pub struct CssVariables {
    entries: Vec<(String, String)>,
}

impl CssVariables {
    pub fn from_palette(palette: &ColorPalette) -> Self {
        let mut entries: Vec<(String, String)> = palette
            .iter()
            .map(|(key, value)| (key.as_str().to_string(), value.to_string()))
            .collect();

        // refined palettes may hold values we cannot parse; those render black
        let rgb = |key: PaletteKey| parse_rgba(palette.get(key)).unwrap_or(BLACK).triplet();
        for key in RGB_COMPANIONS {
            entries.push((format!("{key}-rgb"), rgb(key)));
        }
        entries.push((
            "card-border".to_string(),
            format!(
                "1px solid rgba({}, {CARD_BORDER_ALPHA})",
                rgb(PaletteKey::Border)
            ),
        ));
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders a rule such as `:root { --bg: ...; }`, one declaration per line.
    pub fn to_stylesheet(&self, selector: &str) -> String {
        let mut css = format!("{selector} {{\n");
        for (name, value) in self.iter() {
            let _ = writeln!(css, "  --{name}: {value};");
        }
        css.push_str("}\n");
        css
    }
}

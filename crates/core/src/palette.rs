//! The semantic palette: a fixed set of named OKLCH colors.
//!
//! Every palette holds exactly one color per [`PaletteKey`]. Key names are
//! shared with the stylesheets that consume the CSS variables, so they are a
//! contract and must not change.

use crate::color::Oklch;
use crate::error::StudioError;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Semantic slot in a palette, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PaletteKey {
    BgDark,
    Bg,
    BgLight,
    Text,
    TextMuted,
    Highlight,
    Border,
    BorderMuted,
    Primary,
    Secondary,
    Tertiary,
    Danger,
    Warning,
    Success,
    Info,
}

/// Grouping of palette keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Background,
    Text,
    Border,
    Action,
    Alert,
}

impl PaletteKey {
    /// Number of keys in every palette.
    pub const COUNT: usize = 15;

    /// All keys in presentation order.
    pub const ALL: [PaletteKey; PaletteKey::COUNT] = [
        PaletteKey::BgDark,
        PaletteKey::Bg,
        PaletteKey::BgLight,
        PaletteKey::Text,
        PaletteKey::TextMuted,
        PaletteKey::Highlight,
        PaletteKey::Border,
        PaletteKey::BorderMuted,
        PaletteKey::Primary,
        PaletteKey::Secondary,
        PaletteKey::Tertiary,
        PaletteKey::Danger,
        PaletteKey::Warning,
        PaletteKey::Success,
        PaletteKey::Info,
    ];

    /// The key's name as used in CSS variables and persisted records.
    pub fn as_str(self) -> &'static str {
        match self {
            PaletteKey::BgDark => "bg-dark",
            PaletteKey::Bg => "bg",
            PaletteKey::BgLight => "bg-light",
            PaletteKey::Text => "text",
            PaletteKey::TextMuted => "text-muted",
            PaletteKey::Highlight => "highlight",
            PaletteKey::Border => "border",
            PaletteKey::BorderMuted => "border-muted",
            PaletteKey::Primary => "primary",
            PaletteKey::Secondary => "secondary",
            PaletteKey::Tertiary => "tertiary",
            PaletteKey::Danger => "danger",
            PaletteKey::Warning => "warning",
            PaletteKey::Success => "success",
            PaletteKey::Info => "info",
        }
    }

    pub fn category(self) -> Category {
        match self {
            PaletteKey::BgDark | PaletteKey::Bg | PaletteKey::BgLight => Category::Background,
            PaletteKey::Text | PaletteKey::TextMuted => Category::Text,
            PaletteKey::Highlight | PaletteKey::Border | PaletteKey::BorderMuted => {
                Category::Border
            }
            PaletteKey::Primary | PaletteKey::Secondary | PaletteKey::Tertiary => Category::Action,
            PaletteKey::Danger | PaletteKey::Warning | PaletteKey::Success | PaletteKey::Info => {
                Category::Alert
            }
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for PaletteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaletteKey {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaletteKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| StudioError::UnknownPaletteKey(s.to_string()))
    }
}

/// A complete palette: one serialized OKLCH color per [`PaletteKey`].
///
/// There is no way to build a partial palette; every constructor either
/// fills all slots or fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorPalette {
    colors: [String; PaletteKey::COUNT],
}

impl ColorPalette {
    /// Builds a palette from one color per key, in [`PaletteKey::ALL`] order.
    pub fn from_array(colors: [String; PaletteKey::COUNT]) -> Self {
        Self { colors }
    }

    /// Builds a palette from `(name, value)` pairs.
    ///
    /// Fails on unknown names, repeated names, or missing keys. Entry order
    /// does not matter.
    pub fn from_entries<I, K, V>(entries: I) -> Result<Self, StudioError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut slots: [Option<String>; PaletteKey::COUNT] = Default::default();
        for (name, value) in entries {
            let key: PaletteKey = name.as_ref().parse()?;
            let slot = &mut slots[key.index()];
            if slot.is_some() {
                return Err(StudioError::InvalidPalette(format!("duplicate key {key}")));
            }
            *slot = Some(value.into());
        }

        let missing: Vec<&str> = PaletteKey::ALL
            .into_iter()
            .filter(|key| slots[key.index()].is_none())
            .map(PaletteKey::as_str)
            .collect();
        if !missing.is_empty() {
            return Err(StudioError::InvalidPalette(format!(
                "missing keys: {}",
                missing.join(", ")
            )));
        }

        Ok(Self {
            colors: slots.map(Option::unwrap_or_default),
        })
    }

    /// The serialized color for `key`.
    pub fn get(&self, key: PaletteKey) -> &str {
        &self.colors[key.index()]
    }

    /// The color for `key` as a structured value, if it parses.
    pub fn color(&self, key: PaletteKey) -> Option<Oklch> {
        self.get(key).parse().ok()
    }

    /// `(key, color)` pairs in presentation order.
    pub fn iter(&self) -> impl Iterator<Item = (PaletteKey, &str)> + '_ {
        PaletteKey::ALL
            .into_iter()
            .map(move |key| (key, self.get(key)))
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; a palette is never partial.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Serialize for ColorPalette {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key.as_str(), value)?;
        }
        map.end()
    }
}

struct PaletteVisitor;

impl<'de> Visitor<'de> for PaletteVisitor {
    type Value = ColorPalette;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of palette key names to colors")
    }

    // entries are collected in document order so repeated keys reach
    // from_entries instead of overwriting each other
    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut entries: Vec<(String, String)> =
            Vec::with_capacity(map.size_hint().unwrap_or(PaletteKey::COUNT));
        while let Some(entry) = map.next_entry::<String, String>()? {
            entries.push(entry);
        }
        ColorPalette::from_entries(entries).map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for ColorPalette {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(PaletteVisitor)
    }
}

//! Persisted palette records.
//!
//! A [`SavedPalette`] captures everything needed to restore a palette in the
//! editor: its name, the slider configuration it was generated from, and the
//! (possibly hand-refined) color of every key.

use crate::config::ColorConfig;
use crate::error::StudioError;
use crate::palette::ColorPalette;
use serde::{Deserialize, Serialize};

/// One `{name, value}` pair of a saved palette.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaletteEntry {
    pub name: String,
    pub value: String,
}

/// A named palette as stored in a project.
///
/// Colors are kept as an ordered list so that the persisted form reads in
/// presentation order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavedPalette {
    pub name: String,
    pub config: ColorConfig,
    pub colors: Vec<PaletteEntry>,
}

impl SavedPalette {
    pub fn new(name: &str, config: ColorConfig, palette: &ColorPalette) -> Self {
        Self {
            name: name.to_string(),
            config,
            colors: palette
                .iter()
                .map(|(key, value)| PaletteEntry {
                    name: key.as_str().to_string(),
                    value: value.to_string(),
                })
                .collect(),
        }
    }

    /// Checks that the record has a name and a complete set of colors.
    pub fn validate(&self) -> Result<(), StudioError> {
        if self.name.trim().is_empty() {
            return Err(StudioError::InvalidPalette(
                "palette name must not be empty".to_string(),
            ));
        }
        self.palette().map(|_| ())
    }

    /// Rebuilds the palette from the stored entries.
    pub fn palette(&self) -> Result<ColorPalette, StudioError> {
        ColorPalette::from_entries(
            self.colors
                .iter()
                .map(|entry| (entry.name.as_str(), entry.value.as_str())),
        )
    }
}

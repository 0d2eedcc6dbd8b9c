#![deny(unsafe_code)]
//! Core of the tonekit OKLCH palette engine.
//!
//! Derives a semantic 15-color palette from `(hue, chroma, isLight)`,
//! converts colors between OKLCH, hex, RGBA and HSL, builds slider
//! gradients, and memoizes all of it in bounded FIFO caches owned by a
//! [`Studio`].

pub mod cache;
pub mod color;
pub mod config;
pub mod convert;
pub mod css;
pub mod error;
pub mod generator;
pub mod gradient;
pub mod palette;
pub mod params;
pub mod record;
pub mod studio;

pub use cache::{CacheKey, FifoCache};
pub use color::{Hsl, Oklch, Rgba};
pub use config::ColorConfig;
pub use convert::{convert, oklch_from_hex, parse_oklch, to_hex, to_hsl, to_rgba, ColorFormat};
pub use css::CssVariables;
pub use error::StudioError;
pub use generator::generate_palette;
pub use gradient::{chroma_gradient, hue_gradient};
pub use palette::{Category, ColorPalette, PaletteKey};
pub use record::{PaletteEntry, SavedPalette};
pub use studio::Studio;

//! The composition root: one color cache and one gradient cache, shared by
//! every palette and gradient built through it.
//!
//! Every builder takes `&mut self`; wrap the studio in a `Mutex` to share it
//! across threads.

use crate::cache::{FifoCache, COLOR_CACHE_CAPACITY, GRADIENT_CACHE_CAPACITY};
use crate::config::ColorConfig;
use crate::generator;
use crate::gradient;
use crate::palette::ColorPalette;

#[derive(Debug, Clone)]
pub struct Studio {
    colors: FifoCache<String>,
    gradients: FifoCache<String>,
}

impl Default for Studio {
    fn default() -> Self {
        Self::new()
    }
}

impl Studio {
    /// A studio with the standard cache capacities (1000 colors, 100 gradients).
    pub fn new() -> Self {
        Self::with_capacity(COLOR_CACHE_CAPACITY, GRADIENT_CACHE_CAPACITY)
    }

    pub fn with_capacity(colors: usize, gradients: usize) -> Self {
        Self {
            colors: FifoCache::new(colors),
            gradients: FifoCache::new(gradients),
        }
    }

    /// A studio that recomputes everything. Output is identical to [`Studio::new`].
    pub fn uncached() -> Self {
        Self::with_capacity(0, 0)
    }

    pub fn generate_palette(&mut self, config: &ColorConfig) -> ColorPalette {
        generator::generate_palette(config, &mut self.colors)
    }

    pub fn hue_gradient(&mut self, chroma: f64, lightness: f64) -> String {
        gradient::hue_gradient(chroma, lightness, &mut self.colors, &mut self.gradients)
    }

    pub fn chroma_gradient(&mut self, hue: f64, lightness: f64) -> String {
        gradient::chroma_gradient(hue, lightness, &mut self.colors, &mut self.gradients)
    }

    pub fn color_cache(&self) -> &FifoCache<String> {
        &self.colors
    }

    pub fn gradient_cache(&self) -> &FifoCache<String> {
        &self.gradients
    }
}

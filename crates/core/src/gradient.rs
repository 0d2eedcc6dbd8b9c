//! CSS `linear-gradient` backgrounds for the hue and chroma sliders.
//!
//! Samples go through the same color path as the palette generator, so a
//! color already produced for a palette is reused by the gradient and vice
//! versa. Finished gradient strings get their own, smaller cache.

use crate::cache::{CacheKey, FifoCache};
use crate::config::MAX_CHROMA;

/// Intervals along the hue axis (33 samples, 0 through 360 inclusive).
pub const HUE_GRADIENT_STEPS: usize = 32;
/// Intervals along the chroma axis (21 samples, 0 through 0.4 inclusive).
pub const CHROMA_GRADIENT_STEPS: usize = 20;

const HUE_RANGE: f64 = 360.0;

fn linear_gradient<I: IntoIterator<Item = String>>(stops: I) -> String {
    let stops: Vec<String> = stops.into_iter().collect();
    format!("linear-gradient(to right, {})", stops.join(", "))
}

/// Gradient across all hues at fixed `chroma` and `lightness`.
pub fn hue_gradient(
    chroma: f64,
    lightness: f64,
    colors: &mut FifoCache<String>,
    gradients: &mut FifoCache<String>,
) -> String {
    let key = CacheKey::gradient("hue", lightness, chroma, 3);
    gradients.get_or_insert_with(key, || {
        log::trace!("building hue gradient at l={lightness}, c={chroma}");
        linear_gradient((0..=HUE_GRADIENT_STEPS).map(|i| {
            let hue = i as f64 * HUE_RANGE / HUE_GRADIENT_STEPS as f64;
            colors.oklch(lightness, chroma, hue)
        }))
    })
}

/// Gradient from gray to maximum slider chroma at fixed `hue` and `lightness`.
pub fn chroma_gradient(
    hue: f64,
    lightness: f64,
    colors: &mut FifoCache<String>,
    gradients: &mut FifoCache<String>,
) -> String {
    let key = CacheKey::gradient("chroma", lightness, hue, 1);
    gradients.get_or_insert_with(key, || {
        log::trace!("building chroma gradient at l={lightness}, h={hue}");
        linear_gradient((0..=CHROMA_GRADIENT_STEPS).map(|i| {
            let chroma = i as f64 * MAX_CHROMA / CHROMA_GRADIENT_STEPS as f64;
            colors.oklch(lightness, chroma, hue)
        }))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{COLOR_CACHE_CAPACITY, GRADIENT_CACHE_CAPACITY};
    use crate::color::Oklch;

    fn caches() -> (FifoCache<String>, FifoCache<String>) {
        (
            FifoCache::new(COLOR_CACHE_CAPACITY),
            FifoCache::new(GRADIENT_CACHE_CAPACITY),
        )
    }

    fn stops(gradient: &str) -> Vec<Oklch> {
        let inner = gradient
            .strip_prefix("linear-gradient(to right, ")
            .and_then(|s| s.strip_suffix(')'))
            .unwrap();
        // colors contain ", " nowhere, so splitting on it is safe
        inner.split(", ").map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn hue_gradient_has_33_stops_across_the_circle() {
        let (mut colors, mut gradients) = caches();
        let gradient = hue_gradient(0.15, 0.7, &mut colors, &mut gradients);
        assert!(gradient.starts_with("linear-gradient(to right, oklch(70% 0.15 0), "));
        assert!(gradient.ends_with(", oklch(70% 0.15 360))"), "{gradient}");

        let stops = stops(&gradient);
        assert_eq!(stops.len(), HUE_GRADIENT_STEPS + 1);
        assert!((stops[1].h - 11.3).abs() < 1e-9);
        assert!((stops[16].h - 180.0).abs() < 1e-9);
        assert!(stops.iter().all(|s| (s.c - 0.15).abs() < 1e-9));
    }

    #[test]
    fn chroma_gradient_has_21_stops_up_to_max_chroma() {
        let (mut colors, mut gradients) = caches();
        let gradient = chroma_gradient(265.0, 0.7, &mut colors, &mut gradients);
        assert!(gradient.starts_with("linear-gradient(to right, oklch(70% 0 265), "));
        assert!(gradient.ends_with(", oklch(70% 0.4 265))"), "{gradient}");

        let stops = stops(&gradient);
        assert_eq!(stops.len(), CHROMA_GRADIENT_STEPS + 1);
        assert!((stops[3].c - 0.06).abs() < 1e-9);
        assert!(stops.iter().all(|s| (s.h - 265.0).abs() < 1e-9));
    }

    #[test]
    fn gradients_are_cached_by_kind_and_parameters() {
        let (mut colors, mut gradients) = caches();
        let first = hue_gradient(0.1, 0.5, &mut colors, &mut gradients);
        let again = hue_gradient(0.10004, 0.5, &mut colors, &mut gradients);
        assert_eq!(first, again);
        assert_eq!(gradients.len(), 1);

        // same fixed value, different kind
        chroma_gradient(0.1, 0.5, &mut colors, &mut gradients);
        assert_eq!(gradients.len(), 2);
    }

    #[test]
    fn samples_share_the_color_cache() {
        let (mut colors, mut gradients) = caches();
        hue_gradient(0.1, 0.5, &mut colors, &mut gradients);
        assert_eq!(colors.len(), HUE_GRADIENT_STEPS + 1);
        assert!(colors.contains(&CacheKey::color(0.5, 0.1, 0.0)));

        // the chroma gradient at hue 0 revisits the 0.1 stop, already stored
        chroma_gradient(0.0, 0.5, &mut colors, &mut gradients);
        assert_eq!(colors.len(), HUE_GRADIENT_STEPS + 1 + CHROMA_GRADIENT_STEPS);
    }

    #[test]
    fn caching_is_transparent() {
        let (mut colors, mut gradients) = caches();
        let (mut no_colors, mut no_gradients) = (FifoCache::disabled(), FifoCache::disabled());
        for (c, l) in [(0.0, 0.5), (0.2, 0.76), (0.4, 0.1)] {
            let warm = hue_gradient(c, l, &mut colors, &mut gradients);
            let hit = hue_gradient(c, l, &mut colors, &mut gradients);
            let cold = hue_gradient(c, l, &mut no_colors, &mut no_gradients);
            assert_eq!(warm, hit);
            assert_eq!(warm, cold);
        }
        assert!(no_colors.is_empty() && no_gradients.is_empty());
    }

    #[test]
    fn gradient_cache_evicts_past_capacity() {
        let (mut colors, mut gradients) = caches();
        for i in 0..=GRADIENT_CACHE_CAPACITY {
            chroma_gradient(i as f64, 0.5, &mut colors, &mut gradients);
        }
        assert_eq!(gradients.len(), GRADIENT_CACHE_CAPACITY);
        assert!(!gradients.contains(&CacheKey::gradient("chroma", 0.5, 0.0, 1)));
    }
}

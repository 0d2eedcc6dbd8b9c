//! Bounded FIFO memoization for color and gradient strings.
//!
//! Keys are built from quantized components (`l` and `c` to 3 decimals, `h`
//! to 1) so slider jitter lands on the same entry. Once a cache is full the
//! oldest inserted entry is evicted, regardless of how recently it was read.
//! A cache is a pure cost optimization: bypassing it never changes a result.

use crate::color::{round_to, Oklch};
use std::collections::{HashMap, VecDeque};
use std::fmt;

/// Capacity of the color cache.
pub const COLOR_CACHE_CAPACITY: usize = 1000;

/// Capacity of the gradient cache. Gradients hold 21-33 samples each, so
/// far fewer are kept.
pub const GRADIENT_CACHE_CAPACITY: usize = 100;

/// Quantized cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Key for a single color: `l|c|h` at 3, 3 and 1 decimals.
    pub fn color(l: f64, c: f64, h: f64) -> Self {
        CacheKey(format!(
            "{:.3}|{:.3}|{:.1}",
            round_to(l, 3),
            round_to(c, 3),
            round_to(h, 1)
        ))
    }

    /// Key for a gradient: the gradient kind followed by its quantized
    /// fixed parameters.
    pub fn gradient(kind: &str, lightness: f64, fixed: f64, fixed_places: i32) -> Self {
        CacheKey(format!(
            "{kind}|{:.3}|{:.*}",
            round_to(lightness, 3),
            fixed_places as usize,
            round_to(fixed, fixed_places)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key-value cache with insertion-order (FIFO) eviction.
///
/// A capacity of zero disables storage: every lookup recomputes.
#[derive(Debug, Clone)]
pub struct FifoCache<V> {
    capacity: usize,
    entries: HashMap<CacheKey, V>,
    order: VecDeque<CacheKey>,
}

impl<V: Clone> FifoCache<V> {
    /// Creates an empty cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
        }
    }

    /// Creates a pass-through cache that never stores anything.
    pub fn disabled() -> Self {
        Self::new(0)
    }

    /// Returns the cached value for `key`, computing and storing it on a miss.
    pub fn get_or_insert_with<F>(&mut self, key: CacheKey, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        if let Some(value) = self.entries.get(&key) {
            return value.clone();
        }
        let value = compute();
        if self.capacity == 0 {
            return value;
        }
        if self.entries.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                log::debug!("cache full ({}), evicting {oldest}", self.capacity);
                self.entries.remove(&oldest);
            }
        }
        self.order.push_back(key.clone());
        self.entries.insert(key, value.clone());
        value
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl FifoCache<String> {
    /// The color path shared by the palette generator and the gradient
    /// builder: the serialized OKLCH string for `(l, c, h)`, memoized.
    pub fn oklch(&mut self, l: f64, c: f64, h: f64) -> String {
        self.get_or_insert_with(CacheKey::color(l, c, h), || {
            Oklch::new(l, c, h).to_string()
        })
    }
}

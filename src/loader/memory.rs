// SPDX-License-Identifier: MPL-2.0
//! In-memory cache of decoded images.
//!
//! - **LRU eviction**: Least recently used images are evicted first
//! - **Memory-bounded**: Total decoded size limited by a byte budget
//! - **Locator-keyed**: Images indexed by the exact locator string

use crate::media::ImageData;
use lru::LruCache;
use std::num::NonZeroUsize;

/// Statistics about memory cache performance.
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheStats {
    /// Number of images currently in cache.
    pub image_count: usize,

    /// Total bytes currently used by cached images.
    pub total_bytes: usize,

    pub hits: u64,

    pub misses: u64,

    /// Number of images evicted due to limits.
    pub evictions: u64,

    pub insertions: u64,
}

impl CacheStats {
    /// Returns the cache hit rate as a percentage (0.0 - 100.0).
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

pub struct MemoryCache {
    cache: LruCache<String, ImageData>,
    max_bytes: usize,
    current_bytes: usize,
    stats: CacheStats,
}

impl MemoryCache {
    #[must_use]
    pub fn new(max_entries: usize, max_bytes: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(capacity),
            max_bytes,
            current_bytes: 0,
            stats: CacheStats::default(),
        }
    }

    /// Inserts an image into the cache.
    ///
    /// Returns `false` if the image is larger than half the byte budget.
    pub fn insert(&mut self, locator: String, image: ImageData) -> bool {
        let image_size = image.byte_size();

        if image_size > self.max_bytes / 2 {
            return false;
        }

        if let Some(existing) = self.cache.pop(&locator) {
            self.current_bytes = self.current_bytes.saturating_sub(existing.byte_size());
        }

        while self.current_bytes + image_size > self.max_bytes && !self.cache.is_empty() {
            if let Some((_, evicted)) = self.cache.pop_lru() {
                self.current_bytes = self.current_bytes.saturating_sub(evicted.byte_size());
                self.stats.evictions += 1;
            }
        }

        // A full cache hands back the entry it pushed out.
        if let Some((_, evicted)) = self.cache.push(locator, image) {
            self.current_bytes = self.current_bytes.saturating_sub(evicted.byte_size());
            self.stats.evictions += 1;
        }

        self.current_bytes += image_size;
        self.stats.insertions += 1;
        self.stats.image_count = self.cache.len();
        self.stats.total_bytes = self.current_bytes;

        true
    }

    /// Gets an image by locator, updating LRU order.
    pub fn get(&mut self, locator: &str) -> Option<ImageData> {
        if let Some(image) = self.cache.get(locator) {
            self.stats.hits += 1;
            Some(image.clone())
        } else {
            self.stats.misses += 1;
            None
        }
    }

    pub fn clear(&mut self) {
        self.cache.clear();
        self.current_bytes = 0;
        self.stats.image_count = 0;
        self.stats.total_bytes = 0;
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    #[must_use]
    pub fn memory_usage(&self) -> usize {
        self.current_bytes
    }
}

impl std::fmt::Debug for MemoryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCache")
            .field("image_count", &self.cache.len())
            .field("memory_usage", &self.current_bytes)
            .field("max_bytes", &self.max_bytes)
            .field("stats", &self.stats)
            .finish()
    }
}

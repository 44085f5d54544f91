//! Cache Configuration Module
//!
//! Configuration structures for the cache engine and its sharded wrapper.
//! Like the rest of the crate, the structs have public fields so they can be
//! built with a literal:
//!
//! - **Simple**: Just create the struct with all fields set
//! - **Type safety**: All parameters must be provided at construction
//!
//! # Sizing Guidelines
//!
//! `max_size` is the byte budget for cached data, where every entry is charged
//! `key.len() + value.len()`. Bookkeeping overhead (slot links, index buckets)
//! comes on top of the budget:
//!
//! ```text
//! Total Memory ≈ max_size + (entries × overhead_per_entry)
//! overhead_per_entry ≈ 48-64 bytes (slot, links, index bucket)
//! ```
//!
//! An entry larger than `max_size` can never be stored. With the concurrent
//! wrapper the budget is split evenly across segments, so the largest storable
//! entry is `max_size / segments`.
//!
//! # Examples
//!
//! ```
//! use lru_kv::config::LruCacheConfig;
//! use lru_kv::LruCache;
//!
//! // 64MB budget for keys and values
//! let config = LruCacheConfig {
//!     max_size: 64 * 1024 * 1024,
//! };
//! let cache = LruCache::init(config, None);
//! assert_eq!(cache.max_size(), 64 * 1024 * 1024);
//! ```
//!
//! With the `serde` feature both structs can be loaded from a configuration
//! file of the embedding service.

use core::fmt;

/// Default byte budget used by [`LruCacheConfig::default`]: 1MB.
pub const DEFAULT_MAX_SIZE: usize = 1024 * 1024;

/// Configuration for an [`LruCache`](crate::LruCache).
///
/// # Fields
///
/// - `max_size`: Maximum total of `key.len() + value.len()` over all entries.
///   Fixed for the lifetime of the cache. Zero is allowed and admits only
///   entries with an empty key and an empty value.
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LruCacheConfig {
    /// Maximum number of bytes (keys plus values) the cache may hold.
    pub max_size: usize,
}

impl LruCacheConfig {
    /// Creates a config with the given byte budget.
    pub const fn new(max_size: usize) -> Self {
        Self { max_size }
    }
}

impl Default for LruCacheConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SIZE)
    }
}

impl fmt::Debug for LruCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCacheConfig")
            .field("max_size", &self.max_size)
            .finish()
    }
}

/// Generic configuration wrapper for concurrent caches.
///
/// Wraps the base cache configuration and adds the `segments` field
/// controlling how many independently locked engines the key space is
/// sharded across.
///
/// # Example
///
/// ```ignore
/// use lru_kv::config::{ConcurrentCacheConfig, ConcurrentLruCacheConfig, LruCacheConfig};
///
/// let config: ConcurrentLruCacheConfig = ConcurrentCacheConfig {
///     base: LruCacheConfig { max_size: 16 * 1024 * 1024 },
///     segments: 16,
/// };
/// ```
#[cfg(feature = "concurrent")]
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConcurrentCacheConfig<C> {
    /// Base configuration; its budget is split evenly across segments.
    pub base: C,
    /// Number of segments for sharding (more segments = less contention).
    /// Zero is treated as one.
    pub segments: usize,
}

#[cfg(feature = "concurrent")]
impl<C: fmt::Debug> fmt::Debug for ConcurrentCacheConfig<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcurrentCacheConfig")
            .field("base", &self.base)
            .field("segments", &self.segments)
            .finish()
    }
}

#[cfg(feature = "concurrent")]
/// Configuration for a concurrent LRU cache.
/// Type alias for `ConcurrentCacheConfig<LruCacheConfig>`.
pub type ConcurrentLruCacheConfig = ConcurrentCacheConfig<LruCacheConfig>;

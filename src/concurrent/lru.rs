//! Concurrent LRU Cache Implementation
//!
//! A thread-safe, lock-striped wrapper around [`LruCache`](crate::LruCache).
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                      ConcurrentLruCache                              │
//! │                                                                      │
//! │  hash(key) % N  ──▶  Segment Selection                               │
//! │                                                                      │
//! │  ┌──────────────┐ ┌──────────────┐     ┌──────────────┐              │
//! │  │  Segment 0   │ │  Segment 1   │ ... │  Segment N-1 │              │
//! │  │  ┌────────┐  │ │  ┌────────┐  │     │  ┌────────┐  │              │
//! │  │  │ Mutex  │  │ │  │ Mutex  │  │     │  │ Mutex  │  │              │
//! │  │  └────┬───┘  │ │  └────┬───┘  │     │  └────┬───┘  │              │
//! │  │  ┌────▼───┐  │ │  ┌────▼───┐  │     │  ┌────▼───┐  │              │
//! │  │  │LruCache│  │ │  │LruCache│  │     │  │LruCache│  │              │
//! │  │  └────────┘  │ │  └────────┘  │     │  └────────┘  │              │
//! │  └──────────────┘ └──────────────┘     └──────────────┘              │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Trade-offs
//!
//! - **Pros**: Near-linear scaling with thread count, no global lock
//! - **Cons**: LRU ordering and the byte budget are per-segment. An entry may
//!   be evicted from one segment while another segment holds older entries.
//!
//! # When to Use
//!
//! **Use ConcurrentLruCache when:**
//! - Multiple threads need cache access
//! - You need better throughput than `Mutex<LruCache>`
//!
//! **Consider alternatives when:**
//! - Single-threaded access only → use `LruCache`
//! - Need strict global LRU ordering or one global budget → use `Mutex<LruCache>`

extern crate alloc;

use crate::config::ConcurrentLruCacheConfig;
use crate::error::Result;
use crate::lru::LruCache;
use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::hash::BuildHasher;
use hashbrown::DefaultHashBuilder;
use parking_lot::Mutex;
use tracing::debug;

/// A thread-safe LRU cache with segmented storage for high concurrency.
///
/// Keys are partitioned across segments using hash-based sharding. Each
/// segment is an independent [`LruCache`] with its own lock and an equal share
/// of the byte budget.
///
/// # Example
///
/// ```rust,ignore
/// use lru_kv::concurrent::ConcurrentLruCache;
///
/// let cache = ConcurrentLruCache::new(1024);
/// cache.put(b"key", b"value").unwrap();
/// assert_eq!(cache.get(b"key"), Some(b"value".to_vec()));
/// ```
pub struct ConcurrentLruCache<S = DefaultHashBuilder> {
    segments: Box<[Mutex<LruCache<S>>]>,
    hash_builder: S,
}

impl ConcurrentLruCache<DefaultHashBuilder> {
    /// Creates a concurrent cache with a total budget of `max_size` bytes and
    /// the default segment count.
    pub fn new(max_size: usize) -> Self {
        Self::with_segments(max_size, super::default_segment_count())
    }

    /// Creates a concurrent cache with an explicit segment count.
    pub fn with_segments(max_size: usize, segments: usize) -> Self {
        Self::init_with_hasher(
            ConcurrentLruCacheConfig {
                base: crate::config::LruCacheConfig::new(max_size),
                segments,
            },
            DefaultHashBuilder::default(),
        )
    }

    /// Creates a concurrent cache from a configuration with an optional hasher.
    ///
    /// # Arguments
    ///
    /// * `config` - Total budget and number of segments
    /// * `hasher` - Optional hash builder. If `None`, uses `DefaultHashBuilder`
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use lru_kv::concurrent::ConcurrentLruCache;
    /// use lru_kv::config::{ConcurrentCacheConfig, ConcurrentLruCacheConfig, LruCacheConfig};
    ///
    /// let config: ConcurrentLruCacheConfig = ConcurrentCacheConfig {
    ///     base: LruCacheConfig { max_size: 100 * 1024 * 1024 },
    ///     segments: 32,
    /// };
    /// let cache = ConcurrentLruCache::init(config, None);
    /// ```
    pub fn init(config: ConcurrentLruCacheConfig, hasher: Option<DefaultHashBuilder>) -> Self {
        Self::init_with_hasher(config, hasher.unwrap_or_default())
    }
}

impl<S> ConcurrentLruCache<S>
where
    S: BuildHasher + Clone,
{
    /// Creates a concurrent cache with a custom hash builder.
    ///
    /// The hash builder routes keys to segments and is cloned into every
    /// segment for its key index. A segment count of zero is treated as one.
    pub fn init_with_hasher(config: ConcurrentLruCacheConfig, hash_builder: S) -> Self {
        let segment_count = config.segments.max(1);
        let segment_max_size = config.base.max_size / segment_count;

        debug!(
            segments = segment_count,
            segment_max_size, "creating concurrent lru cache"
        );

        let segments: Vec<_> = (0..segment_count)
            .map(|_| Mutex::new(LruCache::with_hasher(segment_max_size, hash_builder.clone())))
            .collect();

        Self {
            segments: segments.into_boxed_slice(),
            hash_builder,
        }
    }

    /// Returns the segment responsible for `key`.
    #[inline]
    fn segment(&self, key: &[u8]) -> &Mutex<LruCache<S>> {
        let idx = (self.hash_builder.hash_one(key) as usize) % self.segments.len();
        &self.segments[idx]
    }

    /// Returns the number of segments in the cache.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Returns the total number of entries across all segments.
    ///
    /// Note: This acquires a lock on each segment sequentially, so the
    /// returned value may be slightly stale in high-concurrency scenarios.
    pub fn len(&self) -> usize {
        self.segments.iter().map(|s| s.lock().len()).sum()
    }

    /// Returns `true` if the cache contains no entries.
    pub fn is_empty(&self) -> bool {
        self.segments.iter().all(|s| s.lock().is_empty())
    }

    /// Returns the total byte budget across all segments.
    ///
    /// This can be slightly below the configured budget when it does not
    /// divide evenly by the segment count.
    pub fn max_size(&self) -> usize {
        self.segments.iter().map(|s| s.lock().max_size()).sum()
    }

    /// Returns the current size summed over all segments.
    pub fn current_size(&self) -> usize {
        self.segments.iter().map(|s| s.lock().current_size()).sum()
    }

    /// Retrieves a copy of the value and marks it most recently used within
    /// its segment.
    ///
    /// Returns an owned copy so the lock is not held by the caller. Use
    /// [`get_with()`](Self::get_with) to read in place.
    pub fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.segment(key).lock().get(key).map(<[u8]>::to_vec)
    }

    /// Retrieves a value and applies `f` to it while holding the segment lock.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let len = cache.get_with(b"key", |value| value.len());
    /// ```
    pub fn get_with<F, R>(&self, key: &[u8], f: F) -> Option<R>
    where
        F: FnOnce(&[u8]) -> R,
    {
        self.segment(key).lock().get(key).map(f)
    }

    /// Returns `true` if `key` is cached. Does not touch the recency order.
    pub fn contains(&self, key: &[u8]) -> bool {
        self.segment(key).lock().contains(key)
    }

    /// Inserts or updates `key` in its segment. See [`LruCache::put`].
    pub fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.segment(key).lock().put(key, value)
    }

    /// Inserts `key` only if absent. See [`LruCache::put_if_absent`].
    pub fn put_if_absent(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.segment(key).lock().put_if_absent(key, value)
    }

    /// Replaces the value of a cached key. See [`LruCache::set`].
    pub fn set(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.segment(key).lock().set(key, value)
    }

    /// Removes `key`, returning `true` if it was cached.
    pub fn delete(&self, key: &[u8]) -> bool {
        self.segment(key).lock().delete(key)
    }

    /// Removes all entries from all segments.
    ///
    /// Acquires locks on each segment sequentially.
    pub fn clear(&self) {
        for segment in self.segments.iter() {
            segment.lock().clear();
        }
    }
}

impl<S> fmt::Debug for ConcurrentLruCache<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcurrentLruCache")
            .field("segment_count", &self.segments.len())
            .finish()
    }
}

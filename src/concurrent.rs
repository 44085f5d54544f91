//! Concurrent Cache Implementation
//!
//! The engine itself never locks. This module provides the collaborator that
//! makes it shareable: a lock-striped wrapper using the Shared Segment Pattern.
//!
//! # Architecture
//!
//! - The key space is partitioned across multiple segments using hash-based sharding
//! - Each segment is one [`LruCache`](crate::LruCache) behind its own `parking_lot::Mutex`
//! - Every operation locks exactly one segment for exactly one engine call
//!
//! ## Why Mutex Instead of RwLock?
//!
//! Every `get()` moves the entry to the head of its segment's recency list, so
//! a read is a write. An `RwLock` would hand out exclusive locks for all calls
//! anyway, with more bookkeeping than a `Mutex`.
//!
//! Concurrency comes from **segmentation** instead: different keys can be
//! accessed in parallel as long as they hash to different segments.
//!
//! # Budget Split
//!
//! The configured `max_size` is divided evenly across segments, so the largest
//! storable entry is `max_size / segments` bytes and LRU order is per segment.
//!
//! # Example
//!
//! ```rust,ignore
//! use lru_kv::concurrent::ConcurrentLruCache;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let cache = Arc::new(ConcurrentLruCache::new(1024 * 1024));
//!
//! let handles: Vec<_> = (0..4).map(|t| {
//!     let cache = Arc::clone(&cache);
//!     thread::spawn(move || {
//!         for i in 0..1000 {
//!             let key = format!("key_{}_{}", t, i);
//!             cache.put(key.as_bytes(), b"value").unwrap();
//!             let _ = cache.get(key.as_bytes());
//!         }
//!     })
//! }).collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! ```

mod lru;

pub use self::lru::ConcurrentLruCache;

/// Returns the default number of segments.
///
/// A fixed 16 works well across typical core counts without pulling in a CPU
/// detection dependency.
#[inline]
pub fn default_segment_count() -> usize {
    16
}

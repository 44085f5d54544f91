#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Engine Layout
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                           LruCache                                    │
//! │                                                                       │
//! │   KeyIndex (HashTable<Handle>)         List (slot arena)              │
//! │   ┌───────────────────────┐            ┌───────────────────────────┐  │
//! │   │ hash(key) ─▶ Handle ──┼──────────▶ │ head ⇄ ... ⇄ ... ⇄ tail   │  │
//! │   └───────────────────────┘            │ MRU                 LRU   │  │
//! │                                        └───────────────────────────┘  │
//! │   current_size = Σ key.len() + value.len()  ≤  max_size               │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The index stores only handles into the list; key bytes live once, in the
//! list entry. Eviction always pops the tail.
//!
//! ## Quick Reference
//!
//! | Operation | Cost | Touches recency |
//! |-----------|------|-----------------|
//! | [`LruCache::get`] | O(1) | Yes |
//! | [`LruCache::peek`] / [`LruCache::contains`] | O(1) | No |
//! | [`LruCache::put`] / [`LruCache::put_if_absent`] / [`LruCache::set`] | O(1) amortized + evictions | Yes |
//! | [`LruCache::delete`] | O(1) | N/A |
//!
//! ## Example
//!
//! ```rust
//! use lru_kv::{CacheError, LruCache};
//!
//! // Budget covers keys and values: "a"+"1" and "b"+"1" fill it exactly.
//! let mut cache = LruCache::new(4);
//! cache.put(b"a", b"1").unwrap();
//! cache.put(b"b", b"1").unwrap();
//!
//! cache.get(b"a");                 // "a" becomes most recently used
//! cache.put(b"c", b"1").unwrap();  // "b" evicted (least recently used)
//! assert!(!cache.contains(b"b"));
//!
//! assert_eq!(
//!     cache.put(b"huge", b"value"),
//!     Err(CacheError::EntryTooLarge { size: 9, max_size: 4 })
//! );
//! ```
//!
//! ## Concurrent Cache
//!
//! Enable the `concurrent` feature for a lock-striped, thread-safe version:
//!
//! ```toml
//! [dependencies]
//! lru-kv = { version = "0.1", features = ["concurrent"] }
//! ```
//!
//! ## Modules
//!
//! - [`lru`]: The byte-budgeted LRU engine
//! - [`config`]: Configuration structures
//! - [`error`]: Error type returned by write operations
//! - `concurrent`: Thread-safe segmented cache (requires `concurrent` feature)

#![no_std]

extern crate alloc;

/// Owned key/value pair together with its charged size.
pub(crate) mod entry;

/// Arena-backed doubly linked recency list.
///
/// Nodes live in a slot vector and link to each other by index. Handles carry
/// a generation so a stale handle can never reach a recycled slot.
pub(crate) mod list;

/// Hash index from key bytes to list handles.
pub(crate) mod index;

/// Cache configuration structures.
pub mod config;

/// Error type for rejected writes.
pub mod error;

/// Least Recently Used (LRU) cache implementation.
///
/// Provides a cache bounded by total key plus value bytes that evicts the
/// least recently used entries to make room.
pub mod lru;

/// Concurrent cache implementation.
///
/// Partitions the key space across multiple segments, each protected by its
/// own lock.
///
/// Available when the `concurrent` feature is enabled.
#[cfg(feature = "concurrent")]
pub mod concurrent;

pub use error::{CacheError, Result};
pub use lru::LruCache;

#[cfg(feature = "concurrent")]
pub use concurrent::ConcurrentLruCache;

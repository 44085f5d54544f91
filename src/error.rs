//! Error types for cache writes.
//!
//! Only writes can fail. Reads report a miss as `None` and deletes report one
//! as `false`, so neither needs an error value.

use thiserror::Error;

/// Why a write was refused.
///
/// Every variant is returned before the cache is touched: a failed call leaves
/// the entries, their recency order and the size accounting exactly as they
/// were.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum CacheError {
    /// The key and value together exceed the cache's whole budget.
    #[error("entry of {size} bytes exceeds cache budget of {max_size} bytes")]
    EntryTooLarge {
        /// `key.len() + value.len()` of the rejected entry.
        size: usize,
        /// The cache's `max_size`.
        max_size: usize,
    },

    /// `set` was called for a key that is not cached.
    #[error("key not found")]
    NotFound,

    /// `put_if_absent` was called for a key that is already cached.
    #[error("key already exists")]
    AlreadyExists,
}

/// Convenience Result type for cache writes.
pub type Result<T> = core::result::Result<T, CacheError>;

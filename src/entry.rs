//! Cache Entry Type
//!
//! An [`Entry`] is one cached key/value pair. Keys and values are opaque byte
//! sequences; the cache makes no character-encoding assumptions about either.
//!
//! # Size Accounting
//!
//! Every entry is charged `key.len() + value.len()` bytes against the cache
//! budget. The size is derived, never supplied by the caller, and is recomputed
//! whenever the value is replaced.
//!
//! # Memory Layout
//!
//! - `key: Box<[u8]>` - immutable after insertion, so no spare capacity is kept
//! - `value: Vec<u8>` - overwritten in place on update
//! - `size: usize` - cached `key.len() + value.len()`
//!
//! List linkage lives beside the entry in the recency list's slot arena, not in
//! the entry itself.

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

/// One cached key/value pair.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct Entry {
    key: Box<[u8]>,
    value: Vec<u8>,
    size: usize,
}

impl Entry {
    /// Creates an entry by copying `key` and `value`.
    #[inline]
    pub(crate) fn new(key: &[u8], value: &[u8]) -> Self {
        Self {
            key: key.into(),
            value: value.to_vec(),
            size: Self::size_of(key, value),
        }
    }

    /// Returns the number of bytes an entry with this key and value would be
    /// charged against the cache budget.
    ///
    /// Saturates at `usize::MAX`, which no budget can accept.
    #[inline]
    pub(crate) fn size_of(key: &[u8], value: &[u8]) -> usize {
        key.len().saturating_add(value.len())
    }

    /// The entry's key.
    #[inline]
    pub(crate) fn key(&self) -> &[u8] {
        &self.key
    }

    /// The entry's current value.
    #[inline]
    pub(crate) fn value(&self) -> &[u8] {
        &self.value
    }

    /// Bytes charged against the cache budget: `key.len() + value.len()`.
    #[inline]
    pub(crate) fn size(&self) -> usize {
        self.size
    }

    /// Overwrites the value and returns the entry's previous size.
    ///
    /// The existing allocation is reused when it is large enough.
    pub(crate) fn replace_value(&mut self, value: &[u8]) -> usize {
        let old_size = self.size;
        self.value.clear();
        self.value.extend_from_slice(value);
        self.size = Self::size_of(&self.key, &self.value);
        old_size
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("key_len", &self.key.len())
            .field("value_len", &self.value.len())
            .field("size", &self.size)
            .finish()
    }
}

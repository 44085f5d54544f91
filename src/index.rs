//! Key index: O(1) lookup from key bytes to a recency-list handle.
//!
//! The index stores handles only. Key bytes are owned by the entries in the
//! [`List`], so hashing and equality checks borrow the list rather than keeping
//! a second copy of every key.

use crate::list::{Handle, List};
use core::fmt;
use core::hash::BuildHasher;
use hashbrown::HashTable;

pub(crate) struct KeyIndex<S> {
    table: HashTable<Handle>,
    hash_builder: S,
}

impl<S: BuildHasher> KeyIndex<S> {
    pub(crate) fn with_hasher(hash_builder: S) -> Self {
        Self {
            table: HashTable::new(),
            hash_builder,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.table.len()
    }

    /// Finds the handle for `key`. Never allocates and never touches recency.
    pub(crate) fn lookup(&self, key: &[u8], list: &List) -> Option<Handle> {
        let hash = self.hash_builder.hash_one(key);
        self.table
            .find(hash, |&handle| {
                list.get(handle).is_some_and(|entry| entry.key() == key)
            })
            .copied()
    }

    /// Registers `handle` under `key`.
    ///
    /// `handle` must already be in `list` and `key` must not be indexed yet; a
    /// duplicate is a caller bug.
    pub(crate) fn insert(&mut self, key: &[u8], handle: Handle, list: &List) {
        debug_assert!(
            self.lookup(key, list).is_none(),
            "key inserted into index twice"
        );
        let hash_builder = &self.hash_builder;
        let hash = hash_builder.hash_one(key);
        self.table.insert_unique(hash, handle, |&existing| {
            list.get(existing)
                .map_or(0, |entry| hash_builder.hash_one(entry.key()))
        });
    }

    /// Removes the association for `key`, which must map to `handle`.
    ///
    /// Matching on the handle rather than the key lets callers erase after the
    /// entry has already left the list.
    pub(crate) fn erase(&mut self, key: &[u8], handle: Handle) -> bool {
        let hash = self.hash_builder.hash_one(key);
        let erased = match self.table.find_entry(hash, |&candidate| candidate == handle) {
            Ok(occupied) => {
                let _ = occupied.remove();
                true
            }
            Err(_) => false,
        };
        debug_assert!(erased, "erased a key that was not indexed");
        erased
    }

    pub(crate) fn clear(&mut self) {
        self.table.clear();
    }
}

impl<S> fmt::Debug for KeyIndex<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyIndex")
            .field("len", &self.table.len())
            .finish()
    }
}

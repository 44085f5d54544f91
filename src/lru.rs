//! Least Recently Used (LRU) Cache Engine
//!
//! A byte-budgeted key/value cache with O(1) operations. Entries are charged
//! `key.len() + value.len()` bytes against a fixed budget, and when a write
//! would overflow the budget the least recently used entries are evicted until
//! it fits.
//!
//! # Algorithm
//!
//! The engine combines two structures that always agree on membership:
//!
//! - a recency list, stored in a slab arena, ordered from most recently used
//!   (head) to least recently used (tail), and
//! - a key index mapping key bytes to the entry's generation-checked handle.
//!
//! Every read hit, every update and every insertion moves the touched entry to
//! the head. Eviction pops from the tail and erases the victim from the index
//! in the same step.
//!
//! ```text
//!   head (MRU)                                   tail (LRU)
//!   ┌──────┐    ┌──────┐    ┌──────┐    ┌──────┐
//!   │  k4  │◀──▶│  k1  │◀──▶│  k3  │◀──▶│  k2  │ ──▶ evicted first
//!   └──────┘    └──────┘    └──────┘    └──────┘
//! ```
//!
//! # Capacity Accounting
//!
//! `current_size` is maintained incrementally and never exceeds `max_size`
//! once a call returns, whether the call succeeded or not. A write whose entry
//! alone is larger than `max_size` is refused with
//! [`CacheError::EntryTooLarge`] before anything is evicted.
//!
//! Updating an existing key charges the *resulting* size: the old size is
//! released first, then the tail is evicted until the new size fits. The
//! updated entry is at the head by then, so it is never its own victim.
//!
//! # Performance Characteristics
//!
//! - Get/Put/PutIfAbsent/Set/Delete: O(1) plus one step per evicted entry
//! - Memory: keys and values plus roughly 48-64 bytes of bookkeeping per entry
//!
//! # Thread Safety
//!
//! This implementation is not thread-safe on its own and does no locking. It
//! holds no shared state and spawns no background work, so wrapping it in a
//! single `Mutex` is sufficient to share it. For sharded locking, see
//! `ConcurrentLruCache` (requires the `concurrent` feature).

use crate::config::LruCacheConfig;
use crate::entry::Entry;
use crate::error::{CacheError, Result};
use crate::index::KeyIndex;
use crate::list::{self, Handle, List};
use core::fmt;
use core::hash::BuildHasher;
use core::iter::FusedIterator;
use hashbrown::DefaultHashBuilder;
use tracing::{debug, trace};

/// A byte-budgeted LRU cache for byte-string keys and values.
///
/// # Examples
///
/// ```
/// use lru_kv::{CacheError, LruCache};
///
/// let mut cache = LruCache::new(10);
///
/// cache.put(b"a", b"1").unwrap(); // 2 bytes
/// cache.put(b"b", b"22").unwrap(); // 3 bytes, 5 in total
///
/// // Reading "a" makes "b" the least recently used entry.
/// assert_eq!(cache.get(b"a"), Some(&b"1"[..]));
///
/// // 6 more bytes do not fit next to 5: "b" is evicted, "a" survives.
/// cache.put(b"c", b"55555").unwrap();
/// assert!(!cache.contains(b"b"));
/// assert!(cache.contains(b"a"));
/// assert_eq!(cache.current_size(), 8);
///
/// // Nothing bigger than the whole budget is accepted.
/// assert_eq!(
///     cache.put(b"huge", b"0123456789"),
///     Err(CacheError::EntryTooLarge { size: 14, max_size: 10 })
/// );
/// ```
pub struct LruCache<S = DefaultHashBuilder> {
    config: LruCacheConfig,
    list: List,
    index: KeyIndex<S>,
    current_size: usize,
}

impl LruCache<DefaultHashBuilder> {
    /// Creates an empty cache with a budget of `max_size` bytes.
    pub fn new(max_size: usize) -> Self {
        Self::with_hasher(max_size, DefaultHashBuilder::default())
    }

    /// Creates a cache from a configuration with an optional hasher.
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration specifying the byte budget
    /// * `hasher` - Optional hash builder. If `None`, uses `DefaultHashBuilder`
    ///
    /// # Example
    ///
    /// ```
    /// use lru_kv::LruCache;
    /// use lru_kv::config::LruCacheConfig;
    ///
    /// let config = LruCacheConfig { max_size: 1024 };
    /// let cache = LruCache::init(config, None);
    /// assert!(cache.is_empty());
    /// ```
    pub fn init(config: LruCacheConfig, hasher: Option<DefaultHashBuilder>) -> Self {
        Self::with_hasher(config.max_size, hasher.unwrap_or_default())
    }
}

impl<S: BuildHasher> LruCache<S> {
    /// Creates an empty cache with a budget of `max_size` bytes and a custom
    /// hash builder.
    pub fn with_hasher(max_size: usize, hash_builder: S) -> Self {
        Self {
            config: LruCacheConfig::new(max_size),
            list: List::new(),
            index: KeyIndex::with_hasher(hash_builder),
            current_size: 0,
        }
    }

    /// The byte budget fixed at construction.
    #[inline]
    pub fn max_size(&self) -> usize {
        self.config.max_size
    }

    /// Sum of `key.len() + value.len()` over all cached entries.
    #[inline]
    pub fn current_size(&self) -> usize {
        self.current_size
    }

    /// Number of cached entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns `true` if the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Returns the value for `key` and marks the entry most recently used.
    ///
    /// A read counts as a use, so a hit moves the entry to the head of the
    /// recency order.
    pub fn get(&mut self, key: &[u8]) -> Option<&[u8]> {
        let handle = self.index.lookup(key, &self.list)?;
        self.list.move_to_front(handle).map(|entry| entry.value())
    }

    /// Returns the value for `key` without touching the recency order.
    pub fn peek(&self, key: &[u8]) -> Option<&[u8]> {
        let handle = self.index.lookup(key, &self.list)?;
        self.list.get(handle).map(Entry::value)
    }

    /// Returns `true` if `key` is cached. Does not touch the recency order.
    pub fn contains(&self, key: &[u8]) -> bool {
        self.index.lookup(key, &self.list).is_some()
    }

    /// Inserts or updates `key`, making it the most recently used entry.
    ///
    /// A new key is inserted at the head after evicting from the tail until it
    /// fits. An existing key has its value replaced in place, which may also
    /// evict if the value grew. Re-putting an identical value still refreshes
    /// the key's recency.
    ///
    /// # Errors
    ///
    /// [`CacheError::EntryTooLarge`] if `key.len() + value.len()` exceeds the
    /// budget. The cache is left unchanged, including when `key` was already
    /// cached.
    pub fn put(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        let size = self.check_fits(key, value)?;
        match self.index.lookup(key, &self.list) {
            Some(handle) => self.update(handle, value),
            None => self.insert(key, value, size),
        }
        Ok(())
    }

    /// Inserts `key` only if it is not cached yet.
    ///
    /// Follows the same insertion path as [`put`](Self::put). A present key is
    /// left alone: neither its value nor its recency changes.
    ///
    /// # Errors
    ///
    /// - [`CacheError::EntryTooLarge`] if the entry alone exceeds the budget
    /// - [`CacheError::AlreadyExists`] if `key` is already cached
    pub fn put_if_absent(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        let size = self.check_fits(key, value)?;
        if self.contains(key) {
            return Err(CacheError::AlreadyExists);
        }
        self.insert(key, value, size);
        Ok(())
    }

    /// Replaces the value of a cached key and marks it most recently used.
    ///
    /// If the new value is larger, entries are evicted from the tail until
    /// the resulting size fits.
    ///
    /// # Errors
    ///
    /// - [`CacheError::NotFound`] if `key` is not cached
    /// - [`CacheError::EntryTooLarge`] if the updated entry would exceed the
    ///   budget; the old value stays in place
    pub fn set(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        let handle = self
            .index
            .lookup(key, &self.list)
            .ok_or(CacheError::NotFound)?;
        self.check_fits(key, value)?;
        self.update(handle, value);
        Ok(())
    }

    /// Removes `key`, returning `true` if it was cached.
    pub fn delete(&mut self, key: &[u8]) -> bool {
        let Some(handle) = self.index.lookup(key, &self.list) else {
            return false;
        };
        match self.list.remove(handle) {
            Some(entry) => {
                self.index.erase(entry.key(), handle);
                self.current_size -= entry.size();
                true
            }
            None => false,
        }
    }

    /// Removes every entry. The budget is unchanged.
    pub fn clear(&mut self) {
        debug!(
            entries = self.list.len(),
            bytes = self.current_size,
            "clearing cache"
        );
        self.index.clear();
        self.list.clear();
        self.current_size = 0;
    }

    /// Iterates over `(key, value)` pairs from most to least recently used.
    ///
    /// Iteration does not touch the recency order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.list.iter(),
        }
    }

    /// Iterates over keys from most to least recently used.
    pub fn keys(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Returns the entry's size, or the error a write of this size gets.
    fn check_fits(&self, key: &[u8], value: &[u8]) -> Result<usize> {
        let size = Entry::size_of(key, value);
        if size > self.config.max_size {
            debug!(
                size,
                max_size = self.config.max_size,
                "rejecting entry larger than cache budget"
            );
            return Err(CacheError::EntryTooLarge {
                size,
                max_size: self.config.max_size,
            });
        }
        Ok(size)
    }

    fn insert(&mut self, key: &[u8], value: &[u8], size: usize) {
        self.evict_for(size);
        let handle = self.list.push_front(Entry::new(key, value));
        self.index.insert(key, handle, &self.list);
        self.current_size += size;
    }

    /// Replaces the value behind an indexed handle. The index only holds
    /// handles of live entries, so the lookup cannot miss.
    fn update(&mut self, handle: Handle, value: &[u8]) {
        let entry = self.list.move_to_front(handle);
        debug_assert!(entry.is_some(), "index holds a stale handle");
        let Some(entry) = entry else {
            return;
        };
        let old_size = entry.replace_value(value);
        let new_size = entry.size();
        self.current_size -= old_size;
        self.evict_for(new_size);
        self.current_size += new_size;
        debug_assert_eq!(self.list.head(), Some(handle));
    }

    /// Pops least recently used entries until `incoming` more bytes fit.
    ///
    /// `incoming` must not exceed the budget. The loop also stops on an empty
    /// list, so it terminates even for zero-sized writes into a zero budget.
    fn evict_for(&mut self, incoming: usize) {
        while self.config.max_size - self.current_size < incoming {
            let Some((handle, victim)) = self.list.pop_back() else {
                break;
            };
            self.index.erase(victim.key(), handle);
            self.current_size -= victim.size();
            trace!(
                key_len = victim.key().len(),
                freed = victim.size(),
                current_size = self.current_size,
                "evicted least recently used entry"
            );
        }
    }
}

impl Default for LruCache<DefaultHashBuilder> {
    fn default() -> Self {
        Self::init(LruCacheConfig::default(), None)
    }
}

impl<S> fmt::Debug for LruCache<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("max_size", &self.config.max_size)
            .field("current_size", &self.current_size)
            .field("len", &self.list.len())
            .finish()
    }
}

impl<'a, S: BuildHasher> IntoIterator for &'a LruCache<S> {
    type Item = (&'a [u8], &'a [u8]);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a cache's entries, most recently used first.
///
/// Created by [`LruCache::iter`].
pub struct Iter<'a> {
    inner: list::Iter<'a>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a [u8], &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| (entry.key(), entry.value()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

impl fmt::Debug for Iter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter").field("remaining", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    extern crate std;
    use std::collections::HashSet;
    use std::vec::Vec;

    fn keys(cache: &LruCache) -> Vec<Vec<u8>> {
        cache.keys().map(<[u8]>::to_vec).collect()
    }

    fn owned(keys: &[&[u8]]) -> Vec<Vec<u8>> {
        keys.iter().map(|k| k.to_vec()).collect()
    }

    /// Checks the size accounting and the index/list bijection.
    fn assert_consistent(cache: &LruCache) {
        let listed: Vec<Vec<u8>> = keys(cache);
        let unique: HashSet<&Vec<u8>> = listed.iter().collect();
        assert_eq!(unique.len(), listed.len(), "duplicate key in recency list");
        assert_eq!(cache.index.len(), listed.len());
        for key in &listed {
            let handle = cache.index.lookup(key, &cache.list).unwrap();
            assert_eq!(cache.list.get(handle).unwrap().key(), key.as_slice());
        }
        let total: usize = cache.iter().map(|(k, v)| k.len() + v.len()).sum();
        assert_eq!(total, cache.current_size());
        assert!(cache.current_size() <= cache.max_size());
    }

    #[test]
    fn test_lru_get_put() {
        let mut cache = LruCache::new(100);
        assert!(cache.put(b"apple", b"1").is_ok());
        assert!(cache.put(b"banana", b"2").is_ok());
        assert_eq!(cache.get(b"apple"), Some(&b"1"[..]));
        assert_eq!(cache.get(b"banana"), Some(&b"2"[..]));
        assert_eq!(cache.get(b"cherry"), None);
        assert!(cache.put(b"apple", b"3").is_ok());
        assert_eq!(cache.get(b"apple"), Some(&b"3"[..]));
        assert_eq!(cache.len(), 2);
        assert_consistent(&cache);
    }

    #[test]
    fn test_eviction_frees_until_fit() {
        // a=1 (2 bytes), b=22 (3 bytes), c=55555 (6 bytes) into 10 bytes:
        // evicting "a" leaves 3 + 6 = 9 which fits, so "b" survives.
        let mut cache = LruCache::new(10);
        cache.put(b"a", b"1").unwrap();
        cache.put(b"b", b"22").unwrap();
        assert_eq!(cache.current_size(), 5);
        cache.put(b"c", b"55555").unwrap();
        assert_eq!(keys(&cache), owned(&[b"c", b"b"]));
        assert_eq!(cache.current_size(), 9);
        assert_consistent(&cache);
    }

    #[test]
    fn test_eviction_continues_past_first_victim() {
        let mut cache = LruCache::new(10);
        cache.put(b"a", b"1").unwrap(); // 2
        cache.put(b"b", b"22").unwrap(); // 3, total 5
        cache.put(b"c", b"1234567").unwrap(); // 8: needs both gone
        assert_eq!(keys(&cache), owned(&[b"c"]));
        assert_eq!(cache.current_size(), 8);
        assert_consistent(&cache);
    }

    #[test]
    fn test_get_refreshes_recency() {
        // capacity 5: x=12 (3), get x, y=1 (2), z=1 (2) evicts x.
        let mut cache = LruCache::new(5);
        cache.put(b"x", b"12").unwrap();
        assert_eq!(cache.get(b"x"), Some(&b"12"[..]));
        cache.put(b"y", b"1").unwrap();
        assert_eq!(cache.current_size(), 5);
        cache.put(b"z", b"1").unwrap();
        assert!(!cache.contains(b"x"));
        assert_eq!(keys(&cache), owned(&[b"z", b"y"]));
        assert_consistent(&cache);
    }

    #[test]
    fn test_get_protects_from_eviction() {
        let mut cache = LruCache::new(6);
        cache.put(b"a", b"1").unwrap();
        cache.put(b"b", b"1").unwrap();
        cache.put(b"c", b"1").unwrap();
        cache.get(b"a");
        cache.put(b"d", b"1").unwrap();
        assert!(cache.contains(b"a"));
        assert!(!cache.contains(b"b"));
        assert_eq!(keys(&cache), owned(&[b"d", b"a", b"c"]));
    }

    #[test]
    fn test_set_missing_key() {
        let mut cache = LruCache::new(10);
        assert_eq!(cache.set(b"missing", b"v"), Err(CacheError::NotFound));
        assert!(cache.is_empty());
        assert_eq!(cache.current_size(), 0);
    }

    #[test]
    fn test_set_updates_and_moves_to_front() {
        let mut cache = LruCache::new(100);
        cache.put(b"a", b"1").unwrap();
        cache.put(b"b", b"2").unwrap();
        cache.set(b"a", b"updated").unwrap();
        assert_eq!(keys(&cache), owned(&[b"a", b"b"]));
        assert_eq!(cache.peek(b"a"), Some(&b"updated"[..]));
        assert_eq!(cache.current_size(), 1 + 7 + 2);
        assert_consistent(&cache);
    }

    #[test]
    fn test_set_growth_evicts_others_not_itself() {
        let mut cache = LruCache::new(10);
        cache.put(b"a", b"1").unwrap(); // 2
        cache.put(b"b", b"1").unwrap(); // 2
        cache.put(b"c", b"1").unwrap(); // 2, total 6
        // "a" is the tail; growing it to 9 bytes must evict "b" and "c".
        cache.set(b"a", b"12345678").unwrap();
        assert_eq!(keys(&cache), owned(&[b"a"]));
        assert_eq!(cache.current_size(), 9);
        assert_consistent(&cache);

        // Growing to 8 only needs the tail ("b") gone.
        let mut cache = LruCache::new(10);
        cache.put(b"a", b"1").unwrap();
        cache.put(b"b", b"1").unwrap();
        cache.put(b"c", b"1").unwrap();
        cache.set(b"a", b"1234567").unwrap();
        assert_eq!(keys(&cache), owned(&[b"a", b"c"]));
        assert_eq!(cache.current_size(), 10);
        assert_consistent(&cache);
    }

    #[test]
    fn test_put_existing_uses_resulting_size() {
        let mut cache = LruCache::new(10);
        cache.put(b"a", b"1234").unwrap(); // 5
        cache.put(b"b", b"123").unwrap(); // 4, total 9
        // Growing "a" by 1 byte to 6 needs 6 + 4 = 10, which fits.
        cache.put(b"a", b"12345").unwrap();
        assert_eq!(keys(&cache), owned(&[b"a", b"b"]));
        assert_eq!(cache.current_size(), 10);
        assert_consistent(&cache);
    }

    #[test]
    fn test_grow_empty_tail_to_full_budget() {
        let mut cache = LruCache::new(6);
        cache.put(b"", b"").unwrap(); // 0 bytes, ends up the tail
        cache.put(b"a", b"1").unwrap();
        cache.put(b"b", b"1").unwrap();
        assert_eq!(keys(&cache), owned(&[b"b", b"a", b""]));

        // The grown entry moves to the head first, so only the others go.
        cache.set(b"", b"123456").unwrap();
        assert_eq!(keys(&cache), owned(&[b""]));
        assert_eq!(cache.peek(b""), Some(&b"123456"[..]));
        assert_eq!(cache.current_size(), 6);
        assert_consistent(&cache);

        cache.put(b"", b"").unwrap();
        assert_eq!(cache.current_size(), 0);
        assert_consistent(&cache);
    }

    #[test]
    fn test_set_too_large_leaves_entry() {
        let mut cache = LruCache::new(5);
        cache.put(b"a", b"1").unwrap();
        cache.put(b"b", b"1").unwrap();
        assert_eq!(
            cache.set(b"a", b"123456"),
            Err(CacheError::EntryTooLarge {
                size: 7,
                max_size: 5
            })
        );
        assert_eq!(keys(&cache), owned(&[b"b", b"a"]));
        assert_eq!(cache.peek(b"a"), Some(&b"1"[..]));
        assert_consistent(&cache);
    }

    #[test]
    fn test_same_size_update_evicts_nothing() {
        let mut cache = LruCache::new(6);
        cache.put(b"a", b"1").unwrap();
        cache.put(b"b", b"2").unwrap();
        cache.put(b"c", b"3").unwrap();
        cache.put(b"a", b"9").unwrap();
        assert_eq!(cache.len(), 3);
        assert_eq!(keys(&cache), owned(&[b"a", b"c", b"b"]));
    }

    #[test]
    fn test_idempotent_put_moves_to_front() {
        let mut cache = LruCache::new(100);
        cache.put(b"k", b"v").unwrap();
        cache.put(b"other", b"x").unwrap();
        let size = cache.current_size();
        cache.put(b"k", b"v").unwrap();
        assert_eq!(cache.current_size(), size);
        assert_eq!(cache.peek(b"k"), Some(&b"v"[..]));
        assert_eq!(keys(&cache), owned(&[b"k", b"other"]));
    }

    #[test]
    fn test_put_too_large_is_rejected_without_mutation() {
        let mut cache = LruCache::new(10);
        cache.put(b"a", b"1").unwrap();
        cache.put(b"b", b"22").unwrap();
        let before = keys(&cache);
        assert_eq!(
            cache.put(b"big", b"12345678"),
            Err(CacheError::EntryTooLarge {
                size: 11,
                max_size: 10
            })
        );
        assert_eq!(keys(&cache), before);
        assert_eq!(cache.current_size(), 5);

        // Same for an existing key: the old value survives, order unchanged.
        assert!(cache.put(b"a", b"0123456789").is_err());
        assert_eq!(cache.peek(b"a"), Some(&b"1"[..]));
        assert_eq!(keys(&cache), before);
        assert_consistent(&cache);
    }

    #[test]
    fn test_entry_exactly_max_size() {
        let mut cache = LruCache::new(4);
        cache.put(b"a", b"1").unwrap();
        cache.put(b"bb", b"22").unwrap();
        assert_eq!(keys(&cache), owned(&[b"bb"]));
        assert_eq!(cache.current_size(), 4);
    }

    #[test]
    fn test_put_if_absent() {
        let mut cache = LruCache::new(100);
        assert!(cache.put_if_absent(b"a", b"1").is_ok());
        cache.put(b"b", b"2").unwrap();
        assert_eq!(
            cache.put_if_absent(b"a", b"other"),
            Err(CacheError::AlreadyExists)
        );
        assert_eq!(cache.peek(b"a"), Some(&b"1"[..]));
        // A refused put_if_absent is not a use.
        assert_eq!(keys(&cache), owned(&[b"b", b"a"]));
        assert_eq!(
            cache.put_if_absent(b"c", &[0; 200]),
            Err(CacheError::EntryTooLarge {
                size: 201,
                max_size: 100
            })
        );
    }

    #[test]
    fn test_put_if_absent_evicts_like_put() {
        let mut cache = LruCache::new(4);
        cache.put(b"a", b"1").unwrap();
        cache.put(b"b", b"1").unwrap();
        cache.put_if_absent(b"c", b"1").unwrap();
        assert_eq!(keys(&cache), owned(&[b"c", b"b"]));
    }

    #[test]
    fn test_delete() {
        let mut cache = LruCache::new(100);
        cache.put(b"a", b"1").unwrap();
        cache.put(b"b", b"22").unwrap();
        cache.put(b"c", b"333").unwrap();
        assert!(cache.delete(b"b"));
        assert!(!cache.delete(b"b"));
        assert!(!cache.delete(b"missing"));
        assert_eq!(keys(&cache), owned(&[b"c", b"a"]));
        assert_eq!(cache.current_size(), 2 + 4);
        assert_consistent(&cache);

        assert!(cache.delete(b"c"));
        assert!(cache.delete(b"a"));
        assert!(cache.is_empty());
        assert_eq!(cache.current_size(), 0);
    }

    #[test]
    fn test_deleted_key_can_be_reinserted() {
        let mut cache = LruCache::new(100);
        cache.put(b"a", b"1").unwrap();
        cache.delete(b"a");
        cache.put(b"b", b"2").unwrap();
        cache.put(b"a", b"3").unwrap();
        assert_eq!(cache.get(b"a"), Some(&b"3"[..]));
        assert_eq!(cache.get(b"b"), Some(&b"2"[..]));
        assert_consistent(&cache);
    }

    #[test]
    fn test_peek_and_contains_do_not_reorder() {
        let mut cache = LruCache::new(4);
        cache.put(b"a", b"1").unwrap();
        cache.put(b"b", b"1").unwrap();
        assert_eq!(cache.peek(b"a"), Some(&b"1"[..]));
        assert!(cache.contains(b"a"));
        cache.put(b"c", b"1").unwrap();
        assert!(!cache.contains(b"a"));
    }

    #[test]
    fn test_zero_budget() {
        let mut cache = LruCache::new(0);
        assert!(matches!(
            cache.put(b"a", b""),
            Err(CacheError::EntryTooLarge { size: 1, max_size: 0 })
        ));
        // An empty key with an empty value is the only thing that fits.
        assert!(cache.put(b"", b"").is_ok());
        assert!(cache.put(b"", b"").is_ok());
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.current_size(), 0);
        assert_eq!(cache.get(b""), Some(&b""[..]));
        assert_consistent(&cache);
    }

    #[test]
    fn test_zero_sized_entries_are_never_evicted_for_zero_sized_writes() {
        let mut cache = LruCache::new(3);
        cache.put(b"", b"").unwrap();
        cache.put(b"abc", b"").unwrap();
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.current_size(), 3);
    }

    #[test]
    fn test_clear() {
        let mut cache = LruCache::new(100);
        cache.put(b"a", b"1").unwrap();
        cache.put(b"b", b"2").unwrap();
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.current_size(), 0);
        assert_eq!(cache.get(b"a"), None);
        cache.put(b"c", b"3").unwrap();
        assert_eq!(keys(&cache), owned(&[b"c"]));
        assert_eq!(cache.max_size(), 100);
        assert_consistent(&cache);
    }

    #[test]
    fn test_iter_is_mru_first() {
        let mut cache = LruCache::new(100);
        cache.put(b"a", b"1").unwrap();
        cache.put(b"b", b"2").unwrap();
        cache.get(b"a");
        let pairs: Vec<(&[u8], &[u8])> = cache.iter().collect();
        assert_eq!(pairs, [(&b"a"[..], &b"1"[..]), (&b"b"[..], &b"2"[..])]);
        assert_eq!(cache.iter().len(), 2);
        assert_eq!((&cache).into_iter().count(), 2);
    }

    #[test]
    fn test_binary_keys_and_values() {
        let mut cache = LruCache::new(100);
        let key = [0u8, 159, 146, 150];
        let value = [255u8, 0, 1];
        cache.put(&key, &value).unwrap();
        assert_eq!(cache.get(&key), Some(&value[..]));
    }

    #[test]
    fn test_init_and_default() {
        let cache = LruCache::init(LruCacheConfig::new(64), None);
        assert_eq!(cache.max_size(), 64);
        let cache = LruCache::default();
        assert_eq!(cache.max_size(), crate::config::DEFAULT_MAX_SIZE);
    }

    #[test]
    fn test_with_custom_hasher() {
        let mut cache = LruCache::with_hasher(10, std::collections::hash_map::RandomState::new());
        cache.put(b"a", b"1").unwrap();
        assert_eq!(cache.get(b"a"), Some(&b"1"[..]));
    }

    #[test]
    fn test_many_operations_stay_consistent() {
        let mut cache = LruCache::new(64);
        for i in 0u32..500 {
            let key = (i % 37).to_le_bytes();
            let value = std::vec![b'x'; (i % 11) as usize];
            match i % 5 {
                0 | 1 => {
                    let _ = cache.put(&key, &value);
                }
                2 => {
                    let _ = cache.set(&key, &value);
                }
                3 => {
                    cache.get(&key);
                }
                _ => {
                    cache.delete(&key);
                }
            }
            assert_consistent(&cache);
        }
    }

    #[test]
    fn test_lru_concurrent_access() {
        use std::sync::{Arc, Mutex};
        use std::thread;

        let cache = Arc::new(Mutex::new(LruCache::new(4096)));
        let mut handles = Vec::new();

        for t in 0..4u8 {
            let cache = Arc::clone(&cache);
            handles.push(thread::spawn(move || {
                for i in 0..100u8 {
                    let key = [t, i];
                    let mut guard = cache.lock().unwrap();
                    guard.put(&key, &[i; 8]).unwrap();
                    let _ = guard.get(&key);
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        let guard = cache.lock().unwrap();
        assert!(guard.current_size() <= 4096);
        assert!(!guard.is_empty());
        assert_consistent(&guard);
    }
}

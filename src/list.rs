extern crate alloc;

use crate::entry::Entry;
use alloc::vec::Vec;
use core::fmt;

/// A generation-checked reference to a slot in a [`List`].
///
/// Handles are cheap to copy and compare. A handle outlives the entry it was
/// issued for only as a stale value: once the entry is removed, the slot's
/// generation is bumped and every lookup through the old handle returns `None`,
/// even after the slot has been reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct Handle {
    slot: usize,
    generation: u32,
}

/// An occupied slot: the entry plus its neighbours in recency order.
///
/// `prev` points towards the head (more recently used), `next` towards the
/// tail. Links are raw slot indices because a linked slot is always occupied.
struct Node {
    entry: Entry,
    prev: Option<usize>,
    next: Option<usize>,
}

struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// A doubly linked recency list stored in a slab arena.
///
/// The list is the sole owner of entry storage. Entries live in `slots`;
/// vacated slots are recycled through `free`. The head is the most recently
/// used entry, the tail the least recently used one, and an empty list has
/// neither.
///
/// All operations are O(1) and never walk the list.
///
/// # Examples
///
/// ```ignore
/// use lru_kv::entry::Entry;
/// use lru_kv::list::List;
///
/// let mut list = List::new();
/// let a = list.push_front(Entry::new(b"a", b"1"));
/// let b = list.push_front(Entry::new(b"b", b"2"));
///
/// // "a" is the tail; touching it makes "b" the tail.
/// list.move_to_front(a);
/// assert_eq!(list.tail(), Some(b));
/// ```
pub(crate) struct List {
    slots: Vec<Slot>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl List {
    /// Creates an empty list.
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Returns the number of entries in the list.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list contains no entries.
    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Handle of the most recently used entry.
    #[inline]
    pub(crate) fn head(&self) -> Option<Handle> {
        self.head.map(|slot| self.handle_at(slot))
    }

    /// Handle of the least recently used entry.
    #[cfg(test)]
    #[inline]
    pub(crate) fn tail(&self) -> Option<Handle> {
        self.tail.map(|slot| self.handle_at(slot))
    }

    /// Returns the entry behind `handle`, or `None` if the handle is stale.
    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> Option<&Entry> {
        self.node(handle).map(|node| &node.entry)
    }

    /// Inserts `entry` as the new head and returns its handle.
    ///
    /// On an empty list the entry becomes both head and tail.
    pub(crate) fn push_front(&mut self, entry: Entry) -> Handle {
        let slot = self.alloc(entry);
        self.attach_front(slot);
        self.len += 1;
        self.handle_at(slot)
    }

    /// Moves the entry behind `handle` to the head and returns it.
    ///
    /// Relinking is skipped when the entry already is the head. Returns `None`
    /// if the handle is stale.
    pub(crate) fn move_to_front(&mut self, handle: Handle) -> Option<&mut Entry> {
        let slot = self.resolve(handle)?;
        if self.head != Some(slot) {
            self.detach(slot);
            self.attach_front(slot);
        }
        self.node_at_mut(slot).map(|node| &mut node.entry)
    }

    /// Detaches and returns the tail entry along with the handle it had.
    ///
    /// Returns `None` on an empty list. The former predecessor becomes the new
    /// tail, or the list becomes empty if the tail was also the head.
    pub(crate) fn pop_back(&mut self) -> Option<(Handle, Entry)> {
        let slot = self.tail?;
        let handle = self.handle_at(slot);
        self.take(slot).map(|entry| (handle, entry))
    }

    /// Detaches and returns an arbitrary entry.
    ///
    /// Handles the four positions an entry can be in: sole entry, head only,
    /// tail only and interior. Returns `None` if the handle is stale.
    pub(crate) fn remove(&mut self, handle: Handle) -> Option<Entry> {
        let slot = self.resolve(handle)?;
        self.take(slot)
    }

    /// Removes every entry.
    ///
    /// Slots are kept for reuse and their generations are bumped, so no handle
    /// issued before the call can resolve afterwards.
    pub(crate) fn clear(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.node.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(index);
            }
        }
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Iterates from head (most recently used) to tail.
    pub(crate) fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            next: self.head,
            remaining: self.len,
        }
    }

    fn handle_at(&self, slot: usize) -> Handle {
        Handle {
            slot,
            generation: self.slots[slot].generation,
        }
    }

    fn resolve(&self, handle: Handle) -> Option<usize> {
        let slot = self.slots.get(handle.slot)?;
        (slot.generation == handle.generation && slot.node.is_some()).then_some(handle.slot)
    }

    fn node(&self, handle: Handle) -> Option<&Node> {
        let slot = self.resolve(handle)?;
        self.slots[slot].node.as_ref()
    }

    fn node_at_mut(&mut self, slot: usize) -> Option<&mut Node> {
        self.slots.get_mut(slot).and_then(|s| s.node.as_mut())
    }

    fn alloc(&mut self, entry: Entry) -> usize {
        let node = Node {
            entry,
            prev: None,
            next: None,
        };
        match self.free.pop() {
            Some(slot) => {
                self.slots[slot].node = Some(node);
                slot
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                self.slots.len() - 1
            }
        }
    }

    /// Unlinks, vacates and recycles an occupied slot.
    fn take(&mut self, slot: usize) -> Option<Entry> {
        self.detach(slot);
        let vacated = &mut self.slots[slot];
        let node = vacated.node.take()?;
        vacated.generation = vacated.generation.wrapping_add(1);
        self.free.push(slot);
        self.len -= 1;
        Some(node.entry)
    }

    /// Links a detached slot in front of the current head.
    fn attach_front(&mut self, slot: usize) {
        let old_head = self.head;
        if let Some(node) = self.node_at_mut(slot) {
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(head) => {
                if let Some(node) = self.node_at_mut(head) {
                    node.prev = Some(slot);
                }
            }
            None => self.tail = Some(slot),
        }
        self.head = Some(slot);
    }

    /// Splices a slot out of the list, patching its neighbours and the
    /// head/tail references. The slot stays occupied.
    fn detach(&mut self, slot: usize) {
        let Some(node) = self.node_at_mut(slot) else {
            return;
        };
        let (prev, next) = (node.prev.take(), node.next.take());

        match prev {
            Some(prev) => {
                if let Some(node) = self.node_at_mut(prev) {
                    node.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(next) => {
                if let Some(node) = self.node_at_mut(next) {
                    node.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }
}

impl fmt::Debug for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List")
            .field("len", &self.len)
            .field("slots", &self.slots.len())
            .field("free", &self.free.len())
            .finish()
    }
}

/// Head-to-tail iterator over a [`List`].
pub(crate) struct Iter<'a> {
    list: &'a List,
    next: Option<usize>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Entry;

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.next?;
        let node = self.list.slots.get(slot)?.node.as_ref()?;
        self.next = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl fmt::Debug for Iter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.remaining)
            .finish()
    }
}

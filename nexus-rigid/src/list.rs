//! Fixed-capacity doubly-linked list.
//!
//! A [`RigidList`] owns a pool of nodes split across two chains:
//!
//! ```text
//! active:  [a] <-> [b] <-> [c]          visible elements, in order
//! free:    [~] <-> [~]                  preallocated, stale values
//!
//! capacity = active.len() + free.len()
//! ```
//!
//! Insertion takes a node from the free chain, overwrites its value, and
//! links it into the active chain. Removal links the node back into the
//! free chain and leaves the old value in place. Neither allocates; only
//! [`RigidList::reserve`] creates or destroys nodes.
//!
//! # Example
//!
//! ```
//! use nexus_rigid::RigidList;
//!
//! let mut list: RigidList<u64> = RigidList::with_capacity(3);
//!
//! let a = list.try_push_back(1).unwrap();
//! list.try_push_back(2).unwrap();
//! list.try_push_back(3).unwrap();
//!
//! // Full: the value comes back, nothing changed
//! assert_eq!(list.try_push_back(4).unwrap_err().into_inner(), 4);
//! assert_eq!(list.len(), 3);
//!
//! // Erasing recycles the node
//! assert!(list.erase(a));
//! assert_eq!(list.free_len(), 1);
//! list.try_push_front(0).unwrap();
//!
//! let values: Vec<_> = list.iter().copied().collect();
//! assert_eq!(values, vec![0, 2, 3]);
//! assert_eq!(list.capacity(), 3);
//! ```
//!
//! # Moving Between Lists
//!
//! [`RigidList::splice_from`] moves elements out of another list while
//! keeping both capacities fixed: for every element that arrives, the
//! source gets a free node back.
//!
//! ```
//! use nexus_rigid::RigidList;
//!
//! let mut bids: RigidList<u64> = RigidList::with_capacity(4);
//! let mut asks: RigidList<u64> = RigidList::with_capacity(4);
//!
//! let key = asks.try_push_back(101).unwrap();
//! bids.splice_from(None, &mut asks, key).unwrap();
//!
//! assert_eq!(bids.len(), 1);
//! assert_eq!(asks.len(), 0);
//! assert_eq!(bids.capacity(), 4);
//! assert_eq!(asks.capacity(), 4);
//! ```
//!
//! # Keys
//!
//! Every element is addressed by a key of type `K` (default `u32`). A key
//! stays valid while its element is in the list, including across
//! same-list splices. Erasing an element invalidates only its own key.
//! Elements that arrive through [`RigidList::splice_from`] get new keys in
//! the destination list.
//!
//! Keys from one list must not be passed to another. Doing so is not
//! memory-unsafe, but the key may name an unrelated element.

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::mem;

use log::{debug, trace};

use crate::arena::Arena;
use crate::chain::Chain;
use crate::{Full, Key, Shortfall};

/// A doubly-linked list that never allocates outside [`reserve`](Self::reserve).
///
/// # Type Parameters
///
/// - `T`: Element type
/// - `K`: Key type (default `u32`), which also bounds the capacity
///
/// # Example
///
/// ```
/// use nexus_rigid::RigidList;
///
/// let mut list: RigidList<String> = RigidList::with_capacity(100);
///
/// let key = list.try_push_back("hello".into()).unwrap();
/// assert_eq!(list.get(key).map(String::as_str), Some("hello"));
/// ```
pub struct RigidList<T, K: Key = u32> {
    arena: Arena<T, K>,
    active: Chain<K>,
    free: Chain<K>,
}

impl<T, K: Key> Default for RigidList<T, K> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Capacity
// =============================================================================

impl<T: Default, K: Key> RigidList<T, K> {
    /// Creates a list with `capacity` preallocated nodes.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` does not fit the key type.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut list = Self::new();
        list.reserve(capacity);
        list
    }

    /// Sets the capacity to exactly `capacity` nodes.
    ///
    /// Growing creates default-valued nodes in the free pool. Shrinking
    /// destroys free nodes first. If the free pool is not enough, the
    /// elements at the **back** of the list are dropped until the list
    /// fits: afterwards `len() == capacity` and the earliest elements
    /// are kept.
    ///
    /// This is the only method that allocates or frees memory.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` does not fit the key type.
    ///
    /// # Example
    ///
    /// ```
    /// use nexus_rigid::RigidList;
    ///
    /// let mut list: RigidList<u64> = RigidList::with_capacity(4);
    /// for i in 0..4 {
    ///     list.try_push_back(i).unwrap();
    /// }
    ///
    /// list.reserve(2);
    /// let values: Vec<_> = list.iter().copied().collect();
    /// assert_eq!(values, vec![0, 1]);
    /// assert_eq!(list.free_len(), 0);
    /// ```
    pub fn reserve(&mut self, capacity: usize) {
        let current = self.capacity();

        match capacity.cmp(&current) {
            Ordering::Equal => {}
            Ordering::Greater => {
                let grow = capacity - current;
                self.arena.reserve(grow);
                for _ in 0..grow {
                    let key = self.arena.create(T::default());
                    self.free.link_back(&mut self.arena, key);
                }
                trace!("rigid list capacity {} -> {}", current, capacity);
            }
            Ordering::Less => {
                let shrink = current - capacity;

                let from_free = shrink.min(self.free.len());
                if from_free > 0 {
                    let (first, _) = self.free.take_front(&mut self.arena, from_free);
                    self.arena.destroy_run(first, from_free);
                }

                let from_active = shrink - from_free;
                if from_active > 0 {
                    let (first, _) = self.active.take_back(&mut self.arena, from_active);
                    self.arena.destroy_run(first, from_active);
                    debug!(
                        "rigid list shrink to {} dropped {} elements from the back",
                        capacity, from_active
                    );
                }

                self.arena.release_tail();
                trace!("rigid list capacity {} -> {}", current, capacity);
            }
        }

        debug_assert_eq!(self.arena.len(), self.capacity());
    }

    /// Removes the front element and returns its value.
    ///
    /// The recycled node keeps `T::default()`. Returns `None` if empty.
    pub fn take_front(&mut self) -> Option<T> {
        let key = self.active.head();
        if key.is_none() {
            return None;
        }
        let value = mem::take(&mut self.arena.node_mut(key).value);
        self.retire(key);
        Some(value)
    }

    /// Removes the back element and returns its value.
    ///
    /// The recycled node keeps `T::default()`. Returns `None` if empty.
    pub fn take_back(&mut self) -> Option<T> {
        let key = self.active.tail();
        if key.is_none() {
            return None;
        }
        let value = mem::take(&mut self.arena.node_mut(key).value);
        self.retire(key);
        Some(value)
    }
}

// =============================================================================
// Base impl
// =============================================================================

impl<T, K: Key> RigidList<T, K> {
    /// Creates an empty list with zero capacity.
    ///
    /// Nothing can be inserted until [`reserve`](Self::reserve) is called.
    #[inline]
    pub const fn new() -> Self {
        Self {
            arena: Arena::new(),
            active: Chain::new(),
            free: Chain::new(),
        }
    }

    /// Returns the number of elements in the list.
    #[inline]
    pub const fn len(&self) -> usize {
        self.active.len()
    }

    /// Returns the number of elements that can still be inserted.
    #[inline]
    pub const fn free_len(&self) -> usize {
        self.free.len()
    }

    /// Returns the total number of nodes: `len() + free_len()`.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.active.len() + self.free.len()
    }

    /// Returns `true` if the list has no elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Returns `true` if no free nodes remain.
    #[inline]
    pub const fn is_full(&self) -> bool {
        self.free.is_empty()
    }

    /// Returns the front element's key, or `None` if empty.
    #[inline]
    pub fn front_key(&self) -> Option<K> {
        self.active.head().into_option()
    }

    /// Returns the back element's key, or `None` if empty.
    #[inline]
    pub fn back_key(&self) -> Option<K> {
        self.active.tail().into_option()
    }

    /// Returns `true` if `key` names an element of this list.
    #[inline]
    pub fn contains_key(&self, key: K) -> bool {
        self.arena.is_live(key)
    }

    // ========================================================================
    // Insertion
    // ========================================================================

    /// Pushes a value to the back of the list.
    ///
    /// Returns the key of the new element.
    ///
    /// # Errors
    ///
    /// Returns `Err(Full(value))` if no free node is left. The list is unchanged.
    #[inline]
    pub fn try_push_back(&mut self, value: T) -> Result<K, Full<T>> {
        self.try_insert(None, value)
    }

    /// Pushes a value to the front of the list.
    ///
    /// Returns the key of the new element.
    ///
    /// # Errors
    ///
    /// Returns `Err(Full(value))` if no free node is left. The list is unchanged.
    #[inline]
    pub fn try_push_front(&mut self, value: T) -> Result<K, Full<T>> {
        self.try_insert(self.front_key(), value)
    }

    /// Inserts a value before `pos`, or at the back if `pos` is `None`.
    ///
    /// Returns the key of the new element.
    ///
    /// # Errors
    ///
    /// Returns `Err(Full(value))` if no free node is left. The list is unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is not an element of this list.
    pub fn try_insert(&mut self, pos: Option<K>, value: T) -> Result<K, Full<T>> {
        let before = self.position(pos);
        let key = self.free.head();
        if key.is_none() {
            return Err(Full(value));
        }

        self.free.unlink(&mut self.arena, key);
        let node = self.arena.node_mut(key);
        node.value = value;
        node.live = true;
        self.active.link_before(&mut self.arena, before, key);
        Ok(key)
    }

    /// Inserts `count` copies of `value` before `pos`, or at the back if
    /// `pos` is `None`.
    ///
    /// All or nothing: either `count` elements are inserted as one
    /// contiguous run, or the list is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Shortfall`] if fewer than `count` free nodes are left.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is not an element of this list.
    pub fn try_insert_n(&mut self, pos: Option<K>, count: usize, value: T) -> Result<(), Shortfall>
    where
        T: Clone,
    {
        let before = self.position(pos);
        if count > self.free.len() {
            return Err(Shortfall {
                requested: count,
                available: self.free.len(),
            });
        }
        if count == 0 {
            return Ok(());
        }

        let (first, last) = self.free.take_front(&mut self.arena, count);

        let mut key = first;
        while key != last {
            let node = self.arena.node_mut(key);
            node.value = value.clone();
            node.live = true;
            key = node.next;
        }
        let node = self.arena.node_mut(last);
        node.value = value;
        node.live = true;

        self.active
            .link_run_before(&mut self.arena, before, first, last, count);
        Ok(())
    }

    // ========================================================================
    // Removal (relink to the free pool, values stay stale)
    // ========================================================================

    /// Removes the back element. Returns `false` if the list was empty.
    #[inline]
    pub fn pop_back(&mut self) -> bool {
        let key = self.active.tail();
        if key.is_none() {
            return false;
        }
        self.retire(key);
        true
    }

    /// Removes the front element. Returns `false` if the list was empty.
    #[inline]
    pub fn pop_front(&mut self) -> bool {
        let key = self.active.head();
        if key.is_none() {
            return false;
        }
        self.retire(key);
        true
    }

    /// Removes the element at `key`.
    ///
    /// Returns `false` if `key` is not an element of this list.
    #[inline]
    pub fn erase(&mut self, key: K) -> bool {
        if !self.arena.is_live(key) {
            return false;
        }
        self.retire(key);
        true
    }

    /// Removes the elements from `first` up to, but not including, `last`
    /// (`None` meaning the end of the list).
    ///
    /// Returns the number of elements removed.
    ///
    /// # Panics
    ///
    /// Panics if `first` or `last` is not an element of this list, or if
    /// `last` does not come after `first`.
    pub fn erase_range(&mut self, first: K, last: Option<K>) -> usize {
        let end = self.position(last);
        if first == end {
            return 0;
        }
        self.assert_live(first);

        let (count, run_last) = self
            .active
            .measure(&self.arena, first, end)
            .expect("range end does not follow range start");

        self.active
            .unlink_run(&mut self.arena, first, run_last, count);
        self.arena.mark_run(first, count, false);
        self.free
            .link_run_before(&mut self.arena, K::NONE, first, run_last, count);
        count
    }

    /// Removes all elements. Capacity is unchanged.
    pub fn clear(&mut self) {
        if let Some((first, last, count)) = self.active.take_all() {
            self.arena.mark_run(first, count, false);
            self.free
                .link_run_before(&mut self.arena, K::NONE, first, last, count);
        }
    }

    // ========================================================================
    // Splice within this list
    // ========================================================================

    /// Moves the element at `key` before `pos` (or to the back if `pos`
    /// is `None`). The key stays valid.
    ///
    /// # Panics
    ///
    /// Panics if `key` or `pos` is not an element of this list.
    pub fn splice(&mut self, pos: Option<K>, key: K) {
        let before = self.position(pos);
        self.assert_live(key);
        if before == key || self.arena.node(key).next == before {
            return;
        }
        self.active.move_run_before(&mut self.arena, before, key, key);
    }

    /// Moves the elements from `first` up to, but not including, `last`
    /// before `pos`. Keys stay valid.
    ///
    /// O(k) for a range of `k` elements: the range is walked once to check
    /// it. The relink itself is O(1).
    ///
    /// # Panics
    ///
    /// Panics if `first`, `last`, or `pos` is not an element of this list,
    /// if `last` does not follow `first`, or if `pos` lies inside the range.
    /// The list is unchanged when it panics.
    pub fn splice_range(&mut self, pos: Option<K>, first: K, last: Option<K>) {
        let before = self.position(pos);
        let end = self.position(last);
        if first == end {
            return;
        }
        self.assert_live(first);

        let mut run_last = K::NONE;
        let mut key = first;
        while key != end {
            assert!(key.is_some(), "range end does not follow range start");
            assert!(key != before, "splice position lies inside the moved range");
            run_last = key;
            key = self.arena.node(key).next;
        }
        if before == end {
            return;
        }

        self.active
            .move_run_before(&mut self.arena, before, first, run_last);
    }

    // ========================================================================
    // Splice from another list (capacity-preserving exchange)
    // ========================================================================

    /// Moves the element at `key` out of `other` and inserts it before `pos`.
    ///
    /// Both capacities are preserved: this list spends one free node on the
    /// arriving element, and `other` gets the vacated node back in its free
    /// pool. Returns the element's key in this list.
    ///
    /// Each list owns its nodes, so the value is swapped into one of this
    /// list's free nodes rather than relinked: the cost is two moves of `T`
    /// plus O(1) relinking. Keep that in mind for large `T`.
    ///
    /// # Errors
    ///
    /// Returns [`Shortfall`] if this list has no free node. Neither list
    /// is changed.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not an element of `other`, or `pos` is not an
    /// element of this list.
    pub fn splice_from(&mut self, pos: Option<K>, other: &mut Self, key: K) -> Result<K, Shortfall> {
        let before = self.position(pos);
        other.assert_live(key);
        let dest = self.free.head();
        if dest.is_none() {
            return Err(Shortfall {
                requested: 1,
                available: 0,
            });
        }

        self.free.unlink(&mut self.arena, dest);
        let node = self.arena.node_mut(dest);
        mem::swap(&mut node.value, &mut other.arena.node_mut(key).value);
        node.live = true;
        self.active.link_before(&mut self.arena, before, dest);

        other.retire(key);
        Ok(dest)
    }

    /// Moves the elements of `other` from `first` up to, but not including,
    /// `last` (`None` meaning the end of `other`) and inserts them before
    /// `pos`, keeping their order.
    ///
    /// Moving `k` elements costs this list `k` free nodes and gives `other`
    /// `k` free nodes back, so neither capacity changes. Returns `k`.
    ///
    /// O(k): the range is walked once to count it, and each value is swapped
    /// into a free node of this list (two moves of `T` per element). Only the
    /// relinking of the run is O(1).
    ///
    /// # Errors
    ///
    /// Returns [`Shortfall`] if this list has fewer than `k` free nodes.
    /// Neither list is changed.
    ///
    /// # Panics
    ///
    /// Panics if `first`/`last` are not elements of `other` with `last`
    /// following `first`, or if `pos` is not an element of this list.
    pub fn splice_range_from(
        &mut self,
        pos: Option<K>,
        other: &mut Self,
        first: K,
        last: Option<K>,
    ) -> Result<usize, Shortfall> {
        let before = self.position(pos);
        let end = other.position(last);
        if first == end {
            return Ok(0);
        }
        other.assert_live(first);

        let (count, src_last) = other
            .active
            .measure(&other.arena, first, end)
            .expect("range end does not follow range start");
        if count > self.free.len() {
            return Err(Shortfall {
                requested: count,
                available: self.free.len(),
            });
        }

        let (dest_first, dest_last) = self.free.take_front(&mut self.arena, count);

        let mut src = first;
        let mut dest = dest_first;
        for _ in 0..count {
            let src_node = other.arena.node_mut(src);
            let dest_node = self.arena.node_mut(dest);
            mem::swap(&mut dest_node.value, &mut src_node.value);
            dest_node.live = true;
            src_node.live = false;
            src = src_node.next;
            dest = dest_node.next;
        }

        self.active
            .link_run_before(&mut self.arena, before, dest_first, dest_last, count);
        other
            .active
            .unlink_run(&mut other.arena, first, src_last, count);
        other
            .free
            .link_run_before(&mut other.arena, K::NONE, first, src_last, count);
        Ok(count)
    }

    // ========================================================================
    // Access
    // ========================================================================

    /// Returns a reference to the element at `key`.
    ///
    /// Returns `None` if `key` is not an element of this list.
    #[inline]
    pub fn get(&self, key: K) -> Option<&T> {
        self.arena
            .get(key)
            .filter(|node| node.live)
            .map(|node| &node.value)
    }

    /// Returns a mutable reference to the element at `key`.
    #[inline]
    pub fn get_mut(&mut self, key: K) -> Option<&mut T> {
        self.arena
            .get_mut(key)
            .filter(|node| node.live)
            .map(|node| &mut node.value)
    }

    /// Returns a reference to the front element.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.arena.get(self.active.head()).map(|node| &node.value)
    }

    /// Returns a mutable reference to the front element.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        let head = self.active.head();
        self.arena.get_mut(head).map(|node| &mut node.value)
    }

    /// Returns a reference to the back element.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.arena.get(self.active.tail()).map(|node| &node.value)
    }

    /// Returns a mutable reference to the back element.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        let tail = self.active.tail();
        self.arena.get_mut(tail).map(|node| &mut node.value)
    }

    /// Returns the key of the element after `key`.
    ///
    /// Returns `None` if `key` is the back or not an element of this list.
    #[inline]
    pub fn next_key(&self, key: K) -> Option<K> {
        self.arena
            .get(key)
            .filter(|node| node.live)
            .and_then(|node| node.next.into_option())
    }

    /// Returns the key of the element before `key`.
    ///
    /// Returns `None` if `key` is the front or not an element of this list.
    #[inline]
    pub fn prev_key(&self, key: K) -> Option<K> {
        self.arena
            .get(key)
            .filter(|node| node.live)
            .and_then(|node| node.prev.into_option())
    }

    // ========================================================================
    // Ordering
    // ========================================================================

    /// Sorts the list in ascending order. Stable, O(n log n), no allocation.
    ///
    /// Keys stay attached to their values.
    #[inline]
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        self.active.sort_by(&mut self.arena, |a, b| a.cmp(b));
    }

    /// Sorts the list with a comparator. Stable, O(n log n), no allocation.
    #[inline]
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.active.sort_by(&mut self.arena, compare);
    }

    // ========================================================================
    // Iteration
    // ========================================================================

    /// Returns an iterator over references to elements, front to back.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T, K> {
        Iter {
            arena: &self.arena,
            front: self.active.head(),
            back: self.active.tail(),
        }
    }

    /// Returns an iterator over mutable references to elements, front to back.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T, K> {
        IterMut {
            front: self.active.head(),
            back: self.active.tail(),
            arena: &mut self.arena,
            _marker: PhantomData,
        }
    }

    /// Returns an iterator over keys, front to back.
    ///
    /// Useful when you plan to modify the list while walking it
    /// (collect keys first).
    #[inline]
    pub fn keys(&self) -> Keys<'_, T, K> {
        Keys {
            arena: &self.arena,
            front: self.active.head(),
            back: self.active.tail(),
        }
    }

    /// Returns a cursor positioned at the front of the list.
    ///
    /// See [`CursorMut`] for usage examples.
    #[inline]
    pub fn cursor_front(&mut self) -> CursorMut<'_, T, K> {
        let current = self.active.head();
        CursorMut {
            list: self,
            current,
        }
    }

    /// Returns a cursor positioned at the back of the list.
    #[inline]
    pub fn cursor_back(&mut self) -> CursorMut<'_, T, K> {
        let current = self.active.tail();
        CursorMut {
            list: self,
            current,
        }
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Moves a live node to the back of the free pool.
    #[inline]
    fn retire(&mut self, key: K) {
        self.active.unlink(&mut self.arena, key);
        self.arena.node_mut(key).live = false;
        self.free.link_back(&mut self.arena, key);
    }

    /// Resolves an insertion position to a raw link target.
    #[inline]
    fn position(&self, pos: Option<K>) -> K {
        if let Some(key) = pos {
            self.assert_live(key);
        }
        K::from_option(pos)
    }

    #[inline]
    fn assert_live(&self, key: K) {
        assert!(self.arena.is_live(key), "key is not an element of this list");
    }
}

// =============================================================================
// Trait impls
// =============================================================================

impl<T: fmt::Debug, K: Key> fmt::Debug for RigidList<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, K: Key> PartialEq for RigidList<T, K> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, K: Key> Eq for RigidList<T, K> {}

impl<T: Clone + Default, K: Key> Clone for RigidList<T, K> {
    fn clone(&self) -> Self {
        let mut out = Self::with_capacity(self.capacity());
        for value in self {
            let pushed = out.try_push_back(value.clone());
            debug_assert!(pushed.is_ok());
        }
        out
    }
}

impl<'a, T, K: Key> IntoIterator for &'a RigidList<T, K> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, K: Key> IntoIterator for &'a mut RigidList<T, K> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

// =============================================================================
// Cursor
// =============================================================================

/// A cursor with mutable access to elements and in-place insert/erase.
///
/// Erasing through the cursor moves the node to the free pool and
/// advances; inserting takes a node from the free pool. Neither allocates.
///
/// # Example
///
/// ```
/// use nexus_rigid::RigidList;
///
/// #[derive(Debug, Default)]
/// struct Order { qty: u64 }
///
/// let mut queue: RigidList<Order> = RigidList::with_capacity(100);
///
/// queue.try_push_back(Order { qty: 100 }).unwrap();
/// queue.try_push_back(Order { qty: 50 }).unwrap();
///
/// let mut incoming_qty = 120u64;
/// let mut cursor = queue.cursor_front();
///
/// while let Some(resting) = cursor.current_mut() {
///     let fill = incoming_qty.min(resting.qty);
///     resting.qty -= fill;
///     incoming_qty -= fill;
///
///     if resting.qty == 0 {
///         cursor.erase_current(); // Recycles and advances
///     } else {
///         cursor.move_next();
///     }
///
///     if incoming_qty == 0 {
///         break;
///     }
/// }
///
/// assert_eq!(queue.len(), 1);
/// assert_eq!(queue.front().map(|o| o.qty), Some(30));
/// assert_eq!(queue.capacity(), 100);
/// ```
pub struct CursorMut<'a, T, K: Key> {
    list: &'a mut RigidList<T, K>,
    current: K,
}

impl<T, K: Key> CursorMut<'_, T, K> {
    /// Returns a reference to the current element.
    ///
    /// Returns `None` if the cursor is exhausted (past the end of the list).
    #[inline]
    pub fn current(&self) -> Option<&T> {
        self.list.arena.get(self.current).map(|node| &node.value)
    }

    /// Returns a mutable reference to the current element.
    #[inline]
    pub fn current_mut(&mut self) -> Option<&mut T> {
        self.list
            .arena
            .get_mut(self.current)
            .map(|node| &mut node.value)
    }

    /// Returns the key of the current element.
    #[inline]
    pub fn key(&self) -> Option<K> {
        self.current.into_option()
    }

    /// Advances to the next element.
    ///
    /// If already exhausted, the cursor stays exhausted.
    #[inline]
    pub fn move_next(&mut self) {
        if self.current.is_some() {
            self.current = self.list.arena.node(self.current).next;
        }
    }

    /// Moves to the previous element.
    ///
    /// Moving back from the front exhausts the cursor.
    #[inline]
    pub fn move_prev(&mut self) {
        if self.current.is_some() {
            self.current = self.list.arena.node(self.current).prev;
        }
    }

    /// Returns a reference to the next element without moving.
    #[inline]
    pub fn peek_next(&self) -> Option<&T> {
        if self.current.is_none() {
            return None;
        }
        let next = self.list.arena.node(self.current).next;
        self.list.arena.get(next).map(|node| &node.value)
    }

    /// Removes the current element and advances to the next.
    ///
    /// Returns `false` if the cursor is exhausted.
    #[inline]
    pub fn erase_current(&mut self) -> bool {
        if self.current.is_none() {
            return false;
        }
        let key = self.current;
        self.current = self.list.arena.node(key).next;
        self.list.retire(key);
        true
    }

    /// Inserts a value before the current element, or at the back if the
    /// cursor is exhausted. The cursor does not move.
    ///
    /// # Errors
    ///
    /// Returns `Err(Full(value))` if no free node is left.
    #[inline]
    pub fn try_insert_before(&mut self, value: T) -> Result<K, Full<T>> {
        let pos = self.current.into_option();
        self.list.try_insert(pos, value)
    }

    /// Returns `true` if the cursor has no current element.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.current.is_none()
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// Iterator over references to list elements.
pub struct Iter<'a, T, K: Key> {
    arena: &'a Arena<T, K>,
    front: K,
    back: K,
}

impl<'a, T, K: Key> Iterator for Iter<'a, T, K> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front.is_none() {
            return None;
        }

        let node = self.arena.node(self.front);

        // Check if we've met in the middle
        if self.front == self.back {
            self.front = K::NONE;
            self.back = K::NONE;
        } else {
            self.front = node.next;
        }

        Some(&node.value)
    }
}

impl<T, K: Key> DoubleEndedIterator for Iter<'_, T, K> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.back.is_none() {
            return None;
        }

        let node = self.arena.node(self.back);

        if self.front == self.back {
            self.front = K::NONE;
            self.back = K::NONE;
        } else {
            self.back = node.prev;
        }

        Some(&node.value)
    }
}

/// Iterator over mutable references to list elements.
pub struct IterMut<'a, T, K: Key> {
    arena: &'a mut Arena<T, K>,
    front: K,
    back: K,
    _marker: PhantomData<&'a mut T>,
}

impl<'a, T, K: Key> Iterator for IterMut<'a, T, K> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front.is_none() {
            return None;
        }

        let node = self.arena.node_mut(self.front);

        if self.front == self.back {
            self.front = K::NONE;
            self.back = K::NONE;
        } else {
            self.front = node.next;
        }

        // Extend lifetime - safe because we visit each node exactly once
        Some(unsafe { &mut *((&mut node.value) as *mut T) })
    }
}

impl<T, K: Key> DoubleEndedIterator for IterMut<'_, T, K> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.back.is_none() {
            return None;
        }

        let node = self.arena.node_mut(self.back);

        if self.front == self.back {
            self.front = K::NONE;
            self.back = K::NONE;
        } else {
            self.back = node.prev;
        }

        // Extend lifetime - safe because we visit each node exactly once
        Some(unsafe { &mut *((&mut node.value) as *mut T) })
    }
}

/// Iterator over keys in the list.
pub struct Keys<'a, T, K: Key> {
    arena: &'a Arena<T, K>,
    front: K,
    back: K,
}

impl<T, K: Key> Iterator for Keys<'_, T, K> {
    type Item = K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front.is_none() {
            return None;
        }

        let key = self.front;
        if self.front == self.back {
            self.front = K::NONE;
            self.back = K::NONE;
        } else {
            self.front = self.arena.node(key).next;
        }

        Some(key)
    }
}

impl<T, K: Key> DoubleEndedIterator for Keys<'_, T, K> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.back.is_none() {
            return None;
        }

        let key = self.back;
        if self.front == self.back {
            self.front = K::NONE;
            self.back = K::NONE;
        } else {
            self.back = self.arena.node(key).prev;
        }

        Some(key)
    }
}

//! Doubly-linked sequence bookkeeping over an arena.
//!
//! A [`Chain`] is just head, tail, and length. The links themselves live in
//! the nodes of an [`Arena`]. A list owns two chains over one arena: the
//! active sequence and the free pool. Every operation here is a relink;
//! nothing allocates and no value is moved.
//!
//! Runs are contiguous stretches `first..=last` of a chain. Moving a run
//! costs O(1) no matter its length, as long as the caller already knows
//! the run's length for bookkeeping.

use std::cmp::Ordering;

use crate::Key;
use crate::arena::Arena;

#[derive(Debug, Clone, Copy)]
pub(crate) struct Chain<K: Key> {
    head: K,
    tail: K,
    len: usize,
}

impl<K: Key> Chain<K> {
    pub(crate) const fn new() -> Self {
        Self {
            head: K::NONE,
            tail: K::NONE,
            len: 0,
        }
    }

    #[inline]
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub(crate) const fn head(&self) -> K {
        self.head
    }

    #[inline]
    pub(crate) const fn tail(&self) -> K {
        self.tail
    }

    // ========================================================================
    // Single-node links
    // ========================================================================

    /// Links an unlinked node at the back.
    #[inline]
    pub(crate) fn link_back<T>(&mut self, arena: &mut Arena<T, K>, key: K) {
        self.link_run_before(arena, K::NONE, key, key, 1);
    }

    /// Links an unlinked node before `before`, or at the back if `before` is `NONE`.
    #[inline]
    pub(crate) fn link_before<T>(&mut self, arena: &mut Arena<T, K>, before: K, key: K) {
        self.link_run_before(arena, before, key, key, 1);
    }

    /// Unlinks a node of this chain.
    #[inline]
    pub(crate) fn unlink<T>(&mut self, arena: &mut Arena<T, K>, key: K) {
        self.unlink_run(arena, key, key, 1);
    }

    // ========================================================================
    // Run links
    // ========================================================================

    /// Links the detached run `first..=last` of `count` nodes before `before`.
    ///
    /// `before` may be `NONE` to append at the back.
    pub(crate) fn link_run_before<T>(
        &mut self,
        arena: &mut Arena<T, K>,
        before: K,
        first: K,
        last: K,
        count: usize,
    ) {
        self.attach(arena, before, first, last);
        self.len += count;
    }

    /// Detaches the run `first..=last` of `count` nodes from this chain.
    ///
    /// The run keeps its internal links; its outer links are cleared.
    pub(crate) fn unlink_run<T>(&mut self, arena: &mut Arena<T, K>, first: K, last: K, count: usize) {
        self.detach(arena, first, last);
        self.len -= count;
    }

    /// Moves the run `first..=last` before `before` within this chain.
    ///
    /// Length is unchanged, so the run is never counted.
    pub(crate) fn move_run_before<T>(&mut self, arena: &mut Arena<T, K>, before: K, first: K, last: K) {
        self.detach(arena, first, last);
        self.attach(arena, before, first, last);
    }

    /// Detaches the first `count` nodes and returns them as a run `(first, last)`.
    ///
    /// `count` must be between 1 and `self.len()`.
    pub(crate) fn take_front<T>(&mut self, arena: &mut Arena<T, K>, count: usize) -> (K, K) {
        debug_assert!(count > 0 && count <= self.len);
        let first = self.head;
        let mut last = first;
        for _ in 1..count {
            last = arena.node(last).next;
        }
        self.unlink_run(arena, first, last, count);
        (first, last)
    }

    /// Detaches the last `count` nodes and returns them as a run `(first, last)`.
    ///
    /// `count` must be between 1 and `self.len()`.
    pub(crate) fn take_back<T>(&mut self, arena: &mut Arena<T, K>, count: usize) -> (K, K) {
        debug_assert!(count > 0 && count <= self.len);
        let last = self.tail;
        let mut first = last;
        for _ in 1..count {
            first = arena.node(first).prev;
        }
        self.unlink_run(arena, first, last, count);
        (first, last)
    }

    /// Empties the chain, returning everything as one run `(first, last, count)`.
    pub(crate) fn take_all(&mut self) -> Option<(K, K, usize)> {
        if self.is_empty() {
            return None;
        }
        let run = (self.head, self.tail, self.len);
        *self = Self::new();
        Some(run)
    }

    /// Measures the run that starts at `first` and stops before `end`.
    ///
    /// Returns the node count and the last node of the run, or `None` if
    /// `end` is not reached by walking forward from `first` (`end` may be
    /// `NONE` for "to the back").
    pub(crate) fn measure<T>(&self, arena: &Arena<T, K>, first: K, end: K) -> Option<(usize, K)> {
        let mut count = 0;
        let mut last = K::NONE;
        let mut key = first;
        while key != end {
            if key.is_none() {
                return None;
            }
            count += 1;
            last = key;
            key = arena.node(key).next;
        }
        Some((count, last))
    }

    #[inline]
    fn attach<T>(&mut self, arena: &mut Arena<T, K>, before: K, first: K, last: K) {
        let prev = if before.is_some() {
            arena.node(before).prev
        } else {
            self.tail
        };

        arena.node_mut(first).prev = prev;
        arena.node_mut(last).next = before;

        if prev.is_some() {
            arena.node_mut(prev).next = first;
        } else {
            self.head = first;
        }

        if before.is_some() {
            arena.node_mut(before).prev = last;
        } else {
            self.tail = last;
        }
    }

    #[inline]
    fn detach<T>(&mut self, arena: &mut Arena<T, K>, first: K, last: K) {
        let prev = arena.node(first).prev;
        let next = arena.node(last).next;

        if prev.is_some() {
            arena.node_mut(prev).next = next;
        } else {
            self.head = next;
        }

        if next.is_some() {
            arena.node_mut(next).prev = prev;
        } else {
            self.tail = prev;
        }

        arena.node_mut(first).prev = K::NONE;
        arena.node_mut(last).next = K::NONE;
    }

    // ========================================================================
    // Ordering
    // ========================================================================

    /// Stable merge sort by relinking. Values never move between nodes.
    pub(crate) fn sort_by<T, F>(&mut self, arena: &mut Arena<T, K>, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        if self.len < 2 {
            return;
        }

        let head = merge_sort(arena, self.head, self.len, &mut compare);

        // Sorting only maintained `next`; rebuild `prev` and the tail.
        let mut prev = K::NONE;
        let mut key = head;
        while key.is_some() {
            let node = arena.node_mut(key);
            node.prev = prev;
            prev = key;
            key = node.next;
        }

        self.head = head;
        self.tail = prev;
    }
}

/// Sorts the `len` nodes starting at `head`, returning the new head.
/// The result is terminated by a `NONE` next link.
fn merge_sort<T, K: Key, F>(arena: &mut Arena<T, K>, head: K, len: usize, compare: &mut F) -> K
where
    F: FnMut(&T, &T) -> Ordering,
{
    if len <= 1 {
        if head.is_some() {
            arena.node_mut(head).next = K::NONE;
        }
        return head;
    }

    let half = len / 2;
    let mut mid = head;
    for _ in 1..half {
        mid = arena.node(mid).next;
    }
    let right = arena.node(mid).next;
    arena.node_mut(mid).next = K::NONE;

    let left = merge_sort(arena, head, half, compare);
    let right = merge_sort(arena, right, len - half, compare);
    merge(arena, left, right, compare)
}

fn merge<T, K: Key, F>(arena: &mut Arena<T, K>, mut left: K, mut right: K, compare: &mut F) -> K
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut head = K::NONE;
    let mut tail = K::NONE;

    while left.is_some() && right.is_some() {
        // Ties go left to keep the sort stable.
        let take_left = compare(&arena.node(left).value, &arena.node(right).value) != Ordering::Greater;
        let key = if take_left {
            let key = left;
            left = arena.node(left).next;
            key
        } else {
            let key = right;
            right = arena.node(right).next;
            key
        };

        if tail.is_some() {
            arena.node_mut(tail).next = key;
        } else {
            head = key;
        }
        tail = key;
    }

    let rest = if left.is_some() { left } else { right };
    if tail.is_some() {
        arena.node_mut(tail).next = rest;
    } else {
        head = rest;
    }
    head
}

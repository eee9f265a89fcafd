//! Node arena for a single list instance.
//!
//! The arena owns every node of one [`RigidList`](crate::RigidList),
//! whether the node currently sits in the active sequence or in the free
//! pool. Keys are indices into a slot vector and stay stable for the
//! lifetime of the node.
//!
//! Nodes are created and destroyed only while the list's capacity changes.
//! Destroyed slots are remembered and reused by later growth; trailing
//! vacant slots are released back to the allocator after a shrink.

use std::mem;

use crate::Key;

/// A storage cell: one element value plus its links in whichever chain owns it.
#[derive(Debug)]
pub(crate) struct Node<T, K: Key> {
    pub(crate) value: T,
    pub(crate) prev: K,
    pub(crate) next: K,
    /// `true` while the node belongs to the active sequence.
    pub(crate) live: bool,
}

#[derive(Debug)]
enum Slot<T, K: Key> {
    Occupied(Node<T, K>),
    Vacant,
}

#[derive(Debug)]
pub(crate) struct Arena<T, K: Key> {
    slots: Vec<Slot<T, K>>,
    /// Indices of destroyed slots, reused LIFO.
    vacant: Vec<K>,
    len: usize,
}

impl<T, K: Key> Arena<T, K> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            vacant: Vec::new(),
            len: 0,
        }
    }

    /// Number of nodes that exist.
    #[inline]
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// Makes room for `additional` more nodes in one allocation.
    ///
    /// # Panics
    ///
    /// Panics if the resulting node count would not fit the key type.
    pub(crate) fn reserve(&mut self, additional: usize) {
        let reused = self.vacant.len().min(additional);
        let fresh = additional - reused;
        let total = self.slots.len() + fresh;
        assert!(
            total <= K::NONE.as_usize(),
            "capacity exceeds key type maximum"
        );
        self.slots.reserve_exact(fresh);
    }

    /// Creates an unlinked, non-live node and returns its key.
    pub(crate) fn create(&mut self, value: T) -> K {
        let node = Node {
            value,
            prev: K::NONE,
            next: K::NONE,
            live: false,
        };
        self.len += 1;

        if let Some(key) = self.vacant.pop() {
            self.slots[key.as_usize()] = Slot::Occupied(node);
            return key;
        }

        let index = self.slots.len();
        assert!(
            index < K::NONE.as_usize(),
            "capacity exceeds key type maximum"
        );
        self.slots.push(Slot::Occupied(node));
        K::from_usize(index)
    }

    /// Destroys a node, returning its value. The node must already be unlinked.
    ///
    /// # Panics
    ///
    /// Panics if `key` does not name an existing node.
    pub(crate) fn destroy(&mut self, key: K) -> T {
        match mem::replace(&mut self.slots[key.as_usize()], Slot::Vacant) {
            Slot::Occupied(node) => {
                self.len -= 1;
                self.vacant.push(key);
                node.value
            }
            Slot::Vacant => panic!("invalid key"),
        }
    }

    /// Hands trailing vacant slots back to the allocator.
    pub(crate) fn release_tail(&mut self) {
        while matches!(self.slots.last(), Some(Slot::Vacant)) {
            self.slots.pop();
        }
        let end = self.slots.len();
        self.vacant.retain(|key| key.as_usize() < end);
        self.slots.shrink_to_fit();
        self.vacant.shrink_to_fit();
    }

    #[inline]
    pub(crate) fn get(&self, key: K) -> Option<&Node<T, K>> {
        if key.is_none() {
            return None;
        }
        match self.slots.get(key.as_usize()) {
            Some(Slot::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, key: K) -> Option<&mut Node<T, K>> {
        if key.is_none() {
            return None;
        }
        match self.slots.get_mut(key.as_usize()) {
            Some(Slot::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    /// Returns the node at `key`.
    ///
    /// # Panics
    ///
    /// Panics if `key` does not name an existing node.
    #[inline]
    pub(crate) fn node(&self, key: K) -> &Node<T, K> {
        self.get(key).expect("invalid key")
    }

    /// Returns the node at `key` mutably.
    ///
    /// # Panics
    ///
    /// Panics if `key` does not name an existing node.
    #[inline]
    pub(crate) fn node_mut(&mut self, key: K) -> &mut Node<T, K> {
        self.get_mut(key).expect("invalid key")
    }

    /// Returns `true` if `key` names a node of the active sequence.
    #[inline]
    pub(crate) fn is_live(&self, key: K) -> bool {
        self.get(key).is_some_and(|node| node.live)
    }

    /// Sets the `live` flag on `count` nodes starting at `first`.
    pub(crate) fn mark_run(&mut self, first: K, count: usize, live: bool) {
        let mut key = first;
        for _ in 0..count {
            let node = self.node_mut(key);
            node.live = live;
            key = node.next;
        }
    }

    /// Destroys `count` nodes starting at `first`, following `next` links.
    pub(crate) fn destroy_run(&mut self, first: K, count: usize) {
        let mut key = first;
        for _ in 0..count {
            let next = self.node(key).next;
            drop(self.destroy(key));
            key = next;
        }
    }
}

//! Fixed-capacity doubly-linked list for allocation-free hot paths.
//!
//! This crate provides [`RigidList`], a sequence container for latency-critical
//! systems that must not touch the allocator after startup. The key insight:
//! capacity is a property you set, not a side effect of inserting.
//!
//! # Design Philosophy
//!
//! Traditional lists allocate per element:
//!
//! ```text
//! LinkedList<T>  - one allocation per push, one free per pop
//! VecDeque<T>    - amortized growth, indices shift on middle removal
//! ```
//!
//! This crate preallocates every node and recycles them:
//!
//! ```text
//! active chain   - the elements, in order
//! free chain     - spare nodes, ready to be reused
//!
//! capacity = len + free_len
//! ```
//!
//! Benefits:
//! - **No allocation on insert or remove**: only [`RigidList::reserve`] allocates
//! - **Stable keys**: erasing from the middle does not invalidate other keys
//! - **O(1) splicing**: move single elements or whole ranges without copying
//! - **Bounded memory**: a full list rejects inserts instead of growing
//!
//! # Quick Start
//!
//! ```
//! use nexus_rigid::RigidList;
//!
//! // All nodes are created here
//! let mut queue: RigidList<u64> = RigidList::with_capacity(1000);
//!
//! // Insert returns a stable key for O(1) access later
//! let key = queue.try_push_back(42).unwrap();
//!
//! // O(1) removal from anywhere; the node goes back to the free pool
//! assert!(queue.erase(key));
//! assert_eq!(queue.capacity(), 1000);
//! ```
//!
//! # Capacity Errors
//!
//! Running out of free nodes is reported, never a panic:
//!
//! | Operation | On shortage |
//! |-----------|-------------|
//! | `try_push_back`, `try_push_front`, `try_insert` | `Err(`[`Full`]`(value))`, value handed back |
//! | `try_insert_n`, `splice_from`, `splice_range_from` | `Err(`[`Shortfall`]`)`, nothing moved |
//!
//! Both error types are all-or-nothing: a rejected operation leaves every
//! list exactly as it was.
//!
//! # Splicing
//!
//! | Operation | Scope | Capacity effect |
//! |-----------|-------|-----------------|
//! | [`splice`](RigidList::splice) | one element, same list | none |
//! | [`splice_range`](RigidList::splice_range) | range, same list | none |
//! | [`splice_from`](RigidList::splice_from) | one element, other list | none on either side |
//! | [`splice_range_from`](RigidList::splice_range_from) | range, other list | none on either side |
//!
//! Splicing from another list consumes free nodes in the destination and
//! returns the same number of nodes to the source's free pool.
//!
//! # Keys
//!
//! The key type `K` (default `u32`) sets the maximum capacity. Use a narrower
//! key to shrink the per-node footprint:
//!
//! ```
//! use nexus_rigid::RigidList;
//!
//! // At most u16::MAX nodes
//! let mut list: RigidList<u64, u16> = RigidList::with_capacity(512);
//! let key: u16 = list.try_push_back(7).unwrap();
//! assert_eq!(list.get(key), Some(&7));
//! ```
//!
//! # Logging
//!
//! Capacity changes are reported through the [`log`] facade: `trace` for
//! every resize and `debug` when shrinking drops elements from the list.

#![warn(missing_docs)]

mod arena;
mod chain;
pub mod error;
pub mod key;
pub mod list;

pub use error::{Full, Shortfall};
pub use key::Key;
pub use list::{CursorMut, Iter, IterMut, Keys, RigidList};

//! Rank-indexed list collection for Rust.
//!
//! This crate provides [`SBTreeList`], a sequence container backed by a
//! size-balanced binary tree in which every positional operation is
//! O(log n):
//!
//! - [`insert`](SBTreeList::insert) / [`remove`](SBTreeList::remove) - Mutate
//!   at an arbitrary position without shifting the tail
//! - [`get`](SBTreeList::get) and indexing by `usize` - Random positional
//!   access
//! - [`push_front`](SBTreeList::push_front) /
//!   [`push_back`](SBTreeList::push_back) and the matching pops - Deque-style
//!   end operations
//!
//! # Example
//!
//! ```
//! use sabi_tree::SBTreeList;
//!
//! let mut playlist = SBTreeList::new();
//! playlist.push_back("intro");
//! playlist.push_back("verse");
//! playlist.push_back("outro");
//!
//! // Splice into the middle in O(log n); everything after shifts right.
//! playlist.insert(2, "bridge");
//! assert_eq!(playlist[2], "bridge");
//! assert_eq!(playlist.len(), 4);
//!
//! // Positional order is preserved by iteration.
//! let order: Vec<_> = playlist.iter().copied().collect();
//! assert_eq!(order, ["intro", "verse", "bridge", "outro"]);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **O(log n) everywhere** - No position at which insertion or removal degenerates to O(n)
//! - **Purely positional** - Elements are never compared; duplicates and unordered data are fine
//! - **No unsafe code** - The tree lives in a slot arena addressed by niche-optimized handles
//!
//! # Implementation
//!
//! The list is a size-balanced binary tree: every node caches its subtree
//! size, positions are resolved by rank descent over those sizes, and
//! rotations after each insertion keep every grandchild subtree no larger
//! than its uncle subtree, which bounds the height to O(log n). Nodes are
//! slots in an arena and refer to each other by index, so teardown is a flat
//! sweep regardless of tree shape.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod raw;

pub mod sbtree_list;

pub use error::OutOfRangeError;
pub use sbtree_list::SBTreeList;

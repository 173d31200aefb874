//! # Adaptive Radix Tree Index
//!
//! This module implements the node hierarchy of an adaptive radix tree (ART)
//! used as a secondary index over a dictionary-encoded column. The tree is a
//! trie over the bytes of fixed-width binary-comparable keys: each level
//! consumes one key byte, and each internal node adapts its physical layout
//! to the number of distinct bytes that actually occur at its depth.
//!
//! ## Architecture Overview
//!
//! A bound query walks from the root with `lower_bound(key, 0)` or
//! `upper_bound(key, 0)`. Every node looks at exactly one byte, `key[depth]`,
//! and either recurses into the matching child, short-circuits into a
//! neighboring subtree's `begin()`, or resolves to its own `end()`. The walk
//! terminates at a leaf holding the half-open run of row positions for one
//! fully matched key, or at a boundary position for keys the index never
//! stored. Search cost is bounded by the key width, not the key count.
//!
//! ## Node Shapes
//!
//! - **Node4 / Node16**: sorted parallel arrays of partial keys and child
//!   slots, probed by linear scan and partition point respectively. Tail
//!   padding uses a sentinel byte with an empty child slot.
//!
//! - **Node48**: a 256-entry byte-to-slot table indexing into a compact
//!   48-slot child array; misses scan the table for the next populated byte.
//!
//! - **Node256**: one directly addressed child slot per possible byte.
//!
//! - **Leaf**: two stored position handles, `[range_begin, range_end)`.
//!
//! ```text
//!                       Node4 { 0x00 }
//!                             |
//!                       Node16 { 0x0a, 0x0b, ... }
//!                       /            \
//!              Leaf [0, 17)        Node4 { 0x00, 0x04 }
//!                                   /          \
//!                             Leaf [17, 20)  Leaf [20, 26)
//! ```
//!
//! Shape selection is a construction-time decision by child count (up to 4,
//! 16, 48, then 256) and is never observable through query results.
//!
//! ## Construction
//!
//! [`ArtTree::build`] bulk-loads the whole tree bottom-up from the column's
//! distinct keys in ascending order and never mutates it afterwards. There
//! is no incremental insert or delete; a changed column means a rebuild.
//!
//! ## Thread Safety
//!
//! A built tree is immutable and owns its nodes exclusively, so `&ArtTree`
//! is freely shareable across threads whenever the position type allows it.

mod direct;
mod leaf;
mod node;
mod sorted;
mod tree;

pub use direct::{Node256, Node48, NODE48_CAPACITY};
pub use leaf::Leaf;
pub use node::{Bound, Node};
pub use sorted::{Node16, Node4, NODE16_CAPACITY, NODE4_CAPACITY};
pub use tree::{ArtTree, KeyRun, TreeStats};

//! # artindex - Adaptive Radix Tree Secondary Index
//!
//! artindex answers range-bound queries ("first row position whose value is
//! at least X") over a dictionary-encoded column. Instead of binary-searching
//! the full dictionary, it walks a trie over the bytes of fixed-width
//! order-preserving keys, so a probe costs one node per key byte regardless
//! of how many distinct values the column holds. The design follows the
//! adaptive radix tree: internal nodes switch between 4-, 16-, 48-, and
//! 256-way physical layouts depending on the fan-out actually present.
//!
//! - **Bulk-built, immutable**: one bottom-up construction pass, then a
//!   read-only tree shared freely across threads
//! - **Bounded probes**: search cost scales with key width, not key count
//! - **Adaptive layout**: dense levels pay for direct addressing, sparse
//!   levels stay compact
//!
//! ## Quick Start
//!
//! ```
//! use artindex::{ArtTree, BinaryComparable, KeyRun};
//!
//! // Three distinct value ids with their contiguous row-position runs.
//! let runs = vec![
//!     KeyRun::new(BinaryComparable::from_value_id(3), 0usize, 4),
//!     KeyRun::new(BinaryComparable::from_value_id(7), 4, 9),
//!     KeyRun::new(BinaryComparable::from_value_id(9), 9, 12),
//! ];
//! let tree = ArtTree::build(runs)?;
//!
//! // Rows holding id 7 occupy positions [4, 9).
//! assert_eq!(tree.lower_bound(&BinaryComparable::from_value_id(7))?, 4);
//! assert_eq!(tree.upper_bound(&BinaryComparable::from_value_id(7))?, 9);
//! // Id 5 was never stored: both bounds land on the first larger run.
//! assert_eq!(tree.lower_bound(&BinaryComparable::from_value_id(5))?, 4);
//! # Ok::<(), eyre::Report>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────┐
//! │       ArtTree (build + queries)       │
//! ├───────────────────────────────────────┤
//! │  Node contract (bound / begin / end)  │
//! ├─────────┬─────────┬─────────┬─────────┤
//! │  Node4  │ Node16  │ Node48  │ Node256 │
//! ├─────────┴─────────┴─────────┴─────────┤
//! │     Leaf [range_begin, range_end)     │
//! ├───────────────────────────────────────┤
//! │  BinaryComparable keys (big-endian)   │
//! └───────────────────────────────────────┘
//! ```
//!
//! Positions are a caller-chosen `Copy` type: plain offsets, iterators into a
//! row-position sequence, whatever the surrounding storage layer uses. The
//! tree copies them around and hands them back without ever looking inside.
//!
//! ## Module Overview
//!
//! - [`art`]: node shapes, the search contract, bulk construction
//! - [`key`]: fixed-width order-preserving key encoding

pub mod art;
pub mod key;

pub use art::{ArtTree, Bound, KeyRun, Leaf, Node, Node16, Node256, Node4, Node48, TreeStats};
pub use key::BinaryComparable;

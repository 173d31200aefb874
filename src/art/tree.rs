//! Bulk construction and the query facade.
//!
//! An index is built once from the distinct keys of a column, sorted
//! ascending, each paired with the contiguous run of row positions holding
//! that key. Construction is depth-first and bottom-up: runs are grouped by
//! their byte at the current depth, each group becomes a child subtree keyed
//! by that byte, and the number of groups picks the node shape.
//!
//! ```text
//! keys (width 2)    [00 01] [00 02]     [03 11] [03 12] [03 13]
//!
//! depth 0:            \       /             \      |      /
//!                   group 0x00               group 0x03
//! depth 1:          [01]   [02]           [11]   [12]   [13]
//!                     |      |              |      |      |
//!                   Leaf   Leaf           Leaf   Leaf   Leaf
//! ```
//!
//! Every leaf sits at full key depth. A query that diverges from the stored
//! keys therefore always resolves at an internal node, which still has the
//! sorted neighborhood needed to pick the next-larger subtree; a leaf holds
//! no key bytes and could not re-check anything. Distinct keys sharing a long
//! prefix produce chains of single-child `Node4`s, one array probe per level.
//!
//! The built tree is immutable. Shared references to it may be queried from
//! any number of threads at once; rebuilding from scratch is the only way to
//! reflect a changed column.

use eyre::{ensure, Result};

use crate::key::BinaryComparable;

use super::leaf::Leaf;
use super::node::Node;

/// One distinct key and the half-open run of row positions holding it.
///
/// The bulk loader produces these by scanning the column's sorted position
/// sequence and cutting it at each value change.
#[derive(Debug, Clone)]
pub struct KeyRun<P> {
    pub key: BinaryComparable,
    pub begin: P,
    pub end: P,
}

impl<P> KeyRun<P> {
    pub fn new(key: BinaryComparable, begin: P, end: P) -> Self {
        Self { key, begin, end }
    }
}

/// Node and leaf counts of a built tree, for diagnostics and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub node4_count: usize,
    pub node16_count: usize,
    pub node48_count: usize,
    pub node256_count: usize,
    pub leaf_count: usize,
    /// Deepest leaf, counted in edges from the root. Zero for a tree whose
    /// root is itself a leaf, otherwise equal to the key width.
    pub height: usize,
}

/// An immutable adaptive radix tree over fixed-width binary-comparable keys.
pub struct ArtTree<P> {
    root: Node<P>,
    key_width: usize,
}

impl<P: Copy> ArtTree<P> {
    /// Builds a tree from runs sorted strictly ascending by key.
    ///
    /// All keys must share one width of at least one byte. A single run
    /// collapses the whole tree to a bare root leaf.
    pub fn build(runs: Vec<KeyRun<P>>) -> Result<Self> {
        ensure!(!runs.is_empty(), "cannot build an index over zero keys");
        let key_width = runs[0].key.len();
        ensure!(key_width > 0, "index keys must be at least one byte wide");
        for run in &runs {
            ensure!(
                run.key.len() == key_width,
                "ragged key width: expected {} bytes, got {}",
                key_width,
                run.key.len()
            );
        }
        for pair in runs.windows(2) {
            ensure!(
                pair[0].key < pair[1].key,
                "bulk-load input must be strictly ascending by key"
            );
        }

        let root = if runs.len() == 1 {
            Node::Leaf(Leaf::new(runs[0].begin, runs[0].end))
        } else {
            build_subtree(&runs, 0, key_width)?
        };

        Ok(Self { root, key_width })
    }

    /// First position whose key is >= `key`.
    pub fn lower_bound(&self, key: &BinaryComparable) -> Result<P> {
        self.check_width(key)?;
        self.root.lower_bound(key, 0)
    }

    /// First position whose key is > `key`.
    pub fn upper_bound(&self, key: &BinaryComparable) -> Result<P> {
        self.check_width(key)?;
        self.root.upper_bound(key, 0)
    }

    /// Position of the first indexed row.
    pub fn begin(&self) -> Result<P> {
        self.root.begin()
    }

    /// Position one past the last indexed row.
    pub fn end(&self) -> Result<P> {
        self.root.end()
    }

    /// Width in bytes shared by every indexed key.
    pub fn key_width(&self) -> usize {
        self.key_width
    }

    pub fn root(&self) -> &Node<P> {
        &self.root
    }

    /// Walks the tree and tallies its shape.
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        collect_stats(&self.root, 0, &mut stats);
        stats
    }

    fn check_width(&self, key: &BinaryComparable) -> Result<()> {
        ensure!(
            key.len() == self.key_width,
            "query key is {} bytes, index keys are {}",
            key.len(),
            self.key_width
        );
        Ok(())
    }
}

/// Builds the subtree for `runs`, all of which share the key prefix below
/// `depth`. Groups runs by the byte at `depth`; each group becomes one child.
fn build_subtree<P: Copy>(runs: &[KeyRun<P>], depth: usize, key_width: usize) -> Result<Node<P>> {
    let mut children: Vec<(u8, Node<P>)> = Vec::new();
    let mut group_start = 0;
    while group_start < runs.len() {
        let partial_key = runs[group_start].key[depth];
        let mut group_end = group_start + 1;
        while group_end < runs.len() && runs[group_end].key[depth] == partial_key {
            group_end += 1;
        }
        let group = &runs[group_start..group_end];
        let child = if depth + 1 == key_width {
            // Keys are distinct, so a group that has consumed every byte
            // holds exactly one run.
            ensure!(
                group.len() == 1,
                "{} runs share an exhausted key at depth {}",
                group.len(),
                depth
            );
            Node::Leaf(Leaf::new(group[0].begin, group[0].end))
        } else {
            build_subtree(group, depth + 1, key_width)?
        };
        children.push((partial_key, child));
        group_start = group_end;
    }
    Node::from_children(children)
}

fn collect_stats<P: Copy>(node: &Node<P>, depth: usize, stats: &mut TreeStats) {
    match node {
        Node::Node4(inner) => {
            stats.node4_count += 1;
            for child in inner.live_children() {
                collect_stats(child, depth + 1, stats);
            }
        }
        Node::Node16(inner) => {
            stats.node16_count += 1;
            for child in inner.live_children() {
                collect_stats(child, depth + 1, stats);
            }
        }
        Node::Node48(inner) => {
            stats.node48_count += 1;
            for child in inner.live_children() {
                collect_stats(child, depth + 1, stats);
            }
        }
        Node::Node256(inner) => {
            stats.node256_count += 1;
            for child in inner.live_children() {
                collect_stats(child, depth + 1, stats);
            }
        }
        Node::Leaf(_) => {
            stats.leaf_count += 1;
            stats.height = stats.height.max(depth);
        }
    }
}

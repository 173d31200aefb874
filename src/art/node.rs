//! Node variants and the shared search contract.
//!
//! Every inner node shape answers the same three questions, and the tree walk
//! is written entirely in terms of them:
//!
//! - `bound(key, depth, which)`: position of the lower or upper bound of `key`,
//!   inspecting `key[depth]` at this node
//! - `begin()`: position of the first row anywhere below this node
//! - `end()`: position one past the last row anywhere below this node
//!
//! ## Search cases
//!
//! At each inner node the partial key `key[depth]` lands in one of three
//! cases, and each case fully decides the answer:
//!
//! 1. A child exists for exactly `key[depth]`: the bound lives somewhere in
//!    that child's subtree, so recurse with `depth + 1`.
//! 2. No exact child, but a child exists for some larger byte: every row below
//!    that child compares greater than the query, so the answer is that
//!    subtree's `begin()`. Lower and upper bound coincide here.
//! 3. No child at or above `key[depth]`: every row below this node compares
//!    less than the query, so the answer is this node's own `end()`.
//!
//! Case 2 and 3 are where bounds for absent keys resolve; only case 1 ever
//! descends further. `begin()` follows smallest-byte children down to a leaf's
//! `range_begin`; `end()` follows largest-byte children down to a leaf's
//! `range_end`, so sibling subtrees agree where one ends and the next starts.
//!
//! ## Shapes
//!
//! | Variant   | Children | Lookup mechanism                          |
//! |-----------|----------|-------------------------------------------|
//! | `Node4`   | up to 4  | sorted byte array, linear scan            |
//! | `Node16`  | up to 16 | sorted byte array, binary search          |
//! | `Node48`  | up to 48 | 256-entry byte-to-slot table              |
//! | `Node256` | up to 256| direct array indexed by byte              |
//! | `Leaf`    | none     | stored `[range_begin, range_end)` handles |
//!
//! The variants form a closed set: a node's shape is fixed at construction and
//! the tree is immutable afterwards, so there is no grow/shrink machinery.

use eyre::Result;

use crate::key::BinaryComparable;

use super::direct::{Node256, Node48, NODE48_CAPACITY};
use super::leaf::Leaf;
use super::sorted::{Node16, Node4, NODE16_CAPACITY, NODE4_CAPACITY};

/// Sentinel in `Node48`'s byte-to-slot table marking "no child for this byte".
///
/// 255 is also a legal partial key, so the table alone cannot distinguish a
/// mapped byte 0xff from an unmapped one. The child slots resolve this: a
/// populated slot means the mapping is real, an empty slot means padding.
pub(crate) const INVALID_INDEX: u8 = 255;

/// Which end of a key's run a search should report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// First position whose key is >= the query key.
    Lower,
    /// First position whose key is > the query key.
    Upper,
}

/// A node of the adaptive radix tree, tagged by shape.
#[derive(Debug, Clone)]
pub enum Node<P> {
    Node4(Node4<P>),
    Node16(Node16<P>),
    Node48(Node48<P>),
    Node256(Node256<P>),
    Leaf(Leaf<P>),
}

impl<P: Copy> Node<P> {
    /// Builds the smallest shape that fits `children`, keyed by partial key.
    ///
    /// Picks `Node4`, `Node16`, `Node48`, or `Node256` by child count alone.
    /// The input may arrive in any order; duplicate partial keys are an error.
    pub fn from_children(children: Vec<(u8, Node<P>)>) -> Result<Node<P>> {
        if children.len() <= NODE4_CAPACITY {
            Ok(Node::Node4(Node4::new(children)?))
        } else if children.len() <= NODE16_CAPACITY {
            Ok(Node::Node16(Node16::new(children)?))
        } else if children.len() <= NODE48_CAPACITY {
            Ok(Node::Node48(Node48::new(children)?))
        } else {
            Ok(Node::Node256(Node256::new(children)?))
        }
    }

    /// First position whose key is >= `key`, starting the byte comparison at
    /// `depth`.
    pub fn lower_bound(&self, key: &BinaryComparable, depth: usize) -> Result<P> {
        self.bound(key, depth, Bound::Lower)
    }

    /// First position whose key is > `key`, starting the byte comparison at
    /// `depth`.
    pub fn upper_bound(&self, key: &BinaryComparable, depth: usize) -> Result<P> {
        self.bound(key, depth, Bound::Upper)
    }

    pub(crate) fn bound(&self, key: &BinaryComparable, depth: usize, which: Bound) -> Result<P> {
        match self {
            Node::Node4(node) => node.search(key, depth, which),
            Node::Node16(node) => node.search(key, depth, which),
            Node::Node48(node) => node.search(key, depth, which),
            Node::Node256(node) => node.search(key, depth, which),
            Node::Leaf(leaf) => Ok(leaf.bound(which)),
        }
    }

    /// Position of the first row in this subtree.
    pub fn begin(&self) -> Result<P> {
        match self {
            Node::Node4(node) => node.begin(),
            Node::Node16(node) => node.begin(),
            Node::Node48(node) => node.begin(),
            Node::Node256(node) => node.begin(),
            Node::Leaf(leaf) => Ok(leaf.begin()),
        }
    }

    /// Position one past the last row in this subtree.
    ///
    /// Inner shapes resolve this by recursing into their largest child's
    /// `end()`, never its `begin()`: when that child is itself an inner node
    /// the answer lies below its own largest child, and only the `end()` chain
    /// reaches it.
    pub fn end(&self) -> Result<P> {
        match self {
            Node::Node4(node) => node.end(),
            Node::Node16(node) => node.end(),
            Node::Node48(node) => node.end(),
            Node::Node256(node) => node.end(),
            Node::Leaf(leaf) => Ok(leaf.end()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(begin: usize, end: usize) -> Node<usize> {
        Node::Leaf(Leaf::new(begin, end))
    }

    fn children_for(bytes: &[u8]) -> Vec<(u8, Node<usize>)> {
        bytes
            .iter()
            .enumerate()
            .map(|(i, &byte)| (byte, leaf(i, i + 1)))
            .collect()
    }

    #[test]
    fn from_children_picks_smallest_fitting_shape() {
        let shapes = [
            (1, "Node4"),
            (4, "Node4"),
            (5, "Node16"),
            (16, "Node16"),
            (17, "Node48"),
            (48, "Node48"),
            (49, "Node256"),
            (256, "Node256"),
        ];

        for (count, expected) in shapes {
            let bytes: Vec<u8> = (0..count).map(|i| i as u8).collect();
            let node = Node::from_children(children_for(&bytes)).unwrap();
            let actual = match node {
                Node::Node4(_) => "Node4",
                Node::Node16(_) => "Node16",
                Node::Node48(_) => "Node48",
                Node::Node256(_) => "Node256",
                Node::Leaf(_) => "Leaf",
            };
            assert_eq!(actual, expected, "{count} children");
        }
    }

    #[test]
    fn from_children_rejects_duplicates_in_every_shape() {
        for count in [4usize, 16, 48, 256] {
            let mut bytes: Vec<u8> = (0..count - 1).map(|i| i as u8).collect();
            bytes.push(0);
            assert!(Node::from_children(children_for(&bytes)).is_err());
        }
    }

    #[test]
    fn shapes_agree_on_every_probe() {
        // The same child set laid out as each of the four shapes must answer
        // identically for all 256 possible partial keys and both bounds.
        let bytes = [0x03u8, 0x3c, 0xc8];
        let variants: Vec<Node<usize>> = vec![
            Node::Node4(Node4::new(children_for(&bytes)).unwrap()),
            Node::Node16(Node16::new(children_for(&bytes)).unwrap()),
            Node::Node48(Node48::new(children_for(&bytes)).unwrap()),
            Node::Node256(Node256::new(children_for(&bytes)).unwrap()),
        ];

        for probe in 0..=255u8 {
            let key = BinaryComparable::from_bytes(&[probe]);
            for which in [Bound::Lower, Bound::Upper] {
                let reference = variants[0].bound(&key, 0, which).unwrap();
                for variant in &variants[1..] {
                    assert_eq!(
                        variant.bound(&key, 0, which).unwrap(),
                        reference,
                        "probe {probe:#04x} {which:?}"
                    );
                }
            }
        }

        for variant in &variants {
            assert_eq!(variant.begin().unwrap(), 0);
            assert_eq!(variant.end().unwrap(), 3);
        }
    }
}

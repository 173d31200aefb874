//! Small-fanout node shapes backed by sorted partial-key arrays.
//!
//! `Node4` and `Node16` share one layout scaled to two capacities: a fixed
//! array of partial-key bytes sorted ascending, and a parallel array of child
//! slots. Unused tail slots keep the sentinel byte in the key array and `None`
//! in the child array.
//!
//! ```text
//! Node4   partial_keys  [ 0x04 | 0x06 | 0x07 | 0x08 ]
//!         children      [  c0  |  c1  |  c2  |  c3  ]
//!
//! probe 0x06: exact entry              -> recurse into c1 at depth + 1
//! probe 0x05: first entry at-or-above  -> c1.begin()
//! probe 0x09: every entry below probe  -> self.end()
//! ```
//!
//! `Node4` locates the first entry at or above the probe byte by linear scan;
//! `Node16` uses a sorted-array partition point. In both, a sentinel-valued
//! entry counts as a real child only when its child slot is populated, which
//! lets a genuine 0xff key coexist with tail padding.

use eyre::{bail, ensure, Result};

use crate::key::BinaryComparable;

use super::node::{Bound, Node, INVALID_INDEX};

pub const NODE4_CAPACITY: usize = 4;
pub const NODE16_CAPACITY: usize = 16;

/// Internal node for up to four children, searched by linear scan.
#[derive(Debug, Clone)]
pub struct Node4<P> {
    partial_keys: [u8; NODE4_CAPACITY],
    children: [Option<Box<Node<P>>>; NODE4_CAPACITY],
}

impl<P: Copy> Node4<P> {
    /// Sorts `children` by partial key and lays them out left to right.
    pub fn new(mut children: Vec<(u8, Node<P>)>) -> Result<Self> {
        ensure!(
            children.len() <= NODE4_CAPACITY,
            "Node4 capacity exceeded: {} children",
            children.len()
        );
        children.sort_by_key(|(partial_key, _)| *partial_key);
        for pair in children.windows(2) {
            ensure!(
                pair[0].0 != pair[1].0,
                "duplicate partial key {:#04x} in Node4 input",
                pair[0].0
            );
        }

        let mut partial_keys = [INVALID_INDEX; NODE4_CAPACITY];
        let mut slots: [Option<Box<Node<P>>>; NODE4_CAPACITY] = std::array::from_fn(|_| None);
        for (slot, (partial_key, child)) in children.into_iter().enumerate() {
            partial_keys[slot] = partial_key;
            slots[slot] = Some(Box::new(child));
        }

        Ok(Self {
            partial_keys,
            children: slots,
        })
    }

    pub(crate) fn search(&self, key: &BinaryComparable, depth: usize, which: Bound) -> Result<P> {
        let partial_key = key[depth];
        for (slot, &candidate) in self.partial_keys.iter().enumerate() {
            if candidate < partial_key {
                continue;
            }
            // First entry at or above the probe byte decides the case.
            return match &self.children[slot] {
                Some(child) if candidate == partial_key => child.bound(key, depth + 1, which),
                Some(child) => child.begin(),
                None => self.end(),
            };
        }
        self.end()
    }

    pub(crate) fn begin(&self) -> Result<P> {
        match &self.children[0] {
            Some(child) => child.begin(),
            None => bail!("empty Node4 in begin()"),
        }
    }

    pub(crate) fn end(&self) -> Result<P> {
        for slot in self.children.iter().rev() {
            if let Some(child) = slot {
                return child.end();
            }
        }
        bail!("empty Node4 in end()")
    }

    pub(crate) fn live_children(&self) -> impl Iterator<Item = &Node<P>> {
        self.children.iter().flatten().map(|child| child.as_ref())
    }
}

/// Internal node for up to sixteen children, searched by partition point.
#[derive(Debug, Clone)]
pub struct Node16<P> {
    partial_keys: [u8; NODE16_CAPACITY],
    children: [Option<Box<Node<P>>>; NODE16_CAPACITY],
}

impl<P: Copy> Node16<P> {
    /// Sorts `children` by partial key and lays them out left to right.
    pub fn new(mut children: Vec<(u8, Node<P>)>) -> Result<Self> {
        ensure!(
            children.len() <= NODE16_CAPACITY,
            "Node16 capacity exceeded: {} children",
            children.len()
        );
        children.sort_by_key(|(partial_key, _)| *partial_key);
        for pair in children.windows(2) {
            ensure!(
                pair[0].0 != pair[1].0,
                "duplicate partial key {:#04x} in Node16 input",
                pair[0].0
            );
        }

        let mut partial_keys = [INVALID_INDEX; NODE16_CAPACITY];
        let mut slots: [Option<Box<Node<P>>>; NODE16_CAPACITY] = std::array::from_fn(|_| None);
        for (slot, (partial_key, child)) in children.into_iter().enumerate() {
            partial_keys[slot] = partial_key;
            slots[slot] = Some(Box::new(child));
        }

        Ok(Self {
            partial_keys,
            children: slots,
        })
    }

    pub(crate) fn search(&self, key: &BinaryComparable, depth: usize, which: Bound) -> Result<P> {
        let partial_key = key[depth];
        let pos = self
            .partial_keys
            .partition_point(|&candidate| candidate < partial_key);
        if pos == NODE16_CAPACITY {
            // Full node with every entry below the probe byte.
            return self.end();
        }
        match &self.children[pos] {
            Some(child) if self.partial_keys[pos] == partial_key => {
                child.bound(key, depth + 1, which)
            }
            Some(child) => child.begin(),
            None => self.end(),
        }
    }

    pub(crate) fn begin(&self) -> Result<P> {
        match &self.children[0] {
            Some(child) => child.begin(),
            None => bail!("empty Node16 in begin()"),
        }
    }

    pub(crate) fn end(&self) -> Result<P> {
        // The largest child sits just before the first sentinel-valued entry,
        // unless that entry holds a real 0xff child.
        let first_sentinel = self
            .partial_keys
            .partition_point(|&candidate| candidate < INVALID_INDEX);
        if first_sentinel < NODE16_CAPACITY {
            if let Some(child) = &self.children[first_sentinel] {
                return child.end();
            }
        }
        ensure!(first_sentinel > 0, "empty Node16 in end()");
        match &self.children[first_sentinel - 1] {
            Some(child) => child.end(),
            None => bail!("Node16 slot {} holds no child", first_sentinel - 1),
        }
    }

    pub(crate) fn live_children(&self) -> impl Iterator<Item = &Node<P>> {
        self.children.iter().flatten().map(|child| child.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::art::leaf::Leaf;

    fn leaf(begin: usize, end: usize) -> Node<usize> {
        Node::Leaf(Leaf::new(begin, end))
    }

    fn key(byte: u8) -> BinaryComparable {
        BinaryComparable::from_bytes(&[byte])
    }

    #[test]
    fn node4_resolves_the_three_search_cases() {
        let node = Node4::new(vec![
            (0x04, leaf(0, 2)),
            (0x06, leaf(2, 5)),
            (0x07, leaf(5, 6)),
            (0x08, leaf(6, 9)),
        ])
        .unwrap();

        // Exact match descends into the 0x06 child.
        assert_eq!(node.search(&key(0x06), 0, Bound::Lower).unwrap(), 2);
        assert_eq!(node.search(&key(0x06), 0, Bound::Upper).unwrap(), 5);
        // No 0x05 child: both bounds land on the next larger child's begin().
        assert_eq!(node.search(&key(0x05), 0, Bound::Lower).unwrap(), 2);
        assert_eq!(node.search(&key(0x05), 0, Bound::Upper).unwrap(), 2);
        // 0x09 exceeds every entry of a full node: this node's end().
        assert_eq!(node.search(&key(0x09), 0, Bound::Lower).unwrap(), 9);
        assert_eq!(node.search(&key(0x09), 0, Bound::Upper).unwrap(), 9);
        // Below the smallest entry: begin() of the 0x04 child.
        assert_eq!(node.search(&key(0x00), 0, Bound::Lower).unwrap(), 0);
    }

    #[test]
    fn node4_sentinel_padding_is_not_a_child() {
        let node = Node4::new(vec![(0x04, leaf(0, 2)), (0x06, leaf(2, 5))]).unwrap();

        // 0xff lands on a padding slot, so nothing at or above the probe
        // exists and the answer is this node's end().
        assert_eq!(node.search(&key(0xff), 0, Bound::Lower).unwrap(), 5);
        assert_eq!(node.search(&key(0xf0), 0, Bound::Upper).unwrap(), 5);
    }

    #[test]
    fn node4_finds_a_real_0xff_child() {
        let node = Node4::new(vec![(0x04, leaf(0, 2)), (0xff, leaf(2, 5))]).unwrap();

        assert_eq!(node.search(&key(0xff), 0, Bound::Lower).unwrap(), 2);
        assert_eq!(node.search(&key(0xff), 0, Bound::Upper).unwrap(), 5);
        assert_eq!(node.end().unwrap(), 5);
    }

    #[test]
    fn node4_sorts_unordered_input() {
        let node = Node4::new(vec![
            (0x08, leaf(6, 9)),
            (0x04, leaf(0, 2)),
            (0x06, leaf(2, 5)),
        ])
        .unwrap();

        assert_eq!(node.begin().unwrap(), 0);
        assert_eq!(node.end().unwrap(), 9);
        assert_eq!(node.search(&key(0x05), 0, Bound::Lower).unwrap(), 2);
    }

    #[test]
    fn node4_end_descends_the_rightmost_subtree() {
        // The rightmost child spans [5, 9); its end() is 9, its begin() 5.
        let rightmost = Node::Node4(
            Node4::new(vec![(0x00, leaf(5, 7)), (0x01, leaf(7, 9))]).unwrap(),
        );
        let node = Node4::new(vec![(0x01, leaf(0, 5)), (0x09, rightmost)]).unwrap();

        assert_eq!(node.end().unwrap(), 9);
        assert_eq!(node.search(&key(0xd0), 0, Bound::Lower).unwrap(), 9);
    }

    #[test]
    fn node4_rejects_overflow_and_duplicates() {
        let too_many: Vec<(u8, Node<usize>)> =
            (0..5u8).map(|i| (i, leaf(i as usize, i as usize + 1))).collect();
        assert!(Node4::new(too_many).is_err());

        let duplicated = vec![(0x04, leaf(0, 1)), (0x04, leaf(1, 2))];
        assert!(Node4::new(duplicated).is_err());
    }

    #[test]
    fn empty_node4_queries_fail() {
        let node: Node4<usize> = Node4::new(Vec::new()).unwrap();

        assert!(node.begin().is_err());
        assert!(node.end().is_err());
        assert!(node.search(&key(0x00), 0, Bound::Lower).is_err());
    }

    #[test]
    fn node16_case_split_matches_node4() {
        let node = Node16::new(vec![
            (0x04, leaf(0, 2)),
            (0x06, leaf(2, 5)),
            (0x08, leaf(5, 9)),
        ])
        .unwrap();

        assert_eq!(node.search(&key(0x06), 0, Bound::Lower).unwrap(), 2);
        assert_eq!(node.search(&key(0x05), 0, Bound::Upper).unwrap(), 2);
        assert_eq!(node.search(&key(0x09), 0, Bound::Lower).unwrap(), 9);
        assert_eq!(node.begin().unwrap(), 0);
    }

    #[test]
    fn node16_probe_above_a_full_node_resolves_to_end() {
        let children: Vec<(u8, Node<usize>)> =
            (0..16usize).map(|i| (i as u8 * 3, leaf(i, i + 1))).collect();
        let node = Node16::new(children).unwrap();

        // All sixteen entries sit below both probes, so the partition point
        // runs off the end of the array.
        assert_eq!(node.search(&key(0x2e), 0, Bound::Lower).unwrap(), 16);
        assert_eq!(node.search(&key(0xf0), 0, Bound::Upper).unwrap(), 16);
    }

    #[test]
    fn node16_end_distinguishes_padding_from_real_0xff() {
        let padded = Node16::new(vec![(0x01, leaf(0, 3)), (0x02, leaf(3, 7))]).unwrap();
        assert_eq!(padded.end().unwrap(), 7);

        let with_ff = Node16::new(vec![(0x01, leaf(0, 3)), (0xff, leaf(3, 7))]).unwrap();
        assert_eq!(with_ff.end().unwrap(), 7);
        assert_eq!(with_ff.search(&key(0xff), 0, Bound::Lower).unwrap(), 3);
    }

    #[test]
    fn node16_end_descends_the_rightmost_subtree() {
        let rightmost = Node::Node4(
            Node4::new(vec![(0x00, leaf(5, 7)), (0x01, leaf(7, 9))]).unwrap(),
        );
        let node = Node16::new(vec![(0x01, leaf(0, 5)), (0x09, rightmost)]).unwrap();

        assert_eq!(node.end().unwrap(), 9);
        assert_eq!(node.search(&key(0xd0), 0, Bound::Upper).unwrap(), 9);
    }

    #[test]
    fn node16_rejects_overflow_and_duplicates() {
        let too_many: Vec<(u8, Node<usize>)> =
            (0..17u8).map(|i| (i, leaf(i as usize, i as usize + 1))).collect();
        assert!(Node16::new(too_many).is_err());

        let duplicated = vec![(0x01, leaf(0, 1)), (0x01, leaf(1, 2))];
        assert!(Node16::new(duplicated).is_err());
    }

    #[test]
    fn empty_node16_queries_fail() {
        let node: Node16<usize> = Node16::new(Vec::new()).unwrap();

        assert!(node.begin().is_err());
        assert!(node.end().is_err());
        assert!(node.search(&key(0x80), 0, Bound::Upper).is_err());
    }
}

//! Wide-fanout node shapes with direct byte addressing.
//!
//! `Node48` splits addressing from storage: a 256-entry `index_to_slot` table
//! maps a partial key to an index into a compact 48-slot child array, with
//! 255 as the "absent" marker. The marker never collides with a real entry
//! because slot indices stop at 47.
//!
//! ```text
//! byte            00   01   02   03   04   05  ...   fe   ff
//! index_to_slot [ ff | ff | 00 | ff | 01 | 02 | .. | ff | ff ]
//!                           |         |    |
//!                           v         v    v
//! children      [ c0 | c1 | c2 | ...      up to 48 slots     ]
//! ```
//!
//! `Node256` drops the indirection: one child slot per possible byte value.
//!
//! Neither shape keeps a sorted key array, so "next child above this byte"
//! and "largest child" are scans over all 256 byte values. The cost is
//! tolerated because these shapes only appear at high fan-out, and every scan
//! goes through the byte-indexed table rather than the compact array, so no
//! search path depends on the compact array's layout. Construction still
//! sorts its input, giving `Node48` a deterministic ascending slot order.

use eyre::{bail, ensure, Result};

use crate::key::BinaryComparable;

use super::node::{Bound, Node, INVALID_INDEX};

pub const NODE48_CAPACITY: usize = 48;

/// Internal node for up to 48 children, addressed through a byte-to-slot
/// table.
#[derive(Debug, Clone)]
pub struct Node48<P> {
    index_to_slot: [u8; 256],
    children: [Option<Box<Node<P>>>; NODE48_CAPACITY],
}

impl<P: Copy> Node48<P> {
    /// Sorts `children` by partial key and assigns compact slots in ascending
    /// byte order.
    pub fn new(mut children: Vec<(u8, Node<P>)>) -> Result<Self> {
        ensure!(
            children.len() <= NODE48_CAPACITY,
            "Node48 capacity exceeded: {} children",
            children.len()
        );
        children.sort_by_key(|(partial_key, _)| *partial_key);
        for pair in children.windows(2) {
            ensure!(
                pair[0].0 != pair[1].0,
                "duplicate partial key {:#04x} in Node48 input",
                pair[0].0
            );
        }

        let mut index_to_slot = [INVALID_INDEX; 256];
        let mut slots: [Option<Box<Node<P>>>; NODE48_CAPACITY] = std::array::from_fn(|_| None);
        for (slot, (partial_key, child)) in children.into_iter().enumerate() {
            index_to_slot[partial_key as usize] = slot as u8;
            slots[slot] = Some(Box::new(child));
        }

        Ok(Self {
            index_to_slot,
            children: slots,
        })
    }

    fn slot_of(&self, byte: usize) -> Option<usize> {
        match self.index_to_slot[byte] {
            INVALID_INDEX => None,
            slot => Some(slot as usize),
        }
    }

    fn child_at(&self, slot: usize) -> Result<&Node<P>> {
        match &self.children[slot] {
            Some(child) => Ok(child),
            None => bail!("Node48 slot {} holds no child", slot),
        }
    }

    pub(crate) fn search(&self, key: &BinaryComparable, depth: usize, which: Bound) -> Result<P> {
        let partial_key = key[depth];
        if let Some(slot) = self.slot_of(partial_key as usize) {
            return self.child_at(slot)?.bound(key, depth + 1, which);
        }
        for byte in partial_key as usize + 1..256 {
            if let Some(slot) = self.slot_of(byte) {
                return self.child_at(slot)?.begin();
            }
        }
        self.end()
    }

    pub(crate) fn begin(&self) -> Result<P> {
        for byte in 0..256 {
            if let Some(slot) = self.slot_of(byte) {
                return self.child_at(slot)?.begin();
            }
        }
        bail!("empty Node48 in begin()")
    }

    pub(crate) fn end(&self) -> Result<P> {
        // Walks down through end(), not begin(), so a nested rightmost
        // subtree reports one past its maximum. The scan runs on usize
        // indices and includes byte zero.
        for byte in (0..256).rev() {
            if let Some(slot) = self.slot_of(byte) {
                return self.child_at(slot)?.end();
            }
        }
        bail!("empty Node48 in end()")
    }

    pub(crate) fn live_children(&self) -> impl Iterator<Item = &Node<P>> {
        self.children.iter().flatten().map(|child| child.as_ref())
    }
}

/// Internal node with one directly addressed slot per possible byte.
#[derive(Debug, Clone)]
pub struct Node256<P> {
    children: [Option<Box<Node<P>>>; 256],
}

impl<P: Copy> Node256<P> {
    /// Places each child at the slot named by its partial key.
    pub fn new(children: Vec<(u8, Node<P>)>) -> Result<Self> {
        let mut slots: [Option<Box<Node<P>>>; 256] = std::array::from_fn(|_| None);
        for (partial_key, child) in children {
            ensure!(
                slots[partial_key as usize].is_none(),
                "duplicate partial key {:#04x} in Node256 input",
                partial_key
            );
            slots[partial_key as usize] = Some(Box::new(child));
        }
        Ok(Self { children: slots })
    }

    pub(crate) fn search(&self, key: &BinaryComparable, depth: usize, which: Bound) -> Result<P> {
        let partial_key = key[depth];
        if let Some(child) = &self.children[partial_key as usize] {
            return child.bound(key, depth + 1, which);
        }
        for byte in partial_key as usize + 1..256 {
            if let Some(child) = &self.children[byte] {
                return child.begin();
            }
        }
        self.end()
    }

    pub(crate) fn begin(&self) -> Result<P> {
        match self.children.iter().flatten().next() {
            Some(child) => child.begin(),
            None => bail!("empty Node256 in begin()"),
        }
    }

    pub(crate) fn end(&self) -> Result<P> {
        // Largest populated slot, descending through end().
        match self.children.iter().rev().flatten().next() {
            Some(child) => child.end(),
            None => bail!("empty Node256 in end()"),
        }
    }

    pub(crate) fn live_children(&self) -> impl Iterator<Item = &Node<P>> {
        self.children.iter().flatten().map(|child| child.as_ref())
    }
}

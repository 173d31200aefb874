//! Terminal nodes of the adaptive radix tree.
//!
//! A leaf stands for one distinct key and stores nothing but the two position
//! handles delimiting that key's contiguous run of matching rows. It owns no
//! children and never looks at the query key: reaching a leaf means the whole
//! path already matched, so both bounds are stored answers.

use super::node::Bound;

/// One distinct key's run of row positions, `[range_begin, range_end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leaf<P> {
    range_begin: P,
    range_end: P,
}

impl<P: Copy> Leaf<P> {
    pub fn new(range_begin: P, range_end: P) -> Self {
        Self {
            range_begin,
            range_end,
        }
    }

    pub(crate) fn bound(&self, which: Bound) -> P {
        match which {
            Bound::Lower => self.range_begin,
            Bound::Upper => self.range_end,
        }
    }

    /// First position of the run.
    pub fn begin(&self) -> P {
        self.range_begin
    }

    /// One past the last position of the run.
    pub fn end(&self) -> P {
        self.range_end
    }
}

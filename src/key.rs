//! # Binary-Comparable Keys
//!
//! This module provides the key container for the adaptive radix tree: a
//! fixed-length byte sequence whose byte-wise lexicographic order equals the
//! logical order of the indexed domain. The tree consumes one byte ("partial
//! key") per level, so all it ever asks of a key is `key[depth]`.
//!
//! ## Encoding Contract
//!
//! Producing order-preserving bytes is the encoder's job, not the tree's:
//! the tree never validates that byte order matches domain order. For
//! dictionary-encoded columns the canonical encoding is the big-endian byte
//! image of the dictionary code, which this module provides directly:
//!
//! ```text
//! value id   encoded key (4 bytes)
//! --------   ---------------------
//! 0          00 00 00 00
//! 1          00 00 00 01
//! 256        00 00 01 00
//! 0xCAFE     00 00 CA FE
//! ```
//!
//! Most significant byte first means numeric order and byte order agree,
//! which is all the tree requires.
//!
//! ## Storage
//!
//! Keys are held in a `SmallVec<[u8; 8]>`: machine-word-width encodings
//! (the common case for dictionary codes) stay inline with no heap
//! allocation, while longer composite encodings spill transparently.

use std::ops::Index;

use smallvec::SmallVec;

/// Keys up to this many bytes are stored inline.
pub const INLINE_KEY_BYTES: usize = 8;

/// A fixed-length, order-preserving byte key.
///
/// Comparison is lexicographic over the raw bytes, matching what the tree's
/// byte-per-level descent computes incrementally.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BinaryComparable {
    bytes: SmallVec<[u8; INLINE_KEY_BYTES]>,
}

impl BinaryComparable {
    /// Wraps already-encoded bytes. The caller guarantees order preservation.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            bytes: SmallVec::from_slice(bytes),
        }
    }

    /// Encodes a dictionary code as its 4-byte big-endian image, the
    /// order-preserving key for dictionary-encoded columns.
    pub fn from_value_id(value_id: u32) -> Self {
        Self {
            bytes: SmallVec::from_slice(&value_id.to_be_bytes()),
        }
    }

    /// Number of bytes, i.e. the number of tree levels a full match consumes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Index<usize> for BinaryComparable {
    type Output = u8;

    fn index(&self, depth: usize) -> &u8 {
        &self.bytes[depth]
    }
}

impl From<&[u8]> for BinaryComparable {
    fn from(bytes: &[u8]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl<const N: usize> From<[u8; N]> for BinaryComparable {
    fn from(bytes: [u8; N]) -> Self {
        Self::from_bytes(&bytes)
    }
}

//! Fuzz testing for node and tree construction.
//!
//! Feeds arbitrary, possibly malformed child sets and run lists through the
//! constructors. Bad input must come back as an error, never a panic, and
//! anything that builds must answer begin()/end() and arbitrary probes.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use artindex::{ArtTree, BinaryComparable, KeyRun, Leaf, Node};

#[derive(Debug, Arbitrary)]
struct ConstructionInput {
    child_bytes: Vec<u8>,
    keys: Vec<Vec<u8>>,
    probe: Vec<u8>,
}

fuzz_target!(|input: ConstructionInput| {
    if input.child_bytes.len() > 300 || input.keys.len() > 512 {
        return;
    }

    // Raw child sets, duplicates and overflows included: every shape either
    // builds or reports an error.
    let children: Vec<(u8, Node<usize>)> = input
        .child_bytes
        .iter()
        .enumerate()
        .map(|(i, &byte)| (byte, Node::Leaf(Leaf::new(i, i + 1))))
        .collect();
    if let Ok(node) = Node::from_children(children) {
        let built = !input.child_bytes.is_empty();
        assert_eq!(node.begin().is_ok(), built);
        assert_eq!(node.end().is_ok(), built);
    }

    // Arbitrary key lists become valid bulk-load input once sorted, deduped,
    // and filtered to one width; that input must always build.
    let mut keys = input.keys;
    keys.retain(|key| !key.is_empty() && key.len() <= 8);
    keys.sort();
    keys.dedup();
    let Some(width) = keys.first().map(|key| key.len()) else {
        return;
    };
    keys.retain(|key| key.len() == width);

    let mut runs = Vec::with_capacity(keys.len());
    let mut position = 0usize;
    for key in &keys {
        runs.push(KeyRun::new(
            BinaryComparable::from_bytes(key),
            position,
            position + 2,
        ));
        position += 2;
    }

    let tree = ArtTree::build(runs).expect("sorted distinct fixed-width runs must build");
    assert_eq!(tree.begin().unwrap(), 0);
    assert_eq!(tree.end().unwrap(), position);

    if input.probe.len() == width {
        let probe = BinaryComparable::from_bytes(&input.probe);
        let lower = tree.lower_bound(&probe).unwrap();
        let upper = tree.upper_bound(&probe).unwrap();
        assert!(lower <= upper);
        assert!(tree.begin().unwrap() <= lower);
        assert!(upper <= tree.end().unwrap());
    }
});

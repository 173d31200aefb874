//! Fuzz testing for bound queries.
//!
//! Builds a tree from an arbitrary id population and checks every probe
//! against a linear scan over the same runs. Any divergence between the
//! tree walk and the reference scan is a bug in the node search logic.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use artindex::{ArtTree, BinaryComparable, KeyRun};

#[derive(Debug, Arbitrary)]
struct BoundsInput {
    ids: Vec<u32>,
    probes: Vec<u32>,
}

fuzz_target!(|input: BoundsInput| {
    let mut ids = input.ids;
    ids.sort_unstable();
    ids.dedup();
    if ids.is_empty() || ids.len() > 4096 {
        return;
    }

    let mut runs = Vec::with_capacity(ids.len());
    let mut position = 0usize;
    for (i, &id) in ids.iter().enumerate() {
        let len = 1 + (i % 3);
        runs.push(KeyRun::new(
            BinaryComparable::from_value_id(id),
            position,
            position + len,
        ));
        position += len;
    }

    let tree = ArtTree::build(runs.clone()).expect("sorted distinct runs must build");

    assert_eq!(tree.begin().unwrap(), 0);
    assert_eq!(tree.end().unwrap(), position);

    // A single-key tree is a bare root leaf: it answers every probe with its
    // one stored run, so only the matching probe is oracle-comparable.
    let bare_leaf = ids.len() == 1;

    for &probe in &input.probes {
        let key = BinaryComparable::from_value_id(probe);
        let lower = tree.lower_bound(&key).unwrap();
        let upper = tree.upper_bound(&key).unwrap();

        if bare_leaf && probe != ids[0] {
            continue;
        }

        let expected_lower = runs
            .iter()
            .find(|run| run.key >= key)
            .map(|run| run.begin)
            .unwrap_or(position);
        let expected_upper = runs
            .iter()
            .find(|run| run.key > key)
            .map(|run| run.begin)
            .unwrap_or(position);
        assert_eq!(lower, expected_lower, "lower_bound({probe})");
        assert_eq!(upper, expected_upper, "upper_bound({probe})");
    }
});

use balanced_bst::optimal::{AccessUpdate, OptimalTreap, OptimalTreapConfig, RebuildStrategy};
use balanced_bst::SearchTree;
use quickcheck_macros::quickcheck;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::Op;

fn tree(rebuild: RebuildStrategy, update: AccessUpdate, seed: u64) -> OptimalTreap<i8> {
    let config = OptimalTreapConfig { rebuild, update };
    OptimalTreap::with_config_and_rng(config, StdRng::seed_from_u64(seed)).unwrap()
}

#[quickcheck]
fn fuzz_never_rebuilding(ops: Vec<Op<i8>>, seed: u64) -> bool {
    let mut tree = tree(RebuildStrategy::Never, AccessUpdate::Deferred, seed);

    crate::agrees_with_model(&ops, &mut tree)
}

#[quickcheck]
fn fuzz_rebuilding_often(ops: Vec<Op<i8>>, seed: u64) -> bool {
    let rebuild = RebuildStrategy::OperationCount { interval: 5 };
    let mut tree = tree(rebuild, AccessUpdate::Deferred, seed);

    crate::agrees_with_model(&ops, &mut tree)
}

#[quickcheck]
fn fuzz_bubble_up_hybrid(ops: Vec<Op<i8>>, seed: u64) -> bool {
    let rebuild = RebuildStrategy::Hybrid {
        interval: 50,
        factor: 1.5,
    };
    let mut tree = tree(rebuild, AccessUpdate::BubbleUp, seed);

    crate::agrees_with_model(&ops, &mut tree)
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>, seed: u64) -> bool {
    let rebuild = RebuildStrategy::HeightThreshold { factor: 2.0 };
    crate::with_deletions(tree(rebuild, AccessUpdate::BubbleUp, seed), &xs, &deletes)
}

#[quickcheck]
fn lookups_are_counted(keys: Vec<i8>, lookups: Vec<i8>, seed: u64) -> bool {
    let mut tree = tree(RebuildStrategy::default(), AccessUpdate::BubbleUp, seed);
    tree.extend(keys.iter().copied());

    for key in &lookups {
        tree.lookup(key);
    }

    keys.iter().all(|key| {
        let inserted = keys.iter().filter(|k| *k == key).count() as u64;
        let looked_up = lookups.iter().filter(|k| *k == key).count() as u64;
        // The first insert creates the node, every later one is an access.
        tree.access_count(key) == Some(inserted - 1 + looked_up)
    })
}

#[quickcheck]
fn weighted_construction(mut keys: Vec<i16>, counts: Vec<u16>, seed: u64) -> bool {
    keys.sort_unstable();
    keys.dedup();
    let counts: Vec<u64> = keys
        .iter()
        .enumerate()
        .map(|(i, _)| counts.get(i).copied().unwrap_or(0).into())
        .collect();

    let tree = OptimalTreap::from_frequencies_with(
        keys.clone(),
        counts.clone(),
        OptimalTreapConfig::default(),
        StdRng::seed_from_u64(seed),
    )
    .unwrap();

    tree.validate().is_ok()
        && tree.inorder() == keys
        && keys
            .iter()
            .zip(&counts)
            .all(|(key, count)| tree.access_count(key) == Some(*count))
}

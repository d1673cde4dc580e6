//! A workload every tree is put through: bulk inserts, hits and misses, then
//! removing half the keys, with the tree validated after every change.

use std::time::{Duration, Instant};

use balanced_bst::SearchTree;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// How long each phase of [`stress`] took.
#[derive(Debug, Default)]
pub struct Timings {
    pub insert: Duration,
    pub search: Duration,
    pub remove: Duration,
}

/// Runs the workload on `tree` with keys `0..n` shuffled by `seed`. Panics on
/// the first wrong answer or invalid tree.
pub fn stress<S>(tree: &mut S, n: u32, seed: u64) -> Timings
where
    S: SearchTree<u32>,
{
    let mut rng = StdRng::seed_from_u64(seed);
    let mut keys: Vec<u32> = (0..n).collect();
    keys.shuffle(&mut rng);
    let mut timings = Timings::default();

    let start = Instant::now();
    for (i, key) in keys.iter().enumerate() {
        assert!(tree.insert(*key), "{key} reported as already present");
        assert_eq!(tree.len(), i + 1);
        tree.validate().unwrap();
    }
    assert!(!tree.insert(keys[0]));
    timings.insert = start.elapsed();

    let start = Instant::now();
    for key in &keys {
        assert!(tree.lookup(key), "{key} not found");
    }
    for miss in n..n + 100 {
        assert!(!tree.lookup(&miss));
    }
    tree.validate().unwrap();
    timings.search = start.elapsed();

    let (gone, kept) = keys.split_at(keys.len() / 2);
    let start = Instant::now();
    for key in gone {
        assert!(tree.remove(key), "{key} could not be removed");
        tree.validate().unwrap();
    }
    assert!(!tree.remove(&n));
    timings.remove = start.elapsed();

    assert_eq!(tree.len(), kept.len());
    assert!(gone.iter().all(|k| !tree.contains(k)));
    assert!(kept.iter().all(|k| tree.contains(k)));

    let mut sorted = kept.to_vec();
    sorted.sort_unstable();
    assert_eq!(tree.inorder(), sorted);

    tree.clear();
    assert!(tree.is_empty());
    assert_eq!(tree.height(), -1);
    tree.clear();

    timings
}

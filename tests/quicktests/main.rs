//! Property tests running every tree against `std::collections::BTreeSet`.

use std::collections::BTreeSet;

use balanced_bst::SearchTree;
use quickcheck::{Arbitrary, Gen};

mod avl;
mod optimal;
mod treap;

/// Something to do to a tree and to the model set alike.
#[derive(Copy, Clone, Debug)]
pub enum Op<K> {
    Insert(K),
    Remove(K),
    Lookup(K),
}

impl<K: Arbitrary> Arbitrary for Op<K> {
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 0, 1, 2]).unwrap() {
            0 => Op::Insert(K::arbitrary(g)),
            1 => Op::Remove(K::arbitrary(g)),
            2 => Op::Lookup(K::arbitrary(g)),
            _ => unreachable!(),
        }
    }
}

/// Applies `ops` to `tree` and to a `BTreeSet`. Every return value has to
/// match and the tree has to stay valid throughout.
pub fn agrees_with_model<K, S>(ops: &[Op<K>], tree: &mut S) -> bool
where
    K: Ord + Clone,
    S: SearchTree<K>,
{
    let mut set = BTreeSet::new();
    for op in ops {
        let same = match op {
            Op::Insert(k) => tree.insert(k.clone()) == set.insert(k.clone()),
            Op::Remove(k) => tree.remove(k) == set.remove(k),
            Op::Lookup(k) => tree.lookup(k) == set.contains(k),
        };
        if !same || tree.validate().is_err() {
            return false;
        }
    }

    tree.len() == set.len() && tree.inorder() == set.into_iter().collect::<Vec<_>>()
}

/// The four traversals visit the same keys, and agree on where the root is.
pub fn traversals_agree<K, S>(tree: &S) -> bool
where
    K: Ord + Clone,
    S: SearchTree<K>,
{
    let inorder = tree.inorder();
    let pre = tree.preorder();
    let post = tree.postorder();
    let level = tree.level_order();

    let sorted = |mut keys: Vec<K>| {
        keys.sort();
        keys
    };

    inorder.windows(2).all(|w| w[0] < w[1])
        && sorted(pre.clone()) == inorder
        && sorted(post.clone()) == inorder
        && sorted(level.clone()) == inorder
        && pre.first() == level.first()
        && pre.first() == post.last()
}

/// Keys inserted and not deleted afterwards are found; deleted ones aren't.
pub fn with_deletions<S>(mut tree: S, xs: &[i8], deletes: &[i8]) -> bool
where
    S: SearchTree<i8>,
{
    for x in xs {
        tree.insert(*x);
    }
    for delete in deletes {
        tree.remove(delete);
    }

    let still_present: BTreeSet<_> = xs.iter().filter(|x| !deletes.contains(x)).collect();
    deletes.iter().all(|x| !tree.contains(x))
        && still_present.iter().all(|x| tree.contains(x))
        && tree.len() == still_present.len()
}

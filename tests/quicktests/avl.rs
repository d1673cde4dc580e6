use std::collections::HashSet;

use balanced_bst::avl::AvlTree;
use balanced_bst::SearchTree;
use quickcheck_macros::quickcheck;

use crate::Op;

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    crate::agrees_with_model(&ops, &mut AvlTree::new())
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree: AvlTree<_> = xs.iter().copied().collect();

    xs.iter().all(|x| tree.contains(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: AvlTree<_> = xs.iter().copied().collect();
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| !tree.contains(x))
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    crate::with_deletions(AvlTree::new(), &xs, &deletes)
}

#[quickcheck]
fn traversals(xs: Vec<i16>) -> bool {
    let tree: AvlTree<_> = xs.into_iter().collect();

    crate::traversals_agree(&tree)
}

#[quickcheck]
fn height_is_logarithmic(xs: Vec<u16>) -> bool {
    let tree: AvlTree<_> = xs.into_iter().collect();
    let bound = 1.45 * ((tree.len() + 2) as f64).log2();

    (tree.height() as f64) <= bound
}

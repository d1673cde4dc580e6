use balanced_bst::treap::Treap;
use balanced_bst::SearchTree;
use quickcheck_macros::quickcheck;

use crate::Op;

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>, seed: u64) -> bool {
    crate::agrees_with_model(&ops, &mut Treap::with_seed(seed))
}

#[quickcheck]
fn fuzz_multiple_operations_string(ops: Vec<Op<String>>, seed: u64) -> bool {
    crate::agrees_with_model(&ops, &mut Treap::with_seed(seed))
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>, seed: u64) -> bool {
    crate::with_deletions(Treap::with_seed(seed), &xs, &deletes)
}

#[quickcheck]
fn traversals(xs: Vec<i16>, seed: u64) -> bool {
    let mut tree = Treap::with_seed(seed);
    tree.extend(xs);

    crate::traversals_agree(&tree)
}

#[quickcheck]
fn split_off_then_append(xs: Vec<i16>, pivot: i16, seed: u64) -> bool {
    let mut tree = Treap::with_seed(seed);
    tree.extend(xs);
    let expected = tree.inorder();

    let mut upper = tree.split_off(&pivot);
    let halves_ok = tree.iter().all(|k| *k < pivot)
        && upper.iter().all(|k| *k >= pivot)
        && tree.validate().is_ok()
        && upper.validate().is_ok();

    tree.append(&mut upper);
    halves_ok && upper.is_empty() && tree.inorder() == expected && tree.validate().is_ok()
}

#[quickcheck]
fn append_overlapping(xs: Vec<i8>, ys: Vec<i8>, seed: u64) -> bool {
    let mut left = Treap::with_seed(seed);
    left.extend(xs.iter().copied());
    let mut right = Treap::with_seed(seed.wrapping_add(1));
    right.extend(ys.iter().copied());

    left.append(&mut right);
    let mut expected: Vec<_> = xs.into_iter().chain(ys).collect();
    expected.sort_unstable();
    expected.dedup();

    left.inorder() == expected && left.len() == expected.len() && left.validate().is_ok()
}

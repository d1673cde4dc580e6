//! The two primitives every treap operation is built from, `split` and
//! `merge`, plus the pieces that sit on top of them: cutting out a single key
//! and rebuilding a whole tree from sorted nodes.
//!
//! They work on any node whose metadata has a priority, so the plain and the
//! adaptive treap share them. Both take and return ownership of whole
//! subtrees, so a half-restructured tree is never observable.

use crate::error::Violation;
use crate::next_key::NextKey;
use crate::node::{Link, Node};

/// Node metadata that carries a heap priority. Parents must never have a lower
/// priority than their children.
pub(crate) trait Prioritized {
    fn priority(&self) -> f64;
}

/// A plain treap node's metadata is just its (random) priority.
impl Prioritized for f64 {
    fn priority(&self) -> f64 {
        *self
    }
}

/// Partitions a treap into the keys `< key` and the keys `>= key`. Both halves
/// stay heap-ordered.
pub(crate) fn split<T, M>(link: Link<T, M>, key: &T) -> (Link<T, M>, Link<T, M>)
where
    T: Ord,
{
    let Some(mut node) = link else {
        return (None, None);
    };

    if node.key < *key {
        // `node` and its left subtree belong on the left; part of its right
        // subtree may too.
        let (smaller, larger) = split(node.right.take(), key);
        node.right = smaller;
        (Some(node), larger)
    } else {
        let (smaller, larger) = split(node.left.take(), key);
        node.left = larger;
        (smaller, Some(node))
    }
}

/// Recombines two treaps where every key in `left` is less than every key in
/// `right`. The root with the higher priority wins; on a tie the root of
/// `right` does.
pub(crate) fn merge<T, M>(left: Link<T, M>, right: Link<T, M>) -> Link<T, M>
where
    M: Prioritized,
{
    match (left, right) {
        (None, tree) | (tree, None) => tree,
        (Some(mut l), Some(mut r)) => {
            if l.meta.priority() > r.meta.priority() {
                l.right = merge(l.right.take(), Some(r));
                Some(l)
            } else {
                r.left = merge(Some(l), r.left.take());
                Some(r)
            }
        }
    }
}

/// Cuts the treap into the keys below `key`, the node holding `key` (if any),
/// and the keys above it. The middle node comes back without children.
pub(crate) fn isolate<T, M>(link: Link<T, M>, key: &T) -> (Link<T, M>, Link<T, M>, Link<T, M>)
where
    T: NextKey,
{
    let (smaller, rest) = split(link, key);
    let (middle, larger) = match key.next_key() {
        Some(next) => split(rest, &next),
        // `key` is the largest value of its type so `rest` can only be `key`.
        None => (rest, None),
    };

    debug_assert!(middle.as_ref().map_or(true, |n| n.is_leaf()));
    (smaller, middle, larger)
}

/// Takes the tree apart into its nodes in ascending key order, each one with
/// its children detached. Iterative, so any shape is fine.
pub(crate) fn into_sorted_nodes<T, M>(link: Link<T, M>) -> Vec<Box<Node<T, M>>> {
    let mut nodes = Vec::new();
    let mut stack = Vec::new();
    let mut current = link;
    loop {
        while let Some(mut node) = current {
            current = node.left.take();
            stack.push(node);
        }
        let Some(mut node) = stack.pop() else {
            break;
        };
        current = node.right.take();
        nodes.push(node);
    }
    nodes
}

/// Builds the unique heap-ordered BST (the cartesian tree) for childless nodes
/// given in ascending key order, in linear time.
///
/// `spine` holds the right spine of the tree built so far, root first, with
/// the right links implied by stack order. Each new node is the largest key
/// yet, so it joins the spine: every spine node with a lower priority becomes
/// part of its left subtree.
pub(crate) fn build_cartesian<T, M, I>(sorted: I) -> Link<T, M>
where
    M: Prioritized,
    I: IntoIterator<Item = Box<Node<T, M>>>,
{
    let mut spine: Vec<Box<Node<T, M>>> = Vec::new();
    for mut node in sorted {
        let mut below: Link<T, M> = None;
        while let Some(mut top) = spine.pop() {
            if top.meta.priority() >= node.meta.priority() {
                spine.push(top);
                break;
            }
            top.right = below;
            below = Some(top);
        }
        node.left = below;
        spine.push(node);
    }

    let mut root = None;
    while let Some(mut top) = spine.pop() {
        top.right = root;
        root = Some(top);
    }
    root
}

/// Checks that no node has a child with a higher priority.
pub(crate) fn check_heap<T, M>(root: Option<&Node<T, M>>) -> Result<(), Violation>
where
    M: Prioritized,
{
    let mut stack: Vec<(&Node<T, M>, usize)> = root.map(|n| (n, 0)).into_iter().collect();
    while let Some((node, depth)) = stack.pop() {
        for child in node.left().into_iter().chain(node.right()) {
            if child.meta.priority() > node.meta.priority() {
                return Err(Violation::HeapOrder { depth });
            }
            stack.push((child, depth + 1));
        }
    }
    Ok(())
}

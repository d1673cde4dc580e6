//! Rotations for AVL nodes. Each one takes ownership of a subtree root and
//! hands back the new root, fixing cached heights bottom-up: the demoted node
//! first, then the node that replaced it.

use super::{fix_height, AvlNode};

/// Rotate `old_root` to the left. This moves the right child up vertically and
/// `old_root` down vertically. Used to rebalance when the right child is too
/// tall, so there must _be_ a right child.
///
/// ## Panics
///
/// When called on a node without a right child.
///
/// # Diagram
///
/// ```text
///   old_root                    new_root
///    /    \                     /     \
///   x   new_root   rotate ->  old_root  z
///        /  \                 /   \
///       y    z               x     y
/// ```
pub(super) fn rotate_left<T>(mut old_root: Box<AvlNode<T>>) -> Box<AvlNode<T>> {
    let mut new_root = old_root.right.take().expect("Rotate left => right child");

    old_root.right = new_root.left.take();
    fix_height(&mut old_root);

    new_root.left = Some(old_root);
    fix_height(&mut new_root);
    new_root
}

/// Rotate `old_root` to the right. The mirror image of [`rotate_left`].
///
/// ## Panics
///
/// When called on a node without a left child.
///
/// # Diagram
///
/// ```text
///      old_root              new_root
///       /    \               /     \
///   new_root  z   rotate -> x    old_root
///    /  \                          /  \
///   x    y                        y    z
/// ```
pub(super) fn rotate_right<T>(mut old_root: Box<AvlNode<T>>) -> Box<AvlNode<T>> {
    let mut new_root = old_root.left.take().expect("Rotate right => left child");

    old_root.left = new_root.right.take();
    fix_height(&mut old_root);

    new_root.right = Some(old_root);
    fix_height(&mut new_root);
    new_root
}

/// The "big" left rotation: rotate the right child to the right, then `node`
/// to the left. This lifts `node.right.left` all the way up and fixes a right
/// subtree that is heavy on its inner (left) side.
///
/// ## Panics
///
/// When `node` has no right child or that child has no left child.
pub(super) fn rotate_right_left<T>(mut node: Box<AvlNode<T>>) -> Box<AvlNode<T>> {
    let right = node
        .right
        .take()
        .expect("Rotate right-left => right child");
    node.right = Some(rotate_right(right));
    // The outer rotation reads this height off `node`'s children, so it has to
    // be current before we rotate again.
    fix_height(&mut node);
    rotate_left(node)
}

/// The "big" right rotation: the mirror image of [`rotate_right_left`].
///
/// ## Panics
///
/// When `node` has no left child or that child has no right child.
pub(super) fn rotate_left_right<T>(mut node: Box<AvlNode<T>>) -> Box<AvlNode<T>> {
    let left = node.left.take().expect("Rotate left-right => left child");
    node.left = Some(rotate_left(left));
    fix_height(&mut node);
    rotate_right(node)
}

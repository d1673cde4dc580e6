use std::fmt;

use crate::error::Violation;

/// The operations every tree in this crate supports. Code that only needs an
/// ordered set of keys (tests, benchmarks) can be written once against this
/// trait and run on each implementation.
///
/// Keys are unique: inserting a key that is already present leaves the tree's
/// contents alone, and removing a key that isn't present does nothing. Neither
/// is an error.
///
/// # Examples
///
/// ```
/// use balanced_bst::{avl::AvlTree, treap::Treap, SearchTree};
///
/// fn fill<S: SearchTree<u32>>(mut tree: S) -> S {
///     for key in [5, 3, 8, 3] {
///         tree.insert(key);
///     }
///     tree
/// }
///
/// let avl = fill(AvlTree::new());
/// let treap = fill(Treap::with_seed(7));
///
/// assert_eq!(avl.inorder(), treap.inorder());
/// assert_eq!(avl.len(), 3);
/// ```
pub trait SearchTree<T: Ord> {
    /// Adds `key` to the tree. Returns `false` (and leaves the keys as they
    /// were) if it was already there.
    fn insert(&mut self, key: T) -> bool;

    /// Whether `key` is in the tree. Never changes the tree.
    fn contains(&self, key: &T) -> bool;

    /// A search that is allowed to update the tree's access statistics.
    ///
    /// For most trees this is just [`contains`][SearchTree::contains]. Trees
    /// that adapt to the access pattern override it to count the hit.
    fn lookup(&mut self, key: &T) -> bool {
        self.contains(key)
    }

    /// Removes `key` from the tree. Returns `false` if it wasn't there.
    fn remove(&mut self, key: &T) -> bool;

    /// Removes every key.
    fn clear(&mut self);

    /// How many keys are stored. This is `O(1)`.
    fn len(&self) -> usize;

    /// Whether no keys are stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of edges on the longest path from the root to a leaf. An empty
    /// tree has height -1 and a single node has height 0.
    fn height(&self) -> isize;

    /// Number of edges between the root and the node holding `key`, if any.
    fn depth(&self, key: &T) -> Option<usize>;

    /// Calls `visit` on each key in ascending order.
    fn visit_inorder<F: FnMut(&T)>(&self, visit: F);

    /// Calls `visit` on each key, parents before their left then right subtree.
    fn visit_preorder<F: FnMut(&T)>(&self, visit: F);

    /// Calls `visit` on each key, left then right subtree before the parent.
    fn visit_postorder<F: FnMut(&T)>(&self, visit: F);

    /// Calls `visit` on each key level by level, left to right.
    fn visit_level_order<F: FnMut(&T)>(&self, visit: F);

    /// The keys in ascending order.
    fn inorder(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut keys = Vec::with_capacity(self.len());
        self.visit_inorder(|k| keys.push(k.clone()));
        keys
    }

    /// The keys in pre-order.
    fn preorder(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut keys = Vec::with_capacity(self.len());
        self.visit_preorder(|k| keys.push(k.clone()));
        keys
    }

    /// The keys in post-order.
    fn postorder(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut keys = Vec::with_capacity(self.len());
        self.visit_postorder(|k| keys.push(k.clone()));
        keys
    }

    /// The keys in level order.
    fn level_order(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut keys = Vec::with_capacity(self.len());
        self.visit_level_order(|k| keys.push(k.clone()));
        keys
    }

    /// Writes the tree one level per line, each key followed by its children
    /// in brackets (`Level 0: 2[L:1,R:3]`). An empty tree prints `[empty]`.
    fn print<W: fmt::Write>(&self, out: &mut W) -> fmt::Result
    where
        T: fmt::Display;

    /// Checks the BST ordering, the size counter, and whatever shape invariant
    /// the tree maintains, returning the first violation found.
    fn validate(&self) -> Result<(), Violation>;
}

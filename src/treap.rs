//! A randomized BST (a treap).
//!
//! Every node gets a priority drawn uniformly from `[0, 1)` when it's created,
//! and the tree is kept heap-ordered by those priorities as well as BST-ordered
//! by key. The shape is therefore the one you'd get by inserting the keys in a
//! random order, which makes the expected height `O(lg N)` no matter what order
//! they actually arrive in.
//!
//! Insertion and removal are both written in terms of `split` and `merge`;
//! there are no rotations.
//!
//! # Examples
//!
//! ```
//! use balanced_bst::{treap::Treap, SearchTree};
//!
//! // Seeding the tree's random source makes its shape reproducible.
//! let mut tree = Treap::with_seed(42);
//!
//! for key in 0..1000 {
//!     tree.insert(key);
//! }
//! assert!(tree.height() < 60);
//!
//! assert!(tree.remove(&500));
//! assert!(!tree.contains(&500));
//! assert_eq!(tree.len(), 999);
//! ```

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Violation;
use crate::next_key::NextKey;
use crate::node::{self, Link, Node};
use crate::search_tree::SearchTree;
use crate::traverse;

pub(crate) mod ops;

/// A treap storing keys of type `T`, drawing priorities from its own random
/// source `R`.
///
/// Removal needs to know each key's immediate successor, so the [`SearchTree`]
/// implementation requires `T: NextKey`.
pub struct Treap<T, R = StdRng> {
    root: Link<T, f64>,
    len: usize,
    rng: R,
}

impl<T> Default for Treap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, R> Drop for Treap<T, R> {
    fn drop(&mut self) {
        node::teardown(self.root.take());
    }
}

/// The clone continues from the same random state, so it will hand out the
/// same priorities as this one for the same sequence of inserts.
impl<T: Clone, R: Clone> Clone for Treap<T, R> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            len: self.len,
            rng: self.rng.clone(),
        }
    }
}

impl<T: fmt::Debug, R> fmt::Debug for Treap<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, R> fmt::Display for Treap<T, R>
where
    T: NextKey + fmt::Display,
    R: Rng,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.print(f)
    }
}

impl<T: NextKey, R: Rng> Extend<T> for Treap<T, R> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<T: NextKey> FromIterator<T> for Treap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Treap<T> {
    /// Generates a new, empty `Treap` with an entropy-seeded random source.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Generates a new, empty `Treap` whose priorities are fully determined by
    /// `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<T, R> Treap<T, R> {
    /// Generates a new, empty `Treap` drawing priorities from `rng`.
    pub fn with_rng(rng: R) -> Self {
        Self {
            root: None,
            len: 0,
            rng,
        }
    }

    /// Iterates over the keys in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        traverse::InOrder::new(self.root.as_deref())
    }

    fn max(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right() {
            node = right;
        }
        Some(&node.key)
    }

    fn min(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left() {
            node = left;
        }
        Some(&node.key)
    }
}

impl<T: Ord, R> Treap<T, R> {
    /// Splits the tree in two at `key`. Keys `>= key` move to the returned
    /// tree, which gets a random source seeded from this one.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::{treap::Treap, SearchTree};
    ///
    /// let mut tree: Treap<i32> = (1..=5).collect();
    /// let upper = tree.split_off(&3);
    ///
    /// assert_eq!(tree.inorder(), vec![1, 2]);
    /// assert_eq!(upper.inorder(), vec![3, 4, 5]);
    /// ```
    pub fn split_off(&mut self, key: &T) -> Self
    where
        R: Rng + SeedableRng,
    {
        let (smaller, larger) = ops::split(self.root.take(), key);
        let moved = traverse::InOrder::new(larger.as_deref()).count();
        self.root = smaller;
        self.len -= moved;

        let mut other = Self::with_rng(R::seed_from_u64(self.rng.gen()));
        other.root = larger;
        other.len = moved;
        other
    }

    /// Moves every key of `other` into this tree, leaving `other` empty. Nodes
    /// keep their priorities.
    ///
    /// When every key in `other` is larger than every key here this is a
    /// single merge. Otherwise `other`'s nodes are merged in one at a time and
    /// keys already present are dropped.
    pub fn append(&mut self, other: &mut Self) {
        let ordered = match (self.max(), other.min()) {
            (Some(max), Some(min)) => max < min,
            _ => true,
        };
        let incoming = other.root.take();
        let count = std::mem::take(&mut other.len);

        if ordered {
            self.root = ops::merge(self.root.take(), incoming);
            self.len += count;
            return;
        }

        for node in ops::into_sorted_nodes(incoming) {
            if traverse::find(self.root.as_deref(), &node.key).is_some() {
                continue;
            }
            let (smaller, larger) = ops::split(self.root.take(), &node.key);
            self.root = ops::merge(ops::merge(smaller, Some(node)), larger);
            self.len += 1;
        }
    }
}

impl<T, R> SearchTree<T> for Treap<T, R>
where
    T: NextKey,
    R: Rng,
{
    /// Splits the tree at `key` and merges a new node between the halves. The
    /// new node lands wherever its random priority puts it.
    fn insert(&mut self, key: T) -> bool {
        if self.contains(&key) {
            return false;
        }

        let priority = self.rng.gen::<f64>();
        let (smaller, larger) = ops::split(self.root.take(), &key);
        let single = Some(Node::new_boxed(key, priority));
        self.root = ops::merge(ops::merge(smaller, single), larger);
        self.len += 1;
        true
    }

    fn contains(&self, key: &T) -> bool {
        traverse::find(self.root.as_deref(), key).is_some()
    }

    /// Cuts out the node holding `key` (see [`NextKey`]) and merges what is
    /// left on either side of it.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::{treap::Treap, SearchTree};
    ///
    /// let mut tree: Treap<u8> = [1, 2, 3, u8::MAX].into_iter().collect();
    ///
    /// assert!(tree.remove(&u8::MAX));
    /// assert!(tree.remove(&2));
    /// assert!(!tree.remove(&2));
    /// assert_eq!(tree.inorder(), vec![1, 3]);
    /// ```
    fn remove(&mut self, key: &T) -> bool {
        let (smaller, middle, larger) = ops::isolate(self.root.take(), key);
        self.root = ops::merge(smaller, larger);
        let removed = middle.is_some();
        if removed {
            self.len -= 1;
        }
        removed
    }

    fn clear(&mut self) {
        node::teardown(self.root.take());
        self.len = 0;
    }

    fn len(&self) -> usize {
        self.len
    }

    fn height(&self) -> isize {
        traverse::height(self.root.as_deref())
    }

    fn depth(&self, key: &T) -> Option<usize> {
        traverse::depth(self.root.as_deref(), key)
    }

    fn visit_inorder<F: FnMut(&T)>(&self, visit: F) {
        traverse::InOrder::new(self.root.as_deref()).for_each(visit);
    }

    fn visit_preorder<F: FnMut(&T)>(&self, visit: F) {
        traverse::PreOrder::new(self.root.as_deref()).for_each(visit);
    }

    fn visit_postorder<F: FnMut(&T)>(&self, visit: F) {
        traverse::PostOrder::new(self.root.as_deref()).for_each(visit);
    }

    fn visit_level_order<F: FnMut(&T)>(&self, visit: F) {
        traverse::LevelOrder::new(self.root.as_deref()).for_each(visit);
    }

    fn print<W: fmt::Write>(&self, out: &mut W) -> fmt::Result
    where
        T: fmt::Display,
    {
        traverse::print(self.root.as_deref(), out)
    }

    /// On top of ordering and size, checks the heap order of the priorities.
    fn validate(&self) -> Result<(), Violation> {
        traverse::check_order_and_len(self.root.as_deref(), self.len)?;
        ops::check_heap(self.root.as_deref())
    }
}

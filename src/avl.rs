//! A self-balancing BST (specifically, an AVL tree).
//!
//! Every node caches the height of its subtree. After any insert or removal,
//! each node on the path back up to the root recomputes that height and, if
//! its two subtrees now differ in height by more than one, rotates to fix it.
//! That keeps the height below `1.44 lg N`.
//!
//! # Examples
//!
//! ```
//! use balanced_bst::{avl::AvlTree, SearchTree};
//!
//! let mut tree = AvlTree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.contains(&1));
//!
//! assert!(tree.insert(1));
//! assert!(tree.contains(&1));
//!
//! // Inserting the same key again does nothing.
//! assert!(!tree.insert(1));
//! assert_eq!(tree.len(), 1);
//!
//! // Removing reports whether there was anything to remove.
//! assert!(tree.remove(&1));
//! assert!(!tree.remove(&1));
//! assert!(tree.is_empty());
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::error::Violation;
use crate::node::{self, Node};
use crate::search_tree::SearchTree;
use crate::traverse;

mod rotate;

/// AVL nodes carry their subtree height: 0 for a leaf.
pub(crate) type AvlNode<T> = Node<T, isize>;
pub(crate) type Link<T> = node::Link<T, isize>;

/// A self-balancing Binary Search Tree (specifically, an AVL tree). This can be
/// used for inserting, finding, and removing keys.
pub struct AvlTree<T> {
    root: Link<T>,
    len: usize,
}

impl<T> Default for AvlTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for AvlTree<T> {
    fn drop(&mut self) {
        node::teardown(self.root.take());
    }
}

impl<T: Clone> Clone for AvlTree<T> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            len: self.len,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for AvlTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Ord + fmt::Display> fmt::Display for AvlTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.print(f)
    }
}

impl<T: Ord> FromIterator<T> for AvlTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord> Extend<T> for AvlTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<T> AvlTree<T> {
    /// Generates a new, empty `AvlTree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Iterates over the keys in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        traverse::InOrder::new(self.root.as_deref())
    }
}

impl<T: Ord> SearchTree<T> for AvlTree<T> {
    /// Inserts `key`, rebalancing every ancestor of the new leaf. Inserting a
    /// key that's already present changes nothing, heights included.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::{avl::AvlTree, SearchTree};
    ///
    /// let mut tree = AvlTree::new();
    /// for key in 1..=3 {
    ///     tree.insert(key);
    /// }
    ///
    /// // Inserting in order would make a stick; the rotation fixed it.
    /// assert_eq!(tree.height(), 1);
    /// assert_eq!(tree.level_order(), vec![2, 1, 3]);
    /// ```
    fn insert(&mut self, key: T) -> bool {
        let (root, inserted) = insert(self.root.take(), key);
        self.root = Some(root);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    fn contains(&self, key: &T) -> bool {
        traverse::find(self.root.as_deref(), key).is_some()
    }

    /// Removes `key`. A node with two children is replaced by its in-order
    /// successor (the smallest key in its right subtree), and every ancestor of
    /// a changed node is rebalanced.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::{avl::AvlTree, SearchTree};
    ///
    /// let mut tree: AvlTree<_> = (0..10).collect();
    ///
    /// assert!(tree.remove(&4));
    /// assert_eq!(tree.inorder(), vec![0, 1, 2, 3, 5, 6, 7, 8, 9]);
    /// assert_eq!(tree.validate(), Ok(()));
    /// ```
    fn remove(&mut self, key: &T) -> bool {
        let (root, removed) = remove(self.root.take(), key);
        self.root = root;
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

    /// Read off the root's cached height, so this is `O(1)`.
    fn height(&self) -> isize {
        height(&self.root)
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

    /// On top of ordering and size, checks that every node's cached height is
    /// its true height and that its balance factor is -1, 0 or 1.
    fn validate(&self) -> Result<(), Violation> {
        traverse::check_order_and_len(self.root.as_deref(), self.len)?;
        check_balance(&self.root, 0).map(|_| ())
    }
}

/// The cached height of a subtree. An empty subtree has height -1.
pub(crate) fn height<T>(link: &Link<T>) -> isize {
    link.as_ref().map_or(-1, |n| n.meta)
}

/// Recomputes `node`'s height from its children's cached heights.
pub(crate) fn fix_height<T>(node: &mut AvlNode<T>) {
    node.meta = height(&node.left).max(height(&node.right)) + 1;
}

/// `height(left) - height(right)`: positive when the left side is taller. See
/// [the Wikipedia page][wiki] for more details.
///
/// [wiki]: https://en.wikipedia.org/wiki/AVL_tree#Balance_factor
fn balance_factor<T>(node: &AvlNode<T>) -> isize {
    height(&node.left) - height(&node.right)
}

/// Refreshes `node`'s height and, if its subtrees differ in height by two,
/// rotates so they don't. Assumes both subtrees are already AVL trees.
///
/// See https://en.wikipedia.org/wiki/AVL_tree#Rebalancing for terminology.
fn balance<T>(mut node: Box<AvlNode<T>>) -> Box<AvlNode<T>> {
    fix_height(&mut node);
    let factor = balance_factor(&node);
    let node = if factor > 1 {
        match node.left.as_deref().map(balance_factor) {
            Some(n) if n >= 0 => rotate::rotate_right(node),
            _ => rotate::rotate_left_right(node),
        }
    } else if factor < -1 {
        match node.right.as_deref().map(balance_factor) {
            Some(n) if n <= 0 => rotate::rotate_left(node),
            _ => rotate::rotate_right_left(node),
        }
    } else {
        node
    };

    // After balancing, assert that we've restored/maintained the AVL invariant.
    if cfg!(debug_assertions) {
        let (left, right) = (height(&node.left), height(&node.right));
        assert_eq!(node.meta, left.max(right) + 1);
        assert!((left - right).abs() <= 1);
    }
    node
}

fn insert<T: Ord>(link: Link<T>, key: T) -> (Box<AvlNode<T>>, bool) {
    let Some(mut node) = link else {
        return (Node::new_boxed(key, 0), true);
    };

    let inserted = match key.cmp(&node.key) {
        Ordering::Less => {
            let (left, inserted) = insert(node.left.take(), key);
            node.left = Some(left);
            inserted
        }
        Ordering::Equal => false,
        Ordering::Greater => {
            let (right, inserted) = insert(node.right.take(), key);
            node.right = Some(right);
            inserted
        }
    };

    if inserted {
        (balance(node), true)
    } else {
        (node, false)
    }
}

fn remove<T: Ord>(link: Link<T>, key: &T) -> (Link<T>, bool) {
    let Some(mut node) = link else {
        return (None, false);
    };

    let removed = match key.cmp(&node.key) {
        Ordering::Less => {
            let (left, removed) = remove(node.left.take(), key);
            node.left = left;
            removed
        }
        Ordering::Greater => {
            let (right, removed) = remove(node.right.take(), key);
            node.right = right;
            removed
        }
        Ordering::Equal => {
            let replacement = match (node.left.take(), node.right.take()) {
                (None, child) | (child, None) => child,
                // With two children we promote the in-order successor: the
                // smallest node in the right subtree.
                (Some(left), Some(right)) => {
                    let (rest, mut successor) = take_smallest(right);
                    successor.left = Some(left);
                    successor.right = rest;
                    Some(balance(successor))
                }
            };
            return (replacement, true);
        }
    };

    if removed {
        (Some(balance(node)), true)
    } else {
        (Some(node), false)
    }
}

/// Detaches the smallest node of the subtree. Returns what is left of the
/// subtree (rebalanced) and the detached, childless node.
fn take_smallest<T>(mut node: Box<AvlNode<T>>) -> (Link<T>, Box<AvlNode<T>>) {
    match node.left.take() {
        None => {
            let rest = node.right.take();
            node.meta = 0;
            (rest, node)
        }
        Some(left) => {
            let (rest, smallest) = take_smallest(left);
            node.left = rest;
            (Some(balance(node)), smallest)
        }
    }
}

/// Recomputes heights bottom-up, comparing them to the cached ones. Recursion
/// depth is bounded by the height, which this is verifying is logarithmic.
fn check_balance<T>(link: &Link<T>, depth: usize) -> Result<isize, Violation> {
    let Some(node) = link else {
        return Ok(-1);
    };

    let left = check_balance(&node.left, depth + 1)?;
    let right = check_balance(&node.right, depth + 1)?;
    let actual = left.max(right) + 1;
    if node.meta != actual {
        return Err(Violation::StaleHeight {
            depth,
            cached: node.meta,
            actual,
        });
    }
    if (left - right).abs() > 1 {
        return Err(Violation::Unbalanced {
            depth,
            balance: left - right,
        });
    }
    Ok(actual)
}

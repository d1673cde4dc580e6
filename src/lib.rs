//! This crate exposes various self-balancing Binary Search Trees (BSTs)
//! mostly for educational purposes.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored keys. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a key and
//! will sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! Searching takes `O(height)`, so everything interesting in this crate is
//! about keeping the height at `O(lg N)`:
//!
//! - [`avl::AvlTree`] keeps the heights of sibling subtrees within one of each
//!   other by rotating after every insert and removal.
//! - [`treap::Treap`] gives every node a random priority and keeps the tree
//!   heap-ordered by it, which makes the expected height logarithmic no matter
//!   the insertion order. It is built entirely from `split` and `merge`.
//! - [`optimal::OptimalTreap`] is a treap whose priorities grow with how often
//!   a key is looked up, so hot keys drift towards the root.
//!
//! All of them implement [`SearchTree`] so code can be written once for any of
//! them.
//!
//! # Examples
//!
//! ```
//! use balanced_bst::{avl::AvlTree, SearchTree};
//!
//! let mut tree = AvlTree::new();
//! for key in [1, 2, 3] {
//!     tree.insert(key);
//! }
//!
//! assert_eq!(tree.inorder(), vec![1, 2, 3]);
//! assert_eq!(tree.height(), 1);
//! assert_eq!(tree.to_string(), "Level 0: 2[L:1,R:3]\nLevel 1: 1 3\n");
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod avl;
mod error;
pub mod next_key;
mod node;
pub mod optimal;
mod search_tree;
mod traverse;
pub mod treap;

pub use error::{Error, Violation};
pub use next_key::NextKey;
pub use search_tree::SearchTree;

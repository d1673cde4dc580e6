use thiserror::Error;

/// Failures reported when building a tree from caller-supplied input.
///
/// These are the only errors the public API returns. Looking up or removing a
/// missing key and inserting a duplicate are ordinary outcomes reported through
/// `bool` return values instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Keys and their access counts were given as slices of different lengths.
    #[error("got {keys} keys but {counts} access counts")]
    LengthMismatch {
        /// Number of keys supplied.
        keys: usize,
        /// Number of access counts supplied.
        counts: usize,
    },
    /// Keys that must be strictly increasing were not.
    #[error("keys are not strictly increasing at index {index}")]
    Unsorted {
        /// Index of the first key that is not greater than its predecessor.
        index: usize,
    },
    /// An operation-count rebuild trigger must fire after at least one operation.
    #[error("rebuild interval must be at least 1")]
    ZeroInterval,
    /// A height-threshold rebuild trigger needs a finite, positive factor.
    #[error("height factor must be finite and positive, got {0}")]
    InvalidHeightFactor(f64),
}

/// The first broken invariant found by [`SearchTree::validate`][crate::SearchTree::validate].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    /// The in-order key sequence is not strictly increasing.
    #[error("in-order keys are not strictly increasing at position {position}")]
    Unordered {
        /// Position in the in-order sequence of the first out-of-order key.
        position: usize,
    },
    /// The tree's size counter disagrees with the number of reachable nodes.
    #[error("tree reports {reported} keys but {reachable} nodes are reachable")]
    SizeMismatch {
        /// What `len()` returns.
        reported: usize,
        /// How many nodes a traversal actually finds.
        reachable: usize,
    },
    /// An AVL node's subtrees differ in height by more than one.
    #[error("node at depth {depth} has balance factor {balance}")]
    Unbalanced {
        /// Depth of the offending node (the root is at depth 0).
        depth: usize,
        /// `height(left) - height(right)` for that node.
        balance: isize,
    },
    /// An AVL node's cached height is not the height of its subtree.
    #[error("node at depth {depth} caches height {cached} but has height {actual}")]
    StaleHeight {
        /// Depth of the offending node (the root is at depth 0).
        depth: usize,
        /// The memoized height.
        cached: isize,
        /// The recomputed height.
        actual: isize,
    },
    /// A treap node has a child with a higher priority.
    #[error("node at depth {depth} has a child with a higher priority")]
    HeapOrder {
        /// Depth of the offending parent (the root is at depth 0).
        depth: usize,
    },
}

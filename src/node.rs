//! The owned node every tree in this crate is made of.
//!
//! A tree owns its root and every `Node` owns its children, so moving a
//! `Box<Node>` around is how subtrees change hands during rotations, splits
//! and merges. There are no parent pointers and nothing is ever shared.

/// An optional, owned subtree.
pub(crate) type Link<T, M> = Option<Box<Node<T, M>>>;

/// A key, its two children, and whatever bookkeeping `M` the balancing scheme
/// needs (a height for AVL trees, a priority for treaps).
pub(crate) struct Node<T, M> {
    pub(crate) key: T,
    pub(crate) left: Link<T, M>,
    pub(crate) right: Link<T, M>,
    pub(crate) meta: M,
}

impl<T, M> Node<T, M> {
    pub(crate) fn new_boxed(key: T, meta: M) -> Box<Self> {
        Box::new(Self {
            key,
            left: None,
            right: None,
            meta,
        })
    }

    pub(crate) fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    pub(crate) fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    pub(crate) fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

impl<T, M> Clone for Node<T, M>
where
    T: Clone,
    M: Clone,
{
    // Recursion depth is the tree height, which every tree here keeps logarithmic.
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            left: self.left.clone(),
            right: self.right.clone(),
            meta: self.meta.clone(),
        }
    }
}

/// Drops a whole subtree without recursing.
///
/// The derived drop glue for `Box<Node>` recurses once per level, which blows
/// the stack on a degenerate tree with millions of nodes. Instead every node is
/// stripped of its children before it is dropped.
pub(crate) fn teardown<T, M>(link: Link<T, M>) {
    let mut stack: Vec<Box<Node<T, M>>> = link.into_iter().collect();
    while let Some(mut node) = stack.pop() {
        stack.extend(node.left.take());
        stack.extend(node.right.take());
    }
}

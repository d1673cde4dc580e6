//! Traversals and shape metrics shared by every tree in the crate.
//!
//! Everything here is iterative (explicit stacks and queues) so that walking a
//! badly shaped tree can't overflow the call stack.

use std::collections::VecDeque;
use std::fmt;

use crate::error::Violation;
use crate::node::Node;

/// In-order (sorted) iterator over the keys of a subtree.
pub(crate) struct InOrder<'a, T, M> {
    stack: Vec<&'a Node<T, M>>,
}

impl<'a, T, M> InOrder<'a, T, M> {
    pub(crate) fn new(root: Option<&'a Node<T, M>>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<T, M>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left();
        }
    }
}

impl<'a, T, M> Iterator for InOrder<'a, T, M> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        Some(&node.key)
    }
}

/// Pre-order iterator: a node, then its left subtree, then its right subtree.
pub(crate) struct PreOrder<'a, T, M> {
    stack: Vec<&'a Node<T, M>>,
}

impl<'a, T, M> PreOrder<'a, T, M> {
    pub(crate) fn new(root: Option<&'a Node<T, M>>) -> Self {
        Self {
            stack: root.into_iter().collect(),
        }
    }
}

impl<'a, T, M> Iterator for PreOrder<'a, T, M> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.right());
        self.stack.extend(node.left());
        Some(&node.key)
    }
}

/// Post-order iterator: both subtrees, left first, then the node itself.
pub(crate) struct PostOrder<'a, T, M> {
    // The flag records whether the node's children have already been pushed.
    stack: Vec<(&'a Node<T, M>, bool)>,
}

impl<'a, T, M> PostOrder<'a, T, M> {
    pub(crate) fn new(root: Option<&'a Node<T, M>>) -> Self {
        Self {
            stack: root.map(|n| (n, false)).into_iter().collect(),
        }
    }
}

impl<'a, T, M> Iterator for PostOrder<'a, T, M> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (node, expanded) = self.stack.pop()?;
            if expanded {
                return Some(&node.key);
            }
            self.stack.push((node, true));
            self.stack.extend(node.right().map(|n| (n, false)));
            self.stack.extend(node.left().map(|n| (n, false)));
        }
    }
}

/// Level-order (breadth first) iterator, left to right within a level.
pub(crate) struct LevelOrder<'a, T, M> {
    queue: VecDeque<&'a Node<T, M>>,
}

impl<'a, T, M> LevelOrder<'a, T, M> {
    pub(crate) fn new(root: Option<&'a Node<T, M>>) -> Self {
        Self {
            queue: root.into_iter().collect(),
        }
    }
}

impl<'a, T, M> Iterator for LevelOrder<'a, T, M> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        self.queue.extend(node.left());
        self.queue.extend(node.right());
        Some(&node.key)
    }
}

/// Number of edges on the longest root-to-leaf path, or -1 for an empty tree.
/// Counted one level at a time with a breadth first walk.
pub(crate) fn height<T, M>(root: Option<&Node<T, M>>) -> isize {
    let mut level: Vec<&Node<T, M>> = root.into_iter().collect();
    let mut height = -1;
    while !level.is_empty() {
        height += 1;
        level = level
            .into_iter()
            .flat_map(|n| n.left().into_iter().chain(n.right()))
            .collect();
    }
    height
}

/// How many edges separate the root from the node holding `key`.
pub(crate) fn depth<T: Ord, M>(root: Option<&Node<T, M>>, key: &T) -> Option<usize> {
    let mut node = root;
    let mut depth = 0;
    while let Some(n) = node {
        node = match key.cmp(&n.key) {
            std::cmp::Ordering::Less => n.left(),
            std::cmp::Ordering::Equal => return Some(depth),
            std::cmp::Ordering::Greater => n.right(),
        };
        depth += 1;
    }
    None
}

pub(crate) fn find<'a, T: Ord, M>(root: Option<&'a Node<T, M>>, key: &T) -> Option<&'a Node<T, M>> {
    let mut node = root;
    while let Some(n) = node {
        node = match key.cmp(&n.key) {
            std::cmp::Ordering::Less => n.left(),
            std::cmp::Ordering::Equal => return Some(n),
            std::cmp::Ordering::Greater => n.right(),
        };
    }
    None
}

/// Writes the tree one level per line. Each key is followed by its children's
/// keys in brackets when it has any, e.g. `Level 0: 2[L:1,R:3]`.
pub(crate) fn print<T, M, W>(root: Option<&Node<T, M>>, out: &mut W) -> fmt::Result
where
    T: fmt::Display,
    W: fmt::Write,
{
    let Some(root) = root else {
        return writeln!(out, "[empty]");
    };

    let mut level = vec![root];
    let mut number = 0;
    while !level.is_empty() {
        write!(out, "Level {number}:")?;
        let mut next = Vec::with_capacity(level.len() * 2);
        for node in level {
            write!(out, " {}", node.key)?;
            match (node.left(), node.right()) {
                (None, None) => {}
                (Some(l), None) => write!(out, "[L:{}]", l.key)?,
                (None, Some(r)) => write!(out, "[R:{}]", r.key)?,
                (Some(l), Some(r)) => write!(out, "[L:{},R:{}]", l.key, r.key)?,
            }
            next.extend(node.left());
            next.extend(node.right());
        }
        writeln!(out)?;
        level = next;
        number += 1;
    }
    Ok(())
}

/// Checks the BST invariant (strictly increasing in-order keys) and that
/// `reported` matches the number of reachable nodes.
pub(crate) fn check_order_and_len<T: Ord, M>(
    root: Option<&Node<T, M>>,
    reported: usize,
) -> Result<(), Violation> {
    let mut reachable = 0;
    let mut previous: Option<&T> = None;
    for key in InOrder::new(root) {
        if previous.is_some_and(|p| p >= key) {
            return Err(Violation::Unordered {
                position: reachable,
            });
        }
        previous = Some(key);
        reachable += 1;
    }

    if reachable != reported {
        return Err(Violation::SizeMismatch {
            reported,
            reachable,
        });
    }
    Ok(())
}

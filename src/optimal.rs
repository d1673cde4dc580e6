//! A treap that adapts to its access pattern (an "optimal treap").
//!
//! Each node's priority is a random base in `[0, 1)` plus `ln(1 + accesses)`,
//! where `accesses` counts successful [`lookup`][SearchTree::lookup]s and
//! repeated inserts of the key. Keys that are searched for often therefore end
//! up with the highest priorities, and a heap-ordered tree puts them nearest
//! the root, approaching the shape of an optimal BST for the observed
//! frequencies.
//!
//! Raising a priority doesn't move the node by itself. Depending on the
//! [`OptimalTreapConfig`], the node is re-placed straight away
//! ([`AccessUpdate::BubbleUp`]) and/or the whole tree is periodically rebuilt
//! in linear time ([`RebuildStrategy`]). Until either happens, the node keeps
//! the priority it was placed with, so the tree is always heap-ordered by the
//! priorities it was built from.
//!
//! # Examples
//!
//! ```
//! use balanced_bst::optimal::OptimalTreap;
//! use balanced_bst::SearchTree;
//!
//! let mut tree = OptimalTreap::with_seed(1);
//! tree.extend(0..100);
//!
//! for _ in 0..20 {
//!     assert!(tree.lookup(&42));
//! }
//! assert_eq!(tree.access_count(&42), Some(20));
//!
//! tree.rebuild();
//! assert_eq!(tree.depth(&42), Some(0));
//! ```

use std::fmt;

use log::{debug, log_enabled, trace, Level};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Error, Violation};
use crate::next_key::NextKey;
use crate::node::{self, Link, Node};
use crate::search_tree::SearchTree;
use crate::traverse;
use crate::treap::ops::{self, Prioritized};

mod config;

pub use config::{AccessUpdate, OptimalTreapConfig, RebuildStrategy};

/// Access statistics and the priority a node was last placed with.
#[derive(Clone, Debug)]
struct Stats {
    base: f64,
    accesses: u64,
    /// What the tree is heap-ordered by. Catches up with `accesses` whenever
    /// the node is re-placed.
    priority: f64,
}

impl Stats {
    fn new(base: f64, accesses: u64) -> Self {
        let mut stats = Self {
            base,
            accesses,
            priority: base,
        };
        stats.refresh();
        stats
    }

    fn record_access(&mut self) {
        self.accesses += 1;
    }

    fn refresh(&mut self) {
        self.priority = self.base + (self.accesses as f64).ln_1p();
    }
}

impl Prioritized for Stats {
    fn priority(&self) -> f64 {
        self.priority
    }
}

/// A treap whose priorities grow with how often each key is accessed.
///
/// Like [`Treap`][crate::treap::Treap], removal needs `T: NextKey`.
pub struct OptimalTreap<T, R = StdRng> {
    root: Link<T, Stats>,
    len: usize,
    rng: R,
    config: OptimalTreapConfig,
    since_rebuild: usize,
}

impl<T> Default for OptimalTreap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, R> Drop for OptimalTreap<T, R> {
    fn drop(&mut self) {
        node::teardown(self.root.take());
    }
}

impl<T: Clone, R: Clone> Clone for OptimalTreap<T, R> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            len: self.len,
            rng: self.rng.clone(),
            config: self.config,
            since_rebuild: self.since_rebuild,
        }
    }
}

impl<T: fmt::Debug, R> fmt::Debug for OptimalTreap<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, R> fmt::Display for OptimalTreap<T, R>
where
    T: NextKey + fmt::Display,
    R: Rng,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.print(f)
    }
}

impl<T: NextKey, R: Rng> Extend<T> for OptimalTreap<T, R> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<T: NextKey> FromIterator<T> for OptimalTreap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T> OptimalTreap<T> {
    /// Generates a new, empty tree with the default configuration and an
    /// entropy-seeded random source.
    pub fn new() -> Self {
        Self::with_parts(OptimalTreapConfig::default(), StdRng::from_entropy())
    }

    /// Generates a new, empty tree with the default configuration whose base
    /// priorities are fully determined by `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_parts(OptimalTreapConfig::default(), StdRng::seed_from_u64(seed))
    }

    /// Generates a new, empty tree with the given configuration.
    pub fn with_config(config: OptimalTreapConfig) -> Result<Self, Error> {
        Self::with_config_and_rng(config, StdRng::from_entropy())
    }

    /// Builds a tree from strictly increasing `keys` where `counts[i]` is how
    /// many accesses `keys[i]` starts out with. Takes linear time.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::optimal::OptimalTreap;
    /// use balanced_bst::{Error, SearchTree};
    ///
    /// let tree = OptimalTreap::from_frequencies(vec![1, 2, 3], vec![0, 50, 1]).unwrap();
    /// assert_eq!(tree.depth(&2), Some(0));
    ///
    /// assert_eq!(
    ///     OptimalTreap::from_frequencies(vec![1, 2], vec![0]).err(),
    ///     Some(Error::LengthMismatch { keys: 2, counts: 1 })
    /// );
    /// assert_eq!(
    ///     OptimalTreap::from_frequencies(vec![1, 3, 2], vec![0; 3]).err(),
    ///     Some(Error::Unsorted { index: 2 })
    /// );
    /// ```
    pub fn from_frequencies(keys: Vec<T>, counts: Vec<u64>) -> Result<Self, Error>
    where
        T: Ord,
    {
        Self::from_frequencies_with(keys, counts, OptimalTreapConfig::default(), StdRng::from_entropy())
    }
}

impl<T, R> OptimalTreap<T, R> {
    fn with_parts(config: OptimalTreapConfig, rng: R) -> Self {
        Self {
            root: None,
            len: 0,
            rng,
            config,
            since_rebuild: 0,
        }
    }

    /// Generates a new, empty tree with the given configuration, drawing base
    /// priorities from `rng`.
    pub fn with_config_and_rng(config: OptimalTreapConfig, rng: R) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self::with_parts(config, rng))
    }

    /// Like [`OptimalTreap::from_frequencies`] with an explicit configuration
    /// and random source.
    pub fn from_frequencies_with(
        keys: Vec<T>,
        counts: Vec<u64>,
        config: OptimalTreapConfig,
        mut rng: R,
    ) -> Result<Self, Error>
    where
        T: Ord,
        R: Rng,
    {
        config.validate()?;
        if keys.len() != counts.len() {
            return Err(Error::LengthMismatch {
                keys: keys.len(),
                counts: counts.len(),
            });
        }
        if let Some(index) = keys.windows(2).position(|pair| pair[0] >= pair[1]) {
            return Err(Error::Unsorted { index: index + 1 });
        }

        let len = keys.len();
        let nodes: Vec<_> = keys
            .into_iter()
            .zip(counts)
            .map(|(key, accesses)| Node::new_boxed(key, Stats::new(rng.gen(), accesses)))
            .collect();
        trace!("building treap from {len} weighted keys");

        let mut tree = Self::with_parts(config, rng);
        tree.root = ops::build_cartesian(nodes);
        tree.len = len;
        Ok(tree)
    }

    /// The configuration this tree was built with.
    pub fn config(&self) -> &OptimalTreapConfig {
        &self.config
    }

    /// Iterates over the keys in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        traverse::InOrder::new(self.root.as_deref())
    }

    /// How many times `key` has been accessed, or `None` if it isn't stored.
    pub fn access_count(&self, key: &T) -> Option<u64>
    where
        T: Ord,
    {
        traverse::find(self.root.as_deref(), key).map(|n| n.meta.accesses)
    }

    /// Brings every node's priority up to date with its access count and
    /// rebuilds the tree to match, in linear time.
    pub fn rebuild(&mut self) {
        let before = log_enabled!(Level::Debug).then(|| traverse::height(self.root.as_deref()));

        let mut nodes = ops::into_sorted_nodes(self.root.take());
        for node in &mut nodes {
            node.meta.refresh();
        }
        self.root = ops::build_cartesian(nodes);
        self.since_rebuild = 0;

        if let Some(before) = before {
            debug!(
                "rebuilt treap of {} keys, height {} -> {}",
                self.len,
                before,
                traverse::height(self.root.as_deref())
            );
        }
    }

    fn find_mut(&mut self, key: &T) -> Option<&mut Node<T, Stats>>
    where
        T: Ord,
    {
        let mut node = self.root.as_deref_mut();
        while let Some(n) = node {
            node = match key.cmp(&n.key) {
                std::cmp::Ordering::Less => n.left.as_deref_mut(),
                std::cmp::Ordering::Equal => return Some(n),
                std::cmp::Ordering::Greater => n.right.as_deref_mut(),
            };
        }
        None
    }

    /// Records an access to `key` if it is stored, re-placing it if the
    /// configuration asks for that. Returns whether it was found.
    fn record_access(&mut self, key: &T) -> bool
    where
        T: NextKey,
    {
        let Some(node) = self.find_mut(key) else {
            return false;
        };
        node.meta.record_access();

        if self.config.update == AccessUpdate::BubbleUp {
            let (smaller, middle, larger) = ops::isolate(self.root.take(), key);
            let middle = middle.map(|mut n| {
                n.meta.refresh();
                n
            });
            self.root = ops::merge(ops::merge(smaller, middle), larger);
            trace!("re-placed accessed node");
        }
        true
    }

    /// Counts an operation towards the rebuild triggers and rebuilds if one
    /// fires.
    fn tick(&mut self) {
        self.since_rebuild += 1;
        let rebuild = self.config.rebuild;

        let by_count = rebuild
            .interval()
            .is_some_and(|interval| self.since_rebuild >= interval);
        let by_height = !by_count
            && rebuild.height_factor().is_some_and(|factor| {
                let allowed = factor * ((self.len + 1) as f64).log2();
                traverse::height(self.root.as_deref()) as f64 > allowed
            });

        if by_count || by_height {
            debug!(
                "rebuild triggered by {} after {} operations",
                if by_count { "operation count" } else { "height" },
                self.since_rebuild
            );
            self.rebuild();
        }
    }
}

impl<T, R> SearchTree<T> for OptimalTreap<T, R>
where
    T: NextKey,
    R: Rng,
{
    /// Inserting a key that's already present counts as an access to it.
    fn insert(&mut self, key: T) -> bool {
        let inserted = if self.record_access(&key) {
            false
        } else {
            let stats = Stats::new(self.rng.gen(), 0);
            let (smaller, larger) = ops::split(self.root.take(), &key);
            let single = Some(Node::new_boxed(key, stats));
            self.root = ops::merge(ops::merge(smaller, single), larger);
            self.len += 1;
            true
        };
        self.tick();
        inserted
    }

    /// Never touches the access statistics; see [`lookup`][SearchTree::lookup].
    fn contains(&self, key: &T) -> bool {
        traverse::find(self.root.as_deref(), key).is_some()
    }

    /// Searches for `key`, counting an access if it's found.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::optimal::{AccessUpdate, OptimalTreap, OptimalTreapConfig};
    /// use balanced_bst::SearchTree;
    ///
    /// let config = OptimalTreapConfig { update: AccessUpdate::BubbleUp, ..Default::default() };
    /// let mut tree = OptimalTreap::with_config(config).unwrap();
    /// tree.extend(0..100);
    ///
    /// // With bubble-up the accessed key rises immediately.
    /// for _ in 0..10 {
    ///     tree.lookup(&7);
    /// }
    /// assert_eq!(tree.depth(&7), Some(0));
    /// assert!(!tree.lookup(&1000));
    /// ```
    fn lookup(&mut self, key: &T) -> bool {
        let found = self.record_access(key);
        if found {
            self.tick();
        }
        found
    }

    fn remove(&mut self, key: &T) -> bool {
        let (smaller, middle, larger) = ops::isolate(self.root.take(), key);
        self.root = ops::merge(smaller, larger);
        let removed = middle.is_some();
        if removed {
            self.len -= 1;
        }
        self.tick();
        removed
    }

    fn clear(&mut self) {
        node::teardown(self.root.take());
        self.len = 0;
        self.since_rebuild = 0;
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

    /// On top of ordering and size, checks the heap order of the priorities
    /// the nodes were placed with.
    fn validate(&self) -> Result<(), Violation> {
        traverse::check_order_and_len(self.root.as_deref(), self.len)?;
        ops::check_heap(self.root.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn never_rebuilding(update: AccessUpdate) -> OptimalTreap<i32> {
        let config = OptimalTreapConfig {
            rebuild: RebuildStrategy::Never,
            update,
        };
        OptimalTreap::with_config_and_rng(config, StdRng::seed_from_u64(9)).unwrap()
    }

    #[test]
    fn empty_tree() {
        let mut tree = OptimalTreap::<i32>::with_seed(0);

        assert!(tree.is_empty());
        assert_eq!(tree.height(), -1);
        assert!(!tree.lookup(&3));
        assert!(!tree.remove(&3));
        assert_eq!(tree.validate(), Ok(()));

        tree.clear();
        tree.rebuild();
        assert!(tree.is_empty());
    }

    #[test]
    fn priority_grows_with_accesses() {
        let mut stats = Stats::new(0.25, 0);
        assert_eq!(stats.priority(), 0.25);

        let mut previous = stats.priority();
        for _ in 0..10 {
            stats.record_access();
            // Not placed again yet.
            assert_eq!(stats.priority(), previous);
            stats.refresh();
            assert!(stats.priority() > previous);
            previous = stats.priority();
        }
        assert!((stats.priority() - (0.25 + 11f64.ln())).abs() < 1e-12);
    }

    #[test]
    fn counting_accesses() {
        let mut tree = never_rebuilding(AccessUpdate::Deferred);
        tree.insert(5);
        assert_eq!(tree.access_count(&5), Some(0));

        // A duplicate insert counts, a `contains` doesn't.
        assert!(!tree.insert(5));
        assert!(tree.contains(&5));
        assert_eq!(tree.access_count(&5), Some(1));

        assert!(tree.lookup(&5));
        assert_eq!(tree.access_count(&5), Some(2));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.access_count(&6), None);
    }

    #[test]
    fn deferred_lookups_wait_for_rebuild() {
        let mut tree = never_rebuilding(AccessUpdate::Deferred);
        tree.extend(0..100);
        let shape = tree.preorder();

        for _ in 0..30 {
            tree.lookup(&57);
        }
        assert_eq!(tree.preorder(), shape);
        assert_eq!(tree.validate(), Ok(()));

        tree.rebuild();
        assert_eq!(tree.depth(&57), Some(0));
        assert_eq!(tree.inorder(), (0..100).collect::<Vec<_>>());
        assert_eq!(tree.validate(), Ok(()));
    }

    #[test]
    fn bubble_up_moves_immediately() {
        let mut tree = never_rebuilding(AccessUpdate::BubbleUp);
        tree.extend(0..100);

        for _ in 0..30 {
            tree.lookup(&57);
            assert_eq!(tree.validate(), Ok(()));
        }
        assert_eq!(tree.depth(&57), Some(0));
        assert_eq!(tree.len(), 100);
    }

    #[test]
    fn rebuild_after_operation_count() {
        let config = OptimalTreapConfig {
            rebuild: RebuildStrategy::OperationCount { interval: 20 },
            update: AccessUpdate::Deferred,
        };
        let mut tree = OptimalTreap::with_config_and_rng(config, StdRng::seed_from_u64(2)).unwrap();

        // 10 inserts and 9 lookups: one short of a rebuild.
        tree.extend(0..10);
        for _ in 0..9 {
            tree.lookup(&3);
        }
        let shape = tree.preorder();

        // A missed lookup doesn't count.
        tree.lookup(&100);
        assert_eq!(tree.preorder(), shape);

        tree.lookup(&3);
        assert_eq!(tree.depth(&3), Some(0));
        assert_eq!(tree.validate(), Ok(()));
    }

    #[test]
    fn rebuild_on_height_keeps_invariants() {
        let config = OptimalTreapConfig {
            rebuild: RebuildStrategy::HeightThreshold { factor: 1.0 },
            update: AccessUpdate::Deferred,
        };
        let mut tree = OptimalTreap::with_config_and_rng(config, StdRng::seed_from_u64(4)).unwrap();

        for key in 0..300 {
            tree.insert(key);
            if key % 3 == 0 {
                tree.lookup(&(key / 2));
            }
        }
        for key in (0..300).step_by(2) {
            assert!(tree.remove(&key));
        }

        assert_eq!(tree.validate(), Ok(()));
        assert_eq!(tree.inorder(), (0..300).filter(|k| k % 2 == 1).collect::<Vec<_>>());
    }

    #[test]
    fn weighted_construction() {
        let keys = vec![10, 20, 30, 40, 50];
        let counts = vec![1, 0, 100, 3, 0];
        let tree = OptimalTreap::from_frequencies_with(
            keys,
            counts,
            OptimalTreapConfig::default(),
            StdRng::seed_from_u64(0),
        )
        .unwrap();

        assert_eq!(tree.len(), 5);
        assert_eq!(tree.depth(&30), Some(0));
        assert_eq!(tree.access_count(&40), Some(3));
        assert_eq!(tree.validate(), Ok(()));
    }

    #[test]
    fn weighted_construction_rejects_bad_input() {
        let build = |keys: Vec<i32>, counts: Vec<u64>| OptimalTreap::from_frequencies(keys, counts).err();

        assert_eq!(
            build(vec![1, 2, 3], vec![1, 1]),
            Some(Error::LengthMismatch { keys: 3, counts: 2 })
        );
        assert_eq!(build(vec![1, 1], vec![0, 0]), Some(Error::Unsorted { index: 1 }));
        assert_eq!(build(vec![], vec![]), None);
    }

    #[test]
    fn remove_counts_as_an_operation() {
        let config = OptimalTreapConfig {
            rebuild: RebuildStrategy::OperationCount { interval: 3 },
            update: AccessUpdate::Deferred,
        };
        let mut tree = OptimalTreap::with_config_and_rng(config, StdRng::seed_from_u64(6)).unwrap();

        tree.insert(1);
        tree.insert(2);
        assert_eq!(tree.since_rebuild, 2);
        tree.remove(&7);
        assert_eq!(tree.since_rebuild, 0);
    }
}

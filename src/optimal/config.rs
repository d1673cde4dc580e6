use crate::error::Error;

/// When an [`OptimalTreap`][super::OptimalTreap] rebuilds itself from scratch
/// so that updated priorities take effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RebuildStrategy {
    /// Only when [`rebuild`][super::OptimalTreap::rebuild] is called.
    Never,
    /// After every `interval` counted operations.
    OperationCount {
        /// Operations between rebuilds. Must be at least 1.
        interval: usize,
    },
    /// Whenever the height exceeds `factor * lg(len + 1)`.
    ///
    /// Checking this walks the whole tree after every counted operation.
    HeightThreshold {
        /// Allowed height relative to a perfectly balanced tree. Must be
        /// finite and positive.
        factor: f64,
    },
    /// Whenever either of the above would.
    Hybrid {
        /// Operations between rebuilds. Must be at least 1.
        interval: usize,
        /// Allowed height relative to a perfectly balanced tree. Must be
        /// finite and positive.
        factor: f64,
    },
}

impl RebuildStrategy {
    /// The interval used by [`Default`].
    pub const DEFAULT_INTERVAL: usize = 1000;
    /// The height factor used when only a height threshold is asked for.
    pub const DEFAULT_HEIGHT_FACTOR: f64 = 2.0;

    pub(crate) fn interval(&self) -> Option<usize> {
        match *self {
            Self::OperationCount { interval } | Self::Hybrid { interval, .. } => Some(interval),
            Self::Never | Self::HeightThreshold { .. } => None,
        }
    }

    pub(crate) fn height_factor(&self) -> Option<f64> {
        match *self {
            Self::HeightThreshold { factor } | Self::Hybrid { factor, .. } => Some(factor),
            Self::Never | Self::OperationCount { .. } => None,
        }
    }

    fn validate(&self) -> Result<(), Error> {
        if self.interval() == Some(0) {
            return Err(Error::ZeroInterval);
        }
        match self.height_factor() {
            Some(factor) if !(factor.is_finite() && factor > 0.0) => {
                Err(Error::InvalidHeightFactor(factor))
            }
            _ => Ok(()),
        }
    }
}

impl Default for RebuildStrategy {
    fn default() -> Self {
        Self::OperationCount {
            interval: Self::DEFAULT_INTERVAL,
        }
    }
}

/// What happens to a node's position when a lookup raises its priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AccessUpdate {
    /// Nothing until the next rebuild. Lookups stay as cheap as in any BST but
    /// the tree is not heap-ordered by the *current* priorities in between.
    #[default]
    Deferred,
    /// Cut the node out and merge it back in straight away so it rises to
    /// where its new priority belongs. Costs `O(depth)` per lookup.
    BubbleUp,
}

/// Knobs for an [`OptimalTreap`][super::OptimalTreap].
///
/// # Examples
///
/// ```
/// use balanced_bst::optimal::{AccessUpdate, OptimalTreap, OptimalTreapConfig, RebuildStrategy};
/// use balanced_bst::Error;
///
/// let config = OptimalTreapConfig {
///     rebuild: RebuildStrategy::Hybrid { interval: 500, factor: 2.5 },
///     update: AccessUpdate::BubbleUp,
/// };
/// assert!(OptimalTreap::<u32>::with_config(config).is_ok());
///
/// let broken = OptimalTreapConfig {
///     rebuild: RebuildStrategy::OperationCount { interval: 0 },
///     ..OptimalTreapConfig::default()
/// };
/// assert_eq!(OptimalTreap::<u32>::with_config(broken).err(), Some(Error::ZeroInterval));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OptimalTreapConfig {
    /// When to rebuild the whole tree.
    pub rebuild: RebuildStrategy,
    /// What a lookup does to the accessed node's position.
    pub update: AccessUpdate,
}

impl OptimalTreapConfig {
    /// Checks the values make sense.
    pub fn validate(&self) -> Result<(), Error> {
        self.rebuild.validate()
    }
}

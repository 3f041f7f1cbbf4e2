use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A partition of the item universe: cluster key -> items in that cluster.
///
/// Keys are opaque labels, unique within one partition. The same key value
/// on the other side does not denote the same cluster. Within one partition
/// an item must not appear under two different keys; strict mode rejects
/// violations (see [`crate::config::MatchOptions::strict`]).
pub type Partition<K, I> = BTreeMap<K, Vec<I>>;

/// Which input partition a key or item came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Before,
    After,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Before => write!(f, "before"),
            Self::After => write!(f, "after"),
        }
    }
}

/// A cluster key tagged with the side it came from.
///
/// Before/after key values may collide without meaning the same cluster, so
/// every structure that mixes the two key spaces works on tagged keys and
/// untags only when assembling caller-facing output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum SideKey<K> {
    Before(K),
    After(K),
}

// ---------------------------------------------------------------------------
// Decomposition
// ---------------------------------------------------------------------------

/// One independently solvable restriction of the two input partitions.
///
/// Subproblems are pairwise disjoint in both keys and items; their union
/// reconstructs the original partitions exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subproblem<K, I> {
    pub before: BTreeMap<K, BTreeSet<I>>,
    pub after: BTreeMap<K, BTreeSet<I>>,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Outcome of one reconciliation call.
///
/// Every before-key appears in exactly one of `matched` or `removed`; every
/// after-key in exactly one of `matched` or `added`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult<K> {
    /// (before-key, after-key) pairs denoting the same cluster.
    pub matched: Vec<(K, K)>,
    /// After-keys with no predecessor in the before partition.
    pub added: Vec<K>,
    /// Before-keys with no successor in the after partition.
    pub removed: Vec<K>,
}

// Not derived: a default result must not demand K: Default.
impl<K> Default for MatchResult<K> {
    fn default() -> Self {
        Self {
            matched: Vec::new(),
            added: Vec::new(),
            removed: Vec::new(),
        }
    }
}

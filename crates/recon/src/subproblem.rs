use std::collections::{BTreeMap, BTreeSet};
use std::hash::Hash;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::model::{SideKey, Subproblem};

/// Split two partitions into independently solvable subproblems.
///
/// Cluster keys from both sides are the nodes of an undirected graph with an
/// edge wherever two clusters share an item; each connected component becomes
/// one subproblem. Two before-clusters that never co-occur in an item can
/// still end up together, linked through an intermediate after-cluster.
///
/// Traversal uses an explicit work stack, never recursion, so component size
/// is bounded by heap rather than call-stack depth. Discovery order is
/// deterministic: before-keys in sorted order, then any after-keys not
/// already absorbed, also sorted. A cluster sharing no items with the other
/// side (including one with an empty item set) comes out as a singleton
/// subproblem with an empty opposite partition.
pub fn decompose<K, I>(
    before: &BTreeMap<K, BTreeSet<I>>,
    after: &BTreeMap<K, BTreeSet<I>>,
) -> Vec<Subproblem<K, I>>
where
    K: Clone + Ord + Hash,
    I: Clone + Ord + Hash,
{
    // Reverse index: item -> every tagged key whose cluster contains it.
    let mut index: FxHashMap<&I, Vec<SideKey<&K>>> = FxHashMap::default();
    for (key, items) in before {
        for item in items {
            index.entry(item).or_default().push(SideKey::Before(key));
        }
    }
    for (key, items) in after {
        for item in items {
            index.entry(item).or_default().push(SideKey::After(key));
        }
    }

    let mut visited: FxHashSet<SideKey<&K>> = FxHashSet::default();
    let mut subproblems = Vec::new();

    let seeds = before
        .keys()
        .map(SideKey::Before)
        .chain(after.keys().map(SideKey::After));

    for seed in seeds {
        if visited.contains(&seed) {
            continue;
        }

        let mut sub = Subproblem {
            before: BTreeMap::new(),
            after: BTreeMap::new(),
        };
        let mut stack = vec![seed];

        while let Some(node) = stack.pop() {
            if !visited.insert(node) {
                continue;
            }
            // Nodes only ever originate from the maps themselves.
            let items = match node {
                SideKey::Before(key) => {
                    let items = &before[key];
                    sub.before.insert(key.clone(), items.clone());
                    items
                }
                SideKey::After(key) => {
                    let items = &after[key];
                    sub.after.insert(key.clone(), items.clone());
                    items
                }
            };
            for item in items {
                for neighbour in &index[item] {
                    if !visited.contains(neighbour) {
                        stack.push(*neighbour);
                    }
                }
            }
        }

        subproblems.push(sub);
    }

    subproblems
}

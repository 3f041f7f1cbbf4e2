use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Debug;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::assign::solve;
use crate::config::MatchOptions;
use crate::error::ReconError;
use crate::model::{MatchResult, Partition, Side};
use crate::subproblem::decompose;

/// Reconcile two partitions of the same item universe.
///
/// Decomposes the pair into independent subproblems, solves a minimum-cost
/// assignment per subproblem, and concatenates the buckets. Every before-key
/// ends up in exactly one of `matched`/`removed`, every after-key in exactly
/// one of `matched`/`added`.
///
/// Key values may collide across the two partitions without denoting the
/// same cluster; all internal bookkeeping is side-tagged. For a given input
/// the output order is stable: subproblems in discovery order, and within
/// each, keys in sorted order.
pub fn match_clusters<K, I>(
    before: &Partition<K, I>,
    after: &Partition<K, I>,
    options: &MatchOptions,
) -> Result<MatchResult<K>, ReconError>
where
    K: Clone + Ord + Hash + Debug,
    I: Clone + Ord + Hash + Debug,
{
    options.validate()?;

    if options.strict {
        check_disjoint(Side::Before, before)?;
        check_disjoint(Side::After, after)?;
    }

    let before_sets = to_sets(before);
    let after_sets = to_sets(after);

    let mut result = MatchResult::default();
    for sub in decompose(&before_sets, &after_sets) {
        let outcome = solve(&sub, options.solver_max_iterations)?;
        result.matched.extend(outcome.matched);
        result.added.extend(outcome.added);
        result.removed.extend(outcome.removed);
    }

    Ok(result)
}

fn to_sets<K, I>(partition: &Partition<K, I>) -> BTreeMap<K, BTreeSet<I>>
where
    K: Clone + Ord,
    I: Clone + Ord,
{
    partition
        .iter()
        .map(|(key, items)| (key.clone(), items.iter().cloned().collect()))
        .collect()
}

/// Reject a partition where one item appears under two different keys.
fn check_disjoint<K, I>(side: Side, partition: &Partition<K, I>) -> Result<(), ReconError>
where
    K: Ord + Hash + Debug,
    I: Ord + Hash + Debug,
{
    let mut owner: FxHashMap<&I, &K> = FxHashMap::default();
    for (key, items) in partition {
        for item in items {
            if let Some(first) = owner.insert(item, key) {
                if first != key {
                    return Err(ReconError::DuplicateItemAcrossClusters {
                        side,
                        item: format!("{item:?}"),
                        first_key: format!("{first:?}"),
                        second_key: format!("{key:?}"),
                    });
                }
            }
        }
    }
    Ok(())
}

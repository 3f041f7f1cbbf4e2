use std::collections::BTreeSet;

use ordered_float::OrderedFloat;

use crate::cost::cost_matrix;
use crate::error::ReconError;
use crate::model::{MatchResult, Subproblem};

/// Solve one subproblem: a minimum-cost assignment of every after-cluster
/// (task) to a distinct agent, where agents are the before-clusters plus one
/// virtual empty cluster per task.
///
/// A task assigned to a real agent becomes a matched pair; a task assigned
/// to a virtual agent is added; a real agent left unassigned is removed.
/// The assignment polytope is totally unimodular, so the combinatorial
/// optimum found here equals the LP optimum over the same constraints.
pub fn solve<K, I>(
    sub: &Subproblem<K, I>,
    max_iterations: usize,
) -> Result<MatchResult<K>, ReconError>
where
    K: Clone + Ord,
    I: Ord,
{
    let n_before = sub.before.len();
    let n_after = sub.after.len();

    // Degenerate subproblems skip the solver entirely.
    if n_after == 0 {
        return Ok(MatchResult {
            matched: Vec::new(),
            added: Vec::new(),
            removed: sub.before.keys().cloned().collect(),
        });
    }
    if n_before == 0 {
        return Ok(MatchResult {
            matched: Vec::new(),
            added: sub.after.keys().cloned().collect(),
            removed: Vec::new(),
        });
    }

    let before_keys: Vec<&K> = sub.before.keys().collect();
    let after_keys: Vec<&K> = sub.after.keys().collect();

    // Real agents first, then one virtual agent per task so every task
    // stays assignable even when nothing overlaps.
    let empty = BTreeSet::new();
    let mut agents: Vec<&BTreeSet<I>> = sub.before.values().collect();
    agents.extend(std::iter::repeat(&empty).take(n_after));
    let tasks: Vec<&BTreeSet<I>> = sub.after.values().collect();

    let cost = cost_matrix(&agents, &tasks);
    let task_of_agent = assign_min_cost(&cost, n_after, agents.len(), max_iterations)?;

    let mut matched = Vec::new();
    let mut added = Vec::new();
    let mut removed = Vec::new();

    for (agent, task) in task_of_agent.iter().enumerate() {
        match (task, agent < n_before) {
            (Some(task), true) => {
                matched.push((before_keys[agent].clone(), after_keys[*task].clone()));
            }
            (Some(task), false) => added.push(after_keys[*task].clone()),
            (None, true) => removed.push(before_keys[agent].clone()),
            (None, false) => {}
        }
    }

    Ok(MatchResult { matched, added, removed })
}

/// Kuhn-Munkres assignment with row/column potentials.
///
/// `cost[agent][task]`, with `n_tasks <= n_agents`. Every task is assigned
/// to exactly one agent, each agent holds at most one task, total cost is
/// minimal. Equal-cost ties go to the lowest agent index, which combined
/// with sorted key order upstream makes the output deterministic.
///
/// `max_iterations` bounds the number of alternating-tree expansions across
/// the whole solve; exceeding it aborts with `SolverNonConvergence` rather
/// than returning a partial assignment.
fn assign_min_cost(
    cost: &[Vec<OrderedFloat<f64>>],
    n_tasks: usize,
    n_agents: usize,
    max_iterations: usize,
) -> Result<Vec<Option<usize>>, ReconError> {
    debug_assert!(n_tasks <= n_agents);

    let inf = OrderedFloat(f64::INFINITY);
    let zero = OrderedFloat(0.0);

    // Potentials over tasks (u) and agents (v); agent slot 0 is a sentinel.
    let mut u = vec![zero; n_tasks + 1];
    let mut v = vec![zero; n_agents + 1];
    // task_at[j]: 1-based task held by agent j, 0 = free.
    let mut task_at = vec![0usize; n_agents + 1];
    let mut way = vec![0usize; n_agents + 1];

    let mut iterations = 0usize;

    for task in 1..=n_tasks {
        task_at[0] = task;
        let mut j0 = 0usize;
        let mut minv = vec![inf; n_agents + 1];
        let mut used = vec![false; n_agents + 1];

        // Grow the alternating tree until a free agent is reached.
        loop {
            iterations += 1;
            if iterations > max_iterations {
                return Err(ReconError::SolverNonConvergence {
                    budget: max_iterations,
                    agents: n_agents,
                    tasks: n_tasks,
                });
            }

            used[j0] = true;
            let t0 = task_at[j0];
            let mut delta = inf;
            let mut j1 = 0usize;

            for j in 1..=n_agents {
                if used[j] {
                    continue;
                }
                let reduced = cost[j - 1][t0 - 1] - u[t0] - v[j];
                if reduced < minv[j] {
                    minv[j] = reduced;
                    way[j] = j0;
                }
                if minv[j] < delta {
                    delta = minv[j];
                    j1 = j;
                }
            }

            for j in 0..=n_agents {
                if used[j] {
                    u[task_at[j]] += delta;
                    v[j] -= delta;
                } else {
                    minv[j] -= delta;
                }
            }

            j0 = j1;
            if task_at[j0] == 0 {
                break;
            }
        }

        // Walk the alternating path back, shifting tasks between agents.
        while j0 != 0 {
            let j1 = way[j0];
            task_at[j0] = task_at[j1];
            j0 = j1;
        }
    }

    let mut task_of_agent = vec![None; n_agents];
    for j in 1..=n_agents {
        if task_at[j] != 0 {
            task_of_agent[j - 1] = Some(task_at[j] - 1);
        }
    }
    Ok(task_of_agent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn subproblem(
        before: &[(i32, &[&'static str])],
        after: &[(i32, &[&'static str])],
    ) -> Subproblem<i32, &'static str> {
        let build = |clusters: &[(i32, &[&'static str])]| -> BTreeMap<i32, BTreeSet<&'static str>> {
            clusters
                .iter()
                .map(|(key, items)| (*key, items.iter().copied().collect()))
                .collect()
        };
        Subproblem {
            before: build(before),
            after: build(after),
        }
    }

    #[test]
    fn identical_clusters_match() {
        let sub = subproblem(&[(1, &["A", "B"])], &[(2, &["A", "B"])]);
        let result = solve(&sub, 5000).unwrap();
        assert_eq!(result.matched, vec![(1, 2)]);
        assert!(result.added.is_empty());
        assert!(result.removed.is_empty());
    }

    #[test]
    fn crossed_overlap_prefers_larger_intersection() {
        let sub = subproblem(
            &[(1, &["A", "B"]), (2, &["C", "D", "E"])],
            &[(3, &["A", "C", "E"]), (4, &["B", "D"])],
        );
        let result = solve(&sub, 5000).unwrap();
        // (2,3) shares two items, pulling (1,4) along.
        assert_eq!(result.matched, vec![(1, 4), (2, 3)]);
        assert!(result.added.is_empty());
        assert!(result.removed.is_empty());
    }

    #[test]
    fn split_cluster_adds_remainder() {
        let sub = subproblem(&[(1, &["A", "B", "C"])], &[(2, &["A", "B"]), (3, &["C"])]);
        let result = solve(&sub, 5000).unwrap();
        assert_eq!(result.matched, vec![(1, 2)]);
        assert_eq!(result.added, vec![3]);
        assert!(result.removed.is_empty());
    }

    #[test]
    fn merged_cluster_removes_loser() {
        let sub = subproblem(&[(1, &["A", "B"]), (2, &["C"])], &[(3, &["A", "B", "C"])]);
        let result = solve(&sub, 5000).unwrap();
        assert_eq!(result.matched, vec![(1, 3)]);
        assert!(result.added.is_empty());
        assert_eq!(result.removed, vec![2]);
    }

    #[test]
    fn empty_after_removes_everything() {
        let sub = subproblem(&[(1, &["A"]), (2, &["B"])], &[]);
        let result = solve(&sub, 5000).unwrap();
        assert!(result.matched.is_empty());
        assert!(result.added.is_empty());
        assert_eq!(result.removed, vec![1, 2]);
    }

    #[test]
    fn empty_before_adds_everything() {
        let sub = subproblem(&[], &[(1, &["A"]), (2, &["B"])]);
        let result = solve(&sub, 5000).unwrap();
        assert!(result.matched.is_empty());
        assert_eq!(result.added, vec![1, 2]);
        assert!(result.removed.is_empty());
    }

    #[test]
    fn both_empty() {
        let sub = subproblem(&[], &[]);
        let result = solve(&sub, 5000).unwrap();
        assert!(result.matched.is_empty());
        assert!(result.added.is_empty());
        assert!(result.removed.is_empty());
    }

    #[test]
    fn budget_exhaustion_is_an_error() {
        let sub = subproblem(
            &[(1, &["A", "B"]), (2, &["C", "D"])],
            &[(3, &["A", "C"]), (4, &["B", "D"])],
        );
        let err = solve(&sub, 1).unwrap_err();
        assert!(matches!(err, ReconError::SolverNonConvergence { budget: 1, .. }));
    }

    #[test]
    fn generous_budget_converges() {
        let sub = subproblem(
            &[(1, &["A", "B"]), (2, &["C", "D"])],
            &[(3, &["A", "C"]), (4, &["B", "D"])],
        );
        let result = solve(&sub, 5000).unwrap();
        assert_eq!(result.matched.len(), 2);
    }
}

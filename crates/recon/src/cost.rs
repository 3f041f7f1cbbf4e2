use std::collections::BTreeSet;

use ordered_float::OrderedFloat;

/// Pairing cost between one before-cluster and one after-cluster.
///
/// `-(|before ∩ after|) - 1 / (n_after * (1 + |before Δ after|))`
///
/// The integer overlap term dominates: any shared item outweighs the
/// fractional term, which stays below 1 in magnitude. The fraction is a
/// strict tie-breaker among pairs with equal overlap, preferring the smaller
/// symmetric difference, scaled by the subproblem's after-cluster count so
/// tie-break magnitudes stay comparable across subproblems. An empty
/// before-cluster (virtual agent) always lands in `(-1, 0)`, strictly worse
/// than any real overlap.
pub fn pair_cost<I: Ord>(
    before: &BTreeSet<I>,
    after: &BTreeSet<I>,
    n_after: usize,
) -> OrderedFloat<f64> {
    let overlap = before.intersection(after).count();
    let sym_diff = before.len() + after.len() - 2 * overlap;
    OrderedFloat(-(overlap as f64) - 1.0 / (n_after as f64 * (1.0 + sym_diff as f64)))
}

/// Build the `agents x tasks` cost matrix for one subproblem.
///
/// Agents are the before-clusters followed by one virtual (empty) cluster
/// per task; tasks are the after-clusters.
pub(crate) fn cost_matrix<I: Ord>(
    agents: &[&BTreeSet<I>],
    tasks: &[&BTreeSet<I>],
) -> Vec<Vec<OrderedFloat<f64>>> {
    agents
        .iter()
        .map(|agent| {
            tasks
                .iter()
                .map(|task| pair_cost(agent, task, tasks.len()))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&'static str]) -> BTreeSet<&'static str> {
        items.iter().copied().collect()
    }

    fn assert_close(actual: OrderedFloat<f64>, expected: f64) {
        assert!(
            (actual.into_inner() - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn overlap_dominates() {
        // One shared item beats any tie-break fraction.
        let ab = set(&["A", "B"]);
        let b = set(&["B"]);
        let cd = set(&["C", "D"]);
        assert!(pair_cost(&ab, &b, 2) < pair_cost(&ab, &cd, 2));
    }

    #[test]
    fn known_values() {
        let ab = set(&["A", "B"]);
        let c = set(&["C"]);
        let b = set(&["B"]);
        let ac = set(&["A", "C"]);
        let empty = BTreeSet::new();

        // {A,B} vs {B}: overlap 1, sym diff 1.
        assert_close(pair_cost(&ab, &b, 2), -1.25);
        // {A,B} vs {A,C}: overlap 1, sym diff 2.
        assert_close(pair_cost(&ab, &ac, 2), -1.0 - 1.0 / 6.0);
        // {C} vs {B}: no overlap, sym diff 2.
        assert_close(pair_cost(&c, &b, 2), -1.0 / 6.0);
        // Virtual agent vs {B}: no overlap, sym diff 1.
        assert_close(pair_cost(&empty, &b, 2), -0.25);
    }

    #[test]
    fn virtual_agent_bounded() {
        let empty = BTreeSet::new();
        let big = set(&["A", "B", "C", "D", "E"]);
        let cost = pair_cost(&empty, &big, 1);
        assert!(cost > OrderedFloat(-1.0));
        assert!(cost < OrderedFloat(0.0));
    }

    #[test]
    fn matrix_shape() {
        let ab = set(&["A", "B"]);
        let c = set(&["C"]);
        let b = set(&["B"]);
        let ac = set(&["A", "C"]);
        let empty = BTreeSet::new();

        let agents = vec![&ab, &c, &empty, &empty];
        let tasks = vec![&b, &ac];
        let matrix = cost_matrix(&agents, &tasks);

        assert_eq!(matrix.len(), 4);
        assert!(matrix.iter().all(|row| row.len() == 2));
        assert_close(matrix[0][0], -1.25);
        assert_close(matrix[1][1], -1.25);
        assert_close(matrix[2][0], -0.25);
        assert_close(matrix[3][1], -1.0 / 6.0);
    }
}

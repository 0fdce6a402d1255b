//! Reachability by depth-first search at query time.

use super::Reachability;
use crate::graph::access::visited::VisitedSet;
use crate::graph::RankedDag;

/// An oracle with no preprocessing that searches the graph on every query.
///
/// Queries for a specific target prune every branch whose rank already
/// exceeds the target's rank, since such a vertex cannot precede it.
#[derive(Clone, Copy, Debug)]
pub struct OnlineSearch<'a> {
    dag: &'a RankedDag,
}

impl<'a> OnlineSearch<'a> {
    /// Wraps `dag`.
    pub fn new(dag: &'a RankedDag) -> Self {
        Self { dag }
    }

    /// Visits everything reachable from `source` through ranks `<= bound`,
    /// returning early once `stop_at` accepts a newly visited vertex.
    fn search<F>(&self, source: usize, bound: usize, stop_at: F) -> VisitedSet
    where
        F: Fn(usize) -> bool,
    {
        let mut visited = VisitedSet::new(self.dag.vertex_count());
        visited.try_visit(source);
        let mut stack = vec![source];
        while let Some(v) = stack.pop() {
            for &t in self.dag.successors(v) {
                if t > bound {
                    break;
                }
                if visited.try_visit(t) {
                    if stop_at(t) {
                        return visited;
                    }
                    stack.push(t);
                }
            }
        }
        visited
    }
}

impl Reachability for OnlineSearch<'_> {
    fn is_reachable(&self, source: usize, target: usize) -> bool {
        let n = self.dag.vertex_count();
        if source >= n || target >= n || source > target {
            return false;
        }
        if source == target {
            return true;
        }
        self.search(source, target, |t| t == target).is_visited(target)
    }

    fn successors(&self, vertex: usize) -> Vec<usize> {
        let n = self.dag.vertex_count();
        if vertex >= n {
            return Vec::new();
        }
        let visited = self.search(vertex, n, |_| false);
        (vertex + 1..n).filter(|&t| visited.is_visited(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RankedDag {
        // 0 -> 1 -> 3, 2 -> 3, 3 -> 4
        RankedDag::from_ranked_successors(
            vec![0, 1, 2, 3, 4],
            vec![vec![1], vec![3], vec![3], vec![4], vec![]],
        )
    }

    #[test]
    fn reachability_is_reflexive_and_directed() {
        let g = sample();
        let oracle = OnlineSearch::new(&g);
        assert!(oracle.is_reachable(2, 2));
        assert!(oracle.is_reachable(0, 4));
        assert!(!oracle.is_reachable(4, 0));
        assert!(!oracle.is_reachable(0, 2));
    }

    #[test]
    fn successors_are_strict_and_sorted() {
        let g = sample();
        let oracle = OnlineSearch::new(&g);
        assert_eq!(oracle.successors(0), vec![1, 3, 4]);
        assert_eq!(oracle.successors(2), vec![3, 4]);
        assert!(oracle.successors(4).is_empty());
    }

    #[test]
    fn unknown_vertices_reach_nothing() {
        let g = sample();
        let oracle = OnlineSearch::new(&g);
        assert!(!oracle.is_reachable(0, 5));
        assert!(!oracle.is_reachable(9, 9));
        assert!(oracle.successors(5).is_empty());
    }
}

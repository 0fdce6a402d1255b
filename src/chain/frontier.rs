//! Backward frontier search shared by [`super::fast`] and [`super::concatenate`].
//!
//! The search walks predecessor lists depth-first from a root, looking for a
//! vertex that is currently the frontier of some chain. Each vertex owns one
//! resumable cursor into its predecessor slice, kept in a side array indexed
//! by rank. A cursor only ever moves forward, except for the single rewind a
//! successful search applies to the vertices on its path, so the total work
//! across all searches of one pass stays within \(O(m + c \cdot l)\).

use crate::graph::access::visited::VisitedSet;
use crate::graph::RankedDag;

/// Cursor and visited state for one decomposition or concatenation pass.
pub(crate) struct BackwardSearch {
    cursors: Vec<usize>,
    visited: VisitedSet,
}

impl BackwardSearch {
    pub(crate) fn new(vertex_count: usize) -> Self {
        Self {
            cursors: vec![0; vertex_count],
            visited: VisitedSet::new(vertex_count),
        }
    }

    /// Searches backward from `root` for a vertex satisfying `is_frontier`.
    ///
    /// On success returns the path `root, ..., frontier` (the frontier last).
    /// The intermediate vertices are released again: their visited flags are
    /// cleared and their cursors rewound by one step so later searches can
    /// still walk through them. On failure every explored vertex stays
    /// visited with an exhausted cursor.
    pub(crate) fn find_frontier<F>(
        &mut self,
        dag: &RankedDag,
        root: usize,
        is_frontier: F,
    ) -> Option<Vec<usize>>
    where
        F: Fn(usize) -> bool,
    {
        let mut stack = vec![root];
        while let Some(&current) = stack.last() {
            let preds = dag.predecessors(current);
            loop {
                let Some(&pred) = preds.get(self.cursors[current]) else {
                    stack.pop();
                    break;
                };
                self.cursors[current] += 1;
                if self.visited.is_visited(pred) {
                    continue;
                }
                if is_frontier(pred) {
                    for &v in &stack {
                        self.visited.unvisit(v);
                        self.cursors[v] -= 1;
                    }
                    stack.push(pred);
                    tracing::trace!(root, frontier = pred, depth = stack.len(), "frontier found");
                    return Some(stack);
                }
                self.visited.try_visit(pred);
                stack.push(pred);
                break;
            }
        }
        tracing::trace!(root, "no frontier reachable");
        None
    }
}

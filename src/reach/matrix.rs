//! Dense transitive-closure matrix.

use super::Reachability;
use crate::graph::access::visited::{bit_word_mask, words_for, VisitedSet};
use crate::graph::RankedDag;

/// Full transitive closure stored as one bit row per vertex.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `new` | \(O(n \cdot (n + m))\) | One depth-first search per vertex |
/// | `is_reachable` | \(O(1)\) | Single bit test |
/// | `successors` | \(O(n)\) | Scans one row |
///
/// Memory layout: `rows` is a flat `n * words_per_row` array of bit words;
/// row `v` bit `t` is set iff `v` strictly reaches `t`.
#[derive(Clone, Debug)]
pub struct ReachMatrix {
    vertex_count: usize,
    words_per_row: usize,
    rows: Vec<usize>,
}

impl ReachMatrix {
    /// Computes the closure of `dag`.
    pub fn new(dag: &RankedDag) -> Self {
        let n = dag.vertex_count();
        let words_per_row = words_for(n);
        let mut rows = Vec::with_capacity(n * words_per_row);
        let mut stack = Vec::new();
        for source in 0..n {
            let mut visited = VisitedSet::new(n);
            stack.push(source);
            while let Some(v) = stack.pop() {
                for &t in dag.successors(v) {
                    if visited.try_visit(t) {
                        stack.push(t);
                    }
                }
            }
            rows.extend(visited.into_words());
        }
        tracing::debug!(
            vertices = n,
            bytes = rows.len() * std::mem::size_of::<usize>(),
            "reach matrix built"
        );
        Self {
            vertex_count: n,
            words_per_row,
            rows,
        }
    }

    /// Number of vertices covered.
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    #[inline]
    fn row(&self, v: usize) -> &[usize] {
        &self.rows[v * self.words_per_row..(v + 1) * self.words_per_row]
    }
}

impl Reachability for ReachMatrix {
    fn is_reachable(&self, source: usize, target: usize) -> bool {
        if source >= self.vertex_count || target >= self.vertex_count {
            return false;
        }
        let (word, mask) = bit_word_mask(target);
        source == target || self.row(source)[word] & mask != 0
    }

    fn successors(&self, vertex: usize) -> Vec<usize> {
        if vertex >= self.vertex_count {
            return Vec::new();
        }
        let row = self.row(vertex);
        (0..self.vertex_count)
            .filter(|&t| {
                let (word, mask) = bit_word_mask(t);
                row[word] & mask != 0
            })
            .collect()
    }
}

//! The topologically ranked view of a DAG.
//!
//! Every algorithm in [`crate::chain`] and [`crate::reach`] addresses vertices
//! by their topological rank `0..n`. The view owns packed adjacency arrays in
//! rank space with a fixed ordering contract:
//!
//! - `successors(r)` is sorted by **ascending** rank;
//! - `predecessors(r)` is sorted by **descending** rank.
//!
//! The heuristics depend on this contract (the first listed predecessor is
//! the closest one in topological order), so it is established once here and
//! never mutated afterwards.

use crate::graph::dag::math_assert_msg;
use crate::graph::Dag;

/// A DAG whose vertices are renumbered by topological rank.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `successors` / `predecessors` | \(O(1)\) | Slices into packed arrays |
/// | `rank` / `vertex` | \(O(1)\) | Table lookups |
/// | `from_ranked_successors` | \(O(n + m \log d)\) | Sorts and rebuilds the transpose |
#[derive(Clone, Debug)]
pub struct RankedDag {
    /// `order[rank]` is the original vertex id.
    order: Vec<usize>,
    /// `ranks[vertex]` is the rank of the original vertex id.
    ranks: Vec<usize>,
    succ_offsets: Vec<usize>,
    succ: Vec<usize>,
    pred_offsets: Vec<usize>,
    pred: Vec<usize>,
}

impl RankedDag {
    /// Builds the ranked view from a DAG and one of its topological orders.
    pub(crate) fn from_order(dag: &Dag, order: Vec<usize>) -> Self {
        let n = order.len();
        let mut ranks = vec![0usize; n];
        for (rank, &v) in order.iter().enumerate() {
            ranks[v] = rank;
        }
        let successors: Vec<Vec<usize>> = order
            .iter()
            .map(|&v| dag.neighbors(v).map(|t| ranks[t]).collect())
            .collect();
        Self::assemble(order, ranks, successors)
    }

    /// Builds a ranked view directly from per-rank successor lists.
    ///
    /// `order[r]` names the original vertex at rank `r`; `successors[r]` lists
    /// successor ranks. Lists are sorted and deduplicated here.
    ///
    /// # Panics
    /// Panics if a successor rank is out of bounds or does not exceed its
    /// source rank (the ranking would not be topological).
    pub fn from_ranked_successors(order: Vec<usize>, successors: Vec<Vec<usize>>) -> Self {
        let n = order.len();
        assert_eq!(successors.len(), n, "one successor list per rank");
        let mut ranks = vec![0usize; n];
        for (rank, &v) in order.iter().enumerate() {
            assert!(v < n, "vertex id {v} out of bounds for n={n}");
            ranks[v] = rank;
        }
        for (r, list) in successors.iter().enumerate() {
            for &t in list {
                assert!(t < n && t > r, "edge {r}->{t} is not rank-ascending");
            }
        }
        Self::assemble(order, ranks, successors)
    }

    fn assemble(order: Vec<usize>, ranks: Vec<usize>, mut successors: Vec<Vec<usize>>) -> Self {
        let n = order.len();
        let mut succ_offsets = Vec::with_capacity(n + 1);
        succ_offsets.push(0);
        let mut in_degrees = vec![0usize; n];
        for list in &mut successors {
            list.sort_unstable();
            list.dedup();
            for &t in list.iter() {
                in_degrees[t] += 1;
            }
            succ_offsets.push(succ_offsets[succ_offsets.len() - 1] + list.len());
        }
        let succ: Vec<usize> = successors.into_iter().flatten().collect();

        let mut pred_offsets = Vec::with_capacity(n + 1);
        pred_offsets.push(0);
        for &deg in &in_degrees {
            pred_offsets.push(pred_offsets[pred_offsets.len() - 1] + deg);
        }
        // Scanning sources from the highest rank down leaves every
        // predecessor list in descending rank order.
        let mut pred = vec![0usize; succ.len()];
        let mut write_pos = pred_offsets[..n].to_vec();
        for r in (0..n).rev() {
            for &t in &succ[succ_offsets[r]..succ_offsets[r + 1]] {
                pred[write_pos[t]] = r;
                write_pos[t] += 1;
            }
        }

        let ranked = Self {
            order,
            ranks,
            succ_offsets,
            succ,
            pred_offsets,
            pred,
        };
        #[cfg(debug_assertions)]
        ranked.validate_invariants();
        ranked
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.order.len()
    }

    /// Number of distinct edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.succ.len()
    }

    /// Original vertex ids in ascending rank order.
    #[inline]
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Original vertex id at `rank`.
    #[inline]
    pub fn vertex(&self, rank: usize) -> usize {
        self.order[rank]
    }

    /// Rank of original vertex `vertex`, or `None` if it is not part of the graph.
    #[inline]
    pub fn rank(&self, vertex: usize) -> Option<usize> {
        self.ranks.get(vertex).copied()
    }

    /// Immediate successors of `rank`, ascending.
    #[inline]
    pub fn successors(&self, rank: usize) -> &[usize] {
        &self.succ[self.succ_offsets[rank]..self.succ_offsets[rank + 1]]
    }

    /// Immediate predecessors of `rank`, descending.
    #[inline]
    pub fn predecessors(&self, rank: usize) -> &[usize] {
        &self.pred[self.pred_offsets[rank]..self.pred_offsets[rank + 1]]
    }

    /// Out-degree of `rank`.
    #[inline]
    pub fn out_degree(&self, rank: usize) -> usize {
        self.succ_offsets[rank + 1] - self.succ_offsets[rank]
    }

    /// In-degree of `rank`.
    #[inline]
    pub fn in_degree(&self, rank: usize) -> usize {
        self.pred_offsets[rank + 1] - self.pred_offsets[rank]
    }

    /// All edges as `(source_rank, target_rank)` pairs in ascending order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.vertex_count()).flat_map(move |r| self.successors(r).iter().map(move |&t| (r, t)))
    }

    /// Checks the ordering contract: edges go forward in rank, successor
    /// lists ascend, predecessor lists descend.
    #[cfg(debug_assertions)]
    pub fn validate_invariants(&self) -> bool {
        let n = self.vertex_count();
        for r in 0..n {
            math_assert_msg(self.ranks[self.order[r]] == r, "rank table must invert order");
            let succ = self.successors(r);
            math_assert_msg(succ.iter().all(|&t| t > r), "edges must go forward in rank");
            math_assert_msg(succ.windows(2).all(|w| w[0] < w[1]), "successors must ascend");
            let pred = self.predecessors(r);
            math_assert_msg(pred.iter().all(|&s| s < r), "predecessors must precede");
            math_assert_msg(pred.windows(2).all(|w| w[0] > w[1]), "predecessors must descend");
        }
        true
    }
}

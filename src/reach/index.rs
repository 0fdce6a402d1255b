//! The chain indexing scheme.
//!
//! Given a chain decomposition with `k` chains, every vertex stores one slot
//! per chain: the earliest position in that chain it strictly reaches, or
//! [`UNREACHABLE`]. Because a chain is totally ordered by reachability, a
//! vertex reaches position `p` of chain `c` iff its slot for `c` is `<= p`.
//!
//! Construction visits ranks in descending order so every successor's row is
//! final before any predecessor reads it. Successor lists are scanned in
//! ascending rank order; an edge whose target is already covered by the
//! partially built row is implied by an earlier successor and is reported as
//! transitive instead of being merged.
//!
//! Memory layout:
//! - `index`: flat `n * k` array, row `v` at `v * k .. (v + 1) * k`
//! - `chains`: vertex ranks per chain, in chain order

use super::Reachability;
use crate::chain::Decomposition;
use crate::error::ChainError;
use crate::graph::RankedDag;

/// Slot value for a chain the vertex cannot reach.
pub const UNREACHABLE: usize = usize::MAX;

/// Compact reachability index derived from a chain decomposition.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `build` | \(O(m \cdot k)\) | One row merge per non-transitive edge |
/// | `is_reachable` | \(O(1)\) | One slot compared against one position |
/// | `successors` | \(O(k + \text{output})\) | Suffix of every reachable chain |
#[derive(Clone, Debug)]
pub struct IndexingScheme {
    chain_of: Vec<usize>,
    position: Vec<usize>,
    chains: Vec<Vec<usize>>,
    index: Vec<usize>,
}

impl IndexingScheme {
    /// Builds the index for `dag` from `decomposition`.
    ///
    /// # Errors
    /// [`ChainError::InvalidDecomposition`] unless the chains partition the
    /// ranks of `dag`.
    pub fn build(dag: &RankedDag, decomposition: &Decomposition) -> Result<Self, ChainError> {
        Self::construct(dag, decomposition, |_, _| {})
    }

    /// Like [`build`](Self::build), additionally returning every transitive
    /// edge `(source, target)` of `dag` in rank space.
    ///
    /// An edge is transitive when its target is also reachable through another
    /// successor of its source. Edges are listed by descending source rank,
    /// then ascending target rank.
    pub fn build_with_transitive_edges(
        dag: &RankedDag,
        decomposition: &Decomposition,
    ) -> Result<(Self, Vec<(usize, usize)>), ChainError> {
        let mut transitive = Vec::new();
        let scheme = Self::construct(dag, decomposition, |v, t| transitive.push((v, t)))?;
        Ok((scheme, transitive))
    }

    fn construct<F>(
        dag: &RankedDag,
        decomposition: &Decomposition,
        mut on_transitive: F,
    ) -> Result<Self, ChainError>
    where
        F: FnMut(usize, usize),
    {
        let n = dag.vertex_count();
        let membership = decomposition.membership(n)?;
        let k = decomposition.len();
        let chain_of: Vec<usize> = membership.iter().map(|m| m.chain).collect();
        let position: Vec<usize> = membership.iter().map(|m| m.position).collect();
        let chains: Vec<Vec<usize>> = decomposition
            .iter()
            .map(|chain| chain.vertices().to_vec())
            .collect();

        let mut index = vec![UNREACHABLE; n * k];
        let mut transitive = 0usize;
        for v in (0..n).rev() {
            for &t in dag.successors(v) {
                let (low, high) = index.split_at_mut(t * k);
                let row = &mut low[v * k..(v + 1) * k];
                let target_chain = chain_of[t];
                if row[target_chain] <= position[t] {
                    transitive += 1;
                    on_transitive(v, t);
                    continue;
                }
                for (slot, &reached) in row.iter_mut().zip(&high[..k]) {
                    *slot = (*slot).min(reached);
                }
                row[target_chain] = row[target_chain].min(position[t]);
            }
        }

        tracing::debug!(
            vertices = n,
            chains = k,
            edges = dag.edge_count(),
            transitive,
            "indexing scheme built"
        );
        Ok(Self {
            chain_of,
            position,
            chains,
            index,
        })
    }

    /// Number of chains, the length of every index row.
    pub fn chain_count(&self) -> usize {
        self.chains.len()
    }

    /// Number of indexed vertices.
    pub fn vertex_count(&self) -> usize {
        self.chain_of.len()
    }

    /// The index row of `vertex`: per chain, the earliest strictly reachable
    /// position or [`UNREACHABLE`].
    ///
    /// # Panics
    /// Panics if `vertex` is out of bounds.
    pub fn index(&self, vertex: usize) -> &[usize] {
        assert!(vertex < self.vertex_count(), "vertex {vertex} out of bounds");
        let k = self.chain_count();
        &self.index[vertex * k..(vertex + 1) * k]
    }

    /// Chain index and in-chain position of `vertex`.
    pub fn location(&self, vertex: usize) -> Option<(usize, usize)> {
        Some((*self.chain_of.get(vertex)?, self.position[vertex]))
    }
}

impl Reachability for IndexingScheme {
    fn is_reachable(&self, source: usize, target: usize) -> bool {
        let n = self.vertex_count();
        if source >= n || target >= n {
            return false;
        }
        source == target || self.index(source)[self.chain_of[target]] <= self.position[target]
    }

    fn successors(&self, vertex: usize) -> Vec<usize> {
        if vertex >= self.vertex_count() {
            return Vec::new();
        }
        let mut reached: Vec<usize> = self
            .index(vertex)
            .iter()
            .zip(&self.chains)
            .filter(|(from, _)| **from != UNREACHABLE)
            .flat_map(|(&from, chain)| chain[from..].iter().copied())
            .collect();
        reached.sort_unstable();
        reached
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::{fast, optimal, Chain};
    use crate::graph::Dag;
    use crate::reach::{OnlineSearch, ReachMatrix};

    fn identity(successors: Vec<Vec<usize>>) -> RankedDag {
        RankedDag::from_ranked_successors((0..successors.len()).collect(), successors)
    }

    #[test]
    fn rows_hold_earliest_reachable_position() {
        // Chains [0, 1, 2] and [3, 4]; cross edges 0 -> 4 and 1 -> 4.
        let g = identity(vec![vec![1, 4], vec![2, 4], vec![], vec![4], vec![]]);
        let d = Decomposition::new(vec![Chain::from(vec![0, 1, 2]), Chain::from(vec![3, 4])]);
        let scheme = IndexingScheme::build(&g, &d).unwrap();
        assert_eq!(scheme.chain_count(), 2);
        assert_eq!(scheme.index(0), &[1, 1]);
        assert_eq!(scheme.index(1), &[2, 1]);
        assert_eq!(scheme.index(2), &[UNREACHABLE, UNREACHABLE]);
        assert_eq!(scheme.index(3), &[UNREACHABLE, 1]);
        assert_eq!(scheme.location(4), Some((1, 1)));

        assert!(scheme.is_reachable(0, 2));
        assert!(scheme.is_reachable(1, 4));
        assert!(!scheme.is_reachable(1, 3));
        assert!(!scheme.is_reachable(2, 1));
        assert!(scheme.is_reachable(3, 3));
        assert_eq!(scheme.successors(0), vec![1, 2, 4]);
        assert!(scheme.successors(2).is_empty());
    }

    #[test]
    fn detects_transitive_edges() {
        // 0 -> 1 -> 2 with shortcut 0 -> 2, plus 2 -> 3 and shortcut 1 -> 3.
        let g = identity(vec![vec![1, 2], vec![2, 3], vec![3], vec![]]);
        let d = fast(&g);
        let (scheme, transitive) = IndexingScheme::build_with_transitive_edges(&g, &d).unwrap();
        assert_eq!(transitive, vec![(1, 3), (0, 2)]);
        assert_eq!(scheme.successors(0), vec![1, 2, 3]);
    }

    #[test]
    fn in_chain_edge_is_not_transitive() {
        let g = identity(vec![vec![1], vec![]]);
        let d = Decomposition::new(vec![Chain::from(vec![0, 1])]);
        let (scheme, transitive) = IndexingScheme::build_with_transitive_edges(&g, &d).unwrap();
        assert!(transitive.is_empty());
        assert!(scheme.is_reachable(0, 1));
        assert!(!scheme.is_reachable(1, 0));
    }

    #[test]
    fn agrees_with_reference_oracles() {
        let mut dag = Dag::from_edges(
            8,
            &[
                (0, 1),
                (1, 2),
                (0, 2),
                (3, 1),
                (2, 4),
                (2, 5),
                (5, 7),
                (6, 7),
                (3, 6),
            ],
        )
        .unwrap();
        let g = dag.ranked().unwrap();
        let matrix = ReachMatrix::new(&g);
        let online = OnlineSearch::new(&g);
        for d in [fast(&g), optimal(&g).unwrap()] {
            let scheme = IndexingScheme::build(&g, &d).unwrap();
            for s in 0..8 {
                for t in 0..8 {
                    let expected = matrix.is_reachable(s, t);
                    assert_eq!(scheme.is_reachable(s, t), expected, "{s} -> {t}");
                    assert_eq!(online.is_reachable(s, t), expected, "{s} -> {t}");
                }
                assert_eq!(scheme.successors(s), matrix.successors(s));
            }
        }
    }

    #[test]
    fn rejects_overlapping_chains() {
        let g = identity(vec![vec![1], vec![]]);
        let d = Decomposition::new(vec![Chain::from(vec![0, 1]), Chain::from(vec![1])]);
        assert!(matches!(
            IndexingScheme::build(&g, &d),
            Err(ChainError::InvalidDecomposition(_))
        ));
    }

    #[test]
    fn unknown_vertices_are_unreachable() {
        let g = identity(vec![vec![]]);
        let scheme = IndexingScheme::build(&g, &fast(&g)).unwrap();
        assert!(!scheme.is_reachable(0, 1));
        assert!(scheme.successors(3).is_empty());
        assert_eq!(scheme.location(3), None);
    }
}

//! Minimum chain decomposition via Fulkerson's reduction to bipartite matching.

use super::{Chain, Decomposition};
use crate::error::ChainError;
use crate::graph::{BipartiteGraph, RankedDag, NIL};
use crate::reach::{OnlineSearch, Reachability};

/// Computes a decomposition with exactly `width` chains, using an online
/// depth-first search as the reachability oracle.
///
/// See [`optimal_with`].
pub fn optimal(dag: &RankedDag) -> Result<Decomposition, ChainError> {
    optimal_with(dag, &OnlineSearch::new(dag))
}

/// Computes a minimum chain decomposition.
///
/// Builds the split bipartite graph with a link `(r + 1, s + 1)` for every
/// ordered pair where `r` strictly reaches `s` (per `oracle`), takes a
/// maximum matching of size `M`, and reads chains off the matched pairs. The
/// result has `n - M` chains, the width of the graph by Dilworth's theorem.
///
/// Cost is dominated by the oracle's successor enumeration (up to
/// \(O(n^2)\) links) and Hopcroft–Karp on the resulting graph.
///
/// # Errors
/// [`ChainError::WidthMismatch`] if the reconstructed chain count disagrees
/// with `n - M`. This happens only when `oracle` reports a successor of lower
/// rank, so that matched pairs close a cycle.
pub fn optimal_with<R>(dag: &RankedDag, oracle: &R) -> Result<Decomposition, ChainError>
where
    R: Reachability + ?Sized,
{
    let n = dag.vertex_count();
    let mut split = BipartiteGraph::new(n, n);
    for r in 0..n {
        for s in oracle.successors(r) {
            split.add_link(r + 1, s + 1)?;
        }
    }
    let matching = split.maximum_matching();
    let width = n - matching.size();

    let mut placed = vec![false; n];
    let mut chains = Vec::with_capacity(width);
    for start in 0..n {
        if placed[start] {
            continue;
        }
        let mut chain = Chain::new();
        let mut next = start + 1;
        while next != NIL && !placed[next - 1] {
            placed[next - 1] = true;
            chain.push(next - 1);
            next = matching.pair_left()[next];
        }
        chains.push(chain);
    }

    if chains.len() != width {
        return Err(ChainError::WidthMismatch {
            chains: chains.len(),
            width,
        });
    }
    tracing::debug!(
        links = split.edge_count(),
        matched = matching.size(),
        width,
        "optimal decomposition"
    );
    Ok(Decomposition::new(chains))
}

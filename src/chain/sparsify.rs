//! Edge sparsification guided by a chain decomposition.

use super::Decomposition;
use crate::error::ChainError;
use crate::graph::RankedDag;

/// Returns a copy of `dag` with redundant edges removed.
///
/// Two passes, both keyed on the chain of the other endpoint:
/// 1. each vertex keeps only its lowest-ranked immediate successor per chain;
/// 2. each vertex keeps only its highest-ranked remaining immediate
///    predecessor per chain.
///
/// Every dropped edge `u -> v` is implied by a kept edge into the same chain
/// that `v` follows on, so reachability is unchanged. The vertex set and
/// rank order are preserved; afterwards each vertex has at most one outgoing
/// and one incoming edge per chain.
///
/// # Errors
/// [`ChainError::InvalidDecomposition`] if `decomposition` does not
/// partition the vertices of `dag`.
pub fn sparsify(dag: &RankedDag, decomposition: &Decomposition) -> Result<RankedDag, ChainError> {
    let n = dag.vertex_count();
    let membership = decomposition.membership(n)?;
    let chain_count = decomposition.len();

    // Successor lists are ascending, so the first hit per chain is the lowest rank.
    let mut seen = vec![usize::MAX; chain_count];
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
    for u in 0..n {
        for &v in dag.successors(u) {
            let chain = membership[v].chain;
            if seen[chain] != u {
                seen[chain] = u;
                predecessors[v].push(u);
            }
        }
    }

    // Predecessors were pushed in ascending `u`; scan from the back for the latest.
    seen.fill(usize::MAX);
    let mut successors: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (v, preds) in predecessors.iter().enumerate() {
        for &u in preds.iter().rev() {
            let chain = membership[u].chain;
            if seen[chain] != v {
                seen[chain] = v;
                successors[u].push(v);
            }
        }
    }

    let sparse = RankedDag::from_ranked_successors(dag.order().to_vec(), successors);
    tracing::debug!(
        before = dag.edge_count(),
        after = sparse.edge_count(),
        chains = chain_count,
        "sparsified edges"
    );
    Ok(sparse)
}

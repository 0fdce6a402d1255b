//! Chain concatenation: merge chains of an existing decomposition.

use super::frontier::BackwardSearch;
use super::{Chain, Decomposition};
use crate::error::ChainError;
use crate::graph::RankedDag;

/// Reduces the number of chains in `decomposition` in a single pass.
///
/// Chains are visited in their current order. For each chain, a backward
/// frontier search starts at the chain's first vertex; if it reaches the
/// frontier of another live chain, the whole chain is appended behind that
/// frontier and removed. Cursor and visited state are shared by all searches
/// of the pass, giving \(O(m + c \cdot l)\) total work.
///
/// Returns the number of merges performed. The relative order of the
/// surviving chains is preserved.
///
/// # Errors
/// [`ChainError::InvalidDecomposition`] if `decomposition` does not
/// partition the vertices of `dag`; it is left unchanged in that case.
pub fn concatenate(
    dag: &RankedDag,
    decomposition: &mut Decomposition,
) -> Result<usize, ChainError> {
    let n = dag.vertex_count();
    let mut chain_of: Vec<usize> = decomposition
        .membership(n)?
        .iter()
        .map(|m| m.chain)
        .collect();
    let mut chains: Vec<Option<Chain>> = std::mem::take(decomposition)
        .into_chains()
        .into_iter()
        .map(Some)
        .collect();

    let mut search = BackwardSearch::new(n);
    let mut merges = 0usize;
    for index in 0..chains.len() {
        let Some(root) = chains[index].as_ref().and_then(Chain::first) else {
            continue;
        };

        let is_frontier = |v: usize| {
            chains
                .get(chain_of[v])
                .and_then(Option::as_ref)
                .and_then(Chain::last)
                == Some(v)
        };
        let Some(path) = search.find_frontier(dag, root, is_frontier) else {
            continue;
        };
        let Some(&frontier) = path.last() else {
            continue;
        };
        let target = chain_of[frontier];
        debug_assert_ne!(target, index, "a chain cannot precede its own start");

        if let Some(moved) = chains[index].take() {
            for &v in moved.vertices() {
                chain_of[v] = target;
            }
            if let Some(target_chain) = chains[target].as_mut() {
                target_chain.append(moved);
                merges += 1;
            }
        }
    }

    *decomposition = Decomposition::new(chains.into_iter().flatten().collect());
    tracing::debug!(merges, chains = decomposition.len(), "concatenated chains");
    Ok(merges)
}

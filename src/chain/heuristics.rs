//! Linear-time and near-linear chain decomposition heuristics.
//!
//! All four strategies scan ranks in ascending topological order and return
//! a [`Decomposition`] covering every vertex exactly once.

use super::frontier::BackwardSearch;
use super::{Chain, Decomposition};
use crate::graph::RankedDag;

/// Chain bookkeeping shared by the node-order strategies.
struct ChainBuilder {
    chains: Vec<Chain>,
    chain_of: Vec<Option<usize>>,
}

impl ChainBuilder {
    fn new(vertex_count: usize) -> Self {
        Self {
            chains: Vec::new(),
            chain_of: vec![None; vertex_count],
        }
    }

    fn start(&mut self, v: usize) {
        self.chain_of[v] = Some(self.chains.len());
        self.chains.push(Chain::singleton(v));
    }

    fn append(&mut self, chain: usize, v: usize) {
        self.chains[chain].push(v);
        self.chain_of[v] = Some(chain);
    }

    /// Returns the chain `v` currently ends, if any.
    fn frontier_chain(&self, v: usize) -> Option<usize> {
        self.chain_of[v].filter(|&c| self.chains[c].last() == Some(v))
    }

    fn finish(self, strategy: &'static str) -> Decomposition {
        tracing::debug!(strategy, chains = self.chains.len(), "decomposition built");
        Decomposition::new(self.chains)
    }
}

/// Chain Order Heuristic.
///
/// For each unvisited rank, starts a chain and keeps following the first
/// unvisited immediate successor until none is left. Linear time; the result
/// depends on successor order.
pub fn chain_order(dag: &RankedDag) -> Decomposition {
    let n = dag.vertex_count();
    let mut visited = vec![false; n];
    let mut chains = Vec::new();

    for root in 0..n {
        if visited[root] {
            continue;
        }
        visited[root] = true;
        let mut chain = Chain::singleton(root);
        let mut v = root;
        while let Some(&t) = dag.successors(v).iter().find(|&&t| !visited[t]) {
            visited[t] = true;
            chain.push(t);
            v = t;
        }
        chains.push(chain);
    }

    tracing::debug!(strategy = "chain-order", chains = chains.len(), "decomposition built");
    Decomposition::new(chains)
}

/// Node Order Heuristic.
///
/// Appends each vertex to the chain of its first immediate predecessor (in
/// stored, descending-rank order) that is currently a chain frontier, or
/// starts a new chain. Linear time.
pub fn node_order(dag: &RankedDag) -> Decomposition {
    let mut builder = ChainBuilder::new(dag.vertex_count());
    for v in 0..dag.vertex_count() {
        let target = dag
            .predecessors(v)
            .iter()
            .find_map(|&p| builder.frontier_chain(p));
        match target {
            Some(chain) => builder.append(chain, v),
            None => builder.start(v),
        }
    }
    builder.finish("node-order")
}

/// Node Order Heuristic variant.
///
/// Like [`node_order`], but among frontier predecessors picks the one with
/// the smallest out-degree, and after placing a vertex eagerly appends its
/// first immediate successor whose in-degree is exactly one. Linear time.
pub fn node_order_variant(dag: &RankedDag) -> Decomposition {
    grow(dag, None).finish("node-order-variant")
}

/// Fast Chain Decomposition.
///
/// The [`node_order_variant`] heuristic, falling back to a backward frontier
/// search whenever no immediate predecessor is a frontier. The result is a
/// chain (not necessarily path) decomposition built in
/// \(O(m + c \cdot l)\) for `c` chains and path-length bound `l`. This is the
/// default strategy.
pub fn fast(dag: &RankedDag) -> Decomposition {
    let mut search = BackwardSearch::new(dag.vertex_count());
    grow(dag, Some(&mut search)).finish("fast")
}

fn grow(dag: &RankedDag, mut search: Option<&mut BackwardSearch>) -> ChainBuilder {
    let n = dag.vertex_count();
    let mut builder = ChainBuilder::new(n);

    for v in 0..n {
        if builder.chain_of[v].is_none() {
            // Frontier predecessor forfeiting the fewest alternative extensions.
            let mut best: Option<(usize, usize)> = None;
            for &p in dag.predecessors(v) {
                if let Some(chain) = builder.frontier_chain(p) {
                    let degree = dag.out_degree(p);
                    if best.map_or(true, |(_, d)| degree < d) {
                        best = Some((chain, degree));
                    }
                }
            }
            let mut target = best.map(|(chain, _)| chain);

            if target.is_none() {
                if let Some(search) = search.as_deref_mut() {
                    target = search
                        .find_frontier(dag, v, |p| builder.frontier_chain(p).is_some())
                        .and_then(|path| path.last().copied())
                        .and_then(|frontier| builder.chain_of[frontier]);
                }
            }

            match target {
                Some(chain) => builder.append(chain, v),
                None => builder.start(v),
            }
        }

        // `v` is its chain's frontier here; claim a successor that has no
        // other way in.
        if let Some(&t) = dag.successors(v).iter().find(|&&t| dag.in_degree(t) == 1) {
            if let Some(chain) = builder.chain_of[v] {
                builder.append(chain, t);
            }
        }
    }

    builder
}

//! Chain decompositions of a ranked DAG.
//!
//! A [`Decomposition`] partitions the vertex ranks of a [`RankedDag`] into
//! vertex-disjoint [`Chain`]s. Consecutive chain members are connected by a
//! path in the graph (not necessarily a direct edge).
//!
//! Strategies, cheapest first:
//! - [`chain_order`] — follow the first unvisited successor, linear time
//! - [`node_order`] — extend a predecessor's chain when it is a frontier, linear time
//! - [`node_order_variant`] — minimum out-degree tie-break plus eager
//!   single-predecessor extension, linear time
//! - [`fast`] — the variant plus a backward frontier search, \(O(m + c \cdot l)\)
//! - [`optimal`] — Fulkerson's method over a maximum matching; yields the width
//!
//! [`concatenate`] merges chains of any decomposition in one pass, and
//! [`sparsify`] uses a decomposition to drop redundant edges.

mod concat;
mod frontier;
mod heuristics;
mod optimal;
mod sparsify;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ChainError;
use crate::graph::RankedDag;
use crate::reach::{OnlineSearch, Reachability};

pub use concat::concatenate;
pub use heuristics::{chain_order, fast, node_order, node_order_variant};
pub use optimal::{optimal, optimal_with};
pub use sparsify::sparsify;

/// A vertex-disjoint path, stored as vertex ranks from chain start to frontier.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Chain {
    vertices: Vec<usize>,
}

impl Chain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a chain holding a single vertex.
    pub fn singleton(vertex: usize) -> Self {
        Self {
            vertices: vec![vertex],
        }
    }

    /// Appends `vertex`, making it the new frontier.
    #[inline]
    pub fn push(&mut self, vertex: usize) {
        self.vertices.push(vertex);
    }

    /// Moves every vertex of `other` onto the end of this chain.
    pub fn append(&mut self, other: Chain) {
        self.vertices.extend(other.vertices);
    }

    /// First vertex.
    #[inline]
    pub fn first(&self) -> Option<usize> {
        self.vertices.first().copied()
    }

    /// Frontier vertex (the last appended one).
    #[inline]
    pub fn last(&self) -> Option<usize> {
        self.vertices.last().copied()
    }

    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns `true` if the chain holds no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertices in path order.
    #[inline]
    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }
}

impl From<Vec<usize>> for Chain {
    fn from(vertices: Vec<usize>) -> Self {
        Self { vertices }
    }
}

/// Where a vertex sits inside a decomposition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Membership {
    /// Index of the chain in the decomposition.
    pub chain: usize,
    /// Position within that chain, `0` at the chain start.
    pub position: usize,
}

/// An ordered set of chains partitioning the vertices of a graph.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Decomposition {
    chains: Vec<Chain>,
}

impl Decomposition {
    /// Wraps a list of chains. Empty chains are dropped.
    pub fn new(chains: Vec<Chain>) -> Self {
        Self {
            chains: chains.into_iter().filter(|c| !c.is_empty()).collect(),
        }
    }

    /// Number of chains.
    #[inline]
    pub fn len(&self) -> usize {
        self.chains.len()
    }

    /// Returns `true` if there are no chains.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// The chains in order.
    #[inline]
    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    /// Iterates the chains in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Chain> {
        self.chains.iter()
    }

    /// Consumes the decomposition, returning its chains.
    pub fn into_chains(self) -> Vec<Chain> {
        self.chains
    }

    /// Total number of vertices over all chains.
    pub fn vertex_count(&self) -> usize {
        self.chains.iter().map(Chain::len).sum()
    }

    /// Maps every rank in `0..vertex_count` to its chain and position.
    ///
    /// Fails unless the chains cover every rank exactly once.
    pub fn membership(&self, vertex_count: usize) -> Result<Vec<Membership>, ChainError> {
        let mut table: Vec<Option<Membership>> = vec![None; vertex_count];
        for (chain, c) in self.chains.iter().enumerate() {
            for (position, &v) in c.vertices.iter().enumerate() {
                let slot = table.get_mut(v).ok_or_else(|| {
                    ChainError::InvalidDecomposition(format!(
                        "vertex {v} out of bounds for n={vertex_count}"
                    ))
                })?;
                if let Some(prev) = slot {
                    return Err(ChainError::InvalidDecomposition(format!(
                        "vertex {v} appears in chains {} and {chain}",
                        prev.chain
                    )));
                }
                *slot = Some(Membership { chain, position });
            }
        }
        table
            .into_iter()
            .enumerate()
            .map(|(v, m)| {
                m.ok_or_else(|| {
                    ChainError::InvalidDecomposition(format!("vertex {v} is not covered"))
                })
            })
            .collect()
    }

    /// Checks the partition property and that every consecutive pair in a
    /// chain is connected by a path according to `oracle`.
    pub fn validate<R>(&self, dag: &RankedDag, oracle: &R) -> Result<(), ChainError>
    where
        R: Reachability + ?Sized,
    {
        self.membership(dag.vertex_count())?;
        for (index, chain) in self.chains.iter().enumerate() {
            for pair in chain.vertices.windows(2) {
                if !oracle.is_reachable(pair[0], pair[1]) {
                    return Err(ChainError::InvalidDecomposition(format!(
                        "chain {index}: {} does not reach {}",
                        pair[0], pair[1]
                    )));
                }
            }
        }
        Ok(())
    }

    /// Renders each chain with original vertex ids, one line per chain.
    pub fn display<'a>(&'a self, dag: &'a RankedDag) -> impl fmt::Display + 'a {
        DisplayDecomposition {
            decomposition: self,
            dag,
        }
    }
}

impl<'a> IntoIterator for &'a Decomposition {
    type Item = &'a Chain;
    type IntoIter = std::slice::Iter<'a, Chain>;

    fn into_iter(self) -> Self::IntoIter {
        self.chains.iter()
    }
}

struct DisplayDecomposition<'a> {
    decomposition: &'a Decomposition,
    dag: &'a RankedDag,
}

impl fmt::Display for DisplayDecomposition<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, chain) in self.decomposition.iter().enumerate() {
            write!(f, "Chain {index}:")?;
            for &v in chain.vertices() {
                write!(f, " {}", self.dag.vertex(v))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// The decomposition strategy to run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// [`chain_order`].
    ChainOrder,
    /// [`node_order`].
    NodeOrder,
    /// [`node_order_variant`].
    NodeOrderVariant,
    /// [`fast`].
    #[default]
    Fast,
    /// [`optimal`] with an online-search bootstrap oracle.
    Optimal,
}

impl Strategy {
    /// Every strategy, cheapest first.
    pub const ALL: [Strategy; 5] = [
        Strategy::ChainOrder,
        Strategy::NodeOrder,
        Strategy::NodeOrderVariant,
        Strategy::Fast,
        Strategy::Optimal,
    ];

    /// Runs this strategy on `dag`.
    pub fn decompose(self, dag: &RankedDag) -> Result<Decomposition, ChainError> {
        Ok(match self {
            Strategy::ChainOrder => chain_order(dag),
            Strategy::NodeOrder => node_order(dag),
            Strategy::NodeOrderVariant => node_order_variant(dag),
            Strategy::Fast => fast(dag),
            Strategy::Optimal => optimal_with(dag, &OnlineSearch::new(dag))?,
        })
    }

    fn name(self) -> &'static str {
        match self {
            Strategy::ChainOrder => "chain-order",
            Strategy::NodeOrder => "node-order",
            Strategy::NodeOrderVariant => "node-order-variant",
            Strategy::Fast => "fast",
            Strategy::Optimal => "optimal",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.name() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Strategy::ALL.iter().map(|s| s.name()).collect();
                format!("unknown strategy `{s}`, expected one of: {}", names.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Dag;

    fn diamond() -> RankedDag {
        Dag::from_adjacency(&[vec![1, 2], vec![3], vec![3], vec![]])
            .ranked()
            .unwrap()
    }

    #[test]
    fn membership_maps_positions() {
        let d = Decomposition::new(vec![Chain::from(vec![0, 1, 3]), Chain::singleton(2)]);
        let table = d.membership(4).unwrap();
        assert_eq!(table[3], Membership { chain: 0, position: 2 });
        assert_eq!(table[2], Membership { chain: 1, position: 0 });
        assert_eq!(d.vertex_count(), 4);
    }

    #[test]
    fn membership_rejects_duplicates_and_gaps() {
        let dup = Decomposition::new(vec![Chain::from(vec![0, 1]), Chain::from(vec![1, 2])]);
        assert!(matches!(dup.membership(3), Err(ChainError::InvalidDecomposition(_))));

        let gap = Decomposition::new(vec![Chain::from(vec![0, 1])]);
        assert!(gap.membership(3).is_err());

        let out = Decomposition::new(vec![Chain::from(vec![0, 7])]);
        assert!(out.membership(2).is_err());
    }

    #[test]
    fn validate_checks_paths() {
        let g = diamond();
        let oracle = OnlineSearch::new(&g);
        let good = Decomposition::new(vec![Chain::from(vec![0, 1, 3]), Chain::singleton(2)]);
        assert!(good.validate(&g, &oracle).is_ok());

        let bad = Decomposition::new(vec![Chain::from(vec![0, 1, 2]), Chain::singleton(3)]);
        let err = bad.validate(&g, &oracle).unwrap_err();
        assert_eq!(
            err,
            ChainError::InvalidDecomposition("chain 0: 1 does not reach 2".into())
        );
    }

    #[test]
    fn empty_chains_are_dropped() {
        let d = Decomposition::new(vec![Chain::new(), Chain::singleton(0)]);
        assert_eq!(d.len(), 1);
    }

    #[test]
    fn display_uses_vertex_ids() {
        let g = Dag::from_edges(3, &[(2, 0), (0, 1)]).unwrap().ranked().unwrap();
        let d = fast(&g);
        assert_eq!(d.display(&g).to_string(), "Chain 0: 2 0 1\n");
    }

    #[test]
    fn strategy_names_round_trip() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.to_string().parse::<Strategy>(), Ok(strategy));
        }
        assert!("greedy".parse::<Strategy>().is_err());
        assert_eq!(Strategy::default(), Strategy::Fast);
    }

    #[test]
    fn every_strategy_covers_the_diamond() {
        let g = diamond();
        let oracle = OnlineSearch::new(&g);
        for strategy in Strategy::ALL {
            let d = strategy.decompose(&g).unwrap();
            d.validate(&g, &oracle).unwrap();
        }
    }
}

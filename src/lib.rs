//! # `chainreach` - Chain Decompositions and Chain-Indexed Reachability
//!
//! Decomposes the vertices of a directed acyclic graph into vertex-disjoint
//! chains and turns a decomposition into a compact reachability index that
//! answers "can `a` reach `b`?" without materializing the transitive closure.
//!
//! ## Key Features
//!
//! - **Four heuristics**: chain order, node order, the node-order variant and
//!   the fast decomposition with backward frontier search
//! - **Optimal decomposition**: Fulkerson's method over a Hopcroft–Karp
//!   maximum matching; the chain count equals the graph's width
//! - **Chain concatenation**: a single-pass merge of an existing decomposition
//! - **Three oracles**: online search, dense matrix and the indexing scheme,
//!   all behind the [`Reachability`] trait
//!
//! ## Architecture
//!
//! Every algorithm works in *rank space*. [`Dag`] holds the input in CSR/CSC
//! form and computes a topological order with Kahn's algorithm;
//! [`Dag::ranked`] then produces a [`RankedDag`] whose vertices are the ranks
//! `0..n`, with successors listed in ascending and predecessors in descending
//! rank order. Cyclic input is rejected there with [`ChainError::Cyclic`], so
//! nothing downstream ever sees a graph without a topological order.
//!
//! 1. **Graph model** ([`graph`]): `Dag`, `RankedDag`, the edge-list reader
//!    and the bipartite matching kernel.
//! 2. **Decompositions** ([`chain`]): `Chain`, `Decomposition`, every
//!    strategy, concatenation and sparsification.
//! 3. **Oracles** ([`reach`]): `OnlineSearch`, `ReachMatrix`,
//!    `IndexingScheme`.
//!
//! All computations are single-threaded batch passes over a frozen graph and
//! take their inputs explicitly; there is no global state.
//!
//! ## Example
//!
//! ```rust
//! use chainreach::{Dag, IndexingScheme, Reachability, Strategy};
//!
//! let mut dag = Dag::from_edges(7, &[(0, 1), (1, 2), (0, 2), (3, 1), (2, 4), (2, 5)])?;
//! let ranked = dag.ranked()?;
//!
//! let chains = Strategy::Optimal.decompose(&ranked)?;
//! assert_eq!(chains.len(), 3);
//!
//! let index = IndexingScheme::build(&ranked, &chains)?;
//! let rank = |v| ranked.rank(v).unwrap();
//! assert!(index.is_reachable(rank(0), rank(5)));
//! assert!(!index.is_reachable(rank(6), rank(0)));
//! # Ok::<(), chainreach::ChainError>(())
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod chain;
pub mod error;
pub mod graph;
pub mod reach;

pub use chain::{Chain, Decomposition, Membership, Strategy};
pub use error::{ChainError, GraphError, MatchingError};
pub use graph::{BipartiteGraph, Dag, EdgeList, Matching, RankedDag};
pub use reach::{IndexingScheme, OnlineSearch, ReachMatrix, Reachability};

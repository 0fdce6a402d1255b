//! Graph layouts consumed by the decomposition and reachability algorithms.
//!
//! - `dag`: CSR/CSC directed graph with Kahn topological sort and cycle detection
//! - `ranked`: the topologically ranked view with ordered adjacency
//! - `bipartite`: bipartite links and the Hopcroft–Karp matching kernel
//! - `edge_list`: the plain-text `x,y` reader

pub mod bipartite;
pub mod dag;
pub mod edge_list;
pub mod ranked;
pub(crate) mod access;

pub use bipartite::{BipartiteGraph, Matching, NIL};
pub use dag::Dag;
pub use edge_list::{EdgeList, ParseError, ParseErrorKind};
pub use ranked::RankedDag;

//! Error types shared by the graph, chain and reachability modules.

use thiserror::Error;

/// Errors raised while building a graph from adjacency data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// An edge names a vertex that does not exist.
    #[error("edge {from}->{to} is out of bounds for n={vertex_count}")]
    VertexOutOfBounds {
        /// Edge source.
        from: usize,
        /// Edge target.
        to: usize,
        /// Number of vertices in the graph.
        vertex_count: usize,
    },
}

/// Errors raised by the bipartite matching kernel.
///
/// These indicate a defect in the caller's DAG-to-bipartite mapping and are
/// never recoverable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchingError {
    /// A link endpoint lies outside `1..=side` (index 0 is the reserved NIL slot).
    #[error("bipartite link {left}->{right} outside 1..={left_count} x 1..={right_count}")]
    LinkOutOfRange {
        /// Left endpoint (1-based).
        left: usize,
        /// Right endpoint (1-based).
        right: usize,
        /// Size of the left side.
        left_count: usize,
        /// Size of the right side.
        right_count: usize,
    },
}

/// Errors raised by decomposition and indexing entry points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    /// The input graph contains a directed cycle, so no topological ranking exists.
    #[error("graph contains a cycle; a topological order is required")]
    Cyclic,

    /// Fulkerson's method produced a decomposition whose size differs from
    /// `|V| - |maximum matching|`.
    #[error("internal invariant violated: {chains} chains but width is {width}")]
    WidthMismatch {
        /// Number of chains reconstructed from the matching.
        chains: usize,
        /// Width computed from the matching size.
        width: usize,
    },

    /// A decomposition does not partition the vertex set or a chain is not a path.
    #[error("invalid decomposition: {0}")]
    InvalidDecomposition(String),

    /// The matching kernel rejected a link.
    #[error(transparent)]
    Matching(#[from] MatchingError),

    /// The graph could not be constructed.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

//! A directed graph with DAG algorithms (topological order, ranking).
//!
//! This type stores the graph in CSR form plus its CSC transpose. It does
//! **not** assume acyclicity on construction; instead, `topological_sort`
//! returns `None` when a cycle is present and `ranked` fails with
//! [`ChainError::Cyclic`].

mod math_assert;

pub(crate) use math_assert::math_assert_msg;

use std::collections::VecDeque;

use crate::error::{ChainError, GraphError};
use crate::graph::RankedDag;

/// A directed graph over vertices `0..n`, stored as CSR (successors) and CSC (predecessors).
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `from_adjacency` | \(O(n + m)\) | Builds CSR and CSC representation |
/// | `topological_sort` | \(O(n + m)\) | Kahn's algorithm (cached) |
/// | `ranked` | \(O(n + m \log d)\) | Sorts each adjacency list by rank |
/// | `neighbors` / `in_neighbors` | \(O(1)\) | Slices into the packed edge arrays |
#[derive(Clone, Debug)]
pub struct Dag {
    out_offsets: Vec<usize>,
    out_edges: Vec<usize>,
    in_offsets: Vec<usize>,
    in_edges: Vec<usize>,
    topo_order: Option<Vec<usize>>,
}

impl Dag {
    /// Builds a DAG from adjacency lists.
    ///
    /// # Panics
    /// Panics if any edge references an out-of-bounds vertex.
    pub fn from_adjacency(adjacency: &[Vec<usize>]) -> Self {
        match Self::try_from_adjacency(adjacency) {
            Ok(dag) => dag,
            Err(err) => panic!("{err}"),
        }
    }

    /// Builds a DAG from adjacency lists, reporting out-of-bounds edges as errors.
    pub fn try_from_adjacency(adjacency: &[Vec<usize>]) -> Result<Self, GraphError> {
        let n = adjacency.len();

        let mut out_offsets = Vec::with_capacity(n + 1);
        out_offsets.push(0);
        let mut in_degrees = vec![0usize; n];
        let mut total_edges = 0usize;
        for (u, nbrs) in adjacency.iter().enumerate() {
            for &v in nbrs {
                if v >= n {
                    return Err(GraphError::VertexOutOfBounds {
                        from: u,
                        to: v,
                        vertex_count: n,
                    });
                }
                in_degrees[v] += 1;
            }
            total_edges += nbrs.len();
            out_offsets.push(total_edges);
        }
        let out_edges: Vec<usize> = adjacency.iter().flatten().copied().collect();

        // Transpose, filled by position so each in-list is stable by increasing `u`.
        let mut in_offsets = Vec::with_capacity(n + 1);
        in_offsets.push(0);
        for &deg in &in_degrees {
            let last = in_offsets[in_offsets.len() - 1];
            in_offsets.push(last + deg);
        }
        let mut in_edges = vec![0usize; total_edges];
        let mut write_pos = in_offsets[..n].to_vec();
        for (u, nbrs) in adjacency.iter().enumerate() {
            for &v in nbrs {
                in_edges[write_pos[v]] = u;
                write_pos[v] += 1;
            }
        }

        Ok(Self {
            out_offsets,
            out_edges,
            in_offsets,
            in_edges,
            topo_order: None,
        })
    }

    /// Builds a DAG with `vertex_count` vertices from an edge list.
    pub fn from_edges(vertex_count: usize, edges: &[(usize, usize)]) -> Result<Self, GraphError> {
        let mut adjacency = vec![Vec::new(); vertex_count];
        for &(from, to) in edges {
            if from >= vertex_count || to >= vertex_count {
                return Err(GraphError::VertexOutOfBounds {
                    from,
                    to,
                    vertex_count,
                });
            }
            adjacency[from].push(to);
        }
        Self::try_from_adjacency(&adjacency)
    }

    /// Computes topological ordering using Kahn's algorithm.
    ///
    /// Returns the topological order if the graph is acyclic, None if cyclic.
    /// The result is cached for subsequent calls.
    pub fn topological_sort(&mut self) -> Option<&[usize]> {
        if self.topo_order.is_none() {
            self.topo_order = self.kahn_order();
        }
        self.topo_order.as_deref()
    }

    fn kahn_order(&self) -> Option<Vec<usize>> {
        let n = self.node_count();
        let mut indeg: Vec<usize> = (0..n).map(|u| self.in_degree(u)).collect();

        // Sources in increasing order for determinism.
        let mut q: VecDeque<usize> = (0..n).filter(|&u| indeg[u] == 0).collect();

        let mut topo_order = Vec::with_capacity(n);
        while let Some(u) = q.pop_front() {
            topo_order.push(u);
            for v in self.neighbors(u) {
                indeg[v] -= 1;
                if indeg[v] == 0 {
                    q.push_back(v);
                }
            }
        }

        (topo_order.len() == n).then_some(topo_order)
    }

    /// Returns the cached topological ordering if computed.
    pub fn topo_order(&self) -> Option<&[usize]> {
        self.topo_order.as_deref()
    }

    /// Checks if the graph is acyclic by attempting topological sort.
    pub fn is_acyclic(&mut self) -> bool {
        self.topological_sort().is_some()
    }

    /// Assigns topological ranks and returns the ranked view consumed by the
    /// decomposition and reachability algorithms.
    ///
    /// Fails fast with [`ChainError::Cyclic`] instead of letting the core
    /// algorithms run on an order that does not exist.
    pub fn ranked(&mut self) -> Result<RankedDag, ChainError> {
        let order = self.topological_sort().ok_or(ChainError::Cyclic)?.to_vec();
        let ranked = RankedDag::from_order(self, order);
        tracing::debug!(
            vertices = ranked.vertex_count(),
            edges = ranked.edge_count(),
            "ranked dag"
        );
        Ok(ranked)
    }

    /// Number of vertices.
    pub fn node_count(&self) -> usize {
        self.out_offsets.len() - 1
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.out_edges.len()
    }

    /// Out-neighbors iterator.
    pub fn neighbors(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        assert!(node < self.node_count(), "node {node} out of bounds");
        self.out_edges[self.out_offsets[node]..self.out_offsets[node + 1]]
            .iter()
            .copied()
    }

    /// In-neighbors iterator.
    pub fn in_neighbors(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        assert!(node < self.node_count(), "node {node} out of bounds");
        self.in_edges[self.in_offsets[node]..self.in_offsets[node + 1]]
            .iter()
            .copied()
    }

    /// Out-degree.
    pub fn degree(&self, node: usize) -> usize {
        self.out_offsets[node + 1] - self.out_offsets[node]
    }

    /// In-degree.
    pub fn in_degree(&self, node: usize) -> usize {
        self.in_offsets[node + 1] - self.in_offsets[node]
    }

    /// Edge membership test.
    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        self.neighbors(from).any(|v| v == to)
    }

    /// Validates that the CSR and CSC halves describe the same edge set.
    #[cfg(debug_assertions)]
    pub fn validate_invariants(&self) -> bool {
        let n = self.node_count();
        math_assert_msg(
            self.in_edges.len() == self.out_edges.len(),
            "CSR and CSC edge counts must match",
        );
        for u in 0..n {
            for v in self.neighbors(u) {
                math_assert_msg(v < n, "Edge target out of bounds");
                math_assert_msg(
                    self.in_neighbors(v).any(|w| w == u),
                    "Every CSR edge must appear in the CSC transpose",
                );
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dag_construction_and_basic_properties() {
        // Simple chain: 0 -> 1 -> 2
        let adjacency = vec![vec![1], vec![2], vec![]];
        let mut dag = Dag::from_adjacency(&adjacency);

        assert_eq!(dag.node_count(), 3);
        assert_eq!(dag.edge_count(), 2);
        assert!(dag.is_acyclic());
        assert!(dag.has_edge(0, 1));
        assert!(!dag.has_edge(1, 0));
        assert_eq!(dag.in_neighbors(2).collect::<Vec<_>>(), vec![1]);
        #[cfg(debug_assertions)]
        assert!(dag.validate_invariants());
    }

    #[test]
    fn dag_topological_sort() {
        // Diamond shape: 0 -> 1, 0 -> 2, 1 -> 3, 2 -> 3
        let adjacency = vec![vec![1, 2], vec![3], vec![3], vec![]];
        let mut dag = Dag::from_adjacency(&adjacency);
        let topo = dag.topological_sort().unwrap();

        assert_eq!(topo, &[0, 1, 2, 3]);
        assert_eq!(dag.topo_order(), Some(&[0, 1, 2, 3][..]));
    }

    #[test]
    fn dag_cycle_detection() {
        // Cycle: 0 -> 1 -> 2 -> 0
        let adjacency = vec![vec![1], vec![2], vec![0]];
        let mut dag = Dag::from_adjacency(&adjacency);
        assert!(!dag.is_acyclic());
        assert!(dag.topological_sort().is_none());
        assert_eq!(dag.ranked().unwrap_err(), ChainError::Cyclic);
    }

    #[test]
    fn self_loop_is_a_cycle() {
        let mut dag = Dag::from_edges(2, &[(0, 1), (1, 1)]).unwrap();
        assert!(matches!(dag.ranked(), Err(ChainError::Cyclic)));
    }

    #[test]
    fn out_of_bounds_edge_is_reported() {
        let err = Dag::try_from_adjacency(&[vec![3], vec![]]).unwrap_err();
        assert_eq!(
            err,
            GraphError::VertexOutOfBounds {
                from: 0,
                to: 3,
                vertex_count: 2
            }
        );
        assert!(Dag::from_edges(2, &[(0, 2)]).is_err());
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn from_adjacency_panics_on_bad_edge() {
        let _ = Dag::from_adjacency(&[vec![5]]);
    }

    #[test]
    fn sources_are_emitted_in_increasing_order() {
        // 0 -> 1, 1 -> 2, 0 -> 2, 3 -> 1, 2 -> 4, 2 -> 5, isolated 6
        let mut dag =
            Dag::from_edges(7, &[(0, 1), (1, 2), (0, 2), (3, 1), (2, 4), (2, 5)]).unwrap();
        assert_eq!(dag.topological_sort().unwrap(), &[0, 3, 6, 1, 2, 4, 5]);
    }
}

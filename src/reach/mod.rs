//! Reachability oracles over a [`RankedDag`](crate::graph::RankedDag).
//!
//! Three interchangeable implementations of one capability:
//!
//! | Oracle | Preprocessing | `is_reachable` | Space |
//! |--------|---------------|----------------|-------|
//! | [`OnlineSearch`] | none | \(O(n + m)\) | borrows the graph |
//! | [`ReachMatrix`] | \(O(n \cdot m)\) | \(O(1)\) | \(n^2\) bits |
//! | [`IndexingScheme`] | \(O(m \cdot k)\) | \(O(1)\) | \(n \cdot k\) words |
//!
//! where `k` is the number of chains of the decomposition the index was
//! built from. All oracles address vertices by rank and agree on every query:
//! reachability is reflexive, successor sets are strict, and ranks outside
//! the graph reach nothing.

mod index;
mod matrix;
mod online;

pub use index::{IndexingScheme, UNREACHABLE};
pub use matrix::ReachMatrix;
pub use online::OnlineSearch;

/// Answers "does `source` reach `target`?" over vertex ranks.
pub trait Reachability {
    /// Returns `true` if a directed path leads from `source` to `target`.
    /// Every vertex reaches itself.
    fn is_reachable(&self, source: usize, target: usize) -> bool;

    /// All ranks strictly reachable from `vertex`, ascending.
    fn successors(&self, vertex: usize) -> Vec<usize>;
}

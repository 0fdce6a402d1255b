//! Internal graph accessors and low-level building blocks.
//!
//! This module is intentionally `pub(crate)` so the decomposition and
//! reachability algorithms can share scratch primitives (visited sets, bit
//! words) without exposing them as part of the public API surface.

pub(crate) mod visited;

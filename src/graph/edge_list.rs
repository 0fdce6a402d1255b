//! Plain-text edge lists.
//!
//! Each line is one of:
//! - `x,y` — an edge from vertex `x` to vertex `y`;
//! - `x` — a vertex with no edges of its own;
//! - empty (whitespace only), which is skipped.
//!
//! Vertex ids are arbitrary non-negative integers and are densely renumbered
//! in order of first appearance. Self loops are dropped and duplicate edges
//! collapse into one.

use std::collections::{BTreeSet, HashMap};
use std::num::ParseIntError;

use thiserror::Error;

use crate::error::GraphError;
use crate::graph::Dag;

/// Why a line could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// More than two comma-separated fields.
    #[error("expected `x,y` or `x`, found {0} fields")]
    FieldCount(usize),
    /// A field is not a non-negative integer.
    #[error("invalid vertex id `{field}`: {source}")]
    InvalidId {
        /// The offending field, trimmed.
        field: String,
        /// Underlying integer parse error.
        source: ParseIntError,
    },
}

/// A malformed edge-list line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    /// 1-based line number.
    pub line: usize,
    /// What went wrong.
    pub kind: ParseErrorKind,
}

/// A parsed edge list with dense vertex indices.
#[derive(Debug, Clone, Default)]
pub struct EdgeList {
    ids: Vec<u64>,
    index_of: HashMap<u64, usize>,
    successors: Vec<BTreeSet<usize>>,
}

impl EdgeList {
    /// Number of distinct vertices.
    pub fn vertex_count(&self) -> usize {
        self.ids.len()
    }

    /// Number of distinct edges.
    pub fn edge_count(&self) -> usize {
        self.successors.iter().map(BTreeSet::len).sum()
    }

    /// External id of dense vertex `index`.
    pub fn id(&self, index: usize) -> u64 {
        self.ids[index]
    }

    /// Dense index of external id `id`.
    pub fn index(&self, id: u64) -> Option<usize> {
        self.index_of.get(&id).copied()
    }

    /// Adjacency lists over dense indices.
    pub fn adjacency(&self) -> Vec<Vec<usize>> {
        self.successors
            .iter()
            .map(|s| s.iter().copied().collect())
            .collect()
    }

    /// Builds the CSR/CSC graph for this edge list.
    pub fn to_dag(&self) -> Result<Dag, GraphError> {
        Dag::try_from_adjacency(&self.adjacency())
    }

    fn intern(&mut self, id: u64) -> usize {
        if let Some(&index) = self.index_of.get(&id) {
            return index;
        }
        let index = self.ids.len();
        self.ids.push(id);
        self.index_of.insert(id, index);
        self.successors.push(BTreeSet::new());
        index
    }
}

fn parse_id(field: &str, line: usize) -> Result<u64, ParseError> {
    let field = field.trim();
    field.parse::<u64>().map_err(|source| ParseError {
        line,
        kind: ParseErrorKind::InvalidId {
            field: field.to_owned(),
            source,
        },
    })
}

/// Parses an edge list from text.
pub fn parse(input: &str) -> Result<EdgeList, ParseError> {
    let mut list = EdgeList::default();
    for (i, raw) in input.lines().enumerate() {
        let line = i + 1;
        let text = raw.trim();
        if text.is_empty() {
            continue;
        }
        let fields: Vec<&str> = text.split(',').collect();
        match fields.as_slice() {
            [single] => {
                let id = parse_id(single, line)?;
                list.intern(id);
            }
            [from, to] => {
                let from = parse_id(from, line)?;
                let to = parse_id(to, line)?;
                let u = list.intern(from);
                let v = list.intern(to);
                if u != v {
                    list.successors[u].insert(v);
                }
            }
            other => {
                return Err(ParseError {
                    line,
                    kind: ParseErrorKind::FieldCount(other.len()),
                })
            }
        }
    }
    tracing::debug!(
        vertices = list.vertex_count(),
        edges = list.edge_count(),
        "parsed edge list"
    );
    Ok(list)
}

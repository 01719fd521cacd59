//! The shapes a caller's successor function can take, and the
//! construction-time validation that exactly one was supplied.
//!
//! Grounded on `nographs`'s `start_from(vertex, *, next_vertices=...,
//! next_edges=..., next_labeled_edges=...)` convention: a strategy accepts
//! exactly one successor function, in one of several shapes depending on
//! whether the strategy needs weights and/or labels. Rust expresses the
//! "exactly one of N optional callbacks" constraint as a small enum plus a
//! resolver function returning [`UsageError::SuccessorFunctionRequired`]
//! when zero or more than one was given, the same runtime-validated
//! construction style `routee-compass-core`'s `TerminationModel` uses for
//! its own mutually exclusive variants.

use crate::error::UsageError;

/// Successor shapes for unweighted strategies (BFS, DFS,
/// Neighbors-Then-Depth, Topological Sort): either bare successor vertices,
/// or successor vertices paired with an edge label.
pub enum VertexSuccessors<'a, V, L> {
    Vertices(Box<dyn FnMut(&V) -> Vec<V> + 'a>),
    Edges(Box<dyn FnMut(&V) -> Vec<(V, L)> + 'a>),
}

impl<'a, V, L> VertexSuccessors<'a, V, L> {
    pub fn call(&mut self, v: &V) -> Vec<(V, Option<L>)> {
        match self {
            VertexSuccessors::Vertices(f) => f(v).into_iter().map(|n| (n, None)).collect(),
            VertexSuccessors::Edges(f) => f(v).into_iter().map(|(n, l)| (n, Some(l))).collect(),
        }
    }
}

pub fn resolve_vertex_successors<'a, V, L>(
    next_vertices: Option<Box<dyn FnMut(&V) -> Vec<V> + 'a>>,
    next_edges: Option<Box<dyn FnMut(&V) -> Vec<(V, L)> + 'a>>,
) -> Result<VertexSuccessors<'a, V, L>, UsageError> {
    match (next_vertices, next_edges) {
        (Some(f), None) => Ok(VertexSuccessors::Vertices(f)),
        (None, Some(f)) => Ok(VertexSuccessors::Edges(f)),
        (None, None) => Err(UsageError::SuccessorFunctionRequired),
        (Some(_), Some(_)) => Err(UsageError::SuccessorFunctionRequired),
    }
}

/// Successor shapes for weighted strategies (Dijkstra, A*, MST,
/// bidirectional Dijkstra): edges always carry a weight, and may also carry
/// a label.
pub enum WeightedSuccessors<'a, V, W, L> {
    Edges(Box<dyn FnMut(&V) -> Vec<(V, W)> + 'a>),
    LabeledEdges(Box<dyn FnMut(&V) -> Vec<(V, W, L)> + 'a>),
}

impl<'a, V, W, L> WeightedSuccessors<'a, V, W, L> {
    pub fn call(&mut self, v: &V) -> Vec<(V, W, Option<L>)> {
        match self {
            WeightedSuccessors::Edges(f) => f(v).into_iter().map(|(n, w)| (n, w, None)).collect(),
            WeightedSuccessors::LabeledEdges(f) => {
                f(v).into_iter().map(|(n, w, l)| (n, w, Some(l))).collect()
            }
        }
    }
}

pub fn resolve_weighted_successors<'a, V, W, L>(
    next_edges: Option<Box<dyn FnMut(&V) -> Vec<(V, W)> + 'a>>,
    next_labeled_edges: Option<Box<dyn FnMut(&V) -> Vec<(V, W, L)> + 'a>>,
) -> Result<WeightedSuccessors<'a, V, W, L>, UsageError> {
    match (next_edges, next_labeled_edges) {
        (Some(f), None) => Ok(WeightedSuccessors::Edges(f)),
        (None, Some(f)) => Ok(WeightedSuccessors::LabeledEdges(f)),
        (None, None) => Err(UsageError::SuccessorFunctionRequired),
        (Some(_), Some(_)) => Err(UsageError::SuccessorFunctionRequired),
    }
}

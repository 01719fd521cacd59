//! Error types for the search engine.
//!
//! Follows `routee-compass-core`'s `algorithm::search::search_error::SearchError`
//! convention of one per-concern `thiserror` enum (construction misuse, paths-store
//! misuse, one per strategy family) rather than a single catch-all error.

use std::fmt::Debug;

/// Failures detected at construction / `start_from` time, before any
/// successor function is ever called.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    #[error("exactly one of next_vertices, next_edges, or next_labeled_edges must be provided")]
    SuccessorFunctionRequired,
    #[error("start_vertex and start_vertices are mutually exclusive")]
    ConflictingStartVertices,
    #[error("no start vertex or start_vertices was provided")]
    MissingStartVertex,
    #[error("a heuristic is required to start an A* search")]
    HeuristicRequired,
    #[error("filter or attribute access requires the strategy to be started first")]
    NotStarted,
    #[error("invalid combination of DFS options: {0}")]
    InvalidDfsOptions(String),
}

/// Failures surfaced by a [`crate::paths::PathsStore`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PathsError {
    #[error("paths were not built for this run (build_paths was not enabled)")]
    NotBuilt,
    #[error("no path recorded for the requested vertex")]
    NoPathForVertex,
    #[error("paths store is unlabeled; cannot iterate labeled edges")]
    Unlabeled,
}

/// Failure surfaced by a gear's distance/weight bookkeeping: a computed
/// weight reached or exceeded the gear's own `infinity()` sentinel.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("distance overflow: computed value {value:?} reached or exceeded infinity {infinity:?}")]
pub struct GearError<W: Debug + Clone + PartialEq> {
    pub value: W,
    pub infinity: W,
}

/// Failures surfaced during an unweighted traversal (BFS, DFS,
/// Neighbors-Then-Depth, Topological Sort).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error(transparent)]
    Usage(#[from] UsageError),
    #[error(transparent)]
    Paths(#[from] PathsError),
    #[error("number of visited vertices reached limit")]
    LimitReached,
    #[error("cycle detected in graph; see cycle_from_start for the offending cycle")]
    CycleDetected,
    #[error("no path found")]
    NoPathFound,
    #[error("internal error: {0}")]
    Internal(String),
}

/// Failures surfaced during a weighted traversal (Dijkstra, A*, MST,
/// bidirectional Dijkstra). Carries the weight type so the overflow variant
/// can report the offending value alongside the gear's `infinity()`.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum WeightedSearchError<W: Debug + Clone + PartialEq> {
    #[error(transparent)]
    Usage(#[from] UsageError),
    #[error(transparent)]
    Paths(#[from] PathsError),
    #[error("number of visited vertices reached limit")]
    LimitReached,
    #[error(transparent)]
    Overflow(#[from] GearError<W>),
    #[error("no path found")]
    NoPathFound,
    #[error("internal error: {0}")]
    Internal(String),
}

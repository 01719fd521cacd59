//! Search strategies: BFS, DFS, Neighbors-Then-Depth, Topological Sort,
//! Dijkstra, A*, MST (Prim/Jarník), bidirectional BFS, bidirectional
//! Dijkstra, and the filter combinators layered on top of any of them.

pub mod a_star;
pub mod bfs;
pub mod bidirectional_bfs;
pub mod bidirectional_dijkstra;
pub mod dfs;
pub mod dijkstra;
pub mod filters;
pub mod mst;
pub mod neighbors_then_depth;
pub mod state;
pub mod successors;
pub mod topological_sort;

use std::hash::Hash;

use crate::error::UsageError;

/// Resolves the mutually-exclusive `start_vertex` / `start_vertices`
/// construction arguments every strategy accepts into a single vector of
/// start vertices, or fails with the matching [`UsageError`].
pub(crate) fn resolve_starts<V>(
    start_vertex: Option<V>,
    start_vertices: Option<Vec<V>>,
) -> Result<Vec<V>, UsageError> {
    match (start_vertex, start_vertices) {
        (Some(v), None) => Ok(vec![v]),
        (None, Some(vs)) if !vs.is_empty() => Ok(vs),
        (None, Some(_)) => Err(UsageError::MissingStartVertex),
        (None, None) => Err(UsageError::MissingStartVertex),
        (Some(_), Some(_)) => Err(UsageError::ConflictingStartVertices),
    }
}

/// The bidirectional strategies' `start_and_goal_vertex` /
/// `start_and_goal_vertices` pair of mutually-exclusive construction
/// arguments, resolved the same way `resolve_starts` resolves a single
/// side, following
/// `nographs._strategies.bidirectional_search.shortest_path.BSearchShortestPathFlex.start_from`'s
/// validation of its own two forms.
pub(crate) fn resolve_pair_starts<V>(
    start_and_goal_vertex: Option<(V, V)>,
    start_and_goal_vertices: Option<(Vec<V>, Vec<V>)>,
) -> Result<(Vec<V>, Vec<V>), UsageError> {
    match (start_and_goal_vertex, start_and_goal_vertices) {
        (Some((s, g)), None) => Ok((vec![s], vec![g])),
        (None, Some((starts, goals))) if !starts.is_empty() && !goals.is_empty() => {
            Ok((starts, goals))
        }
        (None, Some(_)) => Err(UsageError::MissingStartVertex),
        (None, None) => Err(UsageError::MissingStartVertex),
        (Some(_), Some(_)) => Err(UsageError::ConflictingStartVertices),
    }
}

/// A vertex present in both `starts` and `goals`, if any — the bidirectional
/// strategies special-case this so that a start vertex that is also a goal
/// always reports a zero-length path, instead of following a real but
/// non-trivial cycle back to itself.
pub(crate) fn common_vertex<V: Clone + Eq + Hash>(starts: &[V], goals: &[V]) -> Option<V> {
    let goal_set: std::collections::HashSet<&V> = goals.iter().collect();
    starts.iter().find(|v| goal_set.contains(v)).cloned()
}

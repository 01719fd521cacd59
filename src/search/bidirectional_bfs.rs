//! Bidirectional breadth-first search: runs BFS simultaneously from a set
//! of start vertices and a set of goal vertices, alternating a full layer
//! at a time, until a vertex discovered on one side is already visited on
//! the other — the shortest (minimum edge count) path between any start
//! and any goal.
//!
//! Grounded on
//! `nographs._strategies.bidirectional_search.breadth_first.BSearchBreadthFirstFlex`:
//! two `TraversalBreadthFirstFlex` instances run with `_report_depth_increase`
//! set, cycled between with `itertools.cycle`, stopping each side's turn the
//! moment its next vertex would belong to the following depth layer (the
//! python implementation detects this from a repeated vertex; this crate's
//! [`super::bfs::Bfs`] exposes the same instant directly through its
//! `depth_just_increased`/`current_depth` accessors, so the vertex is
//! buffered instead of re-read). A start vertex that is also a goal vertex
//! is special-cased to a zero-length path up front, matching the note that
//! a shortest path from a vertex to itself always exists with length 0,
//! which plain (non-bidirectional) BFS does not report on its own.

use std::fmt::Debug;
use std::hash::Hash;

use crate::error::SearchError;
use crate::gear::{Gear, VisitedSet};
use crate::paths::PathsStore;
use crate::search::bfs::{Bfs, BfsOptions};
use crate::search::{common_vertex, resolve_pair_starts};
use crate::search::successors::VertexSuccessors;

#[derive(Debug, Clone, Default)]
pub struct BidirectionalBfsOptions {
    pub build_path: bool,
    pub calculation_limit: Option<usize>,
    pub fail_silently: bool,
}

struct Side<'a, V, L, G>
where
    L: Clone,
    V: Clone + Eq + Hash + Debug,
    G: Gear<V, V, L>,
{
    bfs: Bfs<'a, V, L, G>,
    pending: Option<V>,
    exhausted: bool,
}

/// Runs a bidirectional BFS and returns the length of a shortest path
/// between a start and a goal vertex, plus the path itself (empty unless
/// `build_path` was requested).
#[allow(clippy::too_many_arguments)]
pub fn start_from<'a, V, L, G>(
    gear: &G,
    start_and_goal_vertex: Option<(V, V)>,
    start_and_goal_vertices: Option<(Vec<V>, Vec<V>)>,
    next_vertices: Option<[Box<dyn FnMut(&V) -> Vec<V> + 'a>; 2]>,
    next_edges: Option<[Box<dyn FnMut(&V) -> Vec<(V, L)> + 'a>; 2]>,
    options: BidirectionalBfsOptions,
) -> Result<(i64, Vec<V>), SearchError>
where
    V: Clone + Eq + Hash + Debug + 'a,
    L: Clone + 'a,
    G: Gear<V, V, L>,
{
    let (starts, goals) =
        resolve_pair_starts(start_and_goal_vertex, start_and_goal_vertices)?;

    if let Some(v) = common_vertex(&starts, &goals) {
        return Ok((0, vec![v]));
    }

    let [next_forward, next_backward]: [VertexSuccessors<'a, V, L>; 2] =
        match (next_vertices, next_edges) {
            (Some([f, b]), None) => [
                VertexSuccessors::Vertices(f),
                VertexSuccessors::Vertices(b),
            ],
            (None, Some([f, b])) => [VertexSuccessors::Edges(f), VertexSuccessors::Edges(b)],
            _ => {
                return Err(SearchError::Usage(
                    crate::error::UsageError::SuccessorFunctionRequired,
                ))
            }
        };

    let mut forward = Side {
        bfs: build_side(gear, starts, next_forward, &options)?,
        pending: None,
        exhausted: false,
    };
    let mut backward = Side {
        bfs: build_side(gear, goals, next_backward, &options)?,
        pending: None,
        exhausted: false,
    };

    let mut current_is_forward = true;
    loop {
        if forward.exhausted && backward.exhausted {
            return finish(options.fail_silently);
        }

        let (side, other) = if current_is_forward {
            (&mut forward, &backward)
        } else {
            (&mut backward, &forward)
        };

        if !side.exhausted {
            let vertex = match side.pending.take() {
                Some(v) => Some(v),
                None => match side.bfs.next() {
                    None => {
                        side.exhausted = true;
                        None
                    }
                    Some(Err(err)) => return Err(err),
                    Some(Ok(v)) => {
                        if side.bfs.depth_just_increased() {
                            side.pending = Some(v);
                            None
                        } else {
                            Some(v)
                        }
                    }
                },
            };

            if let Some(vertex) = vertex {
                if other.bfs.visited().contains(&vertex) {
                    let this_depth = side.bfs.current_depth();
                    let other_depth = other
                        .bfs
                        .paths()
                        .vertex_path_forward(&vertex)
                        .map(|p| p.len() - 1)
                        .unwrap_or(0);
                    let total = (this_depth + other_depth) as i64;
                    log::trace!(
                        "bidirectional bfs met at {:?}, total length {}",
                        vertex,
                        total
                    );
                    let path = if options.build_path {
                        join_paths(&forward, &backward, &vertex)
                    } else {
                        Vec::new()
                    };
                    return Ok((total, path));
                }
            }
        }

        current_is_forward = !current_is_forward;
    }
}

fn build_side<'a, V, L, G>(
    gear: &G,
    starts: Vec<V>,
    successors: VertexSuccessors<'a, V, L>,
    options: &BidirectionalBfsOptions,
) -> Result<Bfs<'a, V, L, G>, SearchError>
where
    V: Clone + Eq + Hash + Debug + 'a,
    L: Clone + 'a,
    G: Gear<V, V, L>,
{
    let bfs_options = BfsOptions {
        build_paths: true,
        calculation_limit: options.calculation_limit,
        report_depth_increase: true,
    };
    match successors {
        VertexSuccessors::Vertices(f) => {
            Bfs::start_from(gear, None, Some(starts), Some(f), None, None, bfs_options)
        }
        VertexSuccessors::Edges(f) => {
            Bfs::start_from(gear, None, Some(starts), None, Some(f), None, bfs_options)
        }
    }
}

fn finish<V>(fail_silently: bool) -> Result<(i64, Vec<V>), SearchError> {
    if fail_silently {
        Ok((-1, Vec::new()))
    } else {
        Err(SearchError::NoPathFound)
    }
}

fn join_paths<'a, V, L, G>(
    forward: &Side<'a, V, L, G>,
    backward: &Side<'a, V, L, G>,
    meeting: &V,
) -> Vec<V>
where
    L: Clone,
    V: Clone + Eq + Hash + Debug,
    G: Gear<V, V, L>,
{
    let mut path = forward
        .bfs
        .paths()
        .vertex_path_forward(meeting)
        .unwrap_or_default();
    let mut back = backward
        .bfs
        .paths()
        .vertex_path_forward(meeting)
        .unwrap_or_default();
    back.pop();
    back.reverse();
    path.extend(back);
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gear::hash::HashGear;

    #[test]
    fn finds_shortest_connecting_path_length() {
        let gear = HashGear::new();
        // line graph 1-2-3-4-5; reverse adjacency mirrors it.
        let forward = |v: &i32| -> Vec<i32> {
            match v {
                1 => vec![2],
                2 => vec![3],
                3 => vec![4],
                4 => vec![5],
                _ => vec![],
            }
        };
        let backward = |v: &i32| -> Vec<i32> {
            match v {
                5 => vec![4],
                4 => vec![3],
                3 => vec![2],
                2 => vec![1],
                _ => vec![],
            }
        };
        let (length, path): (i64, Vec<i32>) = start_from(
            &gear,
            Some((1, 5)),
            None,
            Some([Box::new(forward), Box::new(backward)]),
            None,
            BidirectionalBfsOptions {
                build_path: true,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(length, 4);
        assert_eq!(path, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn start_equal_to_goal_is_zero_length() {
        let gear = HashGear::new();
        let next = |_: &i32| -> Vec<i32> { vec![] };
        let (length, path): (i64, Vec<i32>) = start_from(
            &gear,
            Some((7, 7)),
            None,
            Some([Box::new(next), Box::new(next)]),
            None,
            BidirectionalBfsOptions::default(),
        )
        .unwrap();
        assert_eq!(length, 0);
        assert_eq!(path, vec![7]);
    }

    #[test]
    fn no_path_fails_silently_when_requested() {
        let gear = HashGear::new();
        let empty = |_: &i32| -> Vec<i32> { vec![] };
        let (length, path): (i64, Vec<i32>) = start_from(
            &gear,
            Some((1, 2)),
            None,
            Some([Box::new(empty), Box::new(empty)]),
            None,
            BidirectionalBfsOptions {
                fail_silently: true,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(length, -1);
        assert!(path.is_empty());
    }

    #[test]
    fn no_path_fails_loudly_by_default() {
        let gear = HashGear::new();
        let empty = |_: &i32| -> Vec<i32> { vec![] };
        let result: Result<(i64, Vec<i32>), SearchError> = start_from(
            &gear,
            Some((1, 2)),
            None,
            Some([Box::new(empty), Box::new(empty)]),
            None,
            BidirectionalBfsOptions::default(),
        );
        assert_eq!(result, Err(SearchError::NoPathFound));
    }
}

//! Bidirectional Dijkstra: alternates strictly vertex-by-vertex between a
//! forward shortest-paths search and a backward one, each its own
//! decrease-key frontier, terminating once neither side's next pop could
//! possibly beat the best connecting path found so far.
//!
//! Grounded on
//! `nographs._strategies.bidirectional_search.shortest_path.BSearchShortestPathFlex`:
//! one [`crate::util::priority_queue::Frontier`] and one distance map per
//! direction, a strict round-robin via `itertools.cycle` (one pop per turn,
//! regardless of whether it was stale), and the termination test
//! `best_path_length <= path_weight + others_path_weight`, where
//! `others_path_weight` is simply the distance most recently popped on the
//! *other* side — skipped while `best_path_length` is still infinity, since
//! an unset bound must never look already beaten. Every edge relaxed on one
//! side that lands on a vertex with a known (even if not yet finalized)
//! distance on the other side is a new path candidate, scored as
//! `n_path_weight + distances_other.get(neighbor)`.

use std::fmt::Debug;
use std::hash::Hash;

use crate::error::WeightedSearchError;
use crate::gear::{DistanceMap, WeightedGear};
use crate::paths::{DummyPathsStore, HashPathsStore, PathsStore};
use crate::search::state::VisitCounter;
use crate::search::successors::WeightedSuccessors;
use crate::search::{common_vertex, resolve_pair_starts};
use crate::util::priority_queue::Frontier;
use crate::weight::Weight;

#[derive(Debug, Clone, Default)]
pub struct BidirectionalDijkstraOptions {
    pub build_path: bool,
    pub calculation_limit: Option<usize>,
    pub fail_silently: bool,
}

struct Side<'a, V, L, W, G>
where
    L: Clone,
    V: Clone + Eq + Hash + Debug,
    W: Weight + Ord,
    G: WeightedGear<V, V, L, W>,
{
    successors: WeightedSuccessors<'a, V, W, L>,
    distances: G::DistanceMap,
    paths: Box<dyn PathsStore<V, V, L> + 'a>,
    frontier: Frontier<V, W>,
    counter: VisitCounter,
}

impl<'a, V, L, W, G> Side<'a, V, L, W, G>
where
    L: Clone + 'a,
    V: Clone + Eq + Hash + Debug + 'a,
    W: Weight + Ord + 'a,
    G: WeightedGear<V, V, L, W>,
{
    fn new(
        gear: &G,
        starts: &[V],
        successors: WeightedSuccessors<'a, V, W, L>,
        build_path: bool,
        labeled: bool,
        calculation_limit: Option<usize>,
    ) -> Self {
        let mut distances = gear.distance_map();
        let mut paths: Box<dyn PathsStore<V, V, L>> = if build_path {
            Box::new(HashPathsStore::new(labeled))
        } else {
            Box::new(DummyPathsStore)
        };
        let mut frontier = Frontier::new();
        for start in starts {
            distances.set(start.clone(), W::zero());
            frontier.push(start.clone(), W::zero());
            paths.mark_start(start.clone(), start.clone());
        }
        Side {
            successors,
            distances,
            paths,
            frontier,
            counter: VisitCounter::new(calculation_limit),
        }
    }
}

/// Runs a bidirectional Dijkstra search and returns the length of a
/// shortest path between a start and a goal vertex, plus the path itself
/// (empty unless `build_path` was requested).
#[allow(clippy::too_many_arguments)]
pub fn start_from<'a, V, L, W, G>(
    gear: &G,
    start_and_goal_vertex: Option<(V, V)>,
    start_and_goal_vertices: Option<(Vec<V>, Vec<V>)>,
    next_edges: Option<[Box<dyn FnMut(&V) -> Vec<(V, W)> + 'a>; 2]>,
    next_labeled_edges: Option<[Box<dyn FnMut(&V) -> Vec<(V, W, L)> + 'a>; 2]>,
    options: BidirectionalDijkstraOptions,
) -> Result<(W, Vec<V>), WeightedSearchError<W>>
where
    V: Clone + Eq + Hash + Debug + 'a,
    L: Clone + 'a,
    W: Weight + Ord + 'a,
    G: WeightedGear<V, V, L, W>,
{
    let (starts, goals) = resolve_pair_starts(start_and_goal_vertex, start_and_goal_vertices)
        .map_err(WeightedSearchError::Usage)?;

    if let Some(v) = common_vertex(&starts, &goals) {
        return Ok((W::zero(), vec![v]));
    }

    let [fwd_fn, bwd_fn]: [WeightedSuccessors<'a, V, W, L>; 2] =
        match (next_edges, next_labeled_edges) {
            (Some([f, b]), None) => [
                WeightedSuccessors::Edges(f),
                WeightedSuccessors::Edges(b),
            ],
            (None, Some([f, b])) => [
                WeightedSuccessors::LabeledEdges(f),
                WeightedSuccessors::LabeledEdges(b),
            ],
            _ => {
                return Err(WeightedSearchError::Usage(
                    crate::error::UsageError::SuccessorFunctionRequired,
                ))
            }
        };
    let labeled = matches!(fwd_fn, WeightedSuccessors::LabeledEdges(_));

    let mut forward: Side<V, L, W, G> = Side::new(
        gear,
        &starts,
        fwd_fn,
        options.build_path,
        labeled,
        options.calculation_limit,
    );
    let mut backward: Side<V, L, W, G> = Side::new(
        gear,
        &goals,
        bwd_fn,
        options.build_path,
        labeled,
        options.calculation_limit,
    );

    let mut best_path_length = W::infinity();
    let mut best_connecting_node: Option<V> = None;
    let mut others_path_weight = W::zero();
    let mut current_is_forward = true;

    loop {
        let (path_weight, vertex) = {
            let side = if current_is_forward {
                &mut forward
            } else {
                &mut backward
            };
            match side.frontier.pop() {
                None => return finish(options.fail_silently, best_path_length),
                Some(pair) => pair,
            }
        };

        let is_stale = {
            let side = if current_is_forward { &forward } else { &backward };
            side.distances.get(&vertex) < path_weight
        };
        if is_stale {
            current_is_forward = !current_is_forward;
            continue;
        }

        if best_path_length < W::infinity() && best_path_length <= path_weight + others_path_weight
        {
            break;
        }
        others_path_weight = path_weight;

        {
            let side = if current_is_forward {
                &mut forward
            } else {
                &mut backward
            };
            if let Err(err) = side.counter.tick_weighted::<W>() {
                return Err(err);
            }
        }

        let neighbors = {
            let side = if current_is_forward {
                &mut forward
            } else {
                &mut backward
            };
            side.successors.call(&vertex)
        };

        for (neighbor, weight, label) in neighbors {
            let n_path_weight = weight + path_weight;
            if n_path_weight >= W::infinity() {
                return Err(WeightedSearchError::Overflow(crate::error::GearError {
                    value: n_path_weight,
                    infinity: W::infinity(),
                }));
            }

            {
                let side = if current_is_forward {
                    &mut forward
                } else {
                    &mut backward
                };
                if side.distances.get(&neighbor) <= n_path_weight {
                    continue;
                }
                side.distances.set(neighbor.clone(), n_path_weight);
                side.paths.record(
                    neighbor.clone(),
                    neighbor.clone(),
                    vertex.clone(),
                    label,
                );
                side.frontier.push(neighbor.clone(), n_path_weight);
            }

            let other_distance = {
                let other = if current_is_forward { &backward } else { &forward };
                other.distances.get_option(&neighbor)
            };
            if let Some(other_weight) = other_distance {
                let total = n_path_weight + other_weight;
                if total < best_path_length {
                    log::trace!(
                        "bidirectional dijkstra found a connecting path through {:?}, length {:?}",
                        neighbor,
                        total
                    );
                    best_path_length = total;
                    best_connecting_node = Some(neighbor);
                }
            }
        }

        current_is_forward = !current_is_forward;
    }

    let node = match best_connecting_node {
        Some(v) => v,
        None => return finish(options.fail_silently, best_path_length),
    };
    let path = if options.build_path {
        join_paths(&forward, &backward, &node)
    } else {
        Vec::new()
    };
    Ok((best_path_length, path))
}

fn finish<V, W>(
    fail_silently: bool,
    best_path_length: W,
) -> Result<(W, Vec<V>), WeightedSearchError<W>>
where
    W: Weight,
{
    if fail_silently {
        Ok((best_path_length, Vec::new()))
    } else {
        Err(WeightedSearchError::NoPathFound)
    }
}

fn join_paths<'a, V, L, W, G>(
    forward: &Side<'a, V, L, W, G>,
    backward: &Side<'a, V, L, W, G>,
    meeting: &V,
) -> Vec<V>
where
    L: Clone,
    V: Clone + Eq + Hash + Debug,
    W: Weight,
    G: WeightedGear<V, V, L, W>,
{
    let mut path = forward
        .paths
        .vertex_path_forward(meeting)
        .unwrap_or_default();
    let mut back = backward
        .paths
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
    fn finds_shortest_connecting_distance() {
        let gear = HashGear::new();
        // 1 -> 2 (1) -> 3 (1) -> 4 (1); reverse adjacency mirrors it.
        let forward = |v: &i32| -> Vec<(i32, i64)> {
            match v {
                1 => vec![(2, 1)],
                2 => vec![(3, 1)],
                3 => vec![(4, 1)],
                _ => vec![],
            }
        };
        let backward = |v: &i32| -> Vec<(i32, i64)> {
            match v {
                4 => vec![(3, 1)],
                3 => vec![(2, 1)],
                2 => vec![(1, 1)],
                _ => vec![],
            }
        };
        let (length, path): (i64, Vec<i32>) = start_from(
            &gear,
            Some((1, 4)),
            None,
            Some([Box::new(forward), Box::new(backward)]),
            None,
            BidirectionalDijkstraOptions {
                build_path: true,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(length, 3);
        assert_eq!(path, vec![1, 2, 3, 4]);
    }

    #[test]
    fn start_equal_to_goal_is_zero_length() {
        let gear = HashGear::new();
        let next = |_: &i32| -> Vec<(i32, i64)> { vec![] };
        let (length, path): (i64, Vec<i32>) = start_from(
            &gear,
            Some((5, 5)),
            None,
            Some([Box::new(next), Box::new(next)]),
            None,
            BidirectionalDijkstraOptions::default(),
        )
        .unwrap();
        assert_eq!(length, 0);
        assert_eq!(path, vec![5]);
    }

    #[test]
    fn no_path_fails_silently_when_requested() {
        let gear = HashGear::new();
        let empty = |_: &i32| -> Vec<(i32, i64)> { vec![] };
        let (length, path): (i64, Vec<i32>) = start_from(
            &gear,
            Some((1, 2)),
            None,
            Some([Box::new(empty), Box::new(empty)]),
            None,
            BidirectionalDijkstraOptions {
                fail_silently: true,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(length, i64::infinity());
        assert!(path.is_empty());
    }
}

//! A*: Dijkstra's heap discipline keyed on `g(v) + h(v)` instead of `g(v)`
//! alone, where `g` is the best known distance and `h` a caller-supplied
//! admissible heuristic.
//!
//! Grounded on `nographs._strategies.traversals.with_weights.a_star.TraversalAStarFlex`:
//! two distance maps (`distances` for `g`, `path_length_guesses` for `f`),
//! a heap keyed on `f`, and a pop-time staleness check comparing the popped
//! `f` against the vertex's current best `f` — with a consistent heuristic
//! that check degenerates to simple equality, so each vertex is processed
//! exactly once; an inconsistent heuristic instead causes the vertex to be
//! reprocessed whenever a smaller `f` is later found. A heuristic value of
//! `infinity` marks a vertex as unreachable from there without itself
//! triggering overflow detection.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::WeightedSearchError;
use crate::gear::{DistanceMap, WeightedGear};
use crate::paths::{DummyPathsStore, HashPathsStore, PathsStore};
use crate::search::state::VisitCounter;
use crate::search::successors::{resolve_weighted_successors, WeightedSuccessors};
use crate::util::priority_queue::Frontier;
use crate::weight::Weight;

#[derive(Debug, Clone, Default)]
pub struct AStarOptions {
    pub build_paths: bool,
    pub calculation_limit: Option<usize>,
    pub is_tree: bool,
}

pub struct AStar<'a, V, L, W, G>
where
    L: Clone,
    V: Clone + Eq + Hash + Debug,
    W: Weight + Ord,
    G: WeightedGear<V, V, L, W>,
{
    successors: WeightedSuccessors<'a, V, W, L>,
    heuristic: Box<dyn FnMut(&V) -> W + 'a>,
    is_tree: bool,
    distances: G::DistanceMap,
    path_length_guesses: G::DistanceMap,
    paths: Box<dyn PathsStore<V, V, L> + 'a>,
    frontier: Frontier<V, W>,
    pending_depth: HashMap<V, usize>,
    counter: VisitCounter,
    pub path_length: W,
    pub depth: usize,
}

impl<'a, V, L, W, G> AStar<'a, V, L, W, G>
where
    V: Clone + Eq + Hash + Debug + 'a,
    L: Clone + 'a,
    W: Weight + Ord + 'a,
    G: WeightedGear<V, V, L, W>,
{
    #[allow(clippy::too_many_arguments)]
    pub fn start_from(
        gear: &G,
        heuristic: Box<dyn FnMut(&V) -> W + 'a>,
        start_vertex: Option<V>,
        start_vertices: Option<Vec<V>>,
        next_edges: Option<Box<dyn FnMut(&V) -> Vec<(V, W)> + 'a>>,
        next_labeled_edges: Option<Box<dyn FnMut(&V) -> Vec<(V, W, L)> + 'a>>,
        known_distances: Option<G::DistanceMap>,
        known_path_length_guesses: Option<G::DistanceMap>,
        options: AStarOptions,
    ) -> Result<Self, WeightedSearchError<W>> {
        let starts = crate::search::resolve_starts(start_vertex, start_vertices)?;
        let successors = resolve_weighted_successors(next_edges, next_labeled_edges)?;
        let labeled = matches!(successors, WeightedSuccessors::LabeledEdges(_));
        let mut paths: Box<dyn PathsStore<V, V, L>> = if options.build_paths {
            Box::new(HashPathsStore::new(labeled))
        } else {
            Box::new(DummyPathsStore)
        };

        let mut distances = known_distances.unwrap_or_else(|| gear.distance_map());
        let mut path_length_guesses =
            known_path_length_guesses.unwrap_or_else(|| gear.distance_map());
        let mut frontier = Frontier::new();
        let mut pending_depth = HashMap::new();
        let mut heuristic = heuristic;
        for start in &starts {
            distances.set(start.clone(), W::zero());
            let guess = W::zero() + heuristic(start);
            path_length_guesses.set(start.clone(), guess);
            frontier.push(start.clone(), guess);
            pending_depth.insert(start.clone(), 0);
            paths.mark_start(start.clone(), start.clone());
        }

        Ok(AStar {
            successors,
            heuristic,
            is_tree: options.is_tree,
            distances,
            path_length_guesses,
            paths,
            frontier,
            pending_depth,
            counter: VisitCounter::new(options.calculation_limit),
            path_length: W::infinity(),
            depth: 0,
        })
    }

    pub fn distances(&self) -> &G::DistanceMap {
        &self.distances
    }

    pub fn paths(&self) -> &dyn PathsStore<V, V, L> {
        self.paths.as_ref()
    }
}

impl<'a, V, L, W, G> super::filters::ReportsDistance<W> for AStar<'a, V, L, W, G>
where
    V: Clone + Eq + Hash + Debug,
    L: Clone,
    W: Weight + Ord,
    G: WeightedGear<V, V, L, W>,
{
    fn distance(&self) -> W {
        self.path_length
    }
}

impl<'a, V, L, W, G> Iterator for AStar<'a, V, L, W, G>
where
    V: Clone + Eq + Hash + Debug,
    L: Clone,
    W: Weight + Ord,
    G: WeightedGear<V, V, L, W>,
{
    type Item = Result<V, WeightedSearchError<W>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (vertex, guess) = self.frontier.pop()?;
            let path_edge_count = self.pending_depth.remove(&vertex).unwrap_or(0);

            if !self.is_tree && guess > self.path_length_guesses.get(&vertex) {
                continue;
            }

            let path_weight = self.distances.get(&vertex);
            self.path_length = path_weight;
            self.depth = path_edge_count;

            if let Err(err) = self.counter.tick_weighted::<W>() {
                return Some(Err(err));
            }

            let n_path_edge_count = path_edge_count + 1;
            for (neighbor, weight, label) in self.successors.call(&vertex) {
                let candidate = weight + path_weight;
                if candidate >= W::infinity() {
                    return Some(Err(WeightedSearchError::Overflow(
                        crate::error::GearError {
                            value: candidate,
                            infinity: W::infinity(),
                        },
                    )));
                }

                if !self.is_tree && self.distances.get(&neighbor) <= candidate {
                    continue;
                }
                self.distances.set(neighbor.clone(), candidate);

                self.paths
                    .record(neighbor.clone(), neighbor.clone(), vertex.clone(), label);

                let h = (self.heuristic)(&neighbor);
                let n_guess = if h >= W::infinity() {
                    W::infinity()
                } else {
                    let sum = candidate + h;
                    if sum >= W::infinity() {
                        return Some(Err(WeightedSearchError::Overflow(
                            crate::error::GearError {
                                value: sum,
                                infinity: W::infinity(),
                            },
                        )));
                    }
                    sum
                };

                if !self.is_tree {
                    self.path_length_guesses.set(neighbor.clone(), n_guess);
                }
                self.frontier.push(neighbor.clone(), n_guess);
                self.pending_depth.insert(neighbor, n_path_edge_count);
            }

            if path_edge_count > 0 {
                log::trace!("a* reporting {:?} at path length {:?}", vertex, path_weight);
                return Some(Ok(vertex));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gear::hash::HashGear;

    // grid: (0,0) -> (1,0) -> (2,0) == goal; straight line, heuristic is
    // Manhattan distance to (2,0).
    fn next(v: &(i32, i32)) -> Vec<((i32, i32), i64)> {
        let (x, y) = *v;
        vec![((x + 1, y), 1), ((x, y + 1), 1)]
    }

    fn manhattan_to_goal(goal: (i32, i32)) -> impl FnMut(&(i32, i32)) -> i64 {
        move |v: &(i32, i32)| ((goal.0 - v.0).abs() + (goal.1 - v.1).abs()) as i64
    }

    #[test]
    fn finds_optimal_path_with_consistent_heuristic() {
        let gear = HashGear::new();
        let goal = (2, 0);
        let a_star: AStar<(i32, i32), (), i64, HashGear> = AStar::start_from(
            &gear,
            Box::new(manhattan_to_goal(goal)),
            Some((0, 0)),
            None,
            Some(Box::new(next)),
            None,
            None,
            None,
            AStarOptions {
                build_paths: true,
                ..Default::default()
            },
        )
        .unwrap();
        let mut a_star = a_star;
        let mut reached_goal = false;
        for r in a_star.by_ref() {
            let v = r.unwrap();
            if v == goal {
                reached_goal = true;
                break;
            }
        }
        assert!(reached_goal);
        assert_eq!(a_star.path_length, 2);
        assert_eq!(
            a_star.paths().vertex_path_forward(&goal).unwrap(),
            vec![(0, 0), (1, 0), (2, 0)]
        );
    }

    #[test]
    fn each_vertex_reported_at_most_once() {
        let gear = HashGear::new();
        let goal = (1, 1);
        let a_star: AStar<(i32, i32), (), i64, HashGear> = AStar::start_from(
            &gear,
            Box::new(manhattan_to_goal(goal)),
            Some((0, 0)),
            None,
            Some(Box::new(next)),
            None,
            None,
            None,
            AStarOptions::default(),
        )
        .unwrap();
        let mut seen = std::collections::HashSet::new();
        let mut duplicate = false;
        for r in a_star.take(10) {
            let v = r.unwrap();
            if !seen.insert(v) {
                duplicate = true;
            }
        }
        assert!(!duplicate);
    }
}

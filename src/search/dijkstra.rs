//! Dijkstra's shortest-paths algorithm: reports vertices in non-decreasing
//! distance (sum of edge weights) from the nearest start vertex.
//!
//! Grounded on
//! `nographs._strategies.traversals.with_weights.shortest_paths.TraversalShortestPathsFlex`:
//! a min-heap of `(distance, push_sequence, vertex)` entries (here,
//! [`crate::util::priority_queue::Frontier`]), a distance map defaulting
//! absent vertices to infinity, and the "stale entry" check on pop (skip if
//! the popped distance exceeds the vertex's current best). Start vertices
//! are entered into the heap with distance zero but never reported —
//! reporting begins only once edge count is at least one.

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
pub struct DijkstraOptions {
    pub build_paths: bool,
    pub calculation_limit: Option<usize>,
    pub keep_distances: bool,
    pub is_tree: bool,
}

pub struct Dijkstra<'a, V, L, W, G>
where
    L: Clone,
    V: Clone + Eq + Hash + Debug,
    W: Weight + Ord,
    G: WeightedGear<V, V, L, W>,
{
    successors: WeightedSuccessors<'a, V, W, L>,
    is_tree: bool,
    keep_distances: bool,
    distances: G::DistanceMap,
    paths: Box<dyn PathsStore<V, V, L> + 'a>,
    frontier: Frontier<V, W>,
    pending_depth: HashMap<V, usize>,
    counter: VisitCounter,
    pub distance: W,
    pub depth: usize,
}

impl<'a, V, L, W, G> Dijkstra<'a, V, L, W, G>
where
    V: Clone + Eq + Hash + Debug + 'a,
    L: Clone + 'a,
    W: Weight + Ord + 'a,
    G: WeightedGear<V, V, L, W>,
{
    #[allow(clippy::too_many_arguments)]
    pub fn start_from(
        gear: &G,
        start_vertex: Option<V>,
        start_vertices: Option<Vec<V>>,
        next_edges: Option<Box<dyn FnMut(&V) -> Vec<(V, W)> + 'a>>,
        next_labeled_edges: Option<Box<dyn FnMut(&V) -> Vec<(V, W, L)> + 'a>>,
        known_distances: Option<G::DistanceMap>,
        options: DijkstraOptions,
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
        let mut frontier = Frontier::new();
        let mut pending_depth = HashMap::new();
        for start in &starts {
            distances.set(start.clone(), W::zero());
            frontier.push(start.clone(), W::zero());
            pending_depth.insert(start.clone(), 0);
            paths.mark_start(start.clone(), start.clone());
        }

        Ok(Dijkstra {
            successors,
            is_tree: options.is_tree,
            keep_distances: options.keep_distances,
            distances,
            paths,
            frontier,
            pending_depth,
            counter: VisitCounter::new(options.calculation_limit),
            distance: W::infinity(),
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

impl<'a, V, L, W, G> super::filters::ReportsDistance<W> for Dijkstra<'a, V, L, W, G>
where
    V: Clone + Eq + Hash + Debug,
    L: Clone,
    W: Weight,
    G: WeightedGear<V, V, L, W>,
{
    fn distance(&self) -> W {
        self.distance
    }
}

impl<'a, V, L, W, G> Iterator for Dijkstra<'a, V, L, W, G>
where
    V: Clone + Eq + Hash + Debug,
    L: Clone,
    W: Weight + Ord,
    G: WeightedGear<V, V, L, W>,
{
    type Item = Result<V, WeightedSearchError<W>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (vertex, path_weight) = self.frontier.pop()?;
            let path_edge_count = self.pending_depth.remove(&vertex).unwrap_or(0);

            if !self.is_tree {
                if self.distances.get(&vertex) < path_weight {
                    continue;
                }
                if !self.keep_distances {
                    self.distances.set(vertex.clone(), W::zero());
                }
            }

            self.distance = path_weight;
            self.depth = path_edge_count;

            if let Err(err) = self.counter.tick_weighted::<W>() {
                return Some(Err(err));
            }

            let n_path_edge_count = path_edge_count + 1;
            for (neighbor, weight, label) in self.successors.call(&vertex) {
                let candidate = path_weight + weight;
                if candidate >= W::infinity() {
                    return Some(Err(WeightedSearchError::Overflow(
                        crate::error::GearError {
                            value: candidate,
                            infinity: W::infinity(),
                        },
                    )));
                }

                if self.is_tree {
                    self.frontier.push(neighbor.clone(), candidate);
                    self.pending_depth.insert(neighbor, n_path_edge_count);
                    continue;
                }

                if self.distances.get(&neighbor) <= candidate {
                    continue;
                }
                self.distances.set(neighbor.clone(), candidate);
                self.paths
                    .record(neighbor.clone(), neighbor.clone(), vertex.clone(), label);
                self.frontier.push(neighbor.clone(), candidate);
                self.pending_depth.insert(neighbor, n_path_edge_count);
            }

            if path_edge_count > 0 {
                log::trace!("dijkstra reporting {:?} at distance {:?}", vertex, path_weight);
                return Some(Ok(vertex));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gear::hash::HashGear;

    #[test]
    fn reports_vertices_in_nondecreasing_distance_order() {
        let gear = HashGear::new();
        let next = |v: &i32| -> Vec<(i32, i64)> {
            match v {
                1 => vec![(2, 5), (3, 1)],
                3 => vec![(2, 1)],
                _ => vec![],
            }
        };
        let dijkstra: Dijkstra<i32, (), i64, HashGear> = Dijkstra::start_from(
            &gear,
            Some(1),
            None,
            Some(Box::new(next)),
            None,
            None,
            DijkstraOptions::default(),
        )
        .unwrap();
        let order: Vec<i32> = dijkstra.map(|r| r.unwrap()).collect();
        // shortest path to 2 is via 3 (1+1=2), shorter than direct edge (5).
        assert_eq!(order, vec![3, 2]);
    }

    #[test]
    fn builds_shortest_paths_when_requested() {
        let gear = HashGear::new();
        let next = |v: &i32| -> Vec<(i32, i64)> {
            match v {
                1 => vec![(2, 5), (3, 1)],
                3 => vec![(2, 1)],
                _ => vec![],
            }
        };
        let mut dijkstra: Dijkstra<i32, (), i64, HashGear> = Dijkstra::start_from(
            &gear,
            Some(1),
            None,
            Some(Box::new(next)),
            None,
            None,
            DijkstraOptions {
                build_paths: true,
                keep_distances: true,
                ..Default::default()
            },
        )
        .unwrap();
        for r in dijkstra.by_ref() {
            r.unwrap();
        }
        assert_eq!(dijkstra.paths().vertex_path_forward(&2).unwrap(), vec![1, 3, 2]);
        assert_eq!(dijkstra.distances.get(&2i32), 2i64);
    }

    #[test]
    fn overflow_is_reported_as_an_error() {
        let gear = HashGear::new();
        let next = |v: &i32| -> Vec<(i32, i64)> {
            match v {
                1 => vec![(2, i64::MAX)],
                _ => vec![],
            }
        };
        let dijkstra: Dijkstra<i32, (), i64, HashGear> = Dijkstra::start_from(
            &gear,
            Some(1),
            None,
            Some(Box::new(next)),
            None,
            None,
            DijkstraOptions::default(),
        )
        .unwrap();
        let results: Vec<_> = dijkstra.collect();
        assert!(matches!(
            results[0],
            Err(WeightedSearchError::Overflow(_))
        ));
    }
}

//! Breadth-first traversal: reports vertices in non-decreasing distance
//! (hop count) from the nearest start vertex. A start vertex is marked
//! visited and expanded but, like every other vertex at depth 0, is never
//! itself reported.
//!
//! Grounded on `nographs._strategies.traversals.without_weights.breadth_first`:
//! a depth-tagged frontier queue, a visited set guarding against
//! re-enqueuing, and a hidden `report_depth_increase` flag that lets
//! [`super::bidirectional_bfs`] detect the moment the frontier's depth grows
//! without changing BFS's own public reporting order. A vertex is considered
//! visited once it has been reported or once it is a start vertex, matching
//! `breadth_first.py`'s own rule; a guard skipping depth-0 pops mirrors the
//! same `path_edge_count > 0` check `dijkstra.rs` uses for the same reason.
//! The small wrapper struct around `VecDeque`, exposing only what callers
//! need, follows `routee-compass-core`'s `InternalPriorityQueue` convention
//! of hiding a standard collection behind a narrow search-local type.

use std::collections::VecDeque;
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::SearchError;
use crate::gear::{Gear, VisitedSet};
use crate::paths::{DummyPathsStore, HashPathsStore, PathsStore};
use crate::search::resolve_starts;
use crate::search::state::VisitCounter;
use crate::search::successors::{resolve_vertex_successors, VertexSuccessors};

#[derive(Debug, Clone, Default)]
pub struct BfsOptions {
    pub build_paths: bool,
    pub calculation_limit: Option<usize>,
    pub(crate) report_depth_increase: bool,
}

pub struct Bfs<'a, V, L, G>
where
    L: Clone,
    V: Clone + Eq + Hash + Debug,
    G: Gear<V, V, L>,
{
    successors: VertexSuccessors<'a, V, L>,
    visited: G::VisitedSet,
    paths: Box<dyn PathsStore<V, V, L> + 'a>,
    queue: VecDeque<(V, usize)>,
    counter: VisitCounter,
    report_depth_increase: bool,
    last_depth: usize,
    depth_just_increased: bool,
}

impl<'a, V, L, G> Bfs<'a, V, L, G>
where
    V: Clone + Eq + Hash + Debug + 'a,
    L: Clone + 'a,
    G: Gear<V, V, L>,
{
    #[allow(clippy::too_many_arguments)]
    pub fn start_from(
        gear: &G,
        start_vertex: Option<V>,
        start_vertices: Option<Vec<V>>,
        next_vertices: Option<Box<dyn FnMut(&V) -> Vec<V> + 'a>>,
        next_edges: Option<Box<dyn FnMut(&V) -> Vec<(V, L)> + 'a>>,
        already_visited: Option<G::VisitedSet>,
        options: BfsOptions,
    ) -> Result<Self, SearchError> {
        let starts = resolve_starts(start_vertex, start_vertices)?;
        let successors = resolve_vertex_successors(next_vertices, next_edges)?;
        let labeled = matches!(successors, VertexSuccessors::Edges(_));

        let mut visited = already_visited.unwrap_or_else(|| gear.visited_set());
        let mut paths: Box<dyn PathsStore<V, V, L>> = if options.build_paths {
            Box::new(HashPathsStore::new(labeled))
        } else {
            Box::new(DummyPathsStore)
        };

        let mut queue = VecDeque::new();
        for start in starts {
            if visited.insert(start.clone()) {
                paths.mark_start(start.clone(), start.clone());
                queue.push_back((start, 0));
            }
        }

        Ok(Bfs {
            successors,
            visited,
            paths,
            queue,
            counter: VisitCounter::new(options.calculation_limit),
            report_depth_increase: options.report_depth_increase,
            last_depth: 0,
            depth_just_increased: false,
        })
    }

    pub fn visited(&self) -> &G::VisitedSet {
        &self.visited
    }

    pub fn paths(&self) -> &dyn PathsStore<V, V, L> {
        self.paths.as_ref()
    }

    /// Set by the most recent `next()` call when `report_depth_increase`
    /// was requested and the frontier's depth grew; consumed by
    /// [`super::bidirectional_bfs`] to find the meeting layer.
    pub(crate) fn depth_just_increased(&self) -> bool {
        self.depth_just_increased
    }

    pub(crate) fn current_depth(&self) -> usize {
        self.last_depth
    }

    /// The search depth (hop count from the nearest start vertex) of the
    /// most recently reported vertex.
    pub fn depth(&self) -> isize {
        self.last_depth as isize
    }
}

impl<'a, V, L, G> super::filters::ReportsDepth for Bfs<'a, V, L, G>
where
    V: Clone + Eq + Hash + Debug,
    L: Clone,
    G: Gear<V, V, L>,
{
    fn depth(&self) -> isize {
        self.last_depth as isize
    }
}

impl<'a, V, L, G> Iterator for Bfs<'a, V, L, G>
where
    V: Clone + Eq + Hash + Debug,
    L: Clone,
    G: Gear<V, V, L>,
{
    type Item = Result<V, SearchError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (vertex, depth) = self.queue.pop_front()?;
            self.depth_just_increased = self.report_depth_increase && depth > self.last_depth;
            self.last_depth = depth;

            if let Err(err) = self.counter.tick() {
                return Some(Err(err));
            }

            for (neighbor, label) in self.successors.call(&vertex) {
                if self.visited.insert(neighbor.clone()) {
                    self.paths
                        .record(neighbor.clone(), neighbor.clone(), vertex.clone(), label);
                    self.queue.push_back((neighbor, depth + 1));
                }
            }

            if depth > 0 {
                log::trace!("bfs reporting {:?} at depth {}", vertex, depth);
                return Some(Ok(vertex));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gear::hash::HashGear;

    fn line_graph(n: i32) -> impl FnMut(&i32) -> Vec<i32> {
        move |v| if *v < n { vec![*v + 1] } else { vec![] }
    }

    #[test]
    fn reports_vertices_in_nondecreasing_depth_order() {
        let gear = HashGear::new();
        let bfs: Bfs<i32, (), HashGear> = Bfs::start_from(
            &gear,
            Some(0),
            None,
            Some(Box::new(line_graph(5))),
            None,
            None,
            BfsOptions::default(),
        )
        .unwrap();
        let order: Vec<i32> = bfs.map(|r| r.unwrap()).collect();
        assert_eq!(order, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn branching_graph_visits_each_vertex_once() {
        let gear = HashGear::new();
        let next = |v: &i32| -> Vec<i32> {
            match v {
                0 => vec![1, 2],
                1 => vec![3],
                2 => vec![3],
                _ => vec![],
            }
        };
        let bfs: Bfs<i32, (), HashGear> = Bfs::start_from(
            &gear,
            Some(0),
            None,
            Some(Box::new(next)),
            None,
            None,
            BfsOptions::default(),
        )
        .unwrap();
        let order: Vec<i32> = bfs.map(|r| r.unwrap()).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn builds_shortest_hop_paths_when_requested() {
        let gear = HashGear::new();
        let mut bfs: Bfs<i32, (), HashGear> = Bfs::start_from(
            &gear,
            Some(0),
            None,
            Some(Box::new(line_graph(3))),
            None,
            None,
            BfsOptions {
                build_paths: true,
                ..Default::default()
            },
        )
        .unwrap();
        for r in bfs.by_ref() {
            r.unwrap();
        }
        assert_eq!(bfs.paths().vertex_path_forward(&3).unwrap(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn calculation_limit_stops_the_run() {
        let gear = HashGear::new();
        let bfs: Bfs<i32, (), HashGear> = Bfs::start_from(
            &gear,
            Some(0),
            None,
            Some(Box::new(line_graph(100))),
            None,
            None,
            BfsOptions {
                // the start vertex counts toward the limit even though it is
                // never reported.
                calculation_limit: Some(3),
                ..Default::default()
            },
        )
        .unwrap();
        let results: Vec<_> = bfs.take(3).collect();
        assert!(results[0].is_ok());
        assert!(results[1].is_ok());
        assert_eq!(results[2], Err(SearchError::LimitReached));
    }
}

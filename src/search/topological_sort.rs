//! Topological sort: reports vertices in an order where, for every edge
//! `u -> v`, `v` is reported before `u`.
//!
//! Grounded on
//! `nographs._strategies.traversals.without_weights.topological_sort.TraversalTopologicalSortFlex`:
//! vertices are reported exactly when a depth-first search *leaves* them
//! (finishes their expansion), which directly produces a valid topological
//! order with no separate reversal step. The `is_tree` fast path skips the
//! visited/trace-set bookkeeping entirely when the caller already knows the
//! graph has no shared descendants and no cycles; the general path
//! maintains a trace (on-stack) set to detect a cycle the moment a non-tree
//! edge points back into it, reconstructing `cycle_from_start` from the
//! current stack before failing.

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::SearchError;
use crate::gear::{Gear, VisitedSet};
use crate::paths::{DummyPathsStore, HashPathsStore, PathsStore};
use crate::search::resolve_starts;
use crate::search::state::VisitCounter;
use crate::search::successors::{resolve_vertex_successors, VertexSuccessors};

struct Frame<V, L> {
    vertex: V,
    children: std::vec::IntoIter<(V, Option<L>)>,
}

#[derive(Debug, Clone, Default)]
pub struct TopologicalSortOptions {
    pub is_tree: bool,
    pub build_paths: bool,
    pub calculation_limit: Option<usize>,
}

pub struct TopologicalSort<'a, V, L, G>
where
    L: Clone,
    V: Clone + Eq + Hash + Debug,
    G: Gear<V, V, L>,
{
    successors: VertexSuccessors<'a, V, L>,
    is_tree: bool,
    visited: G::VisitedSet,
    trace_set: HashSet<V>,
    stack: Vec<Frame<V, L>>,
    pending_starts: std::collections::VecDeque<V>,
    paths: Box<dyn PathsStore<V, V, L> + 'a>,
    counter: VisitCounter,
    cycle_from_start: Vec<V>,
}

impl<'a, V, L, G> TopologicalSort<'a, V, L, G>
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
        options: TopologicalSortOptions,
    ) -> Result<Self, SearchError> {
        let starts = resolve_starts(start_vertex, start_vertices)?;
        let successors = resolve_vertex_successors(next_vertices, next_edges)?;
        let labeled = matches!(successors, VertexSuccessors::Edges(_));
        let paths: Box<dyn PathsStore<V, V, L>> = if options.build_paths {
            Box::new(HashPathsStore::new(labeled))
        } else {
            Box::new(DummyPathsStore)
        };
        let mut visited = gear.visited_set();
        for start in &starts {
            visited.insert(start.clone());
        }

        Ok(TopologicalSort {
            successors,
            is_tree: options.is_tree,
            visited,
            trace_set: HashSet::new(),
            stack: Vec::new(),
            pending_starts: starts.into(),
            paths,
            counter: VisitCounter::new(options.calculation_limit),
            cycle_from_start: Vec::new(),
        })
    }

    pub fn visited(&self) -> &G::VisitedSet {
        &self.visited
    }

    pub fn paths(&self) -> &dyn PathsStore<V, V, L> {
        self.paths.as_ref()
    }

    /// The cycle found, from a start vertex to the vertex that closes the
    /// loop. Empty until [`SearchError::CycleDetected`] has been returned.
    pub fn cycle_from_start(&self) -> &[V] {
        &self.cycle_from_start
    }

    fn report_cycle(&mut self, closing: V) {
        let mut trace: Vec<V> = self
            .stack
            .iter()
            .map(|f| f.vertex.clone())
            .filter(|v| self.trace_set.contains(v))
            .collect();
        trace.push(closing);
        self.cycle_from_start = trace;
    }

    fn push_frame(&mut self, vertex: V, parent: Option<&V>, label: Option<L>) {
        if let Some(parent) = parent {
            self.paths
                .record(vertex.clone(), vertex.clone(), parent.clone(), label);
        } else {
            self.paths.mark_start(vertex.clone(), vertex.clone());
        }
        if !self.is_tree {
            self.trace_set.insert(vertex.clone());
        }
        let children = self.successors.call(&vertex).into_iter();
        self.stack.push(Frame { vertex, children });
    }
}

impl<'a, V, L, G> Iterator for TopologicalSort<'a, V, L, G>
where
    V: Clone + Eq + Hash + Debug,
    L: Clone,
    G: Gear<V, V, L>,
{
    type Item = Result<V, SearchError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.stack.is_empty() {
                let start = self.pending_starts.pop_front()?;
                if let Err(err) = self.counter.tick() {
                    return Some(Err(err));
                }
                self.push_frame(start, None, None);
                continue;
            }

            let next_child = self.stack.last_mut().unwrap().children.next();
            match next_child {
                Some((child, label)) => {
                    if self.is_tree {
                        if let Err(err) = self.counter.tick() {
                            return Some(Err(err));
                        }
                        let parent = self.stack.last().unwrap().vertex.clone();
                        self.push_frame(child, Some(&parent), label);
                        continue;
                    }
                    let already_visited = self.visited.contains(&child);
                    if already_visited {
                        if self.trace_set.contains(&child) {
                            log::trace!("topological sort found a cycle closing at {:?}", child);
                            self.report_cycle(child);
                            return Some(Err(SearchError::CycleDetected));
                        }
                        continue;
                    }
                    self.visited.insert(child.clone());
                    if let Err(err) = self.counter.tick() {
                        return Some(Err(err));
                    }
                    let parent = self.stack.last().unwrap().vertex.clone();
                    self.push_frame(child, Some(&parent), label);
                }
                None => {
                    let frame = self.stack.pop().unwrap();
                    self.trace_set.remove(&frame.vertex);
                    log::trace!("topological sort reporting {:?} on leave", frame.vertex);
                    return Some(Ok(frame.vertex));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gear::hash::HashGear;

    #[test]
    fn reports_dependencies_before_dependents() {
        let gear = HashGear::new();
        // 1 depends on 2 and 3; 2 depends on 3.
        let next = |v: &i32| -> Vec<i32> {
            match v {
                1 => vec![2, 3],
                2 => vec![3],
                _ => vec![],
            }
        };
        let sort: TopologicalSort<i32, (), HashGear> = TopologicalSort::start_from(
            &gear,
            Some(1),
            None,
            Some(Box::new(next)),
            None,
            TopologicalSortOptions::default(),
        )
        .unwrap();
        let order: Vec<i32> = sort.map(|r| r.unwrap()).collect();
        let pos = |v: i32| order.iter().position(|&x| x == v).unwrap();
        assert!(pos(3) < pos(2));
        assert!(pos(2) < pos(1));
    }

    #[test]
    fn cycle_is_detected_and_reported() {
        let gear = HashGear::new();
        let next = |v: &i32| -> Vec<i32> {
            match v {
                1 => vec![2],
                2 => vec![3],
                3 => vec![1],
                _ => vec![],
            }
        };
        let mut sort: TopologicalSort<i32, (), HashGear> = TopologicalSort::start_from(
            &gear,
            Some(1),
            None,
            Some(Box::new(next)),
            None,
            TopologicalSortOptions::default(),
        )
        .unwrap();
        let err = sort.find_map(|r| r.err());
        assert_eq!(err, Some(SearchError::CycleDetected));
        assert_eq!(sort.cycle_from_start(), &[1, 2, 3, 1]);
    }

    #[test]
    fn tree_mode_skips_visited_bookkeeping() {
        let gear = HashGear::new();
        let next = |v: &i32| -> Vec<i32> {
            match v {
                1 => vec![2, 3],
                _ => vec![],
            }
        };
        let sort: TopologicalSort<i32, (), HashGear> = TopologicalSort::start_from(
            &gear,
            Some(1),
            None,
            Some(Box::new(next)),
            None,
            TopologicalSortOptions {
                is_tree: true,
                ..Default::default()
            },
        )
        .unwrap();
        let order: Vec<i32> = sort.map(|r| r.unwrap()).collect();
        assert_eq!(order.last(), Some(&1));
        assert_eq!(order.len(), 3);
    }
}

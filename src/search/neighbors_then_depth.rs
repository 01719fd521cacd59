//! A depth-first variant that reports each vertex the moment it is
//! discovered as a successor, rather than when it is popped for expansion.
//! This gives BFS-style reporting order within one vertex's neighborhood
//! while still exploring depth-first overall. A vertex is considered visited
//! once it has been reported or once it is a start vertex; start vertices
//! are expanded but, since they are never discovered as anyone's successor,
//! never reported.
//!
//! Grounded on
//! `nographs._strategies.traversals.without_weights.neighbors_then_depth.TraversalNeighborsThenDepthFlex`:
//! a single stack of vertices still to expand, fed in LIFO order, with each
//! neighbor yielded immediately upon being read from the successor function
//! and only afterwards pushed for its own later expansion. Depth is tracked
//! with a parallel stack of leave-markers, in a counter kept separate from
//! the publicly reported depth so that expanding a previously reported
//! vertex doesn't compound the two.

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
pub struct NeighborsThenDepthOptions {
    pub is_tree: bool,
    pub build_paths: bool,
    pub calculation_limit: Option<usize>,
    pub compute_depth: bool,
}

pub struct NeighborsThenDepth<'a, V, L, G>
where
    L: Clone,
    V: Clone + Eq + Hash + Debug,
    G: Gear<V, V, L>,
{
    successors: VertexSuccessors<'a, V, L>,
    is_tree: bool,
    visited: G::VisitedSet,
    paths: Box<dyn PathsStore<V, V, L> + 'a>,
    counter: VisitCounter,
    compute_depth: bool,
    to_expand: VecDeque<V>,
    to_leave_marker: VecDeque<bool>,
    expand_depth: isize,
    depth: isize,
    pending: VecDeque<(V, isize)>,
}

impl<'a, V, L, G> NeighborsThenDepth<'a, V, L, G>
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
        options: NeighborsThenDepthOptions,
    ) -> Result<Self, SearchError> {
        let starts = resolve_starts(start_vertex, start_vertices)?;
        let successors = resolve_vertex_successors(next_vertices, next_edges)?;
        let labeled = matches!(successors, VertexSuccessors::Edges(_));
        let mut paths: Box<dyn PathsStore<V, V, L>> = if options.build_paths {
            Box::new(HashPathsStore::new(labeled))
        } else {
            Box::new(DummyPathsStore)
        };
        let mut visited = gear.visited_set();
        let mut to_expand = VecDeque::new();
        let pending = VecDeque::new();
        for start in &starts {
            if options.is_tree || visited.insert(start.clone()) {
                paths.mark_start(start.clone(), start.clone());
                to_expand.push_back(start.clone());
            }
        }
        let mut to_leave_marker = VecDeque::new();
        if options.compute_depth {
            for _ in &to_expand {
                to_leave_marker.push_back(false);
            }
        }

        Ok(NeighborsThenDepth {
            successors,
            is_tree: options.is_tree,
            visited,
            paths,
            counter: VisitCounter::new(options.calculation_limit),
            compute_depth: options.compute_depth,
            to_expand,
            to_leave_marker,
            expand_depth: -1,
            depth: -1,
            pending,
        })
    }

    pub fn visited(&self) -> &G::VisitedSet {
        &self.visited
    }

    pub fn paths(&self) -> &dyn PathsStore<V, V, L> {
        self.paths.as_ref()
    }

    /// The search depth at which the most recently reported vertex was
    /// found, or `-1` if depth computation was not requested.
    pub fn depth(&self) -> isize {
        self.depth
    }
}

impl<'a, V, L, G> super::filters::ReportsDepth for NeighborsThenDepth<'a, V, L, G>
where
    V: Clone + Eq + Hash + Debug,
    L: Clone,
    G: Gear<V, V, L>,
{
    fn depth(&self) -> isize {
        self.depth
    }
}

impl<'a, V, L, G> Iterator for NeighborsThenDepth<'a, V, L, G>
where
    V: Clone + Eq + Hash + Debug,
    L: Clone,
    G: Gear<V, V, L>,
{
    type Item = Result<V, SearchError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some((vertex, depth)) = self.pending.pop_front() {
            self.depth = depth;
            log::trace!("neighbors-then-depth reporting {:?} at depth {}", vertex, depth);
            return Some(Ok(vertex));
        }

        loop {
            let vertex = self.to_expand.pop_back()?;
            if self.compute_depth {
                self.expand_depth += 1;
                while self.to_leave_marker.pop_back() == Some(true) {
                    self.expand_depth -= 1;
                }
                self.to_leave_marker.push_back(true);
            }

            if let Err(err) = self.counter.tick() {
                return Some(Err(err));
            }

            let neighbor_depth = if self.compute_depth {
                self.expand_depth + 1
            } else {
                -1
            };

            for (neighbor, label) in self.successors.call(&vertex) {
                if !self.is_tree && !self.visited.insert(neighbor.clone()) {
                    continue;
                }
                self.paths
                    .record(neighbor.clone(), neighbor.clone(), vertex.clone(), label);
                self.pending.push_back((neighbor.clone(), neighbor_depth));
                self.to_expand.push_back(neighbor);
                if self.compute_depth {
                    self.to_leave_marker.push_back(false);
                }
            }

            if let Some((vertex, depth)) = self.pending.pop_front() {
                self.depth = depth;
                log::trace!("neighbors-then-depth reporting {:?} at depth {}", vertex, depth);
                return Some(Ok(vertex));
            }
        }
    }
}

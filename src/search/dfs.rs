//! Depth-first traversal with full edge-event reporting, in three modes.
//!
//! Grounded on `nographs._strategies.traversals.with_labels.depth_first`
//! (the `DFSMode` enum and its `TREE`/`ALL_PATHS`/`ALL_WALKS` variants) and
//! on `routee-compass-core`'s `search_algorithm.rs`, which drives its main
//! loop with an explicit `while let Some(...) = queue.pop()` rather than
//! recursion.
//!
//! `DfsMode::Tree` visits every vertex once, using a global visited set —
//! this is the only mode that can classify non-tree edges as back/forward/
//! cross, since that classification depends on a vertex having a single,
//! global discover time. `DfsMode::AllPaths` instead prunes only vertices
//! already on the *current* path, so the same vertex can be entered again
//! from a different branch — every non-tree edge it meets is therefore a
//! back edge to the active path. `DfsMode::AllWalks` prunes nothing at all
//! and relies on the caller's `calculation_limit` to terminate on cyclic
//! graphs — infinite-branching reductions are the one case this engine
//! cannot bound on its own.

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::SearchError;
use crate::gear::{Gear, TimestampMap, VisitedSet};
use crate::paths::{DummyPathsStore, HashPathsStore, PathsStore};
use crate::search::resolve_starts;
use crate::search::state::VisitCounter;
use crate::search::successors::{resolve_vertex_successors, VertexSuccessors};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DfsMode {
    Tree,
    AllPaths,
    AllWalks,
}

/// How finely `DfsMode::Tree` classifies edges to already-entered vertices.
/// Cheaper settings cost less bookkeeping but collapse distinct event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceDetail {
    /// Only a global visited set; every non-tree edge is `SomeNonTreeEdge`.
    None,
    /// Adds ancestor-stack membership; splits off `BackEdge`, leaving
    /// `ForwardOrCrossEdge` for everything else.
    OnTrace,
    /// Adds discovery timestamps; fully splits `BackEdge`/`ForwardEdge`/`CrossEdge`.
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DfsEvent {
    EnteringStart,
    LeavingStart,
    SkippingStart,
    EnteringSuccessor,
    LeavingSuccessor,
    BackEdge,
    ForwardEdge,
    CrossEdge,
    SomeNonTreeEdge,
    ForwardOrCrossEdge,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DfsReport<V> {
    pub vertex: V,
    pub event: DfsEvent,
    pub depth: usize,
}

#[derive(Debug, Clone)]
pub struct DfsOptions {
    pub mode: DfsMode,
    pub trace_detail: TraceDetail,
    pub build_paths: bool,
    pub calculation_limit: Option<usize>,
}

impl Default for DfsOptions {
    fn default() -> Self {
        DfsOptions {
            mode: DfsMode::Tree,
            trace_detail: TraceDetail::None,
            build_paths: false,
            calculation_limit: None,
        }
    }
}

struct Frame<V, L> {
    vertex: V,
    children: std::vec::IntoIter<(V, Option<L>)>,
    is_start: bool,
}

pub struct Dfs<'a, V, L, G>
where
    L: Clone,
    V: Clone + Eq + Hash + Debug,
    G: Gear<V, V, L>,
{
    successors: VertexSuccessors<'a, V, L>,
    mode: DfsMode,
    trace_detail: TraceDetail,
    visited: G::VisitedSet,
    on_trace: HashSet<V>,
    discover_time: G::TimestampMap,
    next_time: u64,
    stack: Vec<Frame<V, L>>,
    pending_starts: std::collections::VecDeque<V>,
    paths: Box<dyn PathsStore<V, V, L> + 'a>,
    counter: VisitCounter,
}

impl<'a, V, L, G> Dfs<'a, V, L, G>
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
        options: DfsOptions,
    ) -> Result<Self, SearchError> {
        if options.mode != DfsMode::Tree && options.trace_detail != TraceDetail::None {
            return Err(crate::error::UsageError::InvalidDfsOptions(
                "trace_detail only applies to DfsMode::Tree".to_string(),
            )
            .into());
        }
        let starts = resolve_starts(start_vertex, start_vertices)?;
        let successors = resolve_vertex_successors(next_vertices, next_edges)?;
        let labeled = matches!(successors, VertexSuccessors::Edges(_));
        let paths: Box<dyn PathsStore<V, V, L>> = if options.build_paths {
            Box::new(HashPathsStore::new(labeled))
        } else {
            Box::new(DummyPathsStore)
        };

        Ok(Dfs {
            successors,
            mode: options.mode,
            trace_detail: options.trace_detail,
            visited: gear.visited_set(),
            on_trace: HashSet::new(),
            discover_time: gear.timestamp_map(),
            next_time: 0,
            stack: Vec::new(),
            pending_starts: starts.into(),
            paths,
            counter: VisitCounter::new(options.calculation_limit),
        })
    }

    pub fn visited(&self) -> &G::VisitedSet {
        &self.visited
    }

    pub fn paths(&self) -> &dyn PathsStore<V, V, L> {
        self.paths.as_ref()
    }

    fn should_enter(&self, candidate: &V) -> bool {
        match self.mode {
            DfsMode::Tree => !self.visited.contains(candidate),
            DfsMode::AllPaths => !self.on_trace.contains(candidate),
            DfsMode::AllWalks => true,
        }
    }

    fn mark_entered(&mut self, vertex: &V) {
        if self.mode == DfsMode::Tree {
            self.visited.insert(vertex.clone());
        }
        self.on_trace.insert(vertex.clone());
        if self.trace_detail == TraceDetail::Full {
            self.discover_time.set(vertex.clone(), self.next_time);
            self.next_time += 1;
        }
    }

    fn classify_non_tree_edge(&self, current: &V, candidate: &V) -> DfsEvent {
        match self.mode {
            DfsMode::AllPaths => DfsEvent::BackEdge,
            DfsMode::AllWalks => unreachable!("AllWalks never rejects a candidate"),
            DfsMode::Tree => {
                if self.on_trace.contains(candidate) {
                    DfsEvent::BackEdge
                } else {
                    match self.trace_detail {
                        TraceDetail::None => DfsEvent::SomeNonTreeEdge,
                        TraceDetail::OnTrace => DfsEvent::ForwardOrCrossEdge,
                        TraceDetail::Full => {
                            let current_time = self.discover_time.get(current).unwrap_or(0);
                            let candidate_time = self.discover_time.get(candidate).unwrap_or(0);
                            if candidate_time > current_time {
                                DfsEvent::ForwardEdge
                            } else {
                                DfsEvent::CrossEdge
                            }
                        }
                    }
                }
            }
        }
    }

    fn enter_start(&mut self, start: V) -> Result<DfsReport<V>, SearchError> {
        self.counter.tick()?;
        self.mark_entered(&start);
        self.paths.mark_start(start.clone(), start.clone());
        let children = self.successors.call(&start).into_iter();
        let depth = self.stack.len();
        self.stack.push(Frame {
            vertex: start.clone(),
            children,
            is_start: true,
        });
        Ok(DfsReport {
            vertex: start,
            event: DfsEvent::EnteringStart,
            depth,
        })
    }
}

impl<'a, V, L, G> Iterator for Dfs<'a, V, L, G>
where
    V: Clone + Eq + Hash + Debug,
    L: Clone,
    G: Gear<V, V, L>,
{
    type Item = Result<DfsReport<V>, SearchError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.stack.is_empty() {
                let start = self.pending_starts.pop_front()?;
                if self.should_enter(&start) {
                    return Some(self.enter_start(start));
                }
                return Some(Ok(DfsReport {
                    vertex: start,
                    event: DfsEvent::SkippingStart,
                    depth: 0,
                }));
            }

            let depth = self.stack.len() - 1;
            let next_child = self.stack.last_mut().unwrap().children.next();

            match next_child {
                Some((child, label)) => {
                    if self.should_enter(&child) {
                        if let Err(err) = self.counter.tick() {
                            return Some(Err(err));
                        }
                        self.mark_entered(&child);
                        let parent = self.stack.last().unwrap().vertex.clone();
                        self.paths.record(child.clone(), child.clone(), parent, label);
                        let children = self.successors.call(&child).into_iter();
                        self.stack.push(Frame {
                            vertex: child.clone(),
                            children,
                            is_start: false,
                        });
                        log::trace!("dfs entering {:?} at depth {}", child, depth + 1);
                        return Some(Ok(DfsReport {
                            vertex: child,
                            event: DfsEvent::EnteringSuccessor,
                            depth: depth + 1,
                        }));
                    } else {
                        let current = self.stack.last().unwrap().vertex.clone();
                        let event = self.classify_non_tree_edge(&current, &child);
                        return Some(Ok(DfsReport {
                            vertex: child,
                            event,
                            depth,
                        }));
                    }
                }
                None => {
                    let frame = self.stack.pop().unwrap();
                    self.on_trace.remove(&frame.vertex);
                    let event = if frame.is_start {
                        DfsEvent::LeavingStart
                    } else {
                        DfsEvent::LeavingSuccessor
                    };
                    return Some(Ok(DfsReport {
                        vertex: frame.vertex,
                        event,
                        depth,
                    }));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gear::hash::HashGear;

    fn sample_graph(v: &i32) -> Vec<i32> {
        match v {
            1 => vec![2, 3],
            2 => vec![4],
            3 => vec![4],
            4 => vec![1],
            _ => vec![],
        }
    }

    #[test]
    fn tree_mode_visits_each_vertex_once_and_reports_back_edge() {
        let gear = HashGear::new();
        let dfs: Dfs<i32, (), HashGear> = Dfs::start_from(
            &gear,
            Some(1),
            None,
            Some(Box::new(sample_graph)),
            None,
            DfsOptions {
                trace_detail: TraceDetail::OnTrace,
                ..Default::default()
            },
        )
        .unwrap();
        let reports: Vec<DfsReport<i32>> = dfs.map(|r| r.unwrap()).collect();
        let entering: Vec<i32> = reports
            .iter()
            .filter(|r| r.event == DfsEvent::EnteringStart || r.event == DfsEvent::EnteringSuccessor)
            .map(|r| r.vertex)
            .collect();
        assert_eq!(entering, vec![1, 2, 4, 3]);
        assert!(reports
            .iter()
            .any(|r| r.vertex == 1 && r.event == DfsEvent::BackEdge));
    }

    #[test]
    fn full_trace_detail_distinguishes_forward_from_cross() {
        // 1 -> {2, 3}, 2 -> 3: successor order visits 2 before 3, so 3 is
        // first discovered as 2's child (a descendant of 1 in the DFS
        // tree). When 1 later examines its own edge to 3, 3 is already
        // finished but is a tree descendant of 1, making 1->3 a forward
        // edge rather than a cross edge.
        let gear = HashGear::new();
        let next = |v: &i32| -> Vec<i32> {
            match v {
                1 => vec![2, 3],
                2 => vec![3],
                _ => vec![],
            }
        };
        let dfs: Dfs<i32, (), HashGear> = Dfs::start_from(
            &gear,
            Some(1),
            None,
            Some(Box::new(next)),
            None,
            DfsOptions {
                trace_detail: TraceDetail::Full,
                ..Default::default()
            },
        )
        .unwrap();
        let reports: Vec<DfsReport<i32>> = dfs.map(|r| r.unwrap()).collect();
        let non_tree: Vec<DfsEvent> = reports
            .iter()
            .filter(|r| {
                !matches!(
                    r.event,
                    DfsEvent::EnteringStart
                        | DfsEvent::EnteringSuccessor
                        | DfsEvent::LeavingStart
                        | DfsEvent::LeavingSuccessor
                )
            })
            .map(|r| r.event)
            .collect();
        assert_eq!(non_tree, vec![DfsEvent::ForwardEdge]);
    }

    #[test]
    fn all_paths_mode_revisits_vertices_across_branches() {
        let gear = HashGear::new();
        // diamond: 1 -> {2, 3}, 2 -> 4, 3 -> 4
        let next = |v: &i32| -> Vec<i32> {
            match v {
                1 => vec![2, 3],
                2 => vec![4],
                3 => vec![4],
                _ => vec![],
            }
        };
        let dfs: Dfs<i32, (), HashGear> = Dfs::start_from(
            &gear,
            Some(1),
            None,
            Some(Box::new(next)),
            None,
            DfsOptions {
                mode: DfsMode::AllPaths,
                ..Default::default()
            },
        )
        .unwrap();
        let entering: Vec<i32> = dfs
            .map(|r| r.unwrap())
            .filter(|r| r.event == DfsEvent::EnteringSuccessor || r.event == DfsEvent::EnteringStart)
            .map(|r| r.vertex)
            .collect();
        // vertex 4 is entered twice: once via 2, once via 3.
        assert_eq!(entering.iter().filter(|&&v| v == 4).count(), 2);
    }

    #[test]
    fn skipping_start_reported_for_duplicate_start_vertex() {
        let gear = HashGear::new();
        let dfs: Dfs<i32, (), HashGear> = Dfs::start_from(
            &gear,
            None,
            Some(vec![1, 1]),
            Some(Box::new(|_: &i32| Vec::new())),
            None,
            DfsOptions::default(),
        )
        .unwrap();
        let events: Vec<DfsEvent> = dfs.map(|r| r.unwrap().event).collect();
        assert_eq!(
            events,
            vec![DfsEvent::EnteringStart, DfsEvent::LeavingStart, DfsEvent::SkippingStart]
        );
    }
}

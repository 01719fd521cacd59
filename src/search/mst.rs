//! Minimum spanning tree (Prim/Jarník): reports the target vertex of each
//! edge added to the tree, growing outward from eagerly-visited start
//! vertices.
//!
//! Grounded on
//! `nographs._strategies.traversals.with_weights.minimum_spanning_tree.TraversalMinimumSpanningTreeFlex`:
//! a min-heap of candidate edges keyed by weight, tie-broken by a unique
//! counter favoring the most recently discovered edge. Unlike Dijkstra/A*,
//! several different source vertices may offer a candidate edge to the same
//! still-unvisited target before it is finalized, so the heap holds one
//! entry per *edge* rather than one per vertex id —
//! [`crate::util::priority_queue::Frontier`]'s decrease-key, one-entry-per-id
//! API cannot express that, so this strategy keeps its own
//! `std::collections::BinaryHeap` of candidates instead and discards stale
//! ones lazily (checking `visited` on pop) rather than replacing them
//! in-place.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::SearchError;
use crate::gear::{Gear, VisitedSet};
use crate::paths::{DummyPathsStore, HashPathsStore, PathsStore};
use crate::search::resolve_starts;
use crate::search::state::VisitCounter;
use crate::search::successors::{resolve_weighted_successors, WeightedSuccessors};
use crate::weight::Weight;

struct Candidate<V, W, L> {
    weight: W,
    sequence: u64,
    source: V,
    target: V,
    label: Option<L>,
}

impl<V, W: PartialEq, L> PartialEq for Candidate<V, W, L> {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.sequence == other.sequence
    }
}
impl<V, W: PartialEq, L> Eq for Candidate<V, W, L> {}

impl<V, W: Ord, L> PartialOrd for Candidate<V, W, L> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Smaller weight sorts greater (so `BinaryHeap`, a max-heap, pops the
/// lowest-weight candidate first); ties favor the larger (more recent)
/// sequence number.
impl<V, W: Ord, L> Ord for Candidate<V, W, L> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .cmp(&self.weight)
            .then(self.sequence.cmp(&other.sequence))
    }
}

#[derive(Debug, Clone, Default)]
pub struct MstOptions {
    pub build_paths: bool,
    pub calculation_limit: Option<usize>,
}

pub struct Mst<'a, V, L, W, G>
where
    L: Clone,
    V: Clone + Eq + Hash + Debug,
    W: Weight + Ord,
    G: Gear<V, V, L>,
{
    successors: WeightedSuccessors<'a, V, W, L>,
    visited: G::VisitedSet,
    paths: Box<dyn PathsStore<V, V, L> + 'a>,
    heap: BinaryHeap<Candidate<V, W, L>>,
    sequence: u64,
    counter: VisitCounter,
    pub edge: Option<(V, V, W)>,
}

impl<'a, V, L, W, G> Mst<'a, V, L, W, G>
where
    V: Clone + Eq + Hash + Debug + 'a,
    L: Clone + 'a,
    W: Weight + Ord + 'a,
    G: Gear<V, V, L>,
{
    #[allow(clippy::too_many_arguments)]
    pub fn start_from(
        gear: &G,
        start_vertex: Option<V>,
        start_vertices: Option<Vec<V>>,
        next_edges: Option<Box<dyn FnMut(&V) -> Vec<(V, W)> + 'a>>,
        next_labeled_edges: Option<Box<dyn FnMut(&V) -> Vec<(V, W, L)> + 'a>>,
        options: MstOptions,
    ) -> Result<Self, SearchError> {
        let starts = resolve_starts(start_vertex, start_vertices)?;
        let mut successors = resolve_weighted_successors(next_edges, next_labeled_edges)?;
        let labeled = matches!(successors, WeightedSuccessors::LabeledEdges(_));
        let paths: Box<dyn PathsStore<V, V, L>> = if options.build_paths {
            Box::new(HashPathsStore::new(labeled))
        } else {
            Box::new(DummyPathsStore)
        };

        let mut visited = gear.visited_set();
        for start in &starts {
            visited.insert(start.clone());
        }

        let mut heap = BinaryHeap::new();
        let mut sequence = 0u64;
        for start in &starts {
            for (target, weight, label) in successors.call(start) {
                heap.push(Candidate {
                    weight,
                    sequence,
                    source: start.clone(),
                    target,
                    label,
                });
                sequence += 1;
            }
        }

        Ok(Mst {
            successors,
            visited,
            paths,
            heap,
            sequence,
            counter: VisitCounter::new(options.calculation_limit),
            edge: None,
        })
    }

    pub fn visited(&self) -> &G::VisitedSet {
        &self.visited
    }

    pub fn paths(&self) -> &dyn PathsStore<V, V, L> {
        self.paths.as_ref()
    }
}

impl<'a, V, L, W, G> Iterator for Mst<'a, V, L, W, G>
where
    V: Clone + Eq + Hash + Debug,
    L: Clone,
    W: Weight + Ord,
    G: Gear<V, V, L>,
{
    type Item = Result<V, SearchError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let candidate = self.heap.pop()?;
            if self.visited.contains(&candidate.target) {
                continue;
            }
            self.visited.insert(candidate.target.clone());

            if let Err(err) = self.counter.tick() {
                return Some(Err(err));
            }

            self.paths.record(
                candidate.target.clone(),
                candidate.target.clone(),
                candidate.source.clone(),
                candidate.label,
            );
            self.edge = Some((candidate.source, candidate.target.clone(), candidate.weight));
            log::trace!("mst reporting edge into {:?}", candidate.target);

            for (neighbor, weight, label) in self.successors.call(&candidate.target) {
                if self.visited.contains(&neighbor) {
                    continue;
                }
                self.heap.push(Candidate {
                    weight,
                    sequence: self.sequence,
                    source: candidate.target.clone(),
                    target: neighbor,
                    label,
                });
                self.sequence += 1;
            }

            return Some(Ok(candidate.target));
        }
    }
}

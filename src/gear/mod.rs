//! The Gear abstraction: pluggable storage factories for the per-run state a
//! traversal needs (visited sets, distance maps, predecessor maps, label
//! maps, discovery-timestamp maps).
//!
//! Grounded on `nographs._gears.Gear` / `GearForHashableVertexIDs` /
//! `GearForIntVertexIDs`: a gear is a small factory object, handed to a
//! strategy at `start_from` time, that produces the concrete collections the
//! strategy will mutate during the run. Two families are provided:
//! [`hash`] (arbitrary hashable vertex ids, `HashMap`/`HashSet`-backed) and
//! [`dense`] (non-negative integer vertex ids, `Vec`-backed with a
//! bit-packed visited set).
//!
//! Rust's trait system replaces the Python `Protocol` hierarchy with a set of
//! small per-collection traits plus one factory trait (`Gear`) and one
//! extension trait for weighted strategies (`WeightedGear`).

pub mod dense;
pub mod hash;

use crate::weight::Weight;

/// A set of visited vertex ids.
pub trait VisitedSet<Vid> {
    /// Inserts `id`. Returns `true` if `id` was not already present.
    fn insert(&mut self, id: Vid) -> bool;
    fn contains(&self, id: &Vid) -> bool;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A map from vertex id to the vertex's predecessor (the full predecessor
/// *vertex value*, not just its id — this is what lets a `PathsStore` walk
/// the chain back to a start vertex without a reverse-lookup).
pub trait PredecessorMap<Vid, V> {
    fn get(&self, id: &Vid) -> Option<&V>;
    fn set(&mut self, id: Vid, predecessor: V);
}

/// A map from vertex id to the label of the edge that discovered it.
pub trait LabelMap<Vid, L> {
    fn get(&self, id: &Vid) -> Option<&L>;
    fn set(&mut self, id: Vid, label: L);
}

/// A map from vertex id to a discovery-order timestamp (used by DFS's
/// entering/leaving bookkeeping and by topological sort's on-trace set).
pub trait TimestampMap<Vid> {
    fn get(&self, id: &Vid) -> Option<u64>;
    fn set(&mut self, id: Vid, timestamp: u64);
}

/// A map from vertex id to a distance/weight value, defaulting absent
/// entries to the gear's `infinity()`.
pub trait DistanceMap<Vid, W: Weight> {
    /// The distance recorded for `id`, or `W::infinity()` if none.
    fn get(&self, id: &Vid) -> W;
    /// The distance recorded for `id`, or `None` if none — used when a
    /// strategy's `keep_distances` option exposes the raw map to callers.
    fn get_option(&self, id: &Vid) -> Option<W>;
    fn set(&mut self, id: Vid, distance: W);
}

/// Produces the unweighted per-run collections a traversal needs.
pub trait Gear<Vid, V, L> {
    type VisitedSet: VisitedSet<Vid>;
    type PredecessorMap: PredecessorMap<Vid, V>;
    type LabelMap: LabelMap<Vid, L>;
    type TimestampMap: TimestampMap<Vid>;

    fn visited_set(&self) -> Self::VisitedSet;
    fn predecessor_map(&self) -> Self::PredecessorMap;
    fn label_map(&self) -> Self::LabelMap;
    fn timestamp_map(&self) -> Self::TimestampMap;
}

/// Extends [`Gear`] with a distance-map factory, for the weighted
/// strategies (Dijkstra, A*, MST, bidirectional Dijkstra).
pub trait WeightedGear<Vid, V, L, W: Weight>: Gear<Vid, V, L> {
    type DistanceMap: DistanceMap<Vid, W>;
    fn distance_map(&self) -> Self::DistanceMap;
}

//! Hash-backed gear: works for any vertex id implementing `Hash + Eq +
//! Clone`. Grounded on `nographs._gears.GearForHashableVertexIDs`, which
//! backs every collection with a plain `dict`/`set`.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use super::{DistanceMap, Gear, LabelMap, PredecessorMap, TimestampMap, VisitedSet, WeightedGear};
use crate::weight::Weight;

/// The default gear: arbitrary hashable vertex ids, `HashMap`/`HashSet`
/// backing. Reasonable for any graph; the dense gear in [`super::dense`]
/// trades generality for a smaller memory footprint when vertex ids are
/// known to be small non-negative integers.
#[derive(Debug, Default, Clone, Copy)]
pub struct HashGear;

impl HashGear {
    pub fn new() -> Self {
        HashGear
    }
}

pub struct HashVisitedSet<Vid>(HashSet<Vid>);

impl<Vid: Hash + Eq> VisitedSet<Vid> for HashVisitedSet<Vid> {
    fn insert(&mut self, id: Vid) -> bool {
        self.0.insert(id)
    }
    fn contains(&self, id: &Vid) -> bool {
        self.0.contains(id)
    }
    fn len(&self) -> usize {
        self.0.len()
    }
}

pub struct HashPredecessorMap<Vid, V>(HashMap<Vid, V>);

impl<Vid: Hash + Eq, V> PredecessorMap<Vid, V> for HashPredecessorMap<Vid, V> {
    fn get(&self, id: &Vid) -> Option<&V> {
        self.0.get(id)
    }
    fn set(&mut self, id: Vid, predecessor: V) {
        self.0.insert(id, predecessor);
    }
}

pub struct HashLabelMap<Vid, L>(HashMap<Vid, L>);

impl<Vid: Hash + Eq, L> LabelMap<Vid, L> for HashLabelMap<Vid, L> {
    fn get(&self, id: &Vid) -> Option<&L> {
        self.0.get(id)
    }
    fn set(&mut self, id: Vid, label: L) {
        self.0.insert(id, label);
    }
}

pub struct HashTimestampMap<Vid>(HashMap<Vid, u64>);

impl<Vid: Hash + Eq> TimestampMap<Vid> for HashTimestampMap<Vid> {
    fn get(&self, id: &Vid) -> Option<u64> {
        self.0.get(id).copied()
    }
    fn set(&mut self, id: Vid, timestamp: u64) {
        self.0.insert(id, timestamp);
    }
}

pub struct HashDistanceMap<Vid, W>(HashMap<Vid, W>);

impl<Vid: Hash + Eq, W: Weight> DistanceMap<Vid, W> for HashDistanceMap<Vid, W> {
    fn get(&self, id: &Vid) -> W {
        self.0.get(id).copied().unwrap_or_else(W::infinity)
    }
    fn get_option(&self, id: &Vid) -> Option<W> {
        self.0.get(id).copied()
    }
    fn set(&mut self, id: Vid, distance: W) {
        self.0.insert(id, distance);
    }
}

impl<Vid: Hash + Eq, V, L> Gear<Vid, V, L> for HashGear {
    type VisitedSet = HashVisitedSet<Vid>;
    type PredecessorMap = HashPredecessorMap<Vid, V>;
    type LabelMap = HashLabelMap<Vid, L>;
    type TimestampMap = HashTimestampMap<Vid>;

    fn visited_set(&self) -> Self::VisitedSet {
        HashVisitedSet(HashSet::new())
    }
    fn predecessor_map(&self) -> Self::PredecessorMap {
        HashPredecessorMap(HashMap::new())
    }
    fn label_map(&self) -> Self::LabelMap {
        HashLabelMap(HashMap::new())
    }
    fn timestamp_map(&self) -> Self::TimestampMap {
        HashTimestampMap(HashMap::new())
    }
}

impl<Vid: Hash + Eq, V, L, W: Weight> WeightedGear<Vid, V, L, W> for HashGear {
    type DistanceMap = HashDistanceMap<Vid, W>;

    fn distance_map(&self) -> Self::DistanceMap {
        HashDistanceMap(HashMap::new())
    }
}

/// Convenience constructor matching `nographs.GearDefault()`: a zero-argument
/// hash-backed gear for callers who don't care about dense storage.
pub fn hash_gear() -> HashGear {
    HashGear::new()
}

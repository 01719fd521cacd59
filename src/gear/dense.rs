//! Dense/array-backed gear: for graphs whose vertex id is a small
//! non-negative integer (`usize`). Trades the generality of [`super::hash`]
//! for a much smaller footprint: the visited set is bit-packed
//! ([`crate::util::bitset::BitSet`]) and every map is a `Vec` indexed
//! directly by vertex id, auto-extending as larger ids are seen.
//!
//! Grounded on `nographs._gears.GearForIntVertexIDs`, which backs its
//! collections with `array`/`bytearray`/plain `list` rather than `dict`.

use super::{DistanceMap, Gear, LabelMap, PredecessorMap, TimestampMap, VisitedSet, WeightedGear};
use crate::util::bitset::BitSet;
use crate::weight::Weight;

/// Dense gear: vertex ids are `usize`. See module docs.
#[derive(Debug, Default, Clone, Copy)]
pub struct DenseGear;

impl DenseGear {
    pub fn new() -> Self {
        DenseGear
    }
}

pub struct DenseVisitedSet(BitSet);

impl VisitedSet<usize> for DenseVisitedSet {
    fn insert(&mut self, id: usize) -> bool {
        self.0.insert(id)
    }
    fn contains(&self, id: &usize) -> bool {
        self.0.contains(*id)
    }
    fn len(&self) -> usize {
        self.0.len()
    }
}

/// A `Vec<Option<T>>` that grows on write, used by every dense map below.
struct DenseVec<T>(Vec<Option<T>>);

impl<T> DenseVec<T> {
    fn new() -> Self {
        DenseVec(Vec::new())
    }

    fn get(&self, id: usize) -> Option<&T> {
        self.0.get(id).and_then(|slot| slot.as_ref())
    }

    fn set(&mut self, id: usize, value: T) {
        if id >= self.0.len() {
            self.0.resize_with(id + 1, || None);
        }
        self.0[id] = Some(value);
    }
}

pub struct DensePredecessorMap<V>(DenseVec<V>);

impl<V> PredecessorMap<usize, V> for DensePredecessorMap<V> {
    fn get(&self, id: &usize) -> Option<&V> {
        self.0.get(*id)
    }
    fn set(&mut self, id: usize, predecessor: V) {
        self.0.set(id, predecessor);
    }
}

pub struct DenseLabelMap<L>(DenseVec<L>);

impl<L> LabelMap<usize, L> for DenseLabelMap<L> {
    fn get(&self, id: &usize) -> Option<&L> {
        self.0.get(*id)
    }
    fn set(&mut self, id: usize, label: L) {
        self.0.set(id, label);
    }
}

pub struct DenseTimestampMap(DenseVec<u64>);

impl TimestampMap<usize> for DenseTimestampMap {
    fn get(&self, id: &usize) -> Option<u64> {
        self.0.get(*id).copied()
    }
    fn set(&mut self, id: usize, timestamp: u64) {
        self.0.set(id, timestamp);
    }
}

pub struct DenseDistanceMap<W>(DenseVec<W>);

impl<W: Weight> DistanceMap<usize, W> for DenseDistanceMap<W> {
    fn get(&self, id: &usize) -> W {
        self.0.get(*id).copied().unwrap_or_else(W::infinity)
    }
    fn get_option(&self, id: &usize) -> Option<W> {
        self.0.get(*id).copied()
    }
    fn set(&mut self, id: usize, distance: W) {
        self.0.set(id, distance);
    }
}

impl<V, L> Gear<usize, V, L> for DenseGear {
    type VisitedSet = DenseVisitedSet;
    type PredecessorMap = DensePredecessorMap<V>;
    type LabelMap = DenseLabelMap<L>;
    type TimestampMap = DenseTimestampMap;

    fn visited_set(&self) -> Self::VisitedSet {
        DenseVisitedSet(BitSet::new())
    }
    fn predecessor_map(&self) -> Self::PredecessorMap {
        DensePredecessorMap(DenseVec::new())
    }
    fn label_map(&self) -> Self::LabelMap {
        DenseLabelMap(DenseVec::new())
    }
    fn timestamp_map(&self) -> Self::TimestampMap {
        DenseTimestampMap(DenseVec::new())
    }
}

impl<V, L, W: Weight> WeightedGear<usize, V, L, W> for DenseGear {
    type DistanceMap = DenseDistanceMap<W>;

    fn distance_map(&self) -> Self::DistanceMap {
        DenseDistanceMap(DenseVec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visited_set_handles_sparse_large_ids() {
        let gear = DenseGear::new();
        let mut visited: DenseVisitedSet = gear.visited_set();
        assert!(visited.insert(9_000));
        assert!(!visited.insert(9_000));
        assert!(!visited.contains(&0));
        assert_eq!(visited.len(), 1);
    }

    #[test]
    fn distance_map_auto_extends_and_defaults_to_infinity() {
        let gear = DenseGear::new();
        let mut distances: DenseDistanceMap<i64> = WeightedGear::distance_map(&gear);
        assert_eq!(distances.get(&42), i64::infinity());
        distances.set(42, 3);
        assert_eq!(distances.get(&42), 3);
        assert_eq!(distances.get(&0), i64::infinity());
    }

    #[test]
    fn predecessor_map_stores_full_vertex_value() {
        let gear = DenseGear::new();
        let mut preds: DensePredecessorMap<String> = gear.predecessor_map();
        preds.set(3, "start".to_string());
        assert_eq!(preds.get(&3).map(String::as_str), Some("start"));
        assert_eq!(preds.get(&4), None);
    }
}

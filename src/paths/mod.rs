//! The Paths abstraction: a store of predecessor-chain entries that lets a
//! finished (or in-progress) search reconstruct the path from a start vertex
//! to any reported vertex, without every strategy re-implementing
//! backtracking itself.
//!
//! Grounded on `nographs.paths.Paths` (predecessor dictionary plus lazy
//! forward/backward vertex and edge iterators) and, for the "HOW" of
//! backtracking over a predecessor map, on
//! `routee-compass-core::algorithm::search::backtrack`, which walks a search
//! tree from a target back to its root collecting edges into a `Vec` and
//! then reverses it.

use std::collections::HashMap;
use std::hash::Hash;

use crate::error::PathsError;

/// One step of a labeled path: the vertex reached, and the label of the
/// edge used to reach it from its predecessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledEdge<V, L> {
    pub vertex: V,
    pub label: L,
}

/// A store of predecessor-chain entries, written to during a search and read
/// back afterward (or during, for incremental consumers) to reconstruct
/// paths. A vertex whose own predecessor id is itself marks a path start.
pub trait PathsStore<Vid, V: Clone, L: Clone> {
    /// Whether this store retains edge labels. `labeled_edge_path_*` methods
    /// fail with [`PathsError::Unlabeled`] when this is `false`.
    fn is_labeled(&self) -> bool;

    fn contains(&self, id: &Vid) -> bool;

    /// Marks `id` as a path start: its own predecessor.
    fn mark_start(&mut self, id: Vid, vertex: V);

    /// Records that `id` (carrying vertex value `vertex`) was reached from
    /// `predecessor_id` via an edge labeled `label` (if labels are tracked).
    fn record(&mut self, id: Vid, vertex: V, predecessor_id: Vid, label: Option<L>);

    fn vertex_path_backward<'a>(
        &'a self,
        id: &Vid,
    ) -> Result<Box<dyn Iterator<Item = V> + 'a>, PathsError>;

    fn labeled_edge_path_backward<'a>(
        &'a self,
        id: &Vid,
    ) -> Result<Box<dyn Iterator<Item = LabeledEdge<V, L>> + 'a>, PathsError>;

    /// Vertices from the path's start to `id`, inclusive.
    fn vertex_path_forward(&self, id: &Vid) -> Result<Vec<V>, PathsError> {
        let mut vertices: Vec<V> = self.vertex_path_backward(id)?.collect();
        vertices.reverse();
        Ok(vertices)
    }

    /// Edges from the path's start to `id`; empty if `id` is itself a start.
    fn labeled_edge_path_forward(&self, id: &Vid) -> Result<Vec<LabeledEdge<V, L>>, PathsError> {
        let mut edges: Vec<LabeledEdge<V, L>> = self.labeled_edge_path_backward(id)?.collect();
        edges.reverse();
        Ok(edges)
    }
}

struct PathEntry<Vid, V, L> {
    vertex: V,
    predecessor_id: Vid,
    label: Option<L>,
}

/// The default, hash-backed paths store: works for any vertex id
/// implementing `Hash + Eq + Clone`.
pub struct HashPathsStore<Vid, V, L> {
    labeled: bool,
    entries: HashMap<Vid, PathEntry<Vid, V, L>>,
}

impl<Vid, V, L> HashPathsStore<Vid, V, L> {
    pub fn new(labeled: bool) -> Self {
        HashPathsStore {
            labeled,
            entries: HashMap::new(),
        }
    }
}

impl<Vid: Hash + Eq + Clone, V: Clone, L: Clone> PathsStore<Vid, V, L> for HashPathsStore<Vid, V, L> {
    fn is_labeled(&self) -> bool {
        self.labeled
    }

    fn contains(&self, id: &Vid) -> bool {
        self.entries.contains_key(id)
    }

    fn mark_start(&mut self, id: Vid, vertex: V) {
        self.entries.insert(
            id.clone(),
            PathEntry {
                vertex,
                predecessor_id: id,
                label: None,
            },
        );
    }

    fn record(&mut self, id: Vid, vertex: V, predecessor_id: Vid, label: Option<L>) {
        self.entries.insert(
            id,
            PathEntry {
                vertex,
                predecessor_id,
                label,
            },
        );
    }

    fn vertex_path_backward<'a>(
        &'a self,
        id: &Vid,
    ) -> Result<Box<dyn Iterator<Item = V> + 'a>, PathsError> {
        if !self.entries.contains_key(id) {
            return Err(PathsError::NoPathForVertex);
        }
        Ok(Box::new(VertexBackwardIter {
            entries: &self.entries,
            current: Some(id.clone()),
        }))
    }

    fn labeled_edge_path_backward<'a>(
        &'a self,
        id: &Vid,
    ) -> Result<Box<dyn Iterator<Item = LabeledEdge<V, L>> + 'a>, PathsError> {
        if !self.labeled {
            return Err(PathsError::Unlabeled);
        }
        if !self.entries.contains_key(id) {
            return Err(PathsError::NoPathForVertex);
        }
        Ok(Box::new(LabeledEdgeBackwardIter {
            entries: &self.entries,
            current: Some(id.clone()),
        }))
    }
}

struct VertexBackwardIter<'a, Vid, V, L> {
    entries: &'a HashMap<Vid, PathEntry<Vid, V, L>>,
    current: Option<Vid>,
}

impl<'a, Vid: Hash + Eq + Clone, V: Clone, L> Iterator for VertexBackwardIter<'a, Vid, V, L> {
    type Item = V;

    fn next(&mut self) -> Option<V> {
        let id = self.current.take()?;
        let entry = self.entries.get(&id)?;
        let result = entry.vertex.clone();
        if entry.predecessor_id != id {
            self.current = Some(entry.predecessor_id.clone());
        }
        Some(result)
    }
}

struct LabeledEdgeBackwardIter<'a, Vid, V, L> {
    entries: &'a HashMap<Vid, PathEntry<Vid, V, L>>,
    current: Option<Vid>,
}

impl<'a, Vid: Hash + Eq + Clone, V: Clone, L: Clone> Iterator
    for LabeledEdgeBackwardIter<'a, Vid, V, L>
{
    type Item = LabeledEdge<V, L>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current.take()?;
        let entry = self.entries.get(&id)?;
        if entry.predecessor_id == id {
            return None;
        }
        self.current = Some(entry.predecessor_id.clone());
        Some(LabeledEdge {
            vertex: entry.vertex.clone(),
            label: entry
                .label
                .clone()
                .expect("non-start entries in a labeled store always carry a label"),
        })
    }
}

/// A no-op paths store for runs with path-building disabled: every write is
/// discarded and every read fails with [`PathsError::NotBuilt`], matching
/// `nographs`'s dummy paths object used when a traversal's `paths` attribute
/// is accessed without having requested path tracking.
#[derive(Debug, Default, Clone, Copy)]
pub struct DummyPathsStore;

impl<Vid, V: Clone, L: Clone> PathsStore<Vid, V, L> for DummyPathsStore {
    fn is_labeled(&self) -> bool {
        false
    }
    fn contains(&self, _id: &Vid) -> bool {
        false
    }
    fn mark_start(&mut self, _id: Vid, _vertex: V) {}
    fn record(&mut self, _id: Vid, _vertex: V, _predecessor_id: Vid, _label: Option<L>) {}
    fn vertex_path_backward<'a>(
        &'a self,
        _id: &Vid,
    ) -> Result<Box<dyn Iterator<Item = V> + 'a>, PathsError> {
        Err(PathsError::NotBuilt)
    }
    fn labeled_edge_path_backward<'a>(
        &'a self,
        _id: &Vid,
    ) -> Result<Box<dyn Iterator<Item = LabeledEdge<V, L>> + 'a>, PathsError> {
        Err(PathsError::NotBuilt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_chain() -> HashPathsStore<u32, &'static str, &'static str> {
        let mut store = HashPathsStore::new(true);
        store.mark_start(1, "a");
        store.record(2, "b", 1, Some("ab"));
        store.record(3, "c", 2, Some("bc"));
        store
    }

    #[test]
    fn vertex_path_forward_includes_start_and_target() {
        let store = build_chain();
        assert_eq!(store.vertex_path_forward(&3).unwrap(), vec!["a", "b", "c"]);
        assert_eq!(store.vertex_path_forward(&1).unwrap(), vec!["a"]);
    }

    #[test]
    fn labeled_edge_path_forward_excludes_start() {
        let store = build_chain();
        let edges = store.labeled_edge_path_forward(&3).unwrap();
        assert_eq!(
            edges,
            vec![
                LabeledEdge { vertex: "b", label: "ab" },
                LabeledEdge { vertex: "c", label: "bc" },
            ]
        );
        assert!(store.labeled_edge_path_forward(&1).unwrap().is_empty());
    }

    #[test]
    fn missing_vertex_is_an_error() {
        let store = build_chain();
        assert_eq!(
            store.vertex_path_forward(&99).unwrap_err(),
            PathsError::NoPathForVertex
        );
    }

    #[test]
    fn unlabeled_store_rejects_labeled_edge_queries() {
        let mut store: HashPathsStore<u32, &str, &str> = HashPathsStore::new(false);
        store.mark_start(1, "a");
        assert_eq!(
            store.labeled_edge_path_forward(&1).unwrap_err(),
            PathsError::Unlabeled
        );
    }

    #[test]
    fn dummy_store_always_reports_not_built() {
        let store = DummyPathsStore;
        let err = PathsStore::<u32, &str, &str>::vertex_path_backward(&store, &1).unwrap_err();
        assert_eq!(err, PathsError::NotBuilt);
    }
}

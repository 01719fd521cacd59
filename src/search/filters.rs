//! Filter combinators: lazy adapters layered on top of any strategy's
//! iterator, consuming vertices from the underlying sequence rather than
//! materializing it.
//!
//! Grounded on `nographs._strategies.traversals.traversal.Traversal.go_to` /
//! `.go_for_vertices_in`, and the sibling `go_for_depth_range` /
//! `go_for_distance_range` methods defined respectively on
//! `without_weights.breadth_first.TraversalBreadthFirstFlex` and
//! `with_weights.traversal_with_weights.TraversalWithWeightsFlex`. The
//! python originals are bound methods reading `self.depth`/`self.distance`;
//! here the same coupling is expressed as the [`ReportsDepth`] /
//! [`ReportsDistance`] traits, implemented by whichever strategy type
//! tracks that attribute.

use std::collections::HashSet;
use std::hash::Hash;

use crate::error::{SearchError, WeightedSearchError};

/// A strategy that tracks the search depth of its most recently reported
/// vertex (`-1` when depth computation was not requested).
pub trait ReportsDepth {
    fn depth(&self) -> isize;
}

/// A strategy that tracks the cumulative distance of its most recently
/// reported vertex.
pub trait ReportsDistance<W> {
    fn distance(&self) -> W;
}

/// An error type able to carry the "no path found" failure that `go_to` and
/// `go_for_vertices_in` raise when the underlying sequence is exhausted
/// without satisfying the request.
pub trait SignalsNoPath {
    fn no_path_found() -> Self;
}

impl SignalsNoPath for SearchError {
    fn no_path_found() -> Self {
        SearchError::NoPathFound
    }
}

impl<W: std::fmt::Debug + Clone + PartialEq> SignalsNoPath for WeightedSearchError<W> {
    fn no_path_found() -> Self {
        WeightedSearchError::NoPathFound
    }
}

/// Pulls vertices from `iter` until `vertex` is reported, returning it.
///
/// If the sequence is exhausted first, returns `Ok(None)` when
/// `fail_silently` is set, otherwise fails with the iterator's "no path
/// found" error.
pub fn go_to<I, V, E>(iter: &mut I, vertex: &V, fail_silently: bool) -> Result<Option<V>, E>
where
    I: Iterator<Item = Result<V, E>>,
    V: PartialEq,
    E: SignalsNoPath,
{
    for item in iter {
        let v = item?;
        if v == *vertex {
            return Ok(Some(v));
        }
    }
    if fail_silently {
        Ok(None)
    } else {
        Err(E::no_path_found())
    }
}

/// A lazy adapter reporting each vertex of `vertices` as it is found in the
/// wrapped sequence, stopping once all of them have been seen.
///
/// Yields nothing at all if `vertices` is empty. If the wrapped sequence is
/// exhausted before every vertex has been found, yields the "no path found"
/// error unless `fail_silently` was set, in which case it simply ends.
pub struct GoForVerticesIn<I, V> {
    inner: I,
    remaining: HashSet<V>,
    fail_silently: bool,
    done: bool,
}

pub fn go_for_vertices_in<I, V, E>(
    inner: I,
    vertices: impl IntoIterator<Item = V>,
    fail_silently: bool,
) -> GoForVerticesIn<I, V>
where
    I: Iterator<Item = Result<V, E>>,
    V: Eq + Hash,
{
    GoForVerticesIn {
        inner,
        remaining: vertices.into_iter().collect(),
        fail_silently,
        done: false,
    }
}

impl<I, V, E> Iterator for GoForVerticesIn<I, V>
where
    I: Iterator<Item = Result<V, E>>,
    V: Eq + Hash,
    E: SignalsNoPath,
{
    type Item = Result<V, E>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.remaining.is_empty() {
            return None;
        }
        loop {
            match self.inner.next() {
                None => {
                    self.done = true;
                    return if self.fail_silently {
                        None
                    } else {
                        Some(Err(E::no_path_found()))
                    };
                }
                Some(Err(err)) => {
                    self.done = true;
                    return Some(Err(err));
                }
                Some(Ok(v)) => {
                    if self.remaining.remove(&v) {
                        if self.remaining.is_empty() {
                            self.done = true;
                        }
                        return Some(Ok(v));
                    }
                }
            }
        }
    }
}

/// A lazy adapter yielding vertices reported while the underlying
/// strategy's `depth` lies in `[start, stop)`.
///
/// Vertices below `start` are skipped. The first vertex whose depth reaches
/// `stop` is consumed from the underlying sequence but not yielded (it is
/// lost, as with `std::iter::Iterator::take_while`).
pub struct GoForDepthRange<I> {
    inner: I,
    start: isize,
    stop: isize,
    entered_range: bool,
    done: bool,
}

pub fn go_for_depth_range<I, V, E>(inner: I, start: isize, stop: isize) -> GoForDepthRange<I>
where
    I: Iterator<Item = Result<V, E>> + ReportsDepth,
{
    GoForDepthRange {
        inner,
        start,
        stop,
        entered_range: false,
        done: false,
    }
}

impl<I, V, E> Iterator for GoForDepthRange<I>
where
    I: Iterator<Item = Result<V, E>> + ReportsDepth,
{
    type Item = Result<V, E>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if !self.entered_range {
            loop {
                match self.inner.next() {
                    None => {
                        self.done = true;
                        return None;
                    }
                    Some(Err(err)) => {
                        self.done = true;
                        return Some(Err(err));
                    }
                    Some(Ok(v)) => {
                        let depth = self.inner.depth();
                        if depth >= self.start {
                            self.entered_range = true;
                            if depth < self.stop {
                                return Some(Ok(v));
                            }
                            self.done = true;
                            return None;
                        }
                    }
                }
            }
        }
        match self.inner.next() {
            None => {
                self.done = true;
                None
            }
            Some(Err(err)) => {
                self.done = true;
                Some(Err(err))
            }
            Some(Ok(v)) => {
                if self.inner.depth() >= self.stop {
                    self.done = true;
                    None
                } else {
                    Some(Ok(v))
                }
            }
        }
    }
}

/// A lazy adapter yielding vertices reported while the underlying
/// strategy's `distance` lies in `[start, stop)`, mirroring
/// [`GoForDepthRange`] but keyed on distance instead of depth.
pub struct GoForDistanceRange<I, W> {
    inner: I,
    start: W,
    stop: W,
    entered_range: bool,
    done: bool,
}

pub fn go_for_distance_range<I, V, E, W>(
    inner: I,
    start: W,
    stop: W,
) -> GoForDistanceRange<I, W>
where
    I: Iterator<Item = Result<V, E>> + ReportsDistance<W>,
    W: PartialOrd + Copy,
{
    GoForDistanceRange {
        inner,
        start,
        stop,
        entered_range: false,
        done: false,
    }
}

impl<I, V, E, W> Iterator for GoForDistanceRange<I, W>
where
    I: Iterator<Item = Result<V, E>> + ReportsDistance<W>,
    W: PartialOrd + Copy,
{
    type Item = Result<V, E>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if !self.entered_range {
            loop {
                match self.inner.next() {
                    None => {
                        self.done = true;
                        return None;
                    }
                    Some(Err(err)) => {
                        self.done = true;
                        return Some(Err(err));
                    }
                    Some(Ok(v)) => {
                        let distance = self.inner.distance();
                        if distance >= self.start {
                            self.entered_range = true;
                            if distance < self.stop {
                                return Some(Ok(v));
                            }
                            self.done = true;
                            return None;
                        }
                    }
                }
            }
        }
        match self.inner.next() {
            None => {
                self.done = true;
                None
            }
            Some(Err(err)) => {
                self.done = true;
                Some(Err(err))
            }
            Some(Ok(v)) => {
                if self.inner.distance() >= self.stop {
                    self.done = true;
                    None
                } else {
                    Some(Ok(v))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gear::hash::HashGear;
    use crate::search::bfs::{Bfs, BfsOptions};
    use crate::search::dijkstra::{Dijkstra, DijkstraOptions};

    fn line_graph(n: i32) -> impl FnMut(&i32) -> Vec<i32> {
        move |v| if *v < n { vec![*v + 1] } else { vec![] }
    }

    #[test]
    fn go_to_stops_at_target_vertex() {
        let gear = HashGear::new();
        let mut bfs: Bfs<i32, (), HashGear> = Bfs::start_from(
            &gear,
            Some(0),
            None,
            Some(Box::new(line_graph(10))),
            None,
            None,
            BfsOptions::default(),
        )
        .unwrap();
        let found = go_to(&mut bfs, &3, false).unwrap();
        assert_eq!(found, Some(3));
    }

    #[test]
    fn go_to_fails_silently_when_vertex_unreachable() {
        let gear = HashGear::new();
        let mut bfs: Bfs<i32, (), HashGear> = Bfs::start_from(
            &gear,
            Some(0),
            None,
            Some(Box::new(line_graph(3))),
            None,
            None,
            BfsOptions::default(),
        )
        .unwrap();
        let found = go_to(&mut bfs, &99, true).unwrap();
        assert_eq!(found, None);
    }

    #[test]
    fn go_to_fails_loudly_by_default() {
        let gear = HashGear::new();
        let mut bfs: Bfs<i32, (), HashGear> = Bfs::start_from(
            &gear,
            Some(0),
            None,
            Some(Box::new(line_graph(3))),
            None,
            None,
            BfsOptions::default(),
        )
        .unwrap();
        let result = go_to(&mut bfs, &99, false);
        assert_eq!(result, Err(SearchError::NoPathFound));
    }

    #[test]
    fn go_for_vertices_in_finds_every_requested_vertex() {
        let gear = HashGear::new();
        let bfs: Bfs<i32, (), HashGear> = Bfs::start_from(
            &gear,
            Some(0),
            None,
            Some(Box::new(line_graph(10))),
            None,
            None,
            BfsOptions::default(),
        )
        .unwrap();
        let found: Vec<i32> = go_for_vertices_in(bfs, vec![2, 5], false)
            .map(|r| r.unwrap())
            .collect();
        assert_eq!(found, vec![2, 5]);
    }

    #[test]
    fn go_for_vertices_in_empty_set_yields_nothing() {
        let gear = HashGear::new();
        let bfs: Bfs<i32, (), HashGear> = Bfs::start_from(
            &gear,
            Some(0),
            None,
            Some(Box::new(line_graph(3))),
            None,
            None,
            BfsOptions::default(),
        )
        .unwrap();
        let found: Vec<Result<i32, SearchError>> =
            go_for_vertices_in(bfs, Vec::new(), false).collect();
        assert!(found.is_empty());
    }

    #[test]
    fn go_for_depth_range_yields_only_vertices_in_range() {
        let gear = HashGear::new();
        let bfs: Bfs<i32, (), HashGear> = Bfs::start_from(
            &gear,
            Some(0),
            None,
            Some(Box::new(line_graph(10))),
            None,
            None,
            BfsOptions::default(),
        )
        .unwrap();
        // depths: 1 at 1, 2 at 2, ...; range [2, 4) keeps depths 2 and 3.
        let found: Vec<i32> = go_for_depth_range(bfs, 2, 4).map(|r| r.unwrap()).collect();
        assert_eq!(found, vec![2, 3]);
    }

    #[test]
    fn go_for_distance_range_mirrors_depth_range_for_weighted_strategies() {
        let gear = HashGear::new();
        let next = |v: &i32| -> Vec<(i32, i64)> {
            if *v < 10 {
                vec![(*v + 1, 2)]
            } else {
                vec![]
            }
        };
        let dijkstra: Dijkstra<i32, (), i64, HashGear> = Dijkstra::start_from(
            &gear,
            Some(0),
            None,
            Some(Box::new(next)),
            None,
            None,
            DijkstraOptions::default(),
        )
        .unwrap();
        // distances: 2, 4, 6, 8, ...; range [4, 8) keeps distances 4 and 6.
        let found: Vec<i32> = go_for_distance_range(dijkstra, 4, 8)
            .map(|r| r.unwrap())
            .collect();
        assert_eq!(found, vec![2, 3]);
    }
}

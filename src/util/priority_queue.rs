//! A decrease-key min-priority-queue wrapper, grounded on
//! `routee-compass-core::util::priority_queue::InternalPriorityQueue`
//! (a thin `Deref`/`DerefMut` wrapper over `priority_queue::PriorityQueue`).
//!
//! The crate `priority_queue::PriorityQueue` is a max-heap keyed by unique
//! item identity. We invert the weight with `Reverse` to get min-heap
//! behavior, and pair it with a monotonically increasing push sequence so
//! that equal-weight entries break ties in favor of whichever was pushed
//! most recently — this is the "descending counter" tie-break Dijkstra/A*
//! use and the "ascending counter" tie-break MST uses; both reduce to the
//! same net rule (newest push wins a tie) once the counter is compared the
//! right way round, so a single implementation here serves both.

use priority_queue::PriorityQueue;
use std::cmp::Reverse;
use std::hash::Hash;

/// Heap priority: ordered first by weight ascending (via `Reverse`), then by
/// push sequence ascending — which, because `priority_queue` is a max-heap,
/// makes the smallest weight pop first and, among equal weights, the
/// largest (most recent) sequence number pop first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct FrontierPriority<W: Ord>(Reverse<W>, u64);

impl<W: Ord> FrontierPriority<W> {
    fn new(weight: W, sequence: u64) -> Self {
        FrontierPriority(Reverse(weight), sequence)
    }

    pub fn weight(&self) -> &W {
        &self.0 .0
    }
}

/// A min-priority frontier over vertex ids, supporting decrease-key updates.
///
/// Callers are expected to compare a candidate weight against their own
/// distance bookkeeping (the gear's distance map) *before* calling
/// [`Frontier::push`] — this mirrors the teacher's A* loop, which checks
/// `tentative_gscore < existing_gscore` against its own map rather than
/// against the heap.
pub struct Frontier<Id: Hash + Eq, W: Ord> {
    queue: PriorityQueue<Id, FrontierPriority<W>>,
    sequence: u64,
}

impl<Id: Hash + Eq, W: Ord + Copy> Default for Frontier<Id, W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Id: Hash + Eq, W: Ord + Copy> Frontier<Id, W> {
    pub fn new() -> Self {
        Frontier {
            queue: PriorityQueue::new(),
            sequence: 0,
        }
    }

    /// Push `id` with `weight`, replacing any existing entry for `id` only
    /// if `weight` sorts ahead of (or equal to, via the sequence tie-break)
    /// the entry already present.
    pub fn push(&mut self, id: Id, weight: W) {
        self.sequence += 1;
        let priority = FrontierPriority::new(weight, self.sequence);
        self.queue.push_increase(id, priority);
    }

    pub fn pop(&mut self) -> Option<(Id, W)> {
        self.queue
            .pop()
            .map(|(id, FrontierPriority(Reverse(w), _))| (id, w))
    }

    pub fn peek(&self) -> Option<(&Id, &W)> {
        self.queue.peek().map(|(id, p)| (id, p.weight()))
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_ascending_weight_order() {
        let mut f: Frontier<&str, i64> = Frontier::new();
        f.push("a", 5);
        f.push("b", 1);
        f.push("c", 3);
        assert_eq!(f.pop(), Some(("b", 1)));
        assert_eq!(f.pop(), Some(("c", 3)));
        assert_eq!(f.pop(), Some(("a", 5)));
        assert!(f.pop().is_none());
    }

    #[test]
    fn decrease_key_replaces_existing_entry() {
        let mut f: Frontier<&str, i64> = Frontier::new();
        f.push("a", 10);
        f.push("b", 2);
        f.push("a", 1);
        assert_eq!(f.len(), 2);
        assert_eq!(f.pop(), Some(("a", 1)));
        assert_eq!(f.pop(), Some(("b", 2)));
    }

    #[test]
    fn equal_weight_ties_favor_most_recent_push() {
        let mut f: Frontier<&str, i64> = Frontier::new();
        f.push("first", 4);
        f.push("second", 4);
        assert_eq!(f.pop(), Some(("second", 4)));
        assert_eq!(f.pop(), Some(("first", 4)));
    }
}

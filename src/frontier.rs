//! Frontier: priority-ordered set of candidate nodes awaiting evaluation.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::hash::Hash;

/// Heap entry. `seq` is the insertion sequence number used for the
/// deterministic tie-break; `stamp` identifies the live version of a node's
/// entry under lazy-deletion reprioritization.
#[derive(Debug)]
struct Entry<N> {
    priority: f64,
    seq: u64,
    stamp: u64,
    node: N,
}

impl<N> PartialEq for Entry<N> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<N> Eq for Entry<N> {}

impl<N> Ord for Entry<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Max-heap on priority; ties go to the earliest insertion.
        self.priority
            .total_cmp(&other.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<N> PartialOrd for Entry<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug)]
struct Meta {
    priority: f64,
    seq: u64,
    stamp: u64,
}

/// Nodes adjacent to visited nodes but not yet evaluated, ordered by
/// strategy-assigned priority.
///
/// Reprioritization uses lazy deletion: a raised entry is re-pushed with a
/// fresh stamp and stale heap entries are skipped on pop. The insertion
/// sequence number is preserved across raises so the tie-break stays
/// deterministic.
#[derive(Debug)]
pub(crate) struct Frontier<N> {
    heap: BinaryHeap<Entry<N>>,
    members: HashMap<N, Meta>,
    counter: u64,
}

impl<N: Clone + Eq + Hash> Frontier<N> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            members: HashMap::new(),
            counter: 0,
        }
    }

    /// Inserts `node` with the given priority. Returns `false` (and leaves
    /// the existing entry untouched) if the node is already present.
    pub fn insert(&mut self, node: N, priority: f64) -> bool {
        if self.members.contains_key(&node) {
            return false;
        }
        let seq = self.counter;
        self.counter += 1;
        self.members.insert(
            node.clone(),
            Meta {
                priority,
                seq,
                stamp: seq,
            },
        );
        self.heap.push(Entry {
            priority,
            seq,
            stamp: seq,
            node,
        });
        true
    }

    /// Removes and returns the highest-priority node, or `None` when the
    /// frontier is empty (local exhaustion, not necessarily termination).
    pub fn pop(&mut self) -> Option<N> {
        while let Some(entry) = self.heap.pop() {
            let live = self
                .members
                .get(&entry.node)
                .is_some_and(|meta| meta.stamp == entry.stamp);
            if live {
                self.members.remove(&entry.node);
                return Some(entry.node);
            }
            // Stale entry superseded by a raise; skip.
        }
        None
    }

    /// Raises `node`'s priority to `priority` if it is present and the new
    /// priority is strictly higher. Returns whether a raise happened.
    pub fn raise_priority(&mut self, node: &N, priority: f64) -> bool {
        let Some(meta) = self.members.get_mut(node) else {
            return false;
        };
        if priority <= meta.priority {
            return false;
        }
        let stamp = self.counter;
        self.counter += 1;
        meta.priority = priority;
        meta.stamp = stamp;
        self.heap.push(Entry {
            priority,
            seq: meta.seq,
            stamp,
            node: node.clone(),
        });
        true
    }

    pub fn contains(&self, node: &N) -> bool {
        self.members.contains_key(node)
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.members.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_order_by_priority() {
        let mut frontier = Frontier::new();
        frontier.insert("low", 1.0);
        frontier.insert("high", 10.0);
        frontier.insert("mid", 5.0);

        assert_eq!(frontier.pop(), Some("high"));
        assert_eq!(frontier.pop(), Some("mid"));
        assert_eq!(frontier.pop(), Some("low"));
        assert_eq!(frontier.pop(), None);
    }

    #[test]
    fn test_equal_priority_ties_break_by_insertion_order() {
        let mut frontier = Frontier::new();
        frontier.insert("first", 0.0);
        frontier.insert("second", 0.0);
        frontier.insert("third", 0.0);

        assert_eq!(frontier.pop(), Some("first"));
        assert_eq!(frontier.pop(), Some("second"));
        assert_eq!(frontier.pop(), Some("third"));
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let mut frontier = Frontier::new();
        assert!(frontier.insert("a", 1.0));
        assert!(!frontier.insert("a", 100.0));
        assert_eq!(frontier.len(), 1);

        // The original priority is kept.
        frontier.insert("b", 50.0);
        assert_eq!(frontier.pop(), Some("b"));
    }

    #[test]
    fn test_raise_priority_reorders() {
        let mut frontier = Frontier::new();
        frontier.insert("a", 1.0);
        frontier.insert("b", 2.0);

        assert!(frontier.raise_priority(&"a", 3.0));
        assert_eq!(frontier.pop(), Some("a"));
        assert_eq!(frontier.pop(), Some("b"));
        assert_eq!(frontier.pop(), None);
    }

    #[test]
    fn test_raise_priority_never_lowers() {
        let mut frontier = Frontier::new();
        frontier.insert("a", 5.0);
        assert!(!frontier.raise_priority(&"a", 2.0));
        assert!(!frontier.raise_priority(&"a", 5.0));
        assert!(!frontier.raise_priority(&"missing", 9.0));
    }

    #[test]
    fn test_raise_keeps_tie_break_seq() {
        let mut frontier = Frontier::new();
        frontier.insert("first", 0.0);
        frontier.insert("second", 0.0);

        // Raising both to the same priority must preserve insertion order.
        frontier.raise_priority(&"second", 1.0);
        frontier.raise_priority(&"first", 1.0);

        assert_eq!(frontier.pop(), Some("first"));
        assert_eq!(frontier.pop(), Some("second"));
    }

    #[test]
    fn test_stale_entries_skipped_after_pop() {
        let mut frontier = Frontier::new();
        frontier.insert("a", 1.0);
        frontier.raise_priority(&"a", 2.0);
        frontier.raise_priority(&"a", 3.0);

        assert_eq!(frontier.pop(), Some("a"));
        assert_eq!(frontier.pop(), None);
        assert!(frontier.is_empty());
    }
}

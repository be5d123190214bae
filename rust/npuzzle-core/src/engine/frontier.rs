use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rustc_hash::FxHashMap;

use crate::state::PuzzleState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Entry {
    priority: u32,
    // Monotonic increasing sequence to keep pop order deterministic
    seq: u64,
    state: PuzzleState,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is max-heap; invert for priority asc, then seq asc
        (other.priority, other.seq).cmp(&(self.priority, self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue keyed by state with decrease-key via lazy invalidation.
///
/// Improving a state pushes a fresh heap entry and leaves the old one in place.
/// `best` holds the authoritative priority of every live state; heap entries
/// that disagree with it are dropped when they surface.
///
/// Ties on priority pop in insertion order (FIFO).
#[derive(Default)]
pub struct PriorityFrontier {
    heap: BinaryHeap<Entry>,
    best: FxHashMap<PuzzleState, u32>,
    seq: u64,
}

impl PriorityFrontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `state` when absent, or lowers its priority when `priority`
    /// is strictly better. Returns whether the frontier changed.
    pub fn insert_or_improve(&mut self, state: PuzzleState, priority: u32) -> bool {
        if let Some(&current) = self.best.get(&state) {
            if current <= priority {
                return false;
            }
        }
        self.best.insert(state, priority);
        self.seq += 1;
        self.heap.push(Entry { priority, seq: self.seq, state });
        true
    }

    /// Removes the live state with the smallest priority.
    pub fn extract_min(&mut self) -> Option<(PuzzleState, u32)> {
        while let Some(entry) = self.heap.pop() {
            match self.best.get(&entry.state) {
                Some(&p) if p == entry.priority => {
                    self.best.remove(&entry.state);
                    return Some((entry.state, entry.priority));
                }
                // Superseded by a better push, or already extracted
                _ => continue,
            }
        }
        None
    }

    pub fn contains(&self, state: &PuzzleState) -> bool {
        self.best.contains_key(state)
    }

    pub fn priority_of(&self, state: &PuzzleState) -> Option<u32> {
        self.best.get(state).copied()
    }

    /// Number of live states.
    pub fn len(&self) -> usize {
        self.best.len()
    }

    pub fn is_empty(&self) -> bool {
        self.best.is_empty()
    }

    /// Heap entries that no longer describe a live state.
    pub fn stale_len(&self) -> usize {
        self.heap.len() - self.best.len()
    }
}

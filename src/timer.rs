//! Virtual-clock timer queue.
//!
//! Every delayed action in the simulation (appearance cycle, stationary
//! toggles, expiry) is an entry here rather than a browser timeout. The owner
//! drains due entries with [`TimerQueue::pop_due`] as its clock advances, so a
//! test can jump minutes ahead in one call and get the same firing order the
//! browser would.

#[cfg(test)]
#[path = "timer_test.rs"]
mod timer_test;

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Entries due at the same instant fire in the order they were scheduled.
#[derive(Debug)]
struct Entry<E> {
    due_ms: f64,
    seq: u64,
    event: E,
}

impl<E> PartialEq for Entry<E> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<E> Eq for Entry<E> {}

impl<E> PartialOrd for Entry<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Entry<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.due_ms.total_cmp(&other.due_ms).then(self.seq.cmp(&other.seq))
    }
}

/// Min-heap of events keyed by due time.
#[derive(Debug)]
pub struct TimerQueue<E> {
    heap: BinaryHeap<Reverse<Entry<E>>>,
    next_seq: u64,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self { heap: BinaryHeap::new(), next_seq: 0 }
    }
}

impl<E> TimerQueue<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `event` to fire once the clock reaches `due_ms`.
    pub fn schedule(&mut self, due_ms: f64, event: E) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Entry { due_ms, seq, event }));
    }

    /// Remove and return the earliest event due at or before `now_ms`.
    pub fn pop_due(&mut self, now_ms: f64) -> Option<(f64, E)> {
        if self.next_due()? > now_ms {
            return None;
        }
        self.heap.pop().map(|Reverse(entry)| (entry.due_ms, entry.event))
    }

    /// Due time of the earliest pending event.
    #[must_use]
    pub fn next_due(&self) -> Option<f64> {
        self.heap.peek().map(|Reverse(entry)| entry.due_ms)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Pending events in no particular order.
    pub fn pending(&self) -> impl Iterator<Item = (f64, &E)> {
        self.heap.iter().map(|Reverse(entry)| (entry.due_ms, &entry.event))
    }
}

#![forbid(unsafe_code)]

//! Deadline-ordered timer queue driven by the deterministic clock.
//!
//! Every `setTimeout`-style delay on the page is an entry here. Entries with
//! equal deadlines fire in the order they were scheduled, which matches the
//! browser's ordering for timers registered with the same delay.

use core::cmp::{Ordering, Reverse};
use core::time::Duration;
use std::collections::BinaryHeap;

#[derive(Debug)]
struct Entry<T> {
    deadline: Duration,
    seq: u64,
    task: T,
}

impl<T> Entry<T> {
    const fn key(&self) -> (Duration, u64) {
        (self.deadline, self.seq)
    }
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Min-heap of pending tasks keyed by `(deadline, insertion sequence)`.
#[derive(Debug)]
pub struct TimerQueue<T> {
    heap: BinaryHeap<Reverse<Entry<T>>>,
    next_seq: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    /// Schedule `task` to fire at `now + delay`.
    pub fn schedule(&mut self, now: Duration, delay: Duration, task: T) {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.heap.push(Reverse(Entry {
            deadline: now.saturating_add(delay),
            seq,
            task,
        }));
    }

    /// Earliest pending deadline, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.heap.peek().map(|Reverse(entry)| entry.deadline)
    }

    /// Pop the earliest task whose deadline is `<= now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<T> {
        match self.heap.peek() {
            Some(Reverse(entry)) if entry.deadline <= now => {
                self.heap.pop().map(|Reverse(entry)| entry.task)
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

//! # Timer Queue
//!
//! Deferred tasks for a single-threaded owner. Time is plain milliseconds
//! supplied by the caller, so the same queue runs against a wall clock in
//! the runtime and a virtual clock in tests.
//!
//! Ordering: earliest deadline first; tasks with equal deadlines fire in
//! the order they were scheduled.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

struct Scheduled<T> {
    deadline: u64,
    seq: u64,
    task: T,
}

impl<T> PartialEq for Scheduled<T> {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.seq == other.seq
    }
}

impl<T> Eq for Scheduled<T> {}

impl<T> PartialOrd for Scheduled<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Scheduled<T> {
    // Reversed: BinaryHeap is a max-heap, we want the smallest (deadline, seq) on top.
    fn cmp(&self, other: &Self) -> Ordering {
        (other.deadline, other.seq).cmp(&(self.deadline, self.seq))
    }
}

pub struct TimerQueue<T> {
    heap: BinaryHeap<Scheduled<T>>,
    next_seq: u64,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    /// Schedule `task` to fire once the clock reaches `deadline`.
    pub fn schedule(&mut self, deadline: u64, task: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Scheduled { deadline, seq, task });
    }

    /// Pop the next task due at or before `now`, with its deadline.
    pub fn pop_due(&mut self, now: u64) -> Option<(u64, T)> {
        if self.heap.peek()?.deadline > now {
            return None;
        }
        self.heap.pop().map(|s| (s.deadline, s.task))
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.heap.peek().map(|s| s.deadline)
    }

    /// Drop every task for which `keep` returns false. Relative order of the
    /// survivors is unchanged.
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        self.heap.retain(|s| keep(&s.task));
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use super::Job;

struct QueuedJob<S> {
    priority: u8,
    sequence: Reverse<u64>,
    job: Job<S>,
}

impl<S> PartialEq for QueuedJob<S> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<S> Eq for QueuedJob<S> {}

impl<S> PartialOrd for QueuedJob<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S> Ord for QueuedJob<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.priority, self.sequence).cmp(&(other.priority, other.sequence))
    }
}

/// Rank-local priority queue. Jobs pop by kind priority, FIFO among equal kinds.
pub struct JobQueue<S> {
    heap: BinaryHeap<QueuedJob<S>>,
    sequence: u64,
}

impl<S> JobQueue<S> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            sequence: 0,
        }
    }

    pub fn push(&mut self, job: Job<S>) {
        let sequence = Reverse(self.sequence);
        self.sequence += 1;

        self.heap.push(QueuedJob {
            priority: job.priority(),
            sequence,
            job,
        });
    }

    pub fn pop(&mut self) -> Option<Job<S>> {
        self.heap.pop().map(|queued| queued.job)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<S> Default for JobQueue<S> {
    fn default() -> Self {
        Self::new()
    }
}

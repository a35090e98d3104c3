//! Count-bounded window of recent request records.

use std::collections::VecDeque;

use crate::parser::RequestRecord;

/// Slots reserved up front; larger windows grow on demand.
const PREALLOCATE_LIMIT: usize = 1024;

/// The most recent `capacity` records in arrival order.
#[derive(Debug, Clone)]
pub struct SlidingWindow {
    records: VecDeque<RequestRecord>,
    capacity: usize,
}

impl SlidingWindow {
    /// # Panics
    /// If `capacity` is zero. Configuration validation rejects that earlier.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "sliding window capacity must be at least 1");
        Self {
            records: VecDeque::with_capacity(capacity.min(PREALLOCATE_LIMIT)),
            capacity,
        }
    }

    /// Append a record, returning the evicted oldest one when full.
    pub fn push(&mut self, record: RequestRecord) -> Option<RequestRecord> {
        let evicted = if self.records.len() == self.capacity {
            self.records.pop_front()
        } else {
            None
        };
        self.records.push_back(record);
        debug_assert!(self.records.len() <= self.capacity);
        evicted
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn count_matching<P>(&self, mut predicate: P) -> usize
    where
        P: FnMut(&RequestRecord) -> bool,
    {
        self.records.iter().filter(|record| predicate(*record)).count()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &RequestRecord> {
        self.records.iter()
    }
}

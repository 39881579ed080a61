//! Fixed-capacity ring buffer of past generations.

use serde::{Deserialize, Serialize};

/// Generations kept for visualization by default
pub const DEFAULT_HISTORY_CAPACITY: usize = 200;

/// Bounded history; once full, each push overwrites the oldest entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct History<T> {
    buf: Vec<T>,
    capacity: usize,
    /// Index of the oldest entry once the buffer has wrapped
    head: usize,
}

impl<T> History<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "history capacity must be positive");
        Self {
            buf: Vec::with_capacity(capacity),
            capacity,
            head: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn push(&mut self, item: T) {
        if self.buf.len() < self.capacity {
            self.buf.push(item);
        } else {
            self.buf[self.head] = item;
            self.head = (self.head + 1) % self.capacity;
        }
    }

    pub fn clear(&mut self) {
        self.buf.clear();
        self.head = 0;
    }

    /// Entries from oldest to newest
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + '_ {
        let (newer, older) = self.buf.split_at(self.head);
        older.iter().chain(newer.iter())
    }

    pub fn latest(&self) -> Option<&T> {
        self.iter().next_back()
    }
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

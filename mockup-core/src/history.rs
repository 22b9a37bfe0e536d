//! # Undo History
//!
//! Bounded, linear log of committed snapshots.
//!
//! ```text
//! push:  [s0 s1 s2 | s3 s4]   index=2, redo branch s3..s4
//!        [s0 s1 s2 s5]        redo branch discarded, index=3
//! ```
//!
//! The log is never empty and the index always points at a stored entry.
//! Once the log exceeds its capacity the oldest entries are dropped.

use std::collections::VecDeque;

/// Default number of retained snapshots.
pub const DEFAULT_CAPACITY: usize = 50;

/// Linear undo/redo log.
#[derive(Debug, Clone)]
pub struct History<T> {
    entries: VecDeque<T>,
    index: usize,
    capacity: usize,
}

impl<T: Clone> History<T> {
    /// Create a log seeded with `initial` at index 0.
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self::with_capacity(initial, DEFAULT_CAPACITY)
    }

    /// Create a log with a custom capacity (at least 1).
    #[must_use]
    pub fn with_capacity(initial: T, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut entries = VecDeque::with_capacity(capacity);
        entries.push_back(initial);
        Self {
            entries,
            index: 0,
            capacity,
        }
    }

    /// Append a snapshot, discarding any redo entries.
    pub fn push(&mut self, state: T) {
        self.entries.truncate(self.index + 1);
        self.entries.push_back(state);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        self.index = self.entries.len() - 1;
    }

    /// Step back. Returns the snapshot to apply, or `None` at the oldest entry.
    pub fn undo(&mut self) -> Option<&T> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        self.entries.get(self.index)
    }

    /// Step forward. Returns the snapshot to apply, or `None` at the newest entry.
    pub fn redo(&mut self) -> Option<&T> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        self.entries.get(self.index)
    }

    /// Reseed the log with a single entry.
    pub fn clear(&mut self, initial: T) {
        self.entries.clear();
        self.entries.push_back(initial);
        self.index = 0;
    }

    /// Whether [`History::undo`] would do anything.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    /// Whether [`History::redo`] would do anything.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// The snapshot at the current index.
    #[must_use]
    pub fn current(&self) -> &T {
        &self.entries[self.index]
    }

    /// Current index.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Number of stored snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: the log holds at least one entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of stored snapshots.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

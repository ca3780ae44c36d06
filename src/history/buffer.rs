// HistoryBuffer - Bounded stack of snapshots

use crate::codec::Snapshot;
use std::collections::VecDeque;

/// Default maximum number of snapshots to keep
pub const DEFAULT_CAPACITY: usize = 50;

/// Ordered snapshots, oldest at the front, most recent at the back
///
/// The length never exceeds the capacity: pushing onto a full buffer
/// evicts the oldest snapshot.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    entries: VecDeque<Snapshot>,
    capacity: usize,
}

impl HistoryBuffer {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a buffer holding at most `capacity` snapshots (at least one)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a snapshot, returning the evicted oldest one if the buffer overflowed
    pub fn push(&mut self, snapshot: Snapshot) -> Option<Snapshot> {
        self.entries.push_back(snapshot);
        if self.entries.len() > self.capacity {
            self.entries.pop_front()
        } else {
            None
        }
    }

    /// Remove and return the most recent snapshot
    pub fn pop(&mut self) -> Option<Snapshot> {
        self.entries.pop_back()
    }

    /// Most recent snapshot
    pub fn head(&self) -> Option<&Snapshot> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshots from oldest to most recent
    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_head() {
        let mut buffer = HistoryBuffer::new();
        assert!(buffer.is_empty());
        assert!(buffer.head().is_none());

        assert!(buffer.push(Snapshot::from("a")).is_none());
        assert!(buffer.push(Snapshot::from("b")).is_none());

        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.head(), Some(&Snapshot::from("b")));
        assert_eq!(buffer.capacity(), DEFAULT_CAPACITY);
    }

    #[test]
    fn test_eviction_is_fifo() {
        let mut buffer = HistoryBuffer::with_capacity(3);
        for s in ["a", "b", "c"] {
            buffer.push(Snapshot::from(s));
        }

        let evicted = buffer.push(Snapshot::from("d"));
        assert_eq!(evicted, Some(Snapshot::from("a")));
        assert_eq!(buffer.len(), 3);

        let remaining: Vec<&str> = buffer.iter().map(Snapshot::as_str).collect();
        assert_eq!(remaining, vec!["b", "c", "d"]);
    }

    #[test]
    fn test_pop_returns_most_recent() {
        let mut buffer = HistoryBuffer::new();
        buffer.push(Snapshot::from("a"));
        buffer.push(Snapshot::from("b"));

        assert_eq!(buffer.pop(), Some(Snapshot::from("b")));
        assert_eq!(buffer.head(), Some(&Snapshot::from("a")));
        assert_eq!(buffer.pop(), Some(Snapshot::from("a")));
        assert_eq!(buffer.pop(), None);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut buffer = HistoryBuffer::with_capacity(0);
        assert_eq!(buffer.capacity(), 1);
        buffer.push(Snapshot::from("a"));
        buffer.push(Snapshot::from("b"));
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.head(), Some(&Snapshot::from("b")));
    }

    #[test]
    fn test_clear() {
        let mut buffer = HistoryBuffer::new();
        buffer.push(Snapshot::from("a"));
        buffer.clear();
        assert!(buffer.is_empty());
    }
}

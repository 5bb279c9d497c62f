//! Virtual-clock queue of fire-once delayed events.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

struct Entry<E> {
    due_ms: u64,
    seq: u64,
    event: E,
}

impl<E> PartialEq for Entry<E> {
    fn eq(&self, other: &Self) -> bool {
        self.due_ms == other.due_ms && self.seq == other.seq
    }
}

impl<E> Eq for Entry<E> {}

impl<E> PartialOrd for Entry<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Entry<E> {
    // Reversed so the max-heap pops the earliest (then oldest) entry first.
    fn cmp(&self, other: &Self) -> Ordering {
        (other.due_ms, other.seq).cmp(&(self.due_ms, self.seq))
    }
}

/// Delayed events on a shared virtual clock.
///
/// Events with equal due times fire in the order they were scheduled.
pub struct TimerQueue<E> {
    now_ms: u64,
    next_seq: u64,
    heap: BinaryHeap<Entry<E>>,
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_seq: 0,
            heap: BinaryHeap::new(),
        }
    }

    /// Current virtual time.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Fire `event` once, `delay_ms` from now.
    pub fn schedule(&mut self, delay_ms: u32, event: E) {
        let entry = Entry {
            due_ms: self.now_ms + u64::from(delay_ms),
            seq: self.next_seq,
            event,
        };
        self.next_seq += 1;
        self.heap.push(entry);
    }

    /// Advance the clock and return every event now due, earliest first.
    pub fn advance(&mut self, dt_ms: u32) -> Vec<E> {
        self.now_ms += u64::from(dt_ms);
        let mut due = Vec::new();
        while self.heap.peek().is_some_and(|e| e.due_ms <= self.now_ms) {
            if let Some(entry) = self.heap.pop() {
                due.push(entry.event);
            }
        }
        due
    }

    /// Time until the next event, if any is pending.
    pub fn next_due_in(&self) -> Option<u64> {
        self.heap
            .peek()
            .map(|e| e.due_ms.saturating_sub(self.now_ms))
    }

    pub fn pending(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_in_due_order() {
        let mut q = TimerQueue::new();
        q.schedule(300, "c");
        q.schedule(100, "a");
        q.schedule(200, "b");
        assert!(q.advance(99).is_empty());
        assert_eq!(q.advance(1), vec!["a"]);
        assert_eq!(q.advance(500), vec!["b", "c"]);
        assert!(q.is_empty());
    }

    #[test]
    fn ties_fire_fifo() {
        let mut q = TimerQueue::new();
        for i in 0..5 {
            q.schedule(10, i);
        }
        assert_eq!(q.advance(10), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn schedule_is_relative_to_now() {
        let mut q = TimerQueue::new();
        q.advance(1000);
        q.schedule(500, ());
        assert_eq!(q.next_due_in(), Some(500));
        assert!(q.advance(499).is_empty());
        assert_eq!(q.advance(1).len(), 1);
        assert_eq!(q.now_ms(), 1500);
    }

    #[test]
    fn zero_delay_fires_on_next_advance() {
        let mut q = TimerQueue::new();
        q.schedule(0, 'x');
        assert_eq!(q.pending(), 1);
        assert_eq!(q.advance(0), vec!['x']);
    }
}

//! Cancellable timers driven by an externally supplied clock.
//!
//! The queue never reads wall-clock time. Front-ends pass the elapsed time
//! since boot to [`TimerQueue::advance_to`], and tests do the same with a
//! virtual clock.

use std::time::Duration;

#[derive(Debug, Clone)]
struct Entry<K> {
    key: K,
    deadline: Duration,
    seq: u64,
}

/// Keyed one-shot timers. Scheduling an already pending key resets it.
#[derive(Debug, Clone)]
pub struct TimerQueue<K> {
    now: Duration,
    seq: u64,
    entries: Vec<Entry<K>>,
}

impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            seq: 0,
            entries: Vec::new(),
        }
    }
}

impl<K: PartialEq + Clone> TimerQueue<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Arm `key` to fire `delay` after the current virtual time.
    ///
    /// A pending timer with the same key is dropped first, so only the most
    /// recent schedule survives.
    pub fn schedule(&mut self, key: K, delay: Duration) {
        self.entries.retain(|entry| entry.key != key);
        self.seq += 1;
        self.entries.push(Entry {
            key,
            deadline: self.now + delay,
            seq: self.seq,
        });
    }

    /// Drop a pending timer. Returns whether one was pending.
    pub fn cancel(&mut self, key: &K) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| &entry.key != key);
        before != self.entries.len()
    }

    pub fn is_pending(&self, key: &K) -> bool {
        self.entries.iter().any(|entry| &entry.key == key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Earliest pending deadline, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries.iter().map(|entry| entry.deadline).min()
    }

    /// Move the clock forward and return every key whose deadline passed,
    /// ordered by deadline and then by scheduling order.
    ///
    /// The clock never moves backwards.
    pub fn advance_to(&mut self, now: Duration) -> Vec<K> {
        self.now = self.now.max(now);

        let mut due: Vec<Entry<K>> = Vec::new();
        let mut index = 0;
        while index < self.entries.len() {
            if self.entries[index].deadline <= self.now {
                due.push(self.entries.swap_remove(index));
            } else {
                index += 1;
            }
        }

        due.sort_by_key(|entry| (entry.deadline, entry.seq));
        due.into_iter().map(|entry| entry.key).collect()
    }
}

//! Cancellable one-shot timers on a caller-driven clock.
//!
//! The scheduler never fires on its own. The owner asks for due timers
//! with [`ExpiryScheduler::pop_due`] whenever it is ticked. A cancelled
//! handle is gone for good and can never be returned as due.

use std::collections::{BTreeMap, HashMap};

/// Identifies one scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone)]
pub struct ExpiryScheduler<K> {
    next_seq: u64,
    /// Ordered by deadline, then by scheduling order.
    pending: BTreeMap<(u64, u64), K>,
    deadlines: HashMap<TimerHandle, u64>,
}

impl<K> Default for ExpiryScheduler<K> {
    fn default() -> Self {
        Self {
            next_seq: 0,
            pending: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }
}

impl<K> ExpiryScheduler<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `key` to become due at `deadline_ms`.
    pub fn schedule(&mut self, deadline_ms: u64, key: K) -> TimerHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        let handle = TimerHandle(seq);
        self.pending.insert((deadline_ms, seq), key);
        self.deadlines.insert(handle, deadline_ms);
        handle
    }

    /// Cancel a pending timer. Returns false if it already fired or was
    /// cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.deadlines.remove(&handle) {
            Some(deadline) => self.pending.remove(&(deadline, handle.0)).is_some(),
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
        self.deadlines.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.pending.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Remove and return the earliest timer whose deadline is `<= now_ms`.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<(TimerHandle, K)> {
        let (&(deadline, seq), _) = self.pending.first_key_value()?;
        if deadline > now_ms {
            return None;
        }
        let key = self.pending.remove(&(deadline, seq))?;
        let handle = TimerHandle(seq);
        self.deadlines.remove(&handle);
        Some((handle, key))
    }
}

//! Cancellable scheduled callbacks
//!
//! Every pending deadline is keyed by the resource it protects (a transition
//! token, a tooltip id, ...). Scheduling an existing key replaces the old
//! deadline, so a stale callback can never fire after it has been superseded.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use super::gate::TransitionToken;

/// Resources guarded by a timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKey {
    /// Reopen the transition gate
    TransitionRelease(TransitionToken),
    /// Auto-dismiss the tooltip with this id
    TooltipDismiss(u64),
    /// Revert the "Copied!" confirmation
    CopyConfirmation,
    /// Scroll a freshly expanded chip into view once it has been laid out
    ScrollIntoView,
    /// Debounced terminal resize
    Resize,
}

/// Deadline table keyed by `K`
#[derive(Debug)]
pub struct Scheduler<K> {
    pending: HashMap<K, Instant>,
}

impl<K> Default for Scheduler<K> {
    fn default() -> Self {
        Self {
            pending: HashMap::new(),
        }
    }
}

impl<K: Copy + Eq + Hash> Scheduler<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `key` after `delay`, replacing any pending deadline for it
    pub fn schedule(&mut self, key: K, delay: Duration, now: Instant) {
        self.pending.insert(key, now + delay);
    }

    /// Drop the pending deadline for `key`. Returns whether one existed.
    pub fn cancel(&mut self, key: &K) -> bool {
        self.pending.remove(key).is_some()
    }

    pub fn is_pending(&self, key: &K) -> bool {
        self.pending.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().min().copied()
    }

    /// How long the event loop may sleep before the next deadline
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Remove and return every key whose deadline has passed, earliest first
    pub fn drain_due(&mut self, now: Instant) -> Vec<K> {
        let mut due: Vec<(Instant, K)> = self
            .pending
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(key, deadline)| (*deadline, *key))
            .collect();
        due.sort_by_key(|(deadline, _)| *deadline);

        for (_, key) in &due {
            self.pending.remove(key);
        }
        due.into_iter().map(|(_, key)| key).collect()
    }
}

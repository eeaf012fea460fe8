//! Per-connection subscription filter.
//!
//! Tracks which event ids a WebSocket client follows and decides which
//! live events are forwarded to it.

use std::collections::BTreeSet;

use super::messages::EventTarget;

/// Event ids followed by a single WebSocket connection.
#[derive(Debug, Default)]
pub struct SubscriptionManager {
    /// Followed ids. Ignored while `subscribe_all` is set.
    event_ids: BTreeSet<u64>,
    /// Wildcard `"*"` subscription.
    subscribe_all: bool,
}

impl SubscriptionManager {
    /// Creates a filter that matches nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Follows the given targets.
    pub fn subscribe(&mut self, targets: &[EventTarget]) {
        for target in targets {
            match target {
                EventTarget::All => self.subscribe_all = true,
                EventTarget::One(id) => {
                    self.event_ids.insert(*id);
                }
            }
        }
    }

    /// Stops following the given targets. `*` clears the wildcard.
    pub fn unsubscribe(&mut self, targets: &[EventTarget]) {
        for target in targets {
            match target {
                EventTarget::All => self.subscribe_all = false,
                EventTarget::One(id) => {
                    self.event_ids.remove(id);
                }
            }
        }
    }

    /// Returns `true` if live events of `event_id` should be forwarded.
    #[must_use]
    pub fn matches(&self, event_id: u64) -> bool {
        self.subscribe_all || self.event_ids.contains(&event_id)
    }

    /// Explicitly followed ids in ascending order.
    #[must_use]
    pub fn ids(&self) -> Vec<u64> {
        self.event_ids.iter().copied().collect()
    }

    /// Returns `true` if the wildcard is active.
    #[must_use]
    pub fn is_subscribed_all(&self) -> bool {
        self.subscribe_all
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_matches_nothing() {
        assert!(!SubscriptionManager::new().matches(1));
    }

    #[test]
    fn specific_ids_and_unsubscribe() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&[EventTarget::One(1), EventTarget::One(4)]);
        assert!(mgr.matches(4));
        assert!(!mgr.matches(2));
        mgr.unsubscribe(&[EventTarget::One(4)]);
        assert_eq!(mgr.ids(), vec![1]);
    }

    #[test]
    fn wildcard_can_be_dropped() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&[EventTarget::All]);
        assert!(mgr.matches(99));
        mgr.unsubscribe(&[EventTarget::All]);
        assert!(!mgr.matches(99));
    }
}

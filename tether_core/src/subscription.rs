// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered subscribe/unsubscribe list for viewport-change delivery.
//!
//! The engine keeps one [`Subscriptions`] of resize targets. Delivery order is
//! subscription order; unsubscribing never reorders the remaining entries.

use alloc::vec::Vec;
use core::fmt;

/// Handle returned by [`Subscriptions::subscribe`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u32);

impl fmt::Debug for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SubscriptionId({})", self.0)
    }
}

/// An ordered list of subscribers.
#[derive(Clone, Debug)]
pub struct Subscriptions<T> {
    entries: Vec<(SubscriptionId, T)>,
    next: u32,
}

impl<T> Default for Subscriptions<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Subscriptions<T> {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next: 0,
        }
    }

    /// Appends a subscriber and returns its handle.
    pub fn subscribe(&mut self, target: T) -> SubscriptionId {
        let id = SubscriptionId(self.next);
        self.next = self.next.wrapping_add(1);
        self.entries.push((id, target));
        id
    }

    /// Removes a subscriber. Returns `false` if the handle was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(sid, _)| *sid != id);
        self.entries.len() != before
    }

    /// Returns whether `id` is currently subscribed.
    #[must_use]
    pub fn contains(&self, id: SubscriptionId) -> bool {
        self.entries.iter().any(|(sid, _)| *sid == id)
    }

    /// Iterates subscribers in delivery order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, t)| t)
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is subscribed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every subscription.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T: Copy> Subscriptions<T> {
    /// Copies the current subscribers out, in delivery order.
    ///
    /// Dispatch iterates this snapshot so the list itself can be borrowed
    /// mutably while delivering.
    #[must_use]
    pub fn snapshot(&self) -> Vec<T> {
        self.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn delivery_follows_subscription_order() {
        let mut subs = Subscriptions::new();
        subs.subscribe('a');
        let b = subs.subscribe('b');
        subs.subscribe('c');
        assert_eq!(subs.snapshot(), vec!['a', 'b', 'c']);

        assert!(subs.unsubscribe(b));
        assert!(!subs.contains(b));
        assert_eq!(subs.snapshot(), vec!['a', 'c']);
    }

    #[test]
    fn unsubscribe_twice_is_false() {
        let mut subs = Subscriptions::new();
        let a = subs.subscribe(1_u8);
        assert!(subs.unsubscribe(a));
        assert!(!subs.unsubscribe(a));
        assert!(subs.is_empty());
    }
}

/// Unread badge publisher
///
/// Sibling UI (a badge icon next to the bell) needs the unread count
/// without being wired through the panel. A watch channel gives that
/// one-producer/many-observer shape with defined ownership: the panel
/// publishes, anyone holding a receiver observes every change,
/// including publishes from the panel's own task.
use tokio::sync::watch;

pub struct UnreadBadge {
    tx: watch::Sender<u64>,
}

impl UnreadBadge {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { tx }
    }

    /// Publish a new count to every subscriber
    pub fn publish(&self, count: u64) {
        self.tx.send_replace(count);
    }

    /// Subscribe to count changes
    pub fn watch(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }

    /// Last published count
    pub fn current(&self) -> u64 {
        *self.tx.borrow()
    }
}

impl Default for UnreadBadge {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_starts_at_zero() {
        let badge = UnreadBadge::new();
        assert_eq!(badge.current(), 0);
    }

    #[tokio::test]
    async fn test_subscriber_observes_publish() {
        let badge = UnreadBadge::new();
        let mut rx = badge.watch();

        badge.publish(7);
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), 7);
        assert_eq!(badge.current(), 7);
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_retained() {
        let badge = UnreadBadge::new();
        badge.publish(3);

        // A late subscriber still sees the latest value
        let rx = badge.watch();
        assert_eq!(*rx.borrow(), 3);
    }

    #[tokio::test]
    async fn test_multiple_subscribers() {
        let badge = UnreadBadge::new();
        let mut a = badge.watch();
        let mut b = badge.watch();

        badge.publish(1);
        a.changed().await.unwrap();
        b.changed().await.unwrap();
        assert_eq!(*a.borrow(), 1);
        assert_eq!(*b.borrow(), 1);
    }
}

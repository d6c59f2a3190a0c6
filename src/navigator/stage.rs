//! Observable container for the current node.
//!
//! Backed by a tokio `watch` channel: readers always see a fully built,
//! immutable node, and subscribers receive the latest value first, then
//! every later publish in order. A subscriber that falls behind skips
//! straight to the newest node.

use crate::core::HistoryNode;
use tokio::sync::watch;

/// Holds the current node and broadcasts replacements to subscribers.
pub struct Stage<P, C> {
    sender: watch::Sender<HistoryNode<P, C>>,
}

impl<P, C> Stage<P, C> {
    pub fn new(initial: HistoryNode<P, C>) -> Self {
        let (sender, _receiver) = watch::channel(initial);
        Self { sender }
    }

    /// Latest published snapshot.
    pub fn current(&self) -> HistoryNode<P, C> {
        self.sender.borrow().clone()
    }

    /// Replace the current node. Last write wins.
    pub fn publish(&self, node: HistoryNode<P, C>) {
        self.sender.send_replace(node);
    }

    pub fn subscribe(&self) -> StageReceiver<P, C> {
        StageReceiver {
            receiver: self.sender.subscribe(),
            initial_pending: true,
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Subscription to a [`Stage`].
pub struct StageReceiver<P, C> {
    receiver: watch::Receiver<HistoryNode<P, C>>,
    initial_pending: bool,
}

impl<P, C> StageReceiver<P, C> {
    /// Latest published snapshot, without waiting.
    pub fn current(&self) -> HistoryNode<P, C> {
        self.receiver.borrow().clone()
    }

    /// Next node for this subscriber.
    ///
    /// The first call returns the value current at subscription time (or a
    /// newer one) immediately. Later calls wait for the next publish.
    /// Returns `None` once the stage is dropped and nothing new is pending.
    pub async fn next(&mut self) -> Option<HistoryNode<P, C>> {
        if self.initial_pending {
            self.initial_pending = false;
            return Some(self.receiver.borrow_and_update().clone());
        }
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }

    /// Whether a publish happened that `next` has not delivered yet.
    pub fn has_pending(&self) -> bool {
        self.initial_pending || self.receiver.has_changed().unwrap_or(false)
    }
}

impl<P, C> Clone for StageReceiver<P, C> {
    fn clone(&self) -> Self {
        Self {
            receiver: self.receiver.clone(),
            initial_pending: self.initial_pending,
        }
    }
}

//! # Route Change Notifications
//!
//! Every settled route change is broadcast as the full route list. There is no
//! history: a new subscriber sees only what happens after it subscribes.
//! Channels are unbounded so a slow consumer never blocks navigation.
//! Dropping the receiver unsubscribes; dead senders are pruned on the next
//! publish.

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

pub type RoutesReceiver<D> = UnboundedReceiver<Vec<D>>;

pub struct RoutesPublisher<D> {
    subscribers: Vec<UnboundedSender<Vec<D>>>,
}

impl<D> Default for RoutesPublisher<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> RoutesPublisher<D> {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self) -> RoutesReceiver<D> {
        let (tx, rx) = unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    /// Live subscribers as of the last publish.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.iter().filter(|tx| !tx.is_closed()).count()
    }
}

impl<D: Clone> RoutesPublisher<D> {
    pub fn publish(&mut self, routes: &[D]) {
        self.subscribers
            .retain(|tx| tx.send(routes.to_vec()).is_ok());
    }
}

//! Subscription handle for store change notifications.

use std::sync::mpsc::{Receiver, TryRecvError};

/// A subscription to a store's change stream.
///
/// Each subscription gets its own copy of every notification (broadcast
/// semantics), in dispatch order. Dropping the subscription unsubscribes; the
/// store prunes dead subscribers on its next dispatch.
///
/// Stores are driven synchronously by the thread that owns them, so the
/// handle only offers non-blocking reads.
///
/// ```ignore
/// let changes = store.subscribe();
/// store.dispatch(action)?;
/// for change in changes.drain() {
///     redraw(change);
/// }
/// ```
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Next pending message, if any.
    pub fn try_recv(&self) -> Option<M> {
        match self.receiver.try_recv() {
            Ok(message) => Some(message),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// All pending messages, oldest first.
    pub fn drain(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }
}

//! # Event bus for broadcasting lifecycle events.
//!
//! [`Bus`] is a thin wrapper around [`tokio::sync::broadcast`] that
//! provides non-blocking event publishing from multiple sources (the
//! registry and every form controller).
//!
//! ```text
//! Publishers (many):                  Subscriber (one):
//!   Registry    ──┐
//!   Controller1 ──┼──────► Bus ───────► event listener ────► SubscriberSet
//!   ControllerN ──┘  (broadcast chan)    (in Registry)
//! ```
//!
//! The registry runs a single listener that fans events out to user
//! subscribers via [`SubscriberSet`](crate::SubscriberSet).
//!
//! ## Rules
//! - **Non-blocking publish**: `publish()` never blocks.
//! - **Bounded capacity**: one ring buffer stores recent events for all
//!   receivers; the minimum capacity is 1 (clamped).
//! - **Lag handling**: slow receivers get `RecvError::Lagged(n)` and skip
//!   the `n` oldest items.
//! - **No persistence**: events are lost if nobody is subscribed at send
//!   time.

use tokio::sync::broadcast;

use super::event::Event;

/// Broadcast channel for lifecycle events.
///
/// Multiple publishers can publish concurrently; subscribers receive
/// clones of each event. Cheap to clone (internally an `Arc`-backed
/// sender).
#[derive(Clone, Debug)]
pub struct Bus {
    tx: broadcast::Sender<Event>,
}

impl Bus {
    /// Creates a new bus with the given channel capacity (clamped to a
    /// minimum of 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, _rx) = broadcast::channel::<Event>(capacity);
        Self { tx }
    }

    /// Publishes an event to all active subscribers.
    ///
    /// If there are no receivers the event is dropped; this function still
    /// returns immediately.
    pub fn publish(&self, ev: Event) {
        let _ = self.tx.send(ev);
    }

    /// Creates a new receiver that observes subsequent events.
    ///
    /// Each call creates an independent receiver; a receiver only sees
    /// events sent after it subscribed.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}

//! Pointer-event inbox.
//!
//! The input thread sends through a [`PointerSender`]; the frame loop drains
//! the inbox at the start of each tick, in arrival order.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use fluxfx_effects::PointerEvent;
use tracing::debug;

/// Events buffered between two ticks before new ones are dropped.
pub const INBOX_CAPACITY: usize = 256;

/// Receiving side, owned by the frame loop.
#[derive(Debug)]
pub struct PointerInbox {
    tx: Sender<PointerEvent>,
    rx: Receiver<PointerEvent>,
}

impl PointerInbox {
    /// Creates an empty inbox.
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = bounded(INBOX_CAPACITY);
        Self { tx, rx }
    }

    /// A sender for the input thread.
    #[must_use]
    pub fn sender(&self) -> PointerSender {
        PointerSender { tx: self.tx.clone() }
    }

    /// Takes every queued event, oldest first.
    pub fn drain(&self) -> impl Iterator<Item = PointerEvent> + '_ {
        self.rx.try_iter()
    }

    /// Events currently queued.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.rx.len()
    }
}

impl Default for PointerInbox {
    fn default() -> Self {
        Self::new()
    }
}

/// Clonable sending side.
#[derive(Debug, Clone)]
pub struct PointerSender {
    tx: Sender<PointerEvent>,
}

impl PointerSender {
    /// Queues an event. Returns `false` if it was dropped.
    pub fn send(&self, event: PointerEvent) -> bool {
        match self.tx.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                debug!("Pointer inbox full, event dropped");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_preserves_order() {
        let inbox = PointerInbox::new();
        let sender = inbox.sender();
        assert!(sender.send(PointerEvent::down(1.0, 1.0)));
        assert!(sender.send(PointerEvent::moved(2.0, 2.0)));
        assert!(sender.send(PointerEvent::up(3.0, 3.0)));

        let events: Vec<_> = inbox.drain().collect();
        assert_eq!(
            events,
            vec![
                PointerEvent::down(1.0, 1.0),
                PointerEvent::moved(2.0, 2.0),
                PointerEvent::up(3.0, 3.0),
            ]
        );
        assert_eq!(inbox.pending(), 0);
    }

    #[test]
    fn test_overflow_drops_newest() {
        let inbox = PointerInbox::new();
        let sender = inbox.sender();
        for i in 0..INBOX_CAPACITY {
            assert!(sender.send(PointerEvent::moved(i as f32, 0.0)));
        }
        assert!(!sender.send(PointerEvent::up(0.0, 0.0)));
        assert_eq!(inbox.drain().count(), INBOX_CAPACITY);
    }
}

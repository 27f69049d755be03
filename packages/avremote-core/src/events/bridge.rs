//! Bridge implementation that maps control events to a broadcast channel.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::broadcast;

use super::emitter::EventEmitter;
use super::ControlEvent;

/// Bridges control events to a `tokio::sync::broadcast` channel.
///
/// Hosts call [`subscribe`](Self::subscribe) once per consumer. An optional
/// external emitter (set after construction) receives every event first.
///
/// # Thread Safety
///
/// The bridge is `Send + Sync` and can be shared across async tasks.
#[derive(Clone)]
pub struct BroadcastEventBridge {
    tx: broadcast::Sender<ControlEvent>,
    external_emitter: Arc<RwLock<Option<Arc<dyn EventEmitter>>>>,
}

impl BroadcastEventBridge {
    /// Creates a new bridge with the given channel capacity.
    ///
    /// A capacity of 0 is raised to 1 (`broadcast::channel` panics on 0).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self {
            tx,
            external_emitter: Arc::new(RwLock::new(None)),
        }
    }

    /// Sets an external emitter that receives every event before the channel.
    pub fn set_external_emitter(&self, emitter: Arc<dyn EventEmitter>) {
        *self.external_emitter.write() = Some(emitter);
    }

    /// Returns a new receiver for the broadcast channel.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ControlEvent> {
        self.tx.subscribe()
    }
}

impl EventEmitter for BroadcastEventBridge {
    fn emit_control(&self, event: ControlEvent) {
        if let Some(ref emitter) = *self.external_emitter.read() {
            emitter.emit_control(event.clone());
        }
        if let Err(e) = self.tx.send(event) {
            log::trace!("[EventBridge] No broadcast receivers: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct Counter(AtomicUsize);

    impl EventEmitter for Counter {
        fn emit_control(&self, _event: ControlEvent) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn subscribers_receive_events_in_order() {
        let bridge = BroadcastEventBridge::new(8);
        let mut rx = bridge.subscribe();

        bridge.emit_control(ControlEvent::PlaybackRequested {
            active: true,
            timestamp: 1,
        });
        bridge.emit_control(ControlEvent::PlaybackRequested {
            active: false,
            timestamp: 2,
        });

        assert_eq!(
            rx.recv().await.unwrap(),
            ControlEvent::PlaybackRequested {
                active: true,
                timestamp: 1
            }
        );
        assert_eq!(
            rx.recv().await.unwrap(),
            ControlEvent::PlaybackRequested {
                active: false,
                timestamp: 2
            }
        );
    }

    #[test]
    fn emitting_without_subscribers_is_harmless() {
        let bridge = BroadcastEventBridge::new(0);
        let counter = Arc::new(Counter(AtomicUsize::new(0)));
        bridge.set_external_emitter(counter.clone());

        bridge.emit_control(ControlEvent::PlaybackRequested {
            active: true,
            timestamp: 0,
        });

        assert_eq!(counter.0.load(Ordering::SeqCst), 1);
    }
}

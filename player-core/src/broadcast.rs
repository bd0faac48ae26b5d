//! State broadcast hub.
//!
//! Distributes the latest [`PlayerState`] snapshot to zero or many
//! observers. Built on `tokio::sync::watch` rather than `broadcast`
//! because the contract is "latest value with replay": a late-attaching
//! observer must immediately receive the most recent snapshot instead of
//! starting blank, and a slow observer should skip to the freshest
//! snapshot rather than drain a backlog of stale positions.
//!
//! Per-observer delivery is monotonic in publish order - an observer may
//! miss intermediate snapshots but never sees them out of order.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;

use crate::model::PlayerState;

/// Publish/subscribe hub for player state snapshots.
///
/// Cheap to clone; all clones publish into the same channel and share one
/// revocable sender, so [`close`](StateBroadcaster::close) from any clone
/// ends every attached stream. The hub holds no references to its
/// observers - dropping a [`StateStream`] is a complete unsubscribe.
#[derive(Clone)]
pub struct StateBroadcaster {
    tx: Arc<Mutex<Option<watch::Sender<Option<PlayerState>>>>>,
}

impl StateBroadcaster {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self {
            tx: Arc::new(Mutex::new(Some(tx))),
        }
    }

    /// Store `state` as the latest snapshot and wake every observer.
    /// Publishing with no observers attached is fine; the value is kept
    /// for whoever attaches next. A no-op after [`close`](Self::close).
    pub fn publish(&self, state: PlayerState) {
        if let Some(tx) = self.tx.lock().as_ref() {
            tx.send_replace(Some(state));
        }
    }

    /// Attach a new observer. Its first `recv()` yields the latest
    /// published snapshot, if any exists yet. Attaching after `close`
    /// yields an already-ended stream.
    pub fn subscribe(&self) -> StateStream {
        match self.tx.lock().as_ref() {
            Some(tx) => StateStream {
                rx: Some(tx.subscribe()),
                replayed: false,
            },
            None => StateStream {
                rx: None,
                replayed: true,
            },
        }
    }

    /// Latest published snapshot without subscribing, or `None` once
    /// closed.
    pub fn latest(&self) -> Option<PlayerState> {
        self.tx.lock().as_ref().and_then(|tx| tx.borrow().clone())
    }

    /// Number of currently attached observers.
    pub fn observer_count(&self) -> usize {
        self.tx.lock().as_ref().map_or(0, |tx| tx.receiver_count())
    }

    /// Revoke the channel: every attached stream's pending or future
    /// `recv()` resolves to `None`. Idempotent; affects all clones.
    pub fn close(&self) {
        self.tx.lock().take();
    }
}

impl Default for StateBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StateBroadcaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateBroadcaster")
            .field("observer_count", &self.observer_count())
            .finish()
    }
}

/// One observer's view of the broadcast hub.
pub struct StateStream {
    rx: Option<watch::Receiver<Option<PlayerState>>>,
    replayed: bool,
}

impl StateStream {
    /// Receive the next snapshot.
    ///
    /// The first call replays the latest snapshot published before attach
    /// (if any); subsequent calls await fresh publishes. Returns `None`
    /// once the broadcaster is gone (service shutdown) or after
    /// [`close`](StateStream::close).
    pub async fn recv(&mut self) -> Option<PlayerState> {
        let rx = self.rx.as_mut()?;
        if !self.replayed {
            self.replayed = true;
            if let Some(state) = rx.borrow_and_update().clone() {
                return Some(state);
            }
        }
        loop {
            if rx.changed().await.is_err() {
                break;
            }
            // The sender only ever replaces Some with Some after the first
            // publish, but guard against the initial None regardless.
            if let Some(state) = rx.borrow_and_update().clone() {
                return Some(state);
            }
        }
        self.rx = None;
        None
    }

    /// Latest snapshot without consuming it from the stream.
    pub fn latest(&self) -> Option<PlayerState> {
        self.rx.as_ref().and_then(|rx| rx.borrow().clone())
    }

    /// Explicitly unsubscribe. Idempotent; dropping the stream has the
    /// same effect.
    pub fn close(&mut self) {
        self.rx = None;
    }

    pub fn is_closed(&self) -> bool {
        self.rx.is_none()
    }
}

impl std::fmt::Debug for StateStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateStream")
            .field("closed", &self.is_closed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Track, TrackId};
    use std::time::Duration;

    fn state(raw: i64, position_ms: u64) -> PlayerState {
        let track = Track {
            id: TrackId::remote(raw),
            title: format!("Track {raw}"),
            artist: "Artist".to_string(),
            album: None,
            duration_ms: 180_000,
            stream_ref: format!("ref-{raw}"),
            artwork_small: None,
            artwork_large: None,
            artist_pic: None,
        };
        PlayerState::new(track, true, position_ms, 180_000)
    }

    #[tokio::test]
    async fn late_attacher_first_receives_latest_snapshot() {
        let hub = StateBroadcaster::new();
        hub.publish(state(1, 0));
        hub.publish(state(2, 500));

        let mut stream = hub.subscribe();
        let first = stream.recv().await.unwrap();
        assert_eq!(first.track.id, TrackId::remote(2));
        assert_eq!(first.position_ms, 500);
    }

    #[tokio::test(start_paused = true)]
    async fn attacher_before_any_publish_waits() {
        let hub = StateBroadcaster::new();
        let mut stream = hub.subscribe();

        let pending = tokio::time::timeout(Duration::from_millis(50), stream.recv()).await;
        assert!(pending.is_err(), "recv should block with nothing published");

        hub.publish(state(1, 0));
        let received = stream.recv().await.unwrap();
        assert_eq!(received.track.id, TrackId::remote(1));
    }

    #[tokio::test]
    async fn every_observer_sees_publishes_in_order() {
        let hub = StateBroadcaster::new();
        let mut a = hub.subscribe();
        let mut b = hub.subscribe();

        hub.publish(state(1, 0));
        assert_eq!(a.recv().await.unwrap().track.id, TrackId::remote(1));
        assert_eq!(b.recv().await.unwrap().track.id, TrackId::remote(1));

        hub.publish(state(2, 0));
        assert_eq!(a.recv().await.unwrap().track.id, TrackId::remote(2));
        assert_eq!(b.recv().await.unwrap().track.id, TrackId::remote(2));
    }

    #[tokio::test]
    async fn slow_observer_skips_to_freshest_snapshot() {
        let hub = StateBroadcaster::new();
        let mut stream = hub.subscribe();

        hub.publish(state(1, 0));
        hub.publish(state(1, 1000));
        hub.publish(state(1, 2000));

        // Intermediate positions are coalesced; order is preserved.
        assert_eq!(stream.recv().await.unwrap().position_ms, 2000);
    }

    #[tokio::test]
    async fn recv_returns_none_after_broadcaster_drops() {
        let hub = StateBroadcaster::new();
        hub.publish(state(1, 0));
        let mut stream = hub.subscribe();
        assert!(stream.recv().await.is_some());

        drop(hub);
        assert!(stream.recv().await.is_none());
        assert!(stream.is_closed());
    }

    #[tokio::test]
    async fn close_is_idempotent() {
        let hub = StateBroadcaster::new();
        let mut stream = hub.subscribe();
        assert_eq!(hub.observer_count(), 1);

        stream.close();
        stream.close();
        assert!(stream.is_closed());
        assert_eq!(hub.observer_count(), 0);
        assert!(stream.recv().await.is_none());
    }

    #[tokio::test]
    async fn hub_close_ends_streams_even_while_clones_survive() {
        let hub = StateBroadcaster::new();
        let publisher = hub.clone();
        publisher.publish(state(1, 0));

        let mut stream = hub.subscribe();
        assert!(stream.recv().await.is_some());

        // The clone stays alive; closing must still revoke the channel.
        hub.close();
        assert!(stream.recv().await.is_none());
        assert!(publisher.latest().is_none());
        assert_eq!(publisher.observer_count(), 0);

        // Post-close publishes go nowhere, post-close attaches start ended.
        publisher.publish(state(2, 0));
        let mut late = publisher.subscribe();
        assert!(late.recv().await.is_none());
        assert!(late.is_closed());
    }

    #[tokio::test]
    async fn publish_without_observers_is_kept_as_latest() {
        let hub = StateBroadcaster::new();
        assert_eq!(hub.observer_count(), 0);
        hub.publish(state(9, 42));
        assert_eq!(hub.latest().unwrap().track.id, TrackId::remote(9));
    }
}

//! Media renderer abstraction.
//!
//! The renderer is the black-box decode/output engine the orchestrator
//! drives: it can load a single playable resource, start/stop/seek it, and
//! answer position queries. The orchestrator never reaches past this trait;
//! gapless transitions, buffering strategy and output routing are entirely
//! the host engine's business.

use crate::error::Result;
use tokio::sync::broadcast;

/// Events the renderer pushes back to the orchestrator.
///
/// Delivery is via a `tokio::sync::broadcast` channel so the engine side
/// never blocks on a slow consumer; the orchestrator treats a lagged
/// receiver as non-fatal and keeps going with the next event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RendererEvent {
    /// The loaded resource played to its natural end.
    Ended,
    /// The playing flag flipped, either from a command or from the engine
    /// itself (e.g. audio focus loss on mobile).
    PlayingChanged(bool),
    /// The engine failed on the current resource. The orchestrator treats
    /// this like [`RendererEvent::Ended`] so a single bad track does not
    /// stall the whole playlist.
    Errored(String),
}

/// Black-box decode/output engine driven by the playback orchestrator.
///
/// All control methods are fire-and-forget from the caller's point of view;
/// readiness is observed through [`RendererEvent`]s and state queries, never
/// through return values. Query methods return
/// [`BridgeError::NoTrackLoaded`](crate::BridgeError::NoTrackLoaded) when
/// nothing has been loaded yet - callers are expected to treat that as a
/// silent skip, not a failure.
#[async_trait::async_trait]
pub trait MediaRenderer: Send + Sync {
    /// Load a playable resource (URL or local path) and prepare it for
    /// playback. Replaces whatever was loaded before.
    async fn load(&self, stream_ref: &str) -> Result<()>;

    /// Begin or resume playback of the loaded resource.
    async fn play(&self) -> Result<()>;

    /// Pause playback, keeping the resource and position.
    async fn pause(&self) -> Result<()>;

    /// Seek to an absolute position within the loaded resource.
    async fn seek(&self, position_ms: u64) -> Result<()>;

    /// Whether the engine is currently producing audio.
    async fn is_playing(&self) -> Result<bool>;

    /// Current playback position in milliseconds.
    async fn position_ms(&self) -> Result<u64>;

    /// Duration of the loaded resource in milliseconds.
    async fn duration_ms(&self) -> Result<u64>;

    /// Release all engine resources. The renderer is unusable afterwards.
    async fn release(&self) -> Result<()>;

    /// Subscribe to renderer events. Each call returns an independent
    /// receiver; events published before the call are not replayed.
    fn subscribe_events(&self) -> broadcast::Receiver<RendererEvent>;
}

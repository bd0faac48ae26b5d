//! Persistent now-playing notification abstraction.
//!
//! Hosts render a media-style notification (or its platform equivalent)
//! from the [`NowPlayingInfo`] snapshot and wire the transport buttons back
//! into the player's command surface using [`TransportAction`] identifiers.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Transport controls a notification exposes. The host maps each action to
/// whatever intent/callback mechanism its platform uses and feeds the
/// resulting taps back into the player's command surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransportAction {
    Play,
    Pause,
    SkipNext,
    SkipPrevious,
}

/// Everything a notification needs to render one refresh.
///
/// This is deliberately a flat, owned snapshot rather than a reference into
/// player state: the presenter runs fire-and-forget and may outlive the
/// state it was handed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NowPlayingInfo {
    /// Opaque track identifier, stable across refreshes of the same track.
    pub track_id: String,
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    /// Artwork reference (URL or local path). Presenters must fall back to
    /// a default image when this is absent or fails to load; artwork
    /// failures never block playback.
    pub artwork: Option<String>,
    pub is_playing: bool,
    pub position_ms: u64,
    pub duration_ms: u64,
}

/// Persistent UI affordance for the current playback state.
///
/// The orchestrator calls [`refresh`](NotificationPresenter::refresh) on
/// every state publish without awaiting the outcome on its own task, and
/// never retries: a dropped notification update is not fatal to playback.
#[async_trait::async_trait]
pub trait NotificationPresenter: Send + Sync {
    /// Render or update the notification from the given snapshot.
    async fn refresh(&self, info: &NowPlayingInfo) -> Result<()>;

    /// Remove the notification, e.g. on orchestrator shutdown.
    async fn dismiss(&self) -> Result<()>;
}

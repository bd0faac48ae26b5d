//! State sampling.
//!
//! Reads the renderer's live flags and freezes them into an immutable
//! [`PlayerState`]. The orchestrator drives this both on a fixed period
//! and immediately after every state-changing command, always from the
//! same task, so a sample never races a command mutation.

use std::sync::Arc;

use player_bridge::{BridgeError, MediaRenderer};
use tracing::debug;

use crate::model::{PlayerState, Track};

/// Produces [`PlayerState`] snapshots from renderer readings.
pub struct StateSampler {
    renderer: Arc<dyn MediaRenderer>,
}

impl StateSampler {
    pub fn new(renderer: Arc<dyn MediaRenderer>) -> Self {
        Self { renderer }
    }

    /// Freeze the renderer's current readings against `track`.
    ///
    /// Returns `None` when the renderer has nothing loaded or a reading
    /// fails - sampling is a silent skip in both cases, never an error.
    /// When the renderer cannot report a duration yet (still buffering),
    /// the track's own metadata duration is used so the snapshot stays
    /// self-consistent.
    pub async fn sample(&self, track: &Track) -> Option<PlayerState> {
        let is_playing = match self.renderer.is_playing().await {
            Ok(value) => value,
            Err(BridgeError::NoTrackLoaded) => return None,
            Err(e) => {
                debug!(error = %e, "sampling skipped: renderer query failed");
                return None;
            }
        };

        let position_ms = match self.renderer.position_ms().await {
            Ok(value) => value,
            Err(e) => {
                debug!(error = %e, "sampling skipped: position unavailable");
                return None;
            }
        };

        let duration_ms = match self.renderer.duration_ms().await {
            Ok(value) if value > 0 => value,
            _ => track.duration_ms,
        };

        Some(PlayerState::new(
            track.clone(),
            is_playing,
            position_ms,
            duration_ms,
        ))
    }
}

//! Observer attach/detach protocol.
//!
//! A [`PlayerHandle`] is the capability an out-of-process observer (a UI
//! layer) holds onto the orchestrator: the command surface plus one state
//! subscription. It is deliberately *revocable* rather than owning - the
//! service keeps no reference back to the handle, and once the service
//! shuts down every method on a surviving handle degrades to a logged
//! no-op. A handle therefore can neither keep the orchestrator alive nor
//! receive callbacks after it is gone.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::broadcast::StateStream;
use crate::model::{PlayerState, Track};
use crate::orchestrator::Command;

/// Capability-scoped reference to a running [`PlayerService`].
///
/// Commands are fire-and-forget; outcomes arrive through
/// [`next_state`](PlayerHandle::next_state). Detach is idempotent, and
/// dropping the handle detaches implicitly.
///
/// [`PlayerService`]: crate::PlayerService
pub struct PlayerHandle {
    commands: mpsc::Sender<Command>,
    stream: Option<StateStream>,
    cancel: CancellationToken,
}

impl PlayerHandle {
    pub(crate) fn new(
        commands: mpsc::Sender<Command>,
        stream: StateStream,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            commands,
            stream: Some(stream),
            cancel,
        }
    }

    /// Replace the active playlist and start playing at `start_index`.
    pub async fn load_playlist(&self, tracks: Vec<Track>, start_index: usize) {
        self.send(Command::LoadPlaylist {
            tracks,
            start_index,
        })
        .await;
    }

    pub async fn play(&self) {
        self.send(Command::Play).await;
    }

    pub async fn pause(&self) {
        self.send(Command::Pause).await;
    }

    pub async fn toggle_playback(&self) {
        self.send(Command::TogglePlayback).await;
    }

    pub async fn seek_to(&self, position_ms: u64) {
        self.send(Command::SeekTo(position_ms)).await;
    }

    pub async fn skip_next(&self) {
        self.send(Command::SkipNext).await;
    }

    pub async fn skip_previous(&self) {
        self.send(Command::SkipPrevious).await;
    }

    /// Stop the whole playback service, not just this observer.
    pub async fn stop(&self) {
        self.send(Command::Stop).await;
    }

    /// Next state snapshot for this observer. The first call after attach
    /// replays the latest published snapshot. Returns `None` once detached
    /// or after the service has shut down.
    pub async fn next_state(&mut self) -> Option<PlayerState> {
        self.stream.as_mut()?.recv().await
    }

    /// Latest snapshot without consuming it, or `None` when detached or
    /// nothing has been published yet.
    pub fn latest_state(&self) -> Option<PlayerState> {
        self.stream.as_ref().and_then(StateStream::latest)
    }

    pub fn is_attached(&self) -> bool {
        self.stream.is_some()
    }

    /// End this observer's subscription. Idempotent: a second call (or a
    /// later drop) has no further effect.
    pub fn detach(&mut self) {
        if self.stream.take().is_some() {
            debug!("observer detached");
        }
    }

    async fn send(&self, command: Command) {
        if self.cancel.is_cancelled() {
            debug!(?command, "command dropped: service stopped");
            return;
        }
        if self.commands.send(command).await.is_err() {
            warn!("command dropped: service stopped");
        }
    }
}

impl Drop for PlayerHandle {
    fn drop(&mut self) {
        self.detach();
    }
}

impl std::fmt::Debug for PlayerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerHandle")
            .field("attached", &self.is_attached())
            .finish()
    }
}

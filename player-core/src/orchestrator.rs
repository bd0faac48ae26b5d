//! # Playback Orchestrator
//!
//! The top-level state machine. One actor task owns the renderer handle
//! and the playlist/index pair; everything that mutates playback flows
//! through its `select!` loop:
//!
//! ```text
//! ┌────────────┐  commands (mpsc, FIFO)   ┌──────────────────┐
//! │PlayerHandle├─────────────────────────>│                  │
//! └────────────┘                          │   Orchestrator   │
//! ┌────────────┐  Ended/PlayingChanged    │   (one task)     │
//! │MediaRender.├─────────────────────────>│                  │
//! └────────────┘                          │  1 Hz sampler ───┤ (timer on
//!                                         └────────┬─────────┘  same loop)
//!                                 publish snapshot │
//!                                                  ▼
//!                                     ┌──────────────────┐   replayed to
//!                                     │ StateBroadcaster ├──> observers
//!                                     └──────────────────┘
//! ```
//!
//! Commands are applied strictly in arrival order and never coalesced; a
//! skip issued right after a load is applied only after the load completed.
//! Invalid commands (empty playlist, seek past the end, skip at a
//! boundary) are logged no-ops - the transport surface survives arbitrary
//! button mashing without ever raising.
//!
//! Every state-changing command is followed by an immediate out-of-band
//! sample-and-publish, so observer feedback is not bounded by the sampling
//! period. Each publish also fires the notification presenter on a
//! detached task; its failures are logged and dropped.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use player_bridge::{MediaRenderer, NotificationPresenter, NowPlayingInfo, RendererEvent};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::broadcast::StateBroadcaster;
use crate::config::PlayerConfig;
use crate::error::{PlayerError, Result};
use crate::handle::PlayerHandle;
use crate::model::{PlayerState, Playlist, Track};
use crate::navigator;
use crate::sampler::StateSampler;

/// Transport commands accepted by the orchestrator.
///
/// All variants are fire-and-forget: outcomes are observed through the
/// state subscription, never through return values.
#[derive(Debug)]
pub(crate) enum Command {
    LoadPlaylist {
        tracks: Vec<Track>,
        start_index: usize,
    },
    Play,
    Pause,
    TogglePlayback,
    SeekTo(u64),
    SkipNext,
    SkipPrevious,
    Stop,
}

enum Direction {
    Forward,
    Backward,
}

/// Long-lived playback service with an explicit start/stop contract.
///
/// Starting spawns the orchestrator task; the service persists across
/// observer attach/detach cycles and stops only on [`shutdown`]
/// (or when dropped). Callers can query [`is_running`] instead of assuming
/// liveness.
///
/// [`shutdown`]: PlayerService::shutdown
/// [`is_running`]: PlayerService::is_running
pub struct PlayerService {
    commands: mpsc::Sender<Command>,
    broadcaster: StateBroadcaster,
    cancel: CancellationToken,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl PlayerService {
    /// Spawn the orchestrator task and return its controlling service.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(
        renderer: Arc<dyn MediaRenderer>,
        presenter: Arc<dyn NotificationPresenter>,
        config: PlayerConfig,
    ) -> Result<Self> {
        config.validate().map_err(PlayerError::InvalidConfig)?;

        let (commands, command_rx) = mpsc::channel(config.command_buffer);
        let cancel = CancellationToken::new();
        let broadcaster = StateBroadcaster::new();

        let orchestrator = Orchestrator {
            renderer: Arc::clone(&renderer),
            presenter,
            sampler: StateSampler::new(renderer),
            broadcaster: broadcaster.clone(),
            cancel: cancel.clone(),
            playlist: None,
        };
        let task = tokio::spawn(orchestrator.run(command_rx, config.sample_interval));
        info!("playback service started");

        Ok(Self {
            commands,
            broadcaster,
            cancel,
            task: Mutex::new(Some(task)),
        })
    }

    /// Whether the orchestrator task is still alive.
    pub fn is_running(&self) -> bool {
        !self.cancel.is_cancelled()
            && self
                .task
                .lock()
                .as_ref()
                .is_some_and(|task| !task.is_finished())
    }

    /// Attach an observer, returning a revocable capability over the
    /// command surface and the state subscription.
    ///
    /// The service keeps no reference to the handle: dropping or detaching
    /// it cannot leak the orchestrator, and a handle outliving the service
    /// degrades to a no-op surface rather than a dangling callback target.
    pub fn attach(&self) -> PlayerHandle {
        let handle = PlayerHandle::new(
            self.commands.clone(),
            self.broadcaster.subscribe(),
            self.cancel.clone(),
        );
        debug!(
            observers = self.broadcaster.observer_count(),
            "observer attached"
        );
        handle
    }

    /// Stop the orchestrator: the sampler timer is disarmed, the renderer
    /// released, the notification dismissed and every state subscription
    /// ended. Does not wait for in-flight notification refreshes.
    pub async fn shutdown(&self) {
        self.cancel.cancel();
        let task = self.task.lock().take();
        if let Some(task) = task {
            if task.await.is_err() {
                warn!("orchestrator task aborted unexpectedly");
            }
        }
        info!("playback service stopped");
    }
}

impl Drop for PlayerService {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

struct Orchestrator {
    renderer: Arc<dyn MediaRenderer>,
    presenter: Arc<dyn NotificationPresenter>,
    sampler: StateSampler,
    broadcaster: StateBroadcaster,
    cancel: CancellationToken,
    playlist: Option<Playlist>,
}

impl Orchestrator {
    async fn run(mut self, mut commands: mpsc::Receiver<Command>, sample_interval: Duration) {
        let mut ticker = tokio::time::interval(sample_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut renderer_events = self.renderer.subscribe_events();
        let mut renderer_live = true;

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => break,
                Some(command) = commands.recv() => {
                    self.apply(command).await;
                }
                _ = ticker.tick() => {
                    self.sample_and_publish().await;
                }
                event = renderer_events.recv(), if renderer_live => match event {
                    Ok(event) => self.on_renderer_event(event).await,
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        warn!(missed, "renderer events lagged; resampling");
                        self.sample_and_publish().await;
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        renderer_live = false;
                    }
                },
            }
        }

        if let Err(e) = self.renderer.release().await {
            warn!(error = %e, "renderer release failed during shutdown");
        }
        if let Err(e) = self.presenter.dismiss().await {
            debug!(error = %e, "notification dismiss failed during shutdown");
        }
        // Revoke the state channel so every observer's pending recv ends
        // instead of pending against a channel no one publishes to anymore.
        self.broadcaster.close();
        debug!("orchestrator loop exited");
    }

    async fn apply(&mut self, command: Command) {
        match command {
            Command::LoadPlaylist {
                tracks,
                start_index,
            } => match Playlist::new(tracks, start_index) {
                Ok(playlist) => {
                    info!(
                        len = playlist.len(),
                        start_index,
                        title = %playlist.current_track().title,
                        "playlist loaded"
                    );
                    self.playlist = Some(playlist);
                    self.load_current().await;
                }
                Err(e) => warn!(error = %e, "load_playlist rejected"),
            },
            Command::Play => {
                if self.playlist.is_none() {
                    debug!("play ignored: no playlist loaded");
                    return;
                }
                if let Err(e) = self.renderer.play().await {
                    warn!(error = %e, "play failed");
                }
                self.sample_and_publish().await;
            }
            Command::Pause => {
                if self.playlist.is_none() {
                    debug!("pause ignored: no playlist loaded");
                    return;
                }
                if let Err(e) = self.renderer.pause().await {
                    warn!(error = %e, "pause failed");
                }
                self.sample_and_publish().await;
            }
            Command::TogglePlayback => {
                if self.playlist.is_none() {
                    debug!("toggle ignored: no playlist loaded");
                    return;
                }
                let playing = self.renderer.is_playing().await.unwrap_or(false);
                let result = if playing {
                    self.renderer.pause().await
                } else {
                    self.renderer.play().await
                };
                if let Err(e) = result {
                    warn!(error = %e, "toggle failed");
                }
                self.sample_and_publish().await;
            }
            Command::SeekTo(position_ms) => self.seek_to(position_ms).await,
            Command::SkipNext => self.advance(Direction::Forward).await,
            Command::SkipPrevious => self.advance(Direction::Backward).await,
            Command::Stop => {
                info!("stop command received");
                self.cancel.cancel();
            }
        }
    }

    /// Seek within the loaded track. Positions past the duration are
    /// rejected as a no-op with no emission.
    async fn seek_to(&mut self, position_ms: u64) {
        let Some(playlist) = &self.playlist else {
            debug!("seek ignored: no playlist loaded");
            return;
        };
        let duration_ms = match self.renderer.duration_ms().await {
            Ok(value) if value > 0 => value,
            _ => playlist.current_track().duration_ms,
        };
        if position_ms > duration_ms {
            debug!(position_ms, duration_ms, "seek out of bounds, ignoring");
            return;
        }
        if let Err(e) = self.renderer.seek(position_ms).await {
            warn!(error = %e, "seek failed");
        }
        self.sample_and_publish().await;
    }

    /// Move to the adjacent track per the navigator's clamp policy. At a
    /// playlist boundary this is a complete no-op: no renderer call, no
    /// emission.
    async fn advance(&mut self, direction: Direction) {
        let Some(playlist) = self.playlist.as_mut() else {
            debug!("skip ignored: no playlist loaded");
            return;
        };
        let target = match direction {
            Direction::Forward => navigator::next(playlist),
            Direction::Backward => navigator::previous(playlist),
        };
        let Some(index) = target else {
            debug!(
                current = playlist.current_index(),
                "at playlist boundary, not advancing"
            );
            return;
        };
        if let Err(e) = playlist.set_current(index) {
            // Unreachable while the navigator honors playlist bounds.
            warn!(error = %e, "navigator produced invalid index");
            return;
        }
        self.load_current().await;
    }

    /// Load the current playlist track into the renderer and start it.
    /// Loading is always followed by an implicit play: selecting a track
    /// starts playback immediately.
    async fn load_current(&mut self) {
        let Some(playlist) = &self.playlist else {
            return;
        };
        let track = playlist.current_track().clone();
        debug!(track = %track.id.as_key(), title = %track.title, "loading track");
        if let Err(e) = self.renderer.load(&track.stream_ref).await {
            // A failed load surfaces later as an Errored renderer event,
            // which advances past the broken track.
            warn!(track = %track.id.as_key(), error = %e, "renderer load failed");
            return;
        }
        if let Err(e) = self.renderer.play().await {
            warn!(track = %track.id.as_key(), error = %e, "renderer play failed");
        }
        self.sample_and_publish().await;
    }

    async fn on_renderer_event(&mut self, event: RendererEvent) {
        match event {
            // Natural end of track advances exactly like an explicit skip.
            RendererEvent::Ended => self.advance(Direction::Forward).await,
            // A failed track is treated like a finished one so playback
            // stays resilient to single-track failures.
            RendererEvent::Errored(message) => {
                warn!(message, "renderer reported an error, skipping track");
                self.advance(Direction::Forward).await;
            }
            RendererEvent::PlayingChanged(is_playing) => {
                debug!(is_playing, "renderer playing state changed");
                self.sample_and_publish().await;
            }
        }
    }

    /// Freeze a snapshot, publish it, and kick the notification refresh on
    /// a detached task. A silent no-op when nothing is loaded.
    async fn sample_and_publish(&self) {
        let Some(playlist) = &self.playlist else {
            return;
        };
        let Some(state) = self.sampler.sample(playlist.current_track()).await else {
            return;
        };
        self.broadcaster.publish(state.clone());

        let presenter = Arc::clone(&self.presenter);
        tokio::spawn(async move {
            if let Err(e) = presenter.refresh(&now_playing_info(&state)).await {
                debug!(error = %e, "notification refresh failed");
            }
        });
    }
}

fn now_playing_info(state: &PlayerState) -> NowPlayingInfo {
    NowPlayingInfo {
        track_id: state.track.id.as_key(),
        title: state.track.title.clone(),
        artist: state.track.artist.clone(),
        album: state.track.album.clone(),
        artwork: state
            .track
            .artwork_large
            .clone()
            .or_else(|| state.track.artwork_small.clone()),
        is_playing: state.is_playing,
        position_ms: state.position_ms,
        duration_ms: state.duration_ms,
    }
}

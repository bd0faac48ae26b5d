//! # Playback Orchestrator
//!
//! The engineering core of the mobile player: a long-lived service that
//! owns the single active playback resource, applies transport commands in
//! strict order, and continuously republishes immutable state snapshots to
//! any number of attached observers.
//!
//! ## Overview
//!
//! - [`model`] - `Track`, `Playlist`, `PlayerState` value types
//! - [`navigator`] - pure next/previous index policy (clamp, never wrap)
//! - [`sampler`] - freezes renderer readings into `PlayerState` snapshots
//! - [`broadcast`] - latest-value publish/subscribe hub with replay on attach
//! - [`orchestrator`] - the single-threaded command loop ([`PlayerService`])
//! - [`handle`] - revocable attach/detach capability for remote observers
//! - [`config`] / [`logging`] - service tuning and tracing bootstrap
//!
//! ## Concurrency model
//!
//! All mutation happens on one actor task: commands arrive over a bounded
//! mpsc channel, the periodic sampler is a timer armed on the same
//! `select!` loop, and renderer events join through the same loop. No
//! command is ever applied concurrently with another command or with a
//! sampling tick. Observers only ever see frozen [`model::PlayerState`]
//! values, never a live reference into orchestrator-owned state.

pub mod broadcast;
pub mod config;
pub mod error;
pub mod handle;
pub mod logging;
pub mod model;
pub mod navigator;
pub mod orchestrator;
pub mod sampler;

pub use broadcast::{StateBroadcaster, StateStream};
pub use config::PlayerConfig;
pub use error::{PlayerError, Result};
pub use handle::PlayerHandle;
pub use model::{PlayerState, Playlist, Track, TrackId, TrackOrigin};
pub use orchestrator::PlayerService;

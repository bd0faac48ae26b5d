//! Umbrella crate for the mobile player workspace.
//!
//! Host applications can depend on `mobile-player` alone and reach every
//! workspace crate through the re-exports below, or depend on the individual
//! crates (`player-core`, `player-catalog`, `player-bridge`) directly.
//!
//! A typical host wires things up like this:
//!
//! ```no_run
//! use std::sync::Arc;
//! use mobile_player::catalog::{CatalogClient, CatalogConfig, ReqwestHttpClient};
//! use mobile_player::core::{PlayerConfig, PlayerService};
//! # use mobile_player::bridge::{MediaRenderer, NotificationPresenter};
//! # async fn run(renderer: Arc<dyn MediaRenderer>, presenter: Arc<dyn NotificationPresenter>) -> Result<(), Box<dyn std::error::Error>> {
//! let http = Arc::new(ReqwestHttpClient::new()?);
//! let catalog = CatalogClient::new(http, CatalogConfig::default());
//!
//! let service = PlayerService::start(renderer, presenter, PlayerConfig::default())?;
//! let mut handle = service.attach();
//!
//! let tracks = catalog.chart_tracks().await?;
//! handle.load_playlist(tracks, 0).await;
//! while let Some(state) = handle.next_state().await {
//!     println!("{} @ {}ms", state.track.title, state.position_ms);
//! }
//! # Ok(())
//! # }
//! ```

pub use player_bridge as bridge;
pub use player_catalog as catalog;
pub use player_core as core;

pub use player_core::{PlayerConfig, PlayerHandle, PlayerService, PlayerState, Track, TrackId};

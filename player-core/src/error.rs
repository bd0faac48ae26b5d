use player_bridge::BridgeError;
use thiserror::Error;

/// Errors surfaced by the playback core.
///
/// Note that the transport-control surface itself is crash-proof: invalid
/// commands (seek past the end, skip at a playlist boundary, empty
/// playlist) are rejected as logged no-ops inside the orchestrator and
/// never reach callers as errors.
#[derive(Error, Debug)]
pub enum PlayerError {
    #[error("Invalid playlist: {0}")]
    InvalidPlaylist(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Logging initialization failed: {0}")]
    LoggingInit(String),

    #[error("Bridge error: {0}")]
    Bridge(#[from] BridgeError),
}

pub type Result<T> = std::result::Result<T, PlayerError>;

use player_bridge::BridgeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog API answered with a non-success status.
    #[error("Catalog API error: HTTP {status}")]
    Api { status: u16 },

    /// Transport or decoding failure below the API level.
    #[error("Catalog transport error: {0}")]
    Transport(#[from] BridgeError),

    /// The on-device index could not be read.
    #[error("Local index unavailable: {0}")]
    LocalIndex(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

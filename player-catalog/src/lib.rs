//! # Track Sources
//!
//! Where tracks come from: the remote catalog API and the on-device
//! library. Both are thin I/O layers around the playback core - they
//! produce immutable [`Track`](player_core::Track) values and nothing
//! else.
//!
//! - [`api`] - HTTP client for the remote chart/search endpoints
//! - [`local`] - folder scanner backed by audio tag reading
//! - [`repository`] - the UI-facing facade with soft-fail semantics
//! - [`http`] - reqwest implementation of the bridge `HttpClient`

pub mod api;
pub mod error;
pub mod http;
pub mod local;
pub mod repository;

pub use api::{CatalogClient, CatalogConfig};
pub use error::{CatalogError, Result};
pub use http::ReqwestHttpClient;
pub use local::{FolderIndex, LocalIndex};
pub use repository::TrackRepository;

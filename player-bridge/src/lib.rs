//! Platform bridge traits for the mobile player core.
//!
//! The playback core is platform-agnostic: everything that touches a real
//! device capability (the native decode/output engine, the persistent
//! media notification, the network) is reached through a trait defined
//! here. Host applications provide concrete implementations that satisfy
//! their platform constraints (Android, iOS, desktop).
//!
//! ## Modules
//!
//! - [`renderer`] - the black-box decode/output engine ([`MediaRenderer`])
//! - [`notification`] - the persistent now-playing affordance
//! - [`http`] - async HTTP client abstraction for the remote catalog
//! - [`error`] - the shared [`BridgeError`] type

pub mod error;
pub mod http;
pub mod notification;
pub mod renderer;

pub use error::{BridgeError, Result};
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use notification::{NotificationPresenter, NowPlayingInfo, TransportAction};
pub use renderer::{MediaRenderer, RendererEvent};

//! Remote Catalog API Client
//!
//! Fetches chart and search results from the track catalog service.
//!
//! ## API Endpoints
//!
//! - **Chart**: `GET {base}/chart` - editorial top tracks
//! - **Search**: `GET {base}/search?q={query}` - full-text track search
//!
//! The wire format nests artist and album objects inside each track and
//! reports durations in whole seconds; mapping to the core model
//! normalizes durations to milliseconds and flattens the nesting.

use std::sync::Arc;
use std::time::Duration;

use player_bridge::{HttpClient, HttpMethod, HttpRequest};
use serde::Deserialize;
use tracing::debug;

use player_core::{Track, TrackId};

use crate::error::{CatalogError, Result};

/// Default public catalog endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.deezer.com";

/// Timeout for catalog requests.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Catalog client configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }
}

/// HTTP client for the remote track catalog.
pub struct CatalogClient {
    http: Arc<dyn HttpClient>,
    config: CatalogConfig,
}

impl CatalogClient {
    pub fn new(http: Arc<dyn HttpClient>, config: CatalogConfig) -> Self {
        Self { http, config }
    }

    /// Fetch the editorial chart.
    pub async fn chart_tracks(&self) -> Result<Vec<Track>> {
        let url = format!("{}/chart", self.config.base_url);
        let response: ChartResponse = self.get(&url).await?;
        Ok(map_tracks(response.tracks.data))
    }

    /// Full-text search over the catalog.
    pub async fn search_tracks(&self, query: &str) -> Result<Vec<Track>> {
        let url = format!(
            "{}/search?q={}",
            self.config.base_url,
            urlencoding::encode(query)
        );
        let response: TrackListPayload = self.get(&url).await?;
        Ok(map_tracks(response.data))
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(url, "catalog request");
        let request = HttpRequest::new(HttpMethod::Get, url).timeout(self.config.timeout);
        let response = self.http.execute(request).await?;
        if !response.is_success() {
            return Err(CatalogError::Api {
                status: response.status,
            });
        }
        Ok(response.json()?)
    }
}

fn map_tracks(payloads: Vec<TrackPayload>) -> Vec<Track> {
    payloads.into_iter().map(TrackPayload::into_track).collect()
}

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct ChartResponse {
    tracks: TrackListPayload,
}

#[derive(Debug, Default, Deserialize)]
struct TrackListPayload {
    #[serde(default)]
    data: Vec<TrackPayload>,
}

#[derive(Debug, Deserialize)]
struct TrackPayload {
    id: i64,
    title: String,
    /// Seconds on the wire.
    duration: u64,
    /// Playable preview URL.
    preview: String,
    artist: ArtistPayload,
    album: AlbumPayload,
}

#[derive(Debug, Deserialize)]
struct ArtistPayload {
    name: String,
    picture_small: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AlbumPayload {
    title: String,
    cover_medium: Option<String>,
    cover_big: Option<String>,
}

impl TrackPayload {
    fn into_track(self) -> Track {
        Track {
            id: TrackId::remote(self.id),
            title: self.title,
            artist: self.artist.name,
            album: Some(self.album.title),
            duration_ms: self.duration * 1000,
            stream_ref: self.preview,
            artwork_small: self.album.cover_medium,
            artwork_large: self.album.cover_big,
            artist_pic: self.artist.picture_small,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use player_bridge::{BridgeError, HttpResponse, Result as BridgeResult};
    use std::collections::HashMap;

    const CHART_BODY: &str = r#"{
        "tracks": {
            "data": [{
                "id": 3135556,
                "title": "Harder Better Faster Stronger",
                "duration": 224,
                "preview": "https://cdn.example.com/3135556.mp3",
                "artist": {
                    "name": "Daft Punk",
                    "picture_small": "https://img.example.com/daft-small.jpg"
                },
                "album": {
                    "title": "Discovery",
                    "cover_medium": "https://img.example.com/discovery-m.jpg",
                    "cover_big": "https://img.example.com/discovery-xl.jpg"
                }
            }]
        }
    }"#;

    struct CannedHttp {
        status: u16,
        body: &'static str,
        fail: bool,
    }

    #[async_trait::async_trait]
    impl HttpClient for CannedHttp {
        async fn execute(&self, request: HttpRequest) -> BridgeResult<HttpResponse> {
            if self.fail {
                return Err(BridgeError::OperationFailed(format!(
                    "connection refused: {}",
                    request.url
                )));
            }
            Ok(HttpResponse {
                status: self.status,
                headers: HashMap::new(),
                body: Bytes::from_static(self.body.as_bytes()),
            })
        }
    }

    fn client(status: u16, body: &'static str) -> CatalogClient {
        CatalogClient::new(
            Arc::new(CannedHttp {
                status,
                body,
                fail: false,
            }),
            CatalogConfig::default(),
        )
    }

    #[tokio::test]
    async fn chart_maps_wire_payload_to_tracks() {
        let tracks = client(200, CHART_BODY).chart_tracks().await.unwrap();
        assert_eq!(tracks.len(), 1);

        let track = &tracks[0];
        assert_eq!(track.id, TrackId::remote(3135556));
        assert_eq!(track.title, "Harder Better Faster Stronger");
        assert_eq!(track.artist, "Daft Punk");
        assert_eq!(track.album.as_deref(), Some("Discovery"));
        // Wire seconds become milliseconds.
        assert_eq!(track.duration_ms, 224_000);
        assert_eq!(track.stream_ref, "https://cdn.example.com/3135556.mp3");
        assert_eq!(
            track.artwork_large.as_deref(),
            Some("https://img.example.com/discovery-xl.jpg")
        );
        assert!(!track.is_local());
    }

    #[tokio::test]
    async fn search_handles_missing_data_field() {
        let tracks = client(200, "{}").search_tracks("nothing").await.unwrap();
        assert!(tracks.is_empty());
    }

    #[tokio::test]
    async fn non_success_status_is_an_api_error() {
        let result = client(503, "busy").chart_tracks().await;
        assert!(matches!(result, Err(CatalogError::Api { status: 503 })));
    }

    #[tokio::test]
    async fn transport_failure_is_a_transport_error() {
        let client = CatalogClient::new(
            Arc::new(CannedHttp {
                status: 0,
                body: "",
                fail: true,
            }),
            CatalogConfig::default(),
        );
        let result = client.search_tracks("daft punk").await;
        assert!(matches!(result, Err(CatalogError::Transport(_))));
    }

    #[tokio::test]
    async fn search_query_is_percent_encoded() {
        struct UrlCapture;

        #[async_trait::async_trait]
        impl HttpClient for UrlCapture {
            async fn execute(&self, request: HttpRequest) -> BridgeResult<HttpResponse> {
                assert!(request.url.ends_with("/search?q=daft%20punk%26co"));
                Ok(HttpResponse {
                    status: 200,
                    headers: HashMap::new(),
                    body: Bytes::from_static(b"{}"),
                })
            }
        }

        let client = CatalogClient::new(Arc::new(UrlCapture), CatalogConfig::default());
        client.search_tracks("daft punk&co").await.unwrap();
    }
}

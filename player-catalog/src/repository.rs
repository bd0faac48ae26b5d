//! Unified track lookup across remote catalog and local index.
//!
//! The repository soft-fails: any source error is logged and surfaces as an
//! empty list. Callers render "no results" instead of an error screen, and
//! one broken source never takes down the other.

use std::sync::Arc;

use tracing::warn;

use player_core::Track;

use crate::api::CatalogClient;
use crate::local::LocalIndex;

pub struct TrackRepository {
    catalog: CatalogClient,
    local: Arc<dyn LocalIndex>,
}

impl TrackRepository {
    pub fn new(catalog: CatalogClient, local: Arc<dyn LocalIndex>) -> Self {
        Self { catalog, local }
    }

    /// Current chart tracks, or empty on any catalog failure.
    pub async fn chart_tracks(&self) -> Vec<Track> {
        match self.catalog.chart_tracks().await {
            Ok(tracks) => tracks,
            Err(e) => {
                warn!(error = %e, "chart fetch failed");
                Vec::new()
            }
        }
    }

    /// Remote search results, or empty on any catalog failure.
    pub async fn search_tracks(&self, query: &str) -> Vec<Track> {
        match self.catalog.search_tracks(query).await {
            Ok(tracks) => tracks,
            Err(e) => {
                warn!(error = %e, query, "search failed");
                Vec::new()
            }
        }
    }

    /// All on-device tracks, or empty if the index is unavailable.
    pub async fn local_tracks(&self) -> Vec<Track> {
        match self.local.list_tracks().await {
            Ok(tracks) => tracks,
            Err(e) => {
                warn!(error = %e, "local index unavailable");
                Vec::new()
            }
        }
    }

    /// Case-insensitive substring match on title or artist over the local
    /// index.
    pub async fn search_local_tracks(&self, query: &str) -> Vec<Track> {
        let needle = query.to_lowercase();
        self.local_tracks()
            .await
            .into_iter()
            .filter(|track| {
                track.title.to_lowercase().contains(&needle)
                    || track.artist.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mockall::mock;
    use player_core::TrackId;

    use crate::api::CatalogConfig;
    use crate::error::{CatalogError, Result};
    use player_bridge::{BridgeError, HttpClient, HttpRequest, HttpResponse};

    mock! {
        Http {}

        #[async_trait]
        impl HttpClient for Http {
            async fn execute(&self, request: HttpRequest) -> player_bridge::Result<HttpResponse>;
        }
    }

    mock! {
        Index {}

        #[async_trait]
        impl LocalIndex for Index {
            async fn list_tracks(&self) -> Result<Vec<Track>>;
        }
    }

    fn offline_http() -> MockHttp {
        let mut http = MockHttp::new();
        http.expect_execute()
            .returning(|_| Err(BridgeError::OperationFailed("offline".to_string())));
        http
    }

    fn local_track(raw: i64, title: &str, artist: &str) -> Track {
        Track {
            id: TrackId::local(raw),
            title: title.to_string(),
            artist: artist.to_string(),
            album: None,
            duration_ms: 200_000,
            stream_ref: format!("/music/{raw}.mp3"),
            artwork_small: None,
            artwork_large: None,
            artist_pic: None,
        }
    }

    fn repository(local: MockIndex) -> TrackRepository {
        let catalog = CatalogClient::new(Arc::new(offline_http()), CatalogConfig::default());
        TrackRepository::new(catalog, Arc::new(local))
    }

    #[tokio::test]
    async fn remote_failures_become_empty_lists() {
        let repo = repository(MockIndex::new());
        assert!(repo.chart_tracks().await.is_empty());
        assert!(repo.search_tracks("anything").await.is_empty());
    }

    #[tokio::test]
    async fn broken_local_index_becomes_empty_list() {
        let mut index = MockIndex::new();
        index
            .expect_list_tracks()
            .returning(|| Err(CatalogError::LocalIndex("no storage permission".to_string())));

        let repo = repository(index);
        assert!(repo.local_tracks().await.is_empty());
        assert!(repo.search_local_tracks("x").await.is_empty());
    }

    #[tokio::test]
    async fn local_search_matches_title_and_artist_case_insensitively() {
        let mut index = MockIndex::new();
        index.expect_list_tracks().returning(|| {
            Ok(vec![
                local_track(1, "Harder Better Faster", "Daft Punk"),
                local_track(2, "Yesterday", "The Beatles"),
                local_track(3, "One More Time", "daft punk"),
            ])
        });
        let repo = repository(index);

        let by_artist = repo.search_local_tracks("DAFT").await;
        assert_eq!(by_artist.len(), 2);

        let by_title = repo.search_local_tracks("yester").await;
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].title, "Yesterday");

        assert!(repo.search_local_tracks("nothing here").await.is_empty());
    }
}

//! Playback data model.
//!
//! All three types here are immutable values: a [`Track`] never changes
//! after construction, a [`Playlist`] is fully replaced on every load, and
//! a [`PlayerState`] is a frozen snapshot produced by the sampler or a
//! command handler. Observers always see complete, self-consistent values.

use serde::{Deserialize, Serialize};

use crate::error::{PlayerError, Result};

/// Provenance of a track: the remote catalog API or the on-device index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackOrigin {
    RemoteCatalog,
    LocalDevice,
}

/// Track identity, namespaced by origin.
///
/// Raw numeric ids come from two unrelated sources (the catalog API and the
/// device media index), so the id alone cannot be trusted as identity. The
/// `(origin, raw)` pair can: a remote track and a local track that happen
/// to share a raw id are never considered the same track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackId {
    pub origin: TrackOrigin,
    pub raw: i64,
}

impl TrackId {
    pub fn remote(raw: i64) -> Self {
        Self {
            origin: TrackOrigin::RemoteCatalog,
            raw,
        }
    }

    pub fn local(raw: i64) -> Self {
        Self {
            origin: TrackOrigin::LocalDevice,
            raw,
        }
    }

    /// Stable string form, usable as an opaque key across FFI boundaries.
    pub fn as_key(&self) -> String {
        match self.origin {
            TrackOrigin::RemoteCatalog => format!("remote:{}", self.raw),
            TrackOrigin::LocalDevice => format!("local:{}", self.raw),
        }
    }
}

/// Immutable track description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    /// Duration in milliseconds, as reported by the source. The renderer's
    /// own reading takes precedence once the track is loaded.
    pub duration_ms: u64,
    /// Playable resource reference: a preview URL for catalog tracks, a
    /// filesystem path for local ones.
    pub stream_ref: String,
    pub artwork_small: Option<String>,
    pub artwork_large: Option<String>,
    pub artist_pic: Option<String>,
}

impl Track {
    pub fn is_local(&self) -> bool {
        self.id.origin == TrackOrigin::LocalDevice
    }
}

/// An ordered, non-empty sequence of tracks plus the current index.
///
/// Invariant: `current < tracks.len()` always holds. The track list is
/// never mutated after construction; loading a new playlist replaces the
/// whole value atomically. Only the current index moves, and only through
/// [`set_current`](Playlist::set_current) which re-checks the bound.
#[derive(Debug, Clone)]
pub struct Playlist {
    tracks: Vec<Track>,
    current: usize,
}

impl Playlist {
    /// Build a playlist, rejecting empty track lists and out-of-range
    /// start indices.
    pub fn new(tracks: Vec<Track>, start_index: usize) -> Result<Self> {
        if tracks.is_empty() {
            return Err(PlayerError::InvalidPlaylist(
                "track list must not be empty".to_string(),
            ));
        }
        if start_index >= tracks.len() {
            return Err(PlayerError::InvalidPlaylist(format!(
                "start index {} out of range for {} tracks",
                start_index,
                tracks.len()
            )));
        }
        Ok(Self {
            tracks,
            current: start_index,
        })
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_track(&self) -> &Track {
        &self.tracks[self.current]
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Move the current index. Out-of-range values are rejected so the
    /// playlist invariant can never be broken from outside.
    pub fn set_current(&mut self, index: usize) -> Result<()> {
        if index >= self.tracks.len() {
            return Err(PlayerError::InvalidPlaylist(format!(
                "index {} out of range for {} tracks",
                index,
                self.tracks.len()
            )));
        }
        self.current = index;
        Ok(())
    }
}

/// Frozen snapshot of playback state.
///
/// Produced once per sampling tick and once per state-changing command;
/// never mutated after construction. `position_ms` is clamped into
/// `0..=duration_ms` at construction so consumers never see a position
/// past the end of the track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub track: Track,
    pub is_playing: bool,
    pub position_ms: u64,
    pub duration_ms: u64,
}

impl PlayerState {
    pub fn new(track: Track, is_playing: bool, position_ms: u64, duration_ms: u64) -> Self {
        Self {
            track,
            is_playing,
            position_ms: position_ms.min(duration_ms),
            duration_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn track(raw: i64, title: &str) -> Track {
        Track {
            id: TrackId::remote(raw),
            title: title.to_string(),
            artist: "Artist".to_string(),
            album: None,
            duration_ms: 180_000,
            stream_ref: format!("https://cdn.example.com/{raw}.mp3"),
            artwork_small: None,
            artwork_large: None,
            artist_pic: None,
        }
    }

    #[test]
    fn track_ids_are_namespaced_by_origin() {
        assert_ne!(TrackId::remote(5), TrackId::local(5));
        assert_eq!(TrackId::remote(5), TrackId::remote(5));
        assert_eq!(TrackId::remote(5).as_key(), "remote:5");
        assert_eq!(TrackId::local(5).as_key(), "local:5");
    }

    #[test]
    fn playlist_rejects_empty_track_list() {
        let result = Playlist::new(Vec::new(), 0);
        assert!(matches!(result, Err(PlayerError::InvalidPlaylist(_))));
    }

    #[test]
    fn playlist_rejects_out_of_range_start_index() {
        let result = Playlist::new(vec![track(1, "A")], 1);
        assert!(matches!(result, Err(PlayerError::InvalidPlaylist(_))));
    }

    #[test]
    fn playlist_exposes_current_track() {
        let playlist = Playlist::new(vec![track(1, "A"), track(2, "B")], 1).unwrap();
        assert_eq!(playlist.len(), 2);
        assert_eq!(playlist.current_index(), 1);
        assert_eq!(playlist.current_track().title, "B");
    }

    #[test]
    fn playlist_set_current_validates_bounds() {
        let mut playlist = Playlist::new(vec![track(1, "A"), track(2, "B")], 0).unwrap();
        playlist.set_current(1).unwrap();
        assert_eq!(playlist.current_index(), 1);
        assert!(playlist.set_current(2).is_err());
        // Failed move leaves the index untouched.
        assert_eq!(playlist.current_index(), 1);
    }

    #[test]
    fn player_state_clamps_position_to_duration() {
        let state = PlayerState::new(track(1, "A"), true, 200_000, 180_000);
        assert_eq!(state.position_ms, 180_000);

        let state = PlayerState::new(track(1, "A"), false, 5_000, 180_000);
        assert_eq!(state.position_ms, 5_000);
    }
}

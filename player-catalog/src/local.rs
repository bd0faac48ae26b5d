//! On-device track index.
//!
//! [`FolderIndex`] walks a music directory, reads tags with `lofty`, and
//! produces [`Track`] values marked
//! [`TrackOrigin::LocalDevice`](player_core::TrackOrigin). Files that
//! cannot be parsed are skipped with a warning - a corrupted download must
//! never hide the rest of the library.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use lofty::file::{AudioFile, TaggedFileExt};
use lofty::probe::Probe;
use lofty::tag::Accessor;
use tracing::{debug, warn};
use walkdir::WalkDir;

use player_core::{Track, TrackId};

use crate::error::{CatalogError, Result};

/// Extensions considered playable audio.
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "flac", "ogg", "m4a", "wav", "aac", "opus"];

/// Source of on-device tracks.
///
/// Implementations live behind this trait so hosts with a platform media
/// index (MediaStore, MPMediaLibrary) can substitute their own without
/// touching the repository layer.
#[async_trait]
pub trait LocalIndex: Send + Sync {
    /// All playable tracks currently known to the device, sorted by title.
    async fn list_tracks(&self) -> Result<Vec<Track>>;
}

/// Filesystem-backed [`LocalIndex`] scanning one root directory.
pub struct FolderIndex {
    root: PathBuf,
}

impl FolderIndex {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl LocalIndex for FolderIndex {
    async fn list_tracks(&self) -> Result<Vec<Track>> {
        let root = self.root.clone();
        // Tag parsing is blocking I/O; keep it off the async executor.
        tokio::task::spawn_blocking(move || scan_folder(&root))
            .await
            .map_err(|e| CatalogError::LocalIndex(format!("scan task failed: {e}")))?
    }
}

fn scan_folder(root: &Path) -> Result<Vec<Track>> {
    if !root.is_dir() {
        return Err(CatalogError::LocalIndex(format!(
            "not a directory: {}",
            root.display()
        )));
    }

    let mut tracks = Vec::new();
    for entry in WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| entry.ok())
    {
        let path = entry.path();
        if !entry.file_type().is_file() || !is_audio_file(path) {
            continue;
        }
        match read_track(path) {
            Ok(track) => tracks.push(track),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unreadable audio file");
            }
        }
    }

    tracks.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
    debug!(count = tracks.len(), root = %root.display(), "local scan complete");
    Ok(tracks)
}

fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            AUDIO_EXTENSIONS.iter().any(|known| *known == ext)
        })
        .unwrap_or(false)
}

fn read_track(path: &Path) -> Result<Track> {
    let tagged = Probe::open(path)
        .map_err(|e| CatalogError::LocalIndex(e.to_string()))?
        .read()
        .map_err(|e| CatalogError::LocalIndex(e.to_string()))?;

    let duration_ms = tagged.properties().duration().as_millis() as u64;
    let tag = tagged.primary_tag().or_else(|| tagged.first_tag());

    let fallback_title = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("Unknown")
        .to_string();
    let title = tag
        .and_then(|t| t.title())
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or(fallback_title);
    let artist = tag
        .and_then(|t| t.artist())
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
        .unwrap_or_else(|| "Unknown Artist".to_string());
    let album = tag
        .and_then(|t| t.album())
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty());

    Ok(Track {
        id: TrackId::local(path_id(path)),
        title,
        artist,
        album,
        duration_ms,
        stream_ref: path.to_string_lossy().into_owned(),
        artwork_small: None,
        artwork_large: None,
        artist_pic: None,
    })
}

/// Stable numeric id derived from the file path. Survives rescans as long
/// as the file does not move.
fn path_id(path: &Path) -> i64 {
    let mut hasher = DefaultHasher::new();
    path.hash(&mut hasher);
    hasher.finish() as i64
}

//! Playlist navigation policy.
//!
//! Pure index arithmetic over a [`Playlist`]: advance clamps at both ends
//! of the list. No wrap-around, no error - at the last track `next` simply
//! reports "no advance" and playback stays where it is.

use crate::model::Playlist;

/// Index of the track after the current one, or `None` at the end.
pub fn next(playlist: &Playlist) -> Option<usize> {
    let candidate = playlist.current_index() + 1;
    (candidate < playlist.len()).then_some(candidate)
}

/// Index of the track before the current one, or `None` at the start.
pub fn previous(playlist: &Playlist) -> Option<usize> {
    playlist.current_index().checked_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Track, TrackId};

    fn playlist(len: usize, current: usize) -> Playlist {
        let tracks = (0..len)
            .map(|i| Track {
                id: TrackId::remote(i as i64),
                title: format!("Track {i}"),
                artist: "Artist".to_string(),
                album: None,
                duration_ms: 60_000,
                stream_ref: format!("ref-{i}"),
                artwork_small: None,
                artwork_large: None,
                artist_pic: None,
            })
            .collect();
        Playlist::new(tracks, current).unwrap()
    }

    #[test]
    fn next_advances_everywhere_except_the_last_index() {
        for len in 1..=5 {
            for i in 0..len {
                let expected = if i + 1 < len { Some(i + 1) } else { None };
                assert_eq!(next(&playlist(len, i)), expected, "len={len} i={i}");
            }
        }
    }

    #[test]
    fn previous_retreats_everywhere_except_index_zero() {
        for len in 1..=5usize {
            for i in 0..len {
                let expected = i.checked_sub(1);
                assert_eq!(previous(&playlist(len, i)), expected, "len={len} i={i}");
            }
        }
    }

    #[test]
    fn single_track_playlist_never_advances() {
        let p = playlist(1, 0);
        assert_eq!(next(&p), None);
        assert_eq!(previous(&p), None);
    }
}

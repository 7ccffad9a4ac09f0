//! Song title extraction from metadata frames
//!
//! A metadata frame is ASCII/Latin-1 text of the form
//! `StreamTitle='Artist - Song';StreamUrl='...';` padded with NUL bytes to a
//! multiple of 16.

use crate::error::{Result, TitleError};

/// Extract the song title from a decoded metadata frame.
///
/// Takes the text strictly between the first `='` and the first `';`. The
/// text is returned verbatim — no trimming, no unescaping. A `';` embedded
/// in the title itself truncates the result early; that ambiguity is part
/// of the wire format, not something this parser can repair.
///
/// A marker sitting at index 0 is a match like any other; only a genuinely
/// absent marker (or an end marker before the opening one) fails.
pub fn extract_song_title(frame: &[u8]) -> Result<String> {
    let text = String::from_utf8_lossy(frame);

    let start = text.find("='").ok_or(TitleError::TitleMarkerNotFound)?;
    let end = text.find("';").ok_or(TitleError::TitleMarkerNotFound)?;
    if end < start + 2 {
        return Err(TitleError::TitleMarkerNotFound);
    }

    Ok(text[start + 2..end].to_string())
}

/// A title split into artist and song for display purposes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackInfo {
    pub artist: Option<String>,
    pub song: Option<String>,
}

impl TrackInfo {
    /// Split `"Artist - Song"` on the first ` - ` separator. Without the
    /// separator the whole string becomes the song.
    pub fn from_title(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return Self {
                artist: None,
                song: None,
            };
        }

        match raw.split_once(" - ") {
            Some((artist, song)) => {
                let artist = artist.trim();
                let song = song.trim();
                Self {
                    artist: (!artist.is_empty()).then(|| artist.to_string()),
                    song: (!song.is_empty()).then(|| song.to_string()),
                }
            }
            None => Self {
                artist: None,
                song: Some(raw.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- extract_song_title ---

    #[test]
    fn extract_standard_field() {
        let frame = b"StreamTitle='Artist - Song';";
        assert_eq!(extract_song_title(frame).unwrap(), "Artist - Song");
    }

    #[test]
    fn extract_with_trailing_stream_url() {
        let frame = b"StreamTitle='Pink Floyd - Comfortably Numb';StreamUrl='';";
        assert_eq!(
            extract_song_title(frame).unwrap(),
            "Pink Floyd - Comfortably Numb"
        );
    }

    #[test]
    fn extract_from_null_padded_frame() {
        let mut frame = b"StreamTitle='Test Song';".to_vec();
        frame.resize(48, 0);
        assert_eq!(extract_song_title(&frame).unwrap(), "Test Song");
    }

    #[test]
    fn extract_empty_title() {
        let frame = b"StreamTitle='';";
        assert_eq!(extract_song_title(frame).unwrap(), "");
    }

    #[test]
    fn extract_preserves_whitespace() {
        let frame = b"StreamTitle=' spaced out ';";
        assert_eq!(extract_song_title(frame).unwrap(), " spaced out ");
    }

    #[test]
    fn extract_marker_at_index_zero() {
        // an opening marker at position 0 is found, not "falsy"
        let frame = b"='Zero';";
        assert_eq!(extract_song_title(frame).unwrap(), "Zero");
    }

    #[test]
    fn extract_missing_open_marker() {
        let frame = b"StreamTitle=Unquoted;";
        assert!(matches!(
            extract_song_title(frame),
            Err(TitleError::TitleMarkerNotFound)
        ));
    }

    #[test]
    fn extract_missing_close_marker() {
        let frame = b"StreamTitle='No Closing Quote";
        assert!(matches!(
            extract_song_title(frame),
            Err(TitleError::TitleMarkerNotFound)
        ));
    }

    #[test]
    fn extract_empty_frame() {
        assert!(matches!(
            extract_song_title(b""),
            Err(TitleError::TitleMarkerNotFound)
        ));
    }

    #[test]
    fn extract_close_marker_before_open_marker() {
        let frame = b"';garbage='";
        assert!(matches!(
            extract_song_title(frame),
            Err(TitleError::TitleMarkerNotFound)
        ));
    }

    #[test]
    fn extract_embedded_terminator_truncates() {
        // "';" inside the title ends the match early; inherited wire-format
        // ambiguity, not repaired here
        let frame = b"StreamTitle='It'; she said';";
        assert_eq!(extract_song_title(frame).unwrap(), "It");
    }

    #[test]
    fn extract_apostrophe_without_semicolon_is_kept() {
        let frame = b"StreamTitle='It's Alright';";
        assert_eq!(extract_song_title(frame).unwrap(), "It's Alright");
    }

    #[test]
    fn extract_tolerates_invalid_utf8_prefix() {
        let mut frame = vec![0xFF, 0xFE];
        frame.extend_from_slice(b"StreamTitle='Fallback';");
        assert_eq!(extract_song_title(&frame).unwrap(), "Fallback");
    }

    #[test]
    fn extract_unicode_title() {
        let frame = "StreamTitle='Motörhead - Ace of Spades';".as_bytes();
        assert_eq!(
            extract_song_title(frame).unwrap(),
            "Motörhead - Ace of Spades"
        );
    }

    // --- TrackInfo ---

    #[test]
    fn track_with_separator() {
        let t = TrackInfo::from_title("Pink Floyd - Comfortably Numb");
        assert_eq!(t.artist.as_deref(), Some("Pink Floyd"));
        assert_eq!(t.song.as_deref(), Some("Comfortably Numb"));
    }

    #[test]
    fn track_without_separator() {
        let t = TrackInfo::from_title("Just A Title");
        assert_eq!(t.artist, None);
        assert_eq!(t.song.as_deref(), Some("Just A Title"));
    }

    #[test]
    fn track_empty() {
        let t = TrackInfo::from_title("");
        assert_eq!(t.artist, None);
        assert_eq!(t.song, None);
    }

    #[test]
    fn track_whitespace_only() {
        let t = TrackInfo::from_title("   ");
        assert_eq!(t.artist, None);
        assert_eq!(t.song, None);
    }

    #[test]
    fn track_multiple_separators_split_on_first() {
        let t = TrackInfo::from_title("A - B - C");
        assert_eq!(t.artist.as_deref(), Some("A"));
        assert_eq!(t.song.as_deref(), Some("B - C"));
    }

    #[test]
    fn track_dash_without_spaces_is_not_a_separator() {
        let t = TrackInfo::from_title("Artist-Title");
        assert_eq!(t.artist, None);
        assert_eq!(t.song.as_deref(), Some("Artist-Title"));
    }

    #[test]
    fn track_trims_around_separator() {
        let t = TrackInfo::from_title("  Artist  -  Title  ");
        assert_eq!(t.artist.as_deref(), Some("Artist"));
        assert_eq!(t.song.as_deref(), Some("Title"));
    }

    #[test]
    fn track_unicode() {
        let t = TrackInfo::from_title("アーティスト - 曲名");
        assert_eq!(t.artist.as_deref(), Some("アーティスト"));
        assert_eq!(t.song.as_deref(), Some("曲名"));
    }
}

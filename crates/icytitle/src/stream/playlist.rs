//! Playlist indirection (PLS/M3U)
//!
//! Station directories commonly hand out a `.pls` or `.m3u` document rather
//! than the stream URL itself. These are followed (through the same
//! transport used for the stream) until a non-playlist URL remains.

use std::io::Read;

use crate::config::network::{MAX_PLAYLIST_DEPTH, PLAYLIST_MAX_BYTES};
use crate::config::FetchConfig;
use crate::error::{Result, TitleError};
use crate::stream::transport::Transport;

/// Playlist format detected from a URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaylistKind {
    Pls,
    M3u,
}

/// Detect a playlist by URL extension.
///
/// `.m3u8` is deliberately not a playlist here: that is an HLS manifest,
/// and HLS streams carry no ICY metadata.
pub fn playlist_kind(url: &str) -> Option<PlaylistKind> {
    let lower = url.to_lowercase();
    let path = lower.split(['?', '#']).next().unwrap_or(&lower);
    match path.rsplit('.').next() {
        Some("pls") => Some(PlaylistKind::Pls),
        Some("m3u") => Some(PlaylistKind::M3u),
        _ => None,
    }
}

/// First stream entry of a playlist document.
pub fn first_entry(kind: PlaylistKind, content: &str, base_url: &str) -> Option<String> {
    match kind {
        PlaylistKind::Pls => content.lines().find_map(|line| {
            let (key, value) = line.trim().split_once('=')?;
            if !key.trim().to_lowercase().starts_with("file") {
                return None;
            }
            let value = value.trim();
            value.starts_with("http").then(|| value.to_string())
        }),
        PlaylistKind::M3u => content.lines().find_map(|line| {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            if line.starts_with("http://") || line.starts_with("https://") {
                Some(line.to_string())
            } else if !line.contains('=') {
                Some(format!("{base_url}/{line}"))
            } else {
                None
            }
        }),
    }
}

/// Follow PLS/M3U indirection until a non-playlist URL remains.
///
/// Fetches each playlist document through `transport`, capped at
/// `PLAYLIST_MAX_BYTES`, and recurses up to `MAX_PLAYLIST_DEPTH` levels.
/// Non-playlist URLs pass through untouched without any fetch.
pub fn resolve_playlist_url(
    transport: &dyn Transport,
    url: &str,
    config: &FetchConfig,
) -> Result<String> {
    let mut current = url.to_string();
    for _ in 0..=MAX_PLAYLIST_DEPTH {
        let Some(kind) = playlist_kind(&current) else {
            return Ok(current);
        };
        let content = fetch_playlist(transport, &current, config)?;
        current = first_entry(kind, &content, base_of(&current)).ok_or_else(|| {
            TitleError::Stream(format!("no stream entry in playlist {current}"))
        })?;
    }
    Err(TitleError::Stream("playlist nesting too deep".to_string()))
}

fn fetch_playlist(transport: &dyn Transport, url: &str, config: &FetchConfig) -> Result<String> {
    let handle = transport.open(url, config)?;
    let mut raw = Vec::new();
    handle.body.take(PLAYLIST_MAX_BYTES).read_to_end(&mut raw)?;
    Ok(String::from_utf8_lossy(&raw).into_owned())
}

fn base_of(url: &str) -> &str {
    url.rsplit_once('/').map(|(base, _)| base).unwrap_or("")
}

//! ICY response header parsing
//!
//! The metadata byte stride arrives in the `icy-metaint` response header;
//! servers usually announce the station name and bitrate alongside it.

use reqwest::header::HeaderMap;

use crate::error::{Result, TitleError};

/// Headers advertised by an ICY-capable server
#[derive(Debug, Clone)]
pub struct IcyHeaders {
    /// Byte stride between the start of an audio block and its length byte
    pub metaint: usize,
    pub station_name: Option<String>,
    pub content_type: Option<String>,
    pub bitrate: Option<u32>,
}

impl IcyHeaders {
    /// Parse a response header map. Only the stride is mandatory; the
    /// station fields are captured when present and never fail the parse.
    pub fn parse(headers: &HeaderMap) -> Result<Self> {
        Ok(Self {
            metaint: resolve_metaint(headers)?,
            station_name: text_header(headers, "icy-name"),
            content_type: text_header(headers, "content-type"),
            bitrate: text_header(headers, "icy-br").and_then(|v| v.trim().parse().ok()),
        })
    }
}

/// Resolve the metadata byte stride from `icy-metaint`.
///
/// Some servers repeat the header; the last value wins. A missing header
/// means the server did not honor `Icy-MetaData: 1`; a zero or non-numeric
/// value is unusable as a stride.
pub fn resolve_metaint(headers: &HeaderMap) -> Result<usize> {
    let value = headers
        .get_all("icy-metaint")
        .iter()
        .last()
        .ok_or(TitleError::MetaintMissing)?;

    let text = value
        .to_str()
        .map_err(|_| TitleError::InvalidMetaint("<non-ascii>".to_string()))?;

    let stride: usize = text
        .trim()
        .parse()
        .map_err(|_| TitleError::InvalidMetaint(text.to_string()))?;

    if stride == 0 {
        return Err(TitleError::InvalidMetaint(text.to_string()));
    }
    Ok(stride)
}

fn text_header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

//! Replay transport
//!
//! Serves canned response headers and body bytes through the [`Transport`]
//! trait — a captured stream dump from disk, or in-memory bytes in tests.
//! No network is touched.

use std::io::Cursor;
use std::path::Path;

use reqwest::header::{HeaderMap, HeaderValue};

use crate::config::FetchConfig;
use crate::error::Result;
use crate::stream::transport::{StreamHandle, Transport};

/// Replays a recorded server response
pub struct ReplayTransport {
    headers: HeaderMap,
    body: Vec<u8>,
}

impl ReplayTransport {
    /// Serve `body` with an `icy-metaint` header announcing `metaint`.
    pub fn new(metaint: usize, body: Vec<u8>) -> Self {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(&metaint.to_string()) {
            headers.insert("icy-metaint", value);
        }
        Self { headers, body }
    }

    /// Serve `body` with an arbitrary header set.
    pub fn with_headers(headers: HeaderMap, body: Vec<u8>) -> Self {
        Self { headers, body }
    }

    /// Replay a stream dump previously captured to disk.
    pub fn from_file(metaint: usize, path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(metaint, std::fs::read(path)?))
    }
}

impl Transport for ReplayTransport {
    fn open(&self, _url: &str, _config: &FetchConfig) -> Result<StreamHandle> {
        Ok(StreamHandle {
            headers: self.headers.clone(),
            body: Box::new(Cursor::new(self.body.clone())),
        })
    }
}

//! Transport abstraction
//!
//! One capability covers every way of reaching a stream server: perform a
//! GET with the ICY negotiation headers and hand back the response headers
//! plus a body reader. The framing and title parsing code upstream never
//! sees which adapter did the work.

use std::io::Read;

use reqwest::header::HeaderMap;

use crate::config::FetchConfig;
use crate::error::Result;

/// Response headers plus a body reader for one GET against a stream URL
pub struct StreamHandle {
    pub headers: HeaderMap,
    pub body: Box<dyn Read + Send>,
}

/// A way of issuing the ICY-negotiated GET request.
///
/// Implementations send `Icy-MetaData: 1` and the configured `User-Agent`,
/// check the response status, and return the headers together with a reader
/// over the raw body bytes. They do not interpret the stream.
pub trait Transport {
    fn open(&self, url: &str, config: &FetchConfig) -> Result<StreamHandle>;
}

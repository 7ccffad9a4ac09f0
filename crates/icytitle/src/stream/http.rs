//! HTTP transport
//!
//! The default adapter: a blocking reqwest client with redirect following
//! and TLS. The response body doubles as the byte reader.

use std::time::Duration;

use crate::config::network::CONNECT_TIMEOUT_SECS;
use crate::config::FetchConfig;
use crate::error::{Result, TitleError};
use crate::stream::transport::{StreamHandle, Transport};

/// Reaches the server through `reqwest::blocking`
pub struct HttpTransport;

impl Transport for HttpTransport {
    fn open(&self, url: &str, config: &FetchConfig) -> Result<StreamHandle> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.as_str())
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(config.read_timeout)
            .build()?;

        let response = client.get(url).header("Icy-MetaData", "1").send()?;

        if !response.status().is_success() {
            return Err(TitleError::Stream(format!("HTTP {}", response.status())));
        }

        let headers = response.headers().clone();
        Ok(StreamHandle {
            headers,
            body: Box::new(response),
        })
    }
}

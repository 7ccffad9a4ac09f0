//! Error types for icytitle
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// Main error type for the icytitle engine
#[derive(Error, Debug)]
pub enum TitleError {
    #[error("{}", friendly_network_error(.0))]
    Network(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stream error: {0}")]
    Stream(String),

    #[error("Server response carries no icy-metaint header")]
    MetaintMissing,

    #[error("Unusable icy-metaint value: {0:?}")]
    InvalidMetaint(String),

    #[error("Stream ended after {received} of {required} bytes")]
    FrameIncomplete { received: usize, required: usize },

    #[error("Metadata block has no StreamTitle field")]
    TitleMarkerNotFound,

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Fetch cancelled")]
    Cancelled,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type alias for icytitle
pub type Result<T> = std::result::Result<T, TitleError>;

fn friendly_network_error(e: &reqwest::Error) -> String {
    if e.is_builder() {
        if let Some(url) = e.url() {
            return format!("Invalid URL: {url}");
        }
        return "Invalid URL".to_string();
    }
    if e.is_connect() {
        if let Some(url) = e.url() {
            return format!("Could not connect to {}", url.host_str().unwrap_or("server"));
        }
        return "Could not connect to server".to_string();
    }
    if e.is_timeout() {
        return "Connection timed out".to_string();
    }
    format!("Network error: {e}")
}
